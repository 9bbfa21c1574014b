use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_DEVICE: &str = "/dev/mem";
pub const DEFAULT_MAX_LENGTH: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub bind: SocketAddr,
    pub device: PathBuf,
    pub max_length: u64,
}

#[derive(Clone)]
struct AgentState {
    device: Arc<PathBuf>,
    max_length: u64,
}

#[derive(Debug, Deserialize)]
struct ReadDevmemArgs {
    offset: u64,
    length: u64,
}

/// Routes served by the agent. Read-only: there is no write endpoint.
pub fn router(device: PathBuf, max_length: u64) -> Router {
    let state = AgentState {
        device: Arc::new(device),
        max_length,
    };

    Router::new()
        .route("/devmem", get(read_devmem))
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_agent(config: AgentConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    serve(listener, config.device, config.max_length).await
}

pub async fn serve(
    listener: tokio::net::TcpListener,
    device: PathBuf,
    max_length: u64,
) -> anyhow::Result<()> {
    log::info!(
        "Agent serving {:?} on http://{}/devmem",
        device,
        listener.local_addr()?
    );

    axum::serve(listener, router(device, max_length)).await?;
    Ok(())
}

async fn read_devmem(
    State(state): State<AgentState>,
    Query(args): Query<ReadDevmemArgs>,
) -> Response {
    if args.length > state.max_length {
        return (
            StatusCode::BAD_REQUEST,
            format!(
                "length {} exceeds the limit of {} bytes",
                args.length, state.max_length
            ),
        )
            .into_response();
    }
    // The last byte read must be addressable; the end itself may be 2^64.
    if args.length > 0 && args.offset.checked_add(args.length - 1).is_none() {
        return (StatusCode::BAD_REQUEST, "offset + length overflows").into_response();
    }

    let device = Arc::clone(&state.device);
    let read =
        tokio::task::spawn_blocking(move || read_range(&device, args.offset, args.length as usize))
            .await;

    match read {
        Ok(Ok(data)) => {
            log::debug!("Read {} bytes at 0x{:X}", data.len(), args.offset);
            (StatusCode::OK, data).into_response()
        }
        Ok(Err(e)) => {
            log::warn!("Failed to open {:?}: {}", state.device, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("fail to read {}", state.device.display()),
            )
                .into_response()
        }
        Err(e) => {
            log::error!("Read task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Reads `length` bytes at `offset`. Bytes that cannot be read (holes,
/// reserved ranges, past the end of a regular file) come back as zero.
pub fn read_range(path: &Path, offset: u64, length: usize) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = vec![0u8; length];

    let whole = file
        .seek(SeekFrom::Start(offset))
        .and_then(|_| file.read_exact(&mut data));
    if whole.is_ok() {
        return Ok(data);
    }

    for (i, byte) in data.iter_mut().enumerate() {
        let Some(at) = offset.checked_add(i as u64) else {
            *byte = 0;
            continue;
        };
        let mut one = [0u8; 1];
        let read = file
            .seek(SeekFrom::Start(at))
            .and_then(|_| file.read_exact(&mut one));
        *byte = if read.is_ok() { one[0] } else { 0 };
    }
    Ok(data)
}
