use memview_core::agent::{self, AgentConfig};
use memview_core::config::{self, Settings};
use memview_core::{CellWidth, HttpPageFetcher, Inspector, PageGeometry};
use memview_tui::events;
use memview_tui::theme::Theme;
use memview_tui::ui_state::UIState;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "localhost:8000";

#[derive(Parser)]
#[command(name = "memview", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Viewer log file. Defaults to memview.log in the local data directory
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// -v for debug, -vv for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Browse a remote host's memory
    View(ViewArgs),
    /// Serve this machine's memory over HTTP
    Agent(AgentArgs),
}

#[derive(Args)]
struct ViewArgs {
    /// host[:port] of a running agent, with or without http://
    #[arg(long)]
    host: Option<String>,

    /// Hex address to open at
    #[arg(long)]
    address: Option<String>,

    /// byte, word, dword or qword
    #[arg(long)]
    width: Option<CellWidth>,

    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Args)]
struct AgentArgs {
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    #[arg(long, default_value = agent::DEFAULT_DEVICE)]
    device: PathBuf,

    /// Largest read a single request may ask for
    #[arg(long, default_value_t = agent::DEFAULT_MAX_LENGTH)]
    max_length: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    match cli.command {
        Command::View(args) => run_viewer(args, level, cli.log_file),
        Command::Agent(args) => run_agent(args, level),
    }
}

fn log_version() {
    log::info!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    );
}

fn run_agent(args: AgentArgs, level: LevelFilter) -> Result<()> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    log_version();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(agent::run_agent(AgentConfig {
        bind: args.bind,
        device: args.device,
        max_length: args.max_length,
    }))
}

fn run_viewer(args: ViewArgs, level: LevelFilter, log_file: Option<PathBuf>) -> Result<()> {
    // The terminal is in raw mode, so logs go to a file.
    let log_path = log_file.unwrap_or_else(config::default_log_path);
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let log_target = File::create(&log_path)
        .with_context(|| format!("cannot create log file {:?}", log_path))?;
    WriteLogger::init(level, Config::default(), log_target)?;
    log_version();

    let mut settings = Settings::load();
    let host = args
        .host
        .or_else(|| settings.last_host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let width = args.width.unwrap_or(settings.default_width);
    if let Some(timeout_ms) = args.timeout_ms {
        settings.request_timeout_ms = timeout_ms;
    }

    settings.last_host = Some(host.clone());
    if let Err(e) = settings.save() {
        log::warn!("Failed to save settings: {}", e);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let fetcher = HttpPageFetcher::new(settings.request_timeout())?;
    let inspector = Inspector::new(
        fetcher,
        host.clone(),
        PageGeometry::default(),
        width,
        runtime.handle().clone(),
    );
    log::info!("Viewing {} ({})", host, width);

    let mut ui_state = UIState::new(Theme::from_name(&settings.theme), host);
    if inspector
        .navigate(args.address.as_deref().unwrap_or("0"))
        .is_err()
    {
        ui_state.set_status_message("Invalid Hex Address");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = events::run_app(&mut terminal, &inspector, ui_state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
    )?;
    terminal.show_cursor()?;

    res
}
