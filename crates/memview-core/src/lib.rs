#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod address;
pub mod cell;
pub mod config;
pub mod error;
pub mod fetch;
pub mod inspector;
pub mod page;
pub mod selection;
pub mod state;

#[cfg(feature = "agent")]
pub mod agent;

pub use address::{PageGeometry, PageWindow};
pub use cell::{CellWidth, DecodedCell, DecodedRow};
pub use error::{Result, ViewerError};
pub use fetch::{HttpPageFetcher, PageFetch};
pub use inspector::Inspector;
pub use page::Page;
pub use selection::{Selection, SelectionEvent};
pub use state::{FetchTicket, Motion, Notice, NoticeLevel, ViewState};
