use crate::address::{PageGeometry, PageWindow};
use crate::cell::{self, CellWidth, DecodedRow};
use crate::error::{Result, ViewerError};
use crate::page::Page;
use crate::selection::{Selection, SelectionEvent};
use std::sync::Arc;

/// Issued for every navigation. Only the ticket carrying the latest token may
/// replace the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub window: PageWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    NextCell,
    PrevCell,
    NextLine,
    PrevLine,
    NextPage,
    PrevPage,
}

/// Everything the presenter needs to draw one frame. Updates consume the old
/// value and return the new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    geometry: PageGeometry,
    page: Option<Arc<Page>>,
    width: CellWidth,
    selection: Selection,
    latest_token: u64,
    pending: Option<FetchTicket>,
    notice: Option<Notice>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageGeometry::default(), CellWidth::default())
    }
}

impl ViewState {
    pub fn new(geometry: PageGeometry, width: CellWidth) -> Self {
        Self {
            geometry,
            page: None,
            width,
            selection: Selection::None,
            latest_token: 0,
            pending: None,
            notice: None,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_deref()
    }

    pub fn width(&self) -> CellWidth {
        self.width
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending(&self) -> Option<FetchTicket> {
        self.pending
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    pub fn cursor_address(&self) -> Option<u64> {
        let page = self.page()?;
        let offset = self.selection.offset()?;
        Some(page.address_of(offset))
    }

    /// Decoded grid of the live page, empty before the first page arrives.
    pub fn rows(&self) -> Vec<DecodedRow> {
        match self.page() {
            Some(page) => cell::decode_rows(page.bytes(), self.width, self.geometry.row_length()),
            None => Vec::new(),
        }
    }

    pub fn begin_fetch(mut self, window: PageWindow) -> (Self, FetchTicket) {
        self.latest_token += 1;
        let ticket = FetchTicket {
            token: self.latest_token,
            window,
        };
        self.pending = Some(ticket);
        (self, ticket)
    }

    pub fn apply_fetch(mut self, token: u64, result: Result<Vec<u8>>) -> Self {
        let Some(ticket) = self.pending.filter(|t| t.token == token) else {
            log::debug!(
                "Discarding stale response for token {} (latest {})",
                token,
                self.latest_token
            );
            return self;
        };
        self.pending = None;

        let window = ticket.window;
        let result = result.and_then(|bytes| {
            if bytes.len() == window.length {
                Ok(bytes)
            } else {
                Err(ViewerError::ShortRead {
                    expected: window.length,
                    actual: bytes.len(),
                })
            }
        });

        match result {
            Ok(bytes) => {
                let page = Arc::new(Page::new(window.base_offset, bytes));
                self.selection = self.selection.transition(
                    self.page.as_deref(),
                    self.width,
                    SelectionEvent::PageReplaced {
                        page: &page,
                        offset_within_page: window.offset_within_page,
                    },
                );
                self.page = Some(page);
                self.notice = None;
            }
            Err(e) => {
                log::warn!(
                    "Failed to read {} bytes at 0x{:X}: {}",
                    window.length,
                    window.base_offset,
                    e
                );
                self.notice = Some(Notice::error(format!(
                    "Read at 0x{:X} failed: {}",
                    window.address(),
                    e
                )));
            }
        }
        self
    }

    pub fn hover(mut self, offset: usize) -> Self {
        self.selection = self.selection.transition(
            self.page.as_deref(),
            self.width,
            SelectionEvent::Hover(offset),
        );
        self
    }

    pub fn set_width(mut self, width: CellWidth) -> Self {
        self.selection = self.selection.transition(
            self.page.as_deref(),
            self.width,
            SelectionEvent::WidthChange(width),
        );
        self.width = width;
        self
    }

    /// Drops the current notice once the user has moved on from it.
    pub fn dismiss_notice(mut self) -> Self {
        self.notice = None;
        self
    }

    /// Records an error that happened before any fetch was issued.
    pub fn reject(mut self, error: &ViewerError) -> Self {
        self.notice = Some(Notice::error(error.to_string()));
        self
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// Address the cursor would land on, `None` when the move would leave the
    /// 64-bit address space or nothing is selected yet.
    pub fn motion_target(&self, motion: Motion) -> Option<u64> {
        let current = self.cursor_address()?;
        let cell = self.width.bytes() as u64;
        let line = self.geometry.columns() as u64;
        let page = self.geometry.page_size();

        match motion {
            Motion::NextCell => current.checked_add(cell),
            Motion::PrevCell => current.checked_sub(cell),
            Motion::NextLine => current.checked_add(line),
            Motion::PrevLine => current.checked_sub(line),
            Motion::NextPage => current.checked_add(page),
            Motion::PrevPage => current.checked_sub(page),
        }
    }
}
