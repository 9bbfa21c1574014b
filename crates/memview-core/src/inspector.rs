use crate::address::{self, PageGeometry, PageWindow};
use crate::cell::CellWidth;
use crate::error::Result;
use crate::fetch::PageFetch;
use crate::state::{FetchTicket, Motion, Notice, ViewState};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Drives page fetches for one remote host and publishes every new
/// [`ViewState`] to its subscribers.
pub struct Inspector<F: PageFetch> {
    fetcher: Arc<F>,
    host: String,
    geometry: PageGeometry,
    runtime: Handle,
    state: Arc<watch::Sender<ViewState>>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl<F: PageFetch> Inspector<F> {
    pub fn new(
        fetcher: F,
        host: impl Into<String>,
        geometry: PageGeometry,
        width: CellWidth,
        runtime: Handle,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::new(geometry, width));
        Self {
            fetcher: Arc::new(fetcher),
            host: host.into(),
            geometry,
            runtime,
            state: Arc::new(state),
            in_flight: Mutex::new(None),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    fn update(&self, f: impl FnOnce(ViewState) -> ViewState) {
        self.state.send_modify(|state| {
            *state = f(std::mem::take(state));
        });
    }

    /// Address typed by the user, hex with no prefix required.
    pub fn navigate(&self, address_text: &str) -> Result<FetchTicket> {
        match address::translate(address_text, self.geometry.page_size()) {
            Ok(window) => {
                log::debug!("Navigate to {:?}", address_text);
                Ok(self.fetch(window))
            }
            Err(e) => {
                log::debug!("Rejected address {:?}: {}", address_text, e);
                self.update(|state| state.reject(&e));
                Err(e)
            }
        }
    }

    /// Jump dialog input; `+hex`/`-hex` are relative to the cursor.
    pub fn jump(&self, input: &str) -> Result<FetchTicket> {
        let current = self.snapshot().cursor_address().unwrap_or(0);
        match address::parse_jump(input, current) {
            Ok(target) => self.goto(target),
            Err(e) => {
                self.update(|state| state.reject(&e));
                Err(e)
            }
        }
    }

    pub fn goto(&self, address: u64) -> Result<FetchTicket> {
        let window = address::locate(address, self.geometry.page_size())?;
        Ok(self.fetch(window))
    }

    /// Fetches the current page again, keeping the cursor where it is.
    pub fn reload(&self) -> Result<FetchTicket> {
        let snapshot = self.snapshot();
        let address = snapshot
            .cursor_address()
            .or_else(|| snapshot.pending().map(|t| t.window.address()))
            .unwrap_or(0);
        self.goto(address)
    }

    pub fn hover(&self, offset: usize) {
        self.update(|state| state.hover(offset));
    }

    pub fn set_width(&self, width: CellWidth) {
        self.update(|state| state.set_width(width));
    }

    pub fn notify(&self, notice: Notice) {
        self.update(|state| state.with_notice(notice));
    }

    pub fn dismiss_notice(&self) {
        if self.state.borrow().notice().is_some() {
            self.update(ViewState::dismiss_notice);
        }
    }

    /// Moves the cursor, fetching the neighbouring page when the move leaves
    /// the current one.
    pub fn move_cursor(&self, motion: Motion) -> Option<FetchTicket> {
        let snapshot = self.snapshot();
        let target = snapshot.motion_target(motion)?;
        let page = snapshot.page()?;

        match page.offset_of(target) {
            Some(offset) => {
                self.hover(offset);
                None
            }
            None => self.goto(target).ok(),
        }
    }

    fn fetch(&self, window: PageWindow) -> FetchTicket {
        let mut ticket = FetchTicket { token: 0, window };
        self.state.send_modify(|state| {
            let (next, issued) = std::mem::take(state).begin_fetch(window);
            *state = next;
            ticket = issued;
        });

        let fetcher = Arc::clone(&self.fetcher);
        let host = self.host.clone();
        let state = Arc::clone(&self.state);

        let task = self.runtime.spawn(async move {
            let result = fetcher
                .fetch_page(&host, ticket.window.base_offset, ticket.window.length)
                .await;
            state.send_modify(|s| {
                *s = std::mem::take(s).apply_fetch(ticket.token, result);
            });
        });

        if let Ok(mut slot) = self.in_flight.lock()
            && let Some(previous) = slot.replace(task.abort_handle())
        {
            previous.abort();
        }

        ticket
    }
}

impl<F: PageFetch> Drop for Inspector<F> {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.in_flight.lock()
            && let Some(task) = slot.take()
        {
            task.abort();
        }
    }
}
