use crate::ui_state::{UIState, ViewAction};
use crossterm::event::KeyEvent;
use memview_core::ViewState;
use ratatui::Frame;
use ratatui::layout::Rect;

#[derive(Debug, PartialEq)]
pub enum WidgetResult {
    Ignored,
    Handled,
    Action(ViewAction),
}

pub trait Widget {
    fn render(&self, f: &mut Frame, area: Rect, view: &ViewState, ui_state: &mut UIState);
    fn handle_input(
        &mut self,
        key: KeyEvent,
        view: &ViewState,
        ui_state: &mut UIState,
    ) -> WidgetResult;
}
