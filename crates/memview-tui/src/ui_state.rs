use crate::theme::Theme;
use crate::ui::dialog_cell::CellDialog;
use crate::ui::dialog_jump_to_address::JumpToAddressDialog;
use crate::ui::statusbar::StatusBarState;
use memview_core::{CellWidth, Motion};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// What a key press or mouse event asks the inspector to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Exit,
    Move(Motion),
    SetWidth(CellWidth),
    Hover(usize),
    /// Double click on a cell: select it and open the cell dialog.
    Inspect(usize),
    Jump(String),
    OpenJumpDialog,
    OpenCellDialog,
    Reload,
}

/// Screen area of one rendered cell, keyed by its offset within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellHitbox {
    pub area: Rect,
    pub offset: usize,
}

pub struct UIState {
    pub theme: Theme,
    pub host: String,
    pub status_bar: StatusBarState,
    pub jump_to_address_dialog: JumpToAddressDialog,
    pub cell_dialog: CellDialog,
    pub cell_hitboxes: Vec<CellHitbox>,
    pub last_click: Option<(usize, Instant)>,
    pub should_quit: bool,
}

impl UIState {
    pub fn new(theme: Theme, host: impl Into<String>) -> Self {
        Self {
            theme,
            host: host.into(),
            status_bar: StatusBarState::new(),
            jump_to_address_dialog: JumpToAddressDialog::new(),
            cell_dialog: CellDialog::new(),
            cell_hitboxes: Vec::new(),
            last_click: None,
            should_quit: false,
        }
    }

    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_bar.set_message(message);
    }

    pub fn is_dialog_active(&self) -> bool {
        self.jump_to_address_dialog.active || self.cell_dialog.active
    }

    /// Offset of the cell drawn at the given terminal position.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.cell_hitboxes
            .iter()
            .find(|hitbox| hitbox.area.contains(position))
            .map(|hitbox| hitbox.offset)
    }

    /// Records a left click and reports whether it completes a double click
    /// on the same cell.
    pub fn register_click(&mut self, offset: usize, now: Instant) -> bool {
        let is_double = matches!(
            self.last_click,
            Some((last, at)) if last == offset && now.duration_since(at) <= DOUBLE_CLICK_INTERVAL
        );
        self.last_click = if is_double { None } else { Some((offset, now)) };
        is_double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_uses_hitboxes() {
        let mut ui_state = UIState::new(Theme::default(), "host");
        ui_state.cell_hitboxes = vec![
            CellHitbox {
                area: Rect::new(10, 2, 2, 1),
                offset: 0,
            },
            CellHitbox {
                area: Rect::new(13, 2, 2, 1),
                offset: 1,
            },
        ];
        assert_eq!(ui_state.cell_at(10, 2), Some(0));
        assert_eq!(ui_state.cell_at(14, 2), Some(1));
        assert_eq!(ui_state.cell_at(12, 2), None);
        assert_eq!(ui_state.cell_at(10, 3), None);
    }

    #[test]
    fn test_double_click_needs_same_cell_and_short_interval() {
        let mut ui_state = UIState::new(Theme::default(), "host");
        let t0 = Instant::now();

        assert!(!ui_state.register_click(4, t0));
        assert!(ui_state.register_click(4, t0 + Duration::from_millis(100)));
        // a third click starts over
        assert!(!ui_state.register_click(4, t0 + Duration::from_millis(150)));

        assert!(!ui_state.register_click(8, t0 + Duration::from_millis(200)));
        assert!(!ui_state.register_click(8, t0 + Duration::from_millis(900)));
    }
}
