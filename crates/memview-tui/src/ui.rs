pub mod dialog_cell;
pub mod dialog_jump_to_address;
pub mod statusbar;
pub mod view_grid;
pub mod widget;

use crate::ui::statusbar::StatusBar;
use crate::ui::view_grid::{GridView, grid_width};
use crate::ui::widget::Widget;
use crate::ui_state::UIState;
use memview_core::ViewState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

pub fn ui(f: &mut Frame, view: &ViewState, ui_state: &mut UIState) {
    f.render_widget(
        Block::default().style(Style::default().bg(ui_state.theme.background)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let rows = view.geometry().rows().saturating_add(2);
    let grid_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(rows), Constraint::Fill(1)])
        .split(chunks[0])[0];
    let grid_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(grid_width(view)),
            Constraint::Fill(1),
        ])
        .split(grid_area)[1];

    GridView.render(f, grid_area, view, ui_state);
    StatusBar.render(f, chunks[1], view, ui_state);

    if ui_state.jump_to_address_dialog.active {
        dialog_jump_to_address::render(
            f,
            f.area(),
            &ui_state.jump_to_address_dialog,
            &ui_state.theme,
        );
    }

    if ui_state.cell_dialog.active {
        dialog_cell::render(f, f.area(), &ui_state.cell_dialog, view, &ui_state.theme);
    }
}
