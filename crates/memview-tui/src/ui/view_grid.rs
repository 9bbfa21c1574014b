use crate::ui_state::{CellHitbox, UIState, ViewAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use memview_core::{CellWidth, Motion, ViewState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::widget::{Widget, WidgetResult};

// "0000000000000000  "
const ADDRESS_COLUMN: u16 = 18;

pub struct GridView;

/// Columns needed to draw one row of the grid, borders included.
pub fn grid_width(view: &ViewState) -> u16 {
    let row_length = view.geometry().row_length() as u16;
    let cells = row_length / view.width().bytes() as u16;
    let gap = if row_length >= 2 { 1 } else { 0 };
    // hex digits + one space per cell + "| " + ascii + borders
    ADDRESS_COLUMN + row_length * 2 + cells + gap + 2 + row_length + 2
}

impl Widget for GridView {
    fn render(&self, f: &mut Frame, area: Rect, view: &ViewState, ui_state: &mut UIState) {
        let theme = ui_state.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" {} /dev/mem ", ui_state.host),
                Style::default().fg(theme.title),
            ))
            .style(Style::default().bg(theme.background).fg(theme.foreground));
        let inner = block.inner(area);
        f.render_widget(block, area);

        ui_state.cell_hitboxes.clear();

        let Some(page) = view.page() else {
            let message = if view.is_loading() {
                "Loading..."
            } else {
                "No page loaded. Press g to jump to an address."
            };
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(theme.foreground)),
                inner,
            );
            return;
        };

        let selected = view.selection().offset();
        let half_row = view.geometry().row_length() / 2;
        let selected_style = Style::default()
            .bg(theme.selection_bg)
            .fg(theme.selection_fg)
            .add_modifier(Modifier::BOLD);
        let hex_style = Style::default().fg(theme.hex_bytes);

        let mut lines = Vec::new();
        for (r, row) in view.rows().iter().take(inner.height as usize).enumerate() {
            let y = inner.y + r as u16;
            let mut x = inner.x + ADDRESS_COLUMN;

            let mut spans = vec![Span::styled(
                format!("{:016X}  ", page.address_of(row.start_offset)),
                Style::default().fg(theme.address),
            )];

            for cell in &row.cells {
                if half_row > 0 && cell.start_offset - row.start_offset == half_row {
                    spans.push(Span::raw(" ")); // Extra space in the middle of the row
                    x += 1;
                }

                let cell_len = cell.hex.len() as u16;
                ui_state.cell_hitboxes.push(CellHitbox {
                    area: Rect::new(x, y, cell_len, 1).intersection(inner),
                    offset: cell.start_offset,
                });

                let style = if selected == Some(cell.start_offset) {
                    selected_style
                } else {
                    hex_style
                };
                spans.push(Span::styled(cell.hex.clone(), style));
                spans.push(Span::raw(" "));
                x += cell_len + 1;
            }

            spans.push(Span::styled(
                format!("| {}", row.ascii),
                Style::default().fg(theme.hex_ascii),
            ));
            lines.push(Line::from(spans));
        }

        f.render_widget(Paragraph::new(lines), inner);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        _view: &ViewState,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return WidgetResult::Ignored;
        }

        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => ViewAction::Move(Motion::PrevCell),
            KeyCode::Right | KeyCode::Char('l') => ViewAction::Move(Motion::NextCell),
            KeyCode::Up | KeyCode::Char('k') => ViewAction::Move(Motion::PrevLine),
            KeyCode::Down | KeyCode::Char('j') => ViewAction::Move(Motion::NextLine),
            KeyCode::PageUp | KeyCode::Char('p') => ViewAction::Move(Motion::PrevPage),
            KeyCode::PageDown | KeyCode::Char('n') => ViewAction::Move(Motion::NextPage),
            KeyCode::Char('B') => ViewAction::SetWidth(CellWidth::Byte),
            KeyCode::Char('W') => ViewAction::SetWidth(CellWidth::Word),
            KeyCode::Char('D') => ViewAction::SetWidth(CellWidth::DoubleWord),
            KeyCode::Char('Q') => ViewAction::SetWidth(CellWidth::QuadWord),
            KeyCode::Char('g') | KeyCode::Char('J') => ViewAction::OpenJumpDialog,
            KeyCode::Enter | KeyCode::Char('e') => ViewAction::OpenCellDialog,
            KeyCode::Char('r') => ViewAction::Reload,
            KeyCode::Char('q') => ViewAction::Exit,
            _ => return WidgetResult::Ignored,
        };
        WidgetResult::Action(action)
    }
}
