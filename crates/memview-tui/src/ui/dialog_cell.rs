use crate::theme::Theme;
use crate::ui::widget::WidgetResult;
use crate::ui_state::UIState;
use crossterm::event::{KeyCode, KeyEvent};
use memview_core::ViewState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFormat {
    #[default]
    Hex,
    Bit,
}

impl ValueFormat {
    fn toggle(self) -> Self {
        match self {
            ValueFormat::Hex => ValueFormat::Bit,
            ValueFormat::Bit => ValueFormat::Hex,
        }
    }
}

/// Read-only view of the selected cell.
pub struct CellDialog {
    pub active: bool,
    pub format: ValueFormat,
}

impl CellDialog {
    pub fn new() -> Self {
        Self {
            active: false,
            format: ValueFormat::Hex,
        }
    }

    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
    }
}

impl Default for CellDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Hex is most significant byte first; bits are grouped per byte, highest
/// byte first.
pub fn format_value(value: &[u8], format: ValueFormat) -> String {
    match format {
        ValueFormat::Hex => memview_core::cell::render_hex(value),
        ValueFormat::Bit => value
            .iter()
            .rev()
            .map(|b| format!("{:08b}", b))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

pub fn render(f: &mut Frame, area: Rect, dialog: &CellDialog, view: &ViewState, theme: &Theme) {
    if !dialog.active {
        return;
    }

    let (Some(page), Some(offset), Some(value)) = (
        view.page(),
        view.selection().offset(),
        view.selection().value(),
    ) else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Cell (Tab: Hex/Bit, Esc: close) ")
        .border_style(Style::default().fg(theme.dialog_border))
        .style(Style::default().bg(theme.dialog_bg).fg(theme.dialog_fg));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Fill(1),
        ])
        .split(area);

    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(80),
            Constraint::Fill(1),
        ])
        .split(layout[1])[1];
    f.render_widget(Clear, area);

    let mode = |format: ValueFormat, label: &'static str| {
        let marker = if dialog.format == format { "(*)" } else { "( )" };
        Span::raw(format!("{} {}  ", marker, label))
    };

    let lines = vec![
        Line::from(format!(
            "Address: 0x{:x}   Width: {}",
            page.address_of(offset),
            view.width()
        )),
        Line::from(vec![mode(ValueFormat::Hex, "HEX"), mode(ValueFormat::Bit, "BIT")]),
        Line::from(Span::styled(
            format_value(value, dialog.format),
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn handle_input(key: KeyEvent, ui_state: &mut UIState) -> WidgetResult {
    let dialog = &mut ui_state.cell_dialog;
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            dialog.close();
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            dialog.format = dialog.format.toggle();
        }
        _ => {}
    }
    WidgetResult::Handled
}
