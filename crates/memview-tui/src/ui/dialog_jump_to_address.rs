use crate::theme::Theme;
use crate::ui::widget::WidgetResult;
use crate::ui_state::{UIState, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

// 16 hex digits plus an optional sign
const MAX_INPUT: usize = 17;

pub struct JumpToAddressDialog {
    pub active: bool,
    pub input: String,
}

impl JumpToAddressDialog {
    pub fn new() -> Self {
        Self {
            active: false,
            input: String::new(),
        }
    }

    pub fn open(&mut self) {
        self.active = true;
        self.input.clear();
    }

    pub fn close(&mut self) {
        self.active = false;
        self.input.clear();
    }
}

impl Default for JumpToAddressDialog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(f: &mut Frame, area: Rect, dialog: &JumpToAddressDialog, theme: &Theme) {
    if !dialog.active {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Jump To Address (Hex, +/- relative) ")
        .border_style(Style::default().fg(theme.dialog_border))
        .style(Style::default().bg(theme.dialog_bg).fg(theme.dialog_fg));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);

    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(44),
            Constraint::Fill(1),
        ])
        .split(layout[1])[1];
    f.render_widget(Clear, area);

    let input = Paragraph::new(dialog.input.clone()).block(block).style(
        Style::default()
            .fg(theme.highlight_fg)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(input, area);
}

pub fn handle_input(key: KeyEvent, ui_state: &mut UIState) -> WidgetResult {
    let dialog = &mut ui_state.jump_to_address_dialog;
    match key.code {
        KeyCode::Esc => {
            dialog.close();
            ui_state.set_status_message("Ready");
            WidgetResult::Handled
        }
        KeyCode::Enter => {
            let input = dialog.input.clone();
            dialog.close();
            WidgetResult::Action(ViewAction::Jump(input))
        }
        KeyCode::Backspace => {
            dialog.input.pop();
            WidgetResult::Handled
        }
        KeyCode::Char(c) => {
            let sign = (c == '+' || c == '-') && dialog.input.is_empty();
            if (sign || c.is_ascii_hexdigit()) && dialog.input.len() < MAX_INPUT {
                dialog.input.push(c.to_ascii_uppercase());
            }
            WidgetResult::Handled
        }
        _ => WidgetResult::Handled,
    }
}
