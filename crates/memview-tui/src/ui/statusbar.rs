use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::UIState;
use crossterm::event::KeyEvent;
use memview_core::{NoticeLevel, ViewState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

#[derive(Debug, Clone)]
pub struct StatusBarState {
    pub message: String,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            message: "Ready".to_string(),
        }
    }
}

impl StatusBarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message<S: Into<String>>(&mut self, message: S) {
        self.message = message.into();
    }
}

/// Right-hand side of the status bar: host, cell width and cursor position.
pub fn position_info(view: &ViewState, host: &str) -> String {
    let (offset, page_offset) = match (view.page(), view.selection().offset()) {
        (Some(page), Some(offset)) => (page.address_of(offset), page.base_offset()),
        (Some(page), None) => (page.base_offset(), page.base_offset()),
        _ => (0, 0),
    };
    format!(
        "{}{} | {} | Offset: 0x{:x} | Page Offset: 0x{:x} ",
        if view.is_loading() { "[loading] " } else { "" },
        host,
        view.width(),
        offset,
        page_offset
    )
}

pub struct StatusBar;

impl Widget for StatusBar {
    fn render(&self, f: &mut Frame, area: Rect, view: &ViewState, ui_state: &mut UIState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50), // Message
                Constraint::Percentage(50), // Info
            ])
            .split(area);

        // Left: last error wins over the plain status message
        let (status_text, status_fg) = match view.notice() {
            Some(notice) if notice.level == NoticeLevel::Error => {
                (format!(" {}", notice.message), ui_state.theme.error_fg)
            }
            Some(notice) => (format!(" {}", notice.message), ui_state.theme.highlight_fg),
            None => (
                format!(" {}", ui_state.status_bar.message),
                ui_state.theme.status_bar_fg,
            ),
        };

        let status_msg = Paragraph::new(Span::styled(
            status_text,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .style(
            Style::default()
                .bg(ui_state.theme.status_bar_bg)
                .fg(status_fg),
        );
        f.render_widget(status_msg, chunks[0]);

        let info_widget = Paragraph::new(position_info(view, &ui_state.host))
            .alignment(Alignment::Right)
            .style(
                Style::default()
                    .bg(ui_state.theme.status_bar_bg)
                    .fg(ui_state.theme.status_bar_fg),
            );
        f.render_widget(info_widget, chunks[1]);
    }

    fn handle_input(
        &mut self,
        _key: KeyEvent,
        _view: &ViewState,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        WidgetResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memview_core::address::locate;
    use memview_core::{CellWidth, PageGeometry};

    #[test]
    fn test_position_info_tracks_selection() {
        let view = ViewState::new(PageGeometry::default(), CellWidth::Word);
        assert_eq!(
            position_info(&view, "board:8000"),
            "board:8000 | Word(16) | Offset: 0x0 | Page Offset: 0x0 "
        );

        let (view, ticket) = view.begin_fetch(locate(0x1234, 256).unwrap());
        assert!(position_info(&view, "h").starts_with("[loading] h"));

        let view = view.apply_fetch(ticket.token, Ok(vec![0; 256]));
        assert_eq!(
            position_info(&view, "h"),
            "h | Word(16) | Offset: 0x1234 | Page Offset: 0x1200 "
        );
    }
}
