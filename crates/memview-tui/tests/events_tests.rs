use memview_core::{
    CellWidth, Inspector, Motion, PageFetch, PageGeometry, Result, ViewState, ViewerError,
};
use memview_tui::events::apply_action;
use memview_tui::theme::Theme;
use memview_tui::ui::ui;
use memview_tui::ui_state::{UIState, ViewAction};
use ratatui::{Terminal, backend::TestBackend};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Every byte equals its address truncated to eight bits; pages at or above
/// `fail_from` fail.
struct SyntheticFetcher {
    fail_from: u64,
}

impl PageFetch for SyntheticFetcher {
    async fn fetch_page(&self, _host: &str, offset: u64, length: usize) -> Result<Vec<u8>> {
        if offset >= self.fail_from {
            return Err(ViewerError::TransportFailure("connection refused".to_string()));
        }
        Ok((0..length as u64).map(|i| (offset + i) as u8).collect())
    }
}

fn inspector(fail_from: u64) -> Inspector<SyntheticFetcher> {
    Inspector::new(
        SyntheticFetcher { fail_from },
        "board:8000",
        PageGeometry::default(),
        CellWidth::Byte,
        Handle::current(),
    )
}

async fn settled(rx: &mut watch::Receiver<ViewState>) -> ViewState {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
        .await
        .unwrap()
        .unwrap()
        .clone()
}

fn screen(view: &ViewState, ui_state: &mut UIState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 20)).unwrap();
    terminal.draw(|f| ui(f, view, ui_state)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[tokio::test(flavor = "multi_thread")]
async fn test_jump_then_move_across_page() {
    let inspector = inspector(u64::MAX);
    let mut rx = inspector.subscribe();
    let mut ui_state = UIState::new(Theme::default(), "board:8000");

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("1FF".to_string()));
    assert_eq!(ui_state.status_bar.message, "Jumped to 0x1ff");
    let view = settled(&mut rx).await;
    assert_eq!(view.cursor_address(), Some(0x1ff));

    apply_action(&inspector, &mut ui_state, ViewAction::Move(Motion::NextCell));
    let view = settled(&mut rx).await;
    assert_eq!(view.page().unwrap().base_offset(), 0x200);
    assert_eq!(view.cursor_address(), Some(0x200));

    let text = screen(&view, &mut ui_state);
    assert!(text.contains("0000000000000200"), "{}", text);
    assert!(text.contains("Offset: 0x200 | Page Offset: 0x200"), "{}", text);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_jump_keeps_page() {
    let inspector = inspector(u64::MAX);
    let mut rx = inspector.subscribe();
    let mut ui_state = UIState::new(Theme::default(), "board:8000");

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("40".to_string()));
    let before = settled(&mut rx).await;

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("xyz".to_string()));
    assert_eq!(ui_state.status_bar.message, "Invalid Hex Address");
    let after = inspector.snapshot();
    assert_eq!(after.page(), before.page());
    assert_eq!(after.selection(), before.selection());
    assert!(after.notice().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_fetch_is_shown_in_status_bar() {
    let inspector = inspector(0x1000);
    let mut rx = inspector.subscribe();
    let mut ui_state = UIState::new(Theme::default(), "board:8000");

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("800".to_string()));
    settled(&mut rx).await;

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("1000".to_string()));
    let view = settled(&mut rx).await;
    assert_eq!(view.page().unwrap().base_offset(), 0x800);

    let text = screen(&view, &mut ui_state);
    assert!(text.contains("connection refused"), "{}", text);
    assert!(text.contains("0000000000000800"), "{}", text);

    // hovering keeps the error up
    apply_action(&inspector, &mut ui_state, ViewAction::Hover(3));
    assert!(inspector.snapshot().notice().is_some());

    // the next command replaces it
    apply_action(&inspector, &mut ui_state, ViewAction::SetWidth(CellWidth::Word));
    let view = inspector.snapshot();
    assert!(view.notice().is_none());
    assert_eq!(view.page().unwrap().base_offset(), 0x800);
    let text = screen(&view, &mut ui_state);
    assert!(!text.contains("connection refused"), "{}", text);
    assert!(text.contains("Cell width: Word(16)"), "{}", text);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_width_and_cell_dialog() {
    let inspector = inspector(u64::MAX);
    let mut rx = inspector.subscribe();
    let mut ui_state = UIState::new(Theme::default(), "board:8000");

    // no selection yet
    apply_action(&inspector, &mut ui_state, ViewAction::OpenCellDialog);
    assert!(!ui_state.cell_dialog.active);
    assert_eq!(ui_state.status_bar.message, "No cell selected");

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("13".to_string()));
    settled(&mut rx).await;

    apply_action(
        &inspector,
        &mut ui_state,
        ViewAction::SetWidth(CellWidth::DoubleWord),
    );
    let view = inspector.snapshot();
    assert_eq!(view.selection().offset(), Some(0x10));
    assert_eq!(view.selection().hex().as_deref(), Some("13121110"));

    apply_action(&inspector, &mut ui_state, ViewAction::Inspect(0x24));
    assert!(ui_state.cell_dialog.active);
    let view = inspector.snapshot();
    assert_eq!(view.selection().offset(), Some(0x24));

    let text = screen(&view, &mut ui_state);
    assert!(text.contains("Address: 0x24"), "{}", text);
    assert!(text.contains("27262524"), "{}", text);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_exit_and_reload() {
    let inspector = inspector(u64::MAX);
    let mut rx = inspector.subscribe();
    let mut ui_state = UIState::new(Theme::default(), "board:8000");

    apply_action(&inspector, &mut ui_state, ViewAction::Jump("345".to_string()));
    settled(&mut rx).await;

    apply_action(&inspector, &mut ui_state, ViewAction::Reload);
    assert_eq!(ui_state.status_bar.message, "Reloading");
    let view = settled(&mut rx).await;
    assert_eq!(view.cursor_address(), Some(0x345));

    apply_action(&inspector, &mut ui_state, ViewAction::Exit);
    assert!(ui_state.should_quit);
}
