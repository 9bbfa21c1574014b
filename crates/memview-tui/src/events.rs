use crate::ui::dialog_cell;
use crate::ui::dialog_jump_to_address;
use crate::ui::ui;
use crate::ui::view_grid::GridView;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::{UIState, ViewAction};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use memview_core::{Inspector, PageFetch, ViewState};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(100);

pub fn run_app<F: PageFetch>(
    terminal: &mut DefaultTerminal,
    inspector: &Inspector<F>,
    mut ui_state: UIState,
) -> anyhow::Result<()> {
    let mut rx = inspector.subscribe();
    let mut grid = GridView;

    loop {
        let view = rx.borrow_and_update().clone();
        terminal.draw(|f| ui(f, &view, &mut ui_state))?;

        if ui_state.should_quit {
            log::info!("Exiting");
            return Ok(());
        }

        // Fetch results arrive on the watch channel, so never block on input.
        if !event::poll(TICK)? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(key, &view, &mut ui_state, &mut grid)
            }
            Event::Mouse(mouse) => handle_mouse(mouse, &mut ui_state, Instant::now()),
            _ => None,
        };

        if let Some(action) = action {
            apply_action(inspector, &mut ui_state, action);
        }
    }
}

/// Routes a key press to the open dialog, or to the grid when none is open.
pub fn handle_key(
    key: KeyEvent,
    view: &ViewState,
    ui_state: &mut UIState,
    grid: &mut GridView,
) -> Option<ViewAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return Some(ViewAction::Exit);
    }

    let result = if ui_state.jump_to_address_dialog.active {
        dialog_jump_to_address::handle_input(key, ui_state)
    } else if ui_state.cell_dialog.active {
        dialog_cell::handle_input(key, ui_state)
    } else {
        grid.handle_input(key, view, ui_state)
    };

    match result {
        WidgetResult::Action(action) => Some(action),
        WidgetResult::Handled | WidgetResult::Ignored => None,
    }
}

/// Pointer movement hovers cells; a double click opens the cell dialog.
pub fn handle_mouse(
    mouse: MouseEvent,
    ui_state: &mut UIState,
    now: Instant,
) -> Option<ViewAction> {
    if ui_state.is_dialog_active() {
        return None;
    }
    let offset = ui_state.cell_at(mouse.column, mouse.row)?;

    match mouse.kind {
        MouseEventKind::Moved => Some(ViewAction::Hover(offset)),
        MouseEventKind::Down(MouseButton::Left) => {
            if ui_state.register_click(offset, now) {
                Some(ViewAction::Inspect(offset))
            } else {
                Some(ViewAction::Hover(offset))
            }
        }
        _ => None,
    }
}

pub fn apply_action<F: PageFetch>(
    inspector: &Inspector<F>,
    ui_state: &mut UIState,
    action: ViewAction,
) {
    // Pointer movement alone does not count as moving on from an error.
    if !matches!(action, ViewAction::Hover(_) | ViewAction::Exit) {
        inspector.dismiss_notice();
    }

    match action {
        ViewAction::Exit => ui_state.should_quit = true,
        ViewAction::Move(motion) => {
            if let Some(ticket) = inspector.move_cursor(motion) {
                ui_state.set_status_message(format!(
                    "Loading page 0x{:x}",
                    ticket.window.base_offset
                ));
            }
        }
        ViewAction::SetWidth(width) => {
            inspector.set_width(width);
            ui_state.set_status_message(format!("Cell width: {}", width));
        }
        ViewAction::Hover(offset) => inspector.hover(offset),
        ViewAction::Inspect(offset) => {
            inspector.hover(offset);
            ui_state.cell_dialog.open();
        }
        ViewAction::Jump(input) => match inspector.jump(&input) {
            Ok(ticket) => {
                ui_state.set_status_message(format!("Jumped to 0x{:x}", ticket.window.address()))
            }
            Err(e) => {
                log::debug!("Jump to {:?} failed: {}", input, e);
                ui_state.set_status_message("Invalid Hex Address");
            }
        },
        ViewAction::OpenJumpDialog => {
            ui_state.jump_to_address_dialog.open();
            ui_state.set_status_message("Enter address");
        }
        ViewAction::OpenCellDialog => {
            if inspector.snapshot().selection().offset().is_some() {
                ui_state.cell_dialog.open();
            } else {
                ui_state.set_status_message("No cell selected");
            }
        }
        ViewAction::Reload => match inspector.reload() {
            Ok(_) => ui_state.set_status_message("Reloading"),
            Err(e) => ui_state.set_status_message(format!("Reload failed: {}", e)),
        },
    }
}
