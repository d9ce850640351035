//! Key and mouse dispatch for the TUI.
//!
//! Ctrl+C quits. Enter presses Explain. Esc cancels an in-flight request.
//! Up/Down/PageUp/PageDown scroll the explanation. Everything else is
//! forwarded to the input line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::app::TuiApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut TuiApp, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Enter => app.trigger(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::PageDown => app.scroll_down(app.page_size()),
        _ => {
            if app.input_line.handle_key(key) {
                app.sync_input();
            }
        }
    }
}

/// Handle a mouse event: click the button, wheel-scroll the explanation.
pub fn handle_mouse(app: &mut TuiApp, mouse: MouseEvent) {
    let at = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if hit(app.layout_areas.button, at) => {
            app.trigger();
        }
        MouseEventKind::ScrollUp if hit(app.layout_areas.explanation, at) => app.scroll_up(3),
        MouseEventKind::ScrollDown if hit(app.layout_areas.explanation, at) => app.scroll_down(3),
        _ => {}
    }
}

fn hit(area: Rect, at: Position) -> bool {
    area.contains(at)
}
