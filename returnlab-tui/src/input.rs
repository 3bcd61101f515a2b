//! Keyboard input dispatch: overlays first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay, View};

const PAGE: usize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.overlay == Overlay::Help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
        ) {
            app.overlay = Overlay::None;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('r') => app.reload(),

        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_market(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_market(),

        KeyCode::Char('1') => app.view = View::Table,
        KeyCode::Char('2') => app.view = View::Statistics,
        KeyCode::Char('3') => app.view = View::Histograms,
        KeyCode::Char('v') => app.view = app.view.next(),

        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        _ => {}
    }
}
