//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::state::AppState;

/// Wheel notches scroll a few steps at once, like a browser.
const WHEEL_STEPS: f64 = 3.0;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Any action clears a lingering status message.
    state.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }

        // ── scrolling ───────────────────────────────────────────
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_by(-state.scroll_step_px());
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_by(state.scroll_step_px());
        }
        KeyCode::PageUp => {
            state.scroll_by(-state.page_step_px());
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            state.scroll_by(state.page_step_px());
        }
        KeyCode::Home => {
            state.scroll_to(0.0);
        }
        KeyCode::End => {
            state.scroll_to(state.max_scroll_px());
        }

        // ── animation options ───────────────────────────────────
        KeyCode::Char('m') => {
            state.toggle_fall_mode();
            state.status_message =
                Some(format!("fall mode: {}", state.timeline.fall_mode()));
        }
        KeyCode::Char('r') => {
            state.toggle_reduced_motion();
            state.status_message = Some(if state.config.reduced_motion {
                "reduced motion: on".into()
            } else {
                "reduced motion: off".into()
            });
        }
        KeyCode::Char('s') => {
            state.status_message = Some(match state.config.save() {
                Ok(()) => "options saved".into(),
                Err(e) => format!("save failed: {e}"),
            });
        }

        _ => {}
    }
}

/// Process a mouse event — only the wheel matters here.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.scroll_by(-WHEEL_STEPS * state.scroll_step_px());
        }
        MouseEventKind::ScrollDown => {
            state.scroll_by(WHEEL_STEPS * state.scroll_step_px());
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::mode::Viewport;
    use crate::core::visual::FallMode;

    fn state() -> AppState {
        AppState::new(
            AppConfig::default(),
            Viewport {
                width_px: 1200.0,
                height_px: 1000.0,
            },
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);

        let mut s = state();
        handle_key(
            &mut s,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(s.should_quit);
    }

    #[test]
    fn arrows_move_the_page() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Down));
        assert!(s.scroll_px > 0.0);
        handle_key(&mut s, press(KeyCode::Up));
        assert_eq!(s.scroll_px, 0.0);

        handle_key(&mut s, press(KeyCode::End));
        assert_eq!(s.scroll_px, s.max_scroll_px());
        handle_key(&mut s, press(KeyCode::Home));
        assert_eq!(s.scroll_px, 0.0);
    }

    #[test]
    fn m_toggles_fall_mode() {
        let mut s = state();
        assert_eq!(s.timeline.fall_mode(), FallMode::Drop);
        handle_key(&mut s, press(KeyCode::Char('m')));
        assert_eq!(s.timeline.fall_mode(), FallMode::Zoom);
        assert_eq!(s.config.fall_mode, FallMode::Zoom);
        handle_key(&mut s, press(KeyCode::Char('m')));
        assert_eq!(s.timeline.fall_mode(), FallMode::Drop);
    }
}
