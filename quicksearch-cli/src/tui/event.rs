//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// The input text changed and should be debounced
    InputChanged(String),
    /// Jump to a page (1-indexed)
    GoToPage(usize),
    NextPage,
    PrevPage,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return HandleResult::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => HandleResult::Quit,
            KeyCode::Char('u') => changed(app, App::input_clear),
            KeyCode::Char('n') => HandleResult::NextPage,
            KeyCode::Char('p') => HandleResult::PrevPage,
            _ => HandleResult::Continue,
        };
    }

    // Alt+1..9 jumps straight to a page
    if key.modifiers.contains(KeyModifiers::ALT) {
        if let KeyCode::Char(c) = key.code {
            if let Some(page) = c.to_digit(10).filter(|d| *d > 0) {
                return HandleResult::GoToPage(page as usize);
            }
        }
        return HandleResult::Continue;
    }

    match key.code {
        KeyCode::Esc => HandleResult::Quit,

        KeyCode::Char(c) => {
            app.input_insert(c);
            HandleResult::InputChanged(app.input.clone())
        }
        KeyCode::Backspace => changed(app, App::input_backspace),
        KeyCode::Delete => changed(app, App::input_delete),

        KeyCode::Left => {
            app.cursor_left();
            HandleResult::Continue
        }
        KeyCode::Right => {
            app.cursor_right();
            HandleResult::Continue
        }
        KeyCode::Home => {
            app.cursor_home();
            HandleResult::Continue
        }
        KeyCode::End => {
            app.cursor_end();
            HandleResult::Continue
        }

        KeyCode::Down => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Up => {
            app.select_prev();
            HandleResult::Continue
        }

        KeyCode::PageDown => HandleResult::NextPage,
        KeyCode::PageUp => HandleResult::PrevPage,

        _ => HandleResult::Continue,
    }
}

fn changed(app: &mut App, edit: fn(&mut App) -> bool) -> HandleResult {
    if edit(app) {
        HandleResult::InputChanged(app.input.clone())
    } else {
        HandleResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_full_input() {
        let mut app = App::new();
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('b'))), HandleResult::InputChanged("b".into()));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('a'))), HandleResult::InputChanged("ba".into()));
        assert_eq!(handle_key(&mut app, key(KeyCode::Backspace)), HandleResult::InputChanged("b".into()));
    }

    #[test]
    fn test_backspace_on_empty_input_does_not_fire() {
        let mut app = App::new();
        assert_eq!(handle_key(&mut app, key(KeyCode::Backspace)), HandleResult::Continue);
    }

    #[test]
    fn test_clear_reports_blank_input() {
        let mut app = App::new();
        handle_key(&mut app, key(KeyCode::Char('x')));
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_u), HandleResult::InputChanged(String::new()));
    }

    #[test]
    fn test_paging_keys() {
        let mut app = App::new();
        assert_eq!(handle_key(&mut app, key(KeyCode::PageDown)), HandleResult::NextPage);
        assert_eq!(handle_key(&mut app, key(KeyCode::PageUp)), HandleResult::PrevPage);
        let alt_3 = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT);
        assert_eq!(handle_key(&mut app, alt_3), HandleResult::GoToPage(3));
        let alt_0 = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::ALT);
        assert_eq!(handle_key(&mut app, alt_0), HandleResult::Continue);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), HandleResult::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), HandleResult::Quit);
    }
}
