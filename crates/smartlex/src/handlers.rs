use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use smartlex_core::View;

use crate::app::App;
use crate::types::Focus;

pub struct InputHandler;

impl InputHandler {
    /// Dispatches one key press. Returns true when the application should
    /// quit.
    pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Self::handle_control(app, key.code);
        }
        match app.snapshot().view {
            View::Home => Self::handle_home(app, key.code),
            View::History | View::Library => Self::handle_list(app, key.code),
            View::AnalysisResult => Self::handle_result(app, key.code),
            View::Settings => Self::handle_settings(app, key.code),
        }
        false
    }

    fn handle_control(app: &mut App, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('h') => app.views.navigate(View::Home),
            KeyCode::Char('y') => app.views.navigate(View::History),
            KeyCode::Char('l') => app.views.navigate(View::Library),
            KeyCode::Char('s') => app.views.navigate(View::Settings),
            KeyCode::Char('p') => app.toggle_pin(),
            _ => {}
        }
        false
    }

    fn handle_home(app: &mut App, code: KeyCode) {
        match code {
            KeyCode::Tab => app.focus = app.focus.next(),
            KeyCode::Enter => app.submit(),
            KeyCode::Backspace => {
                Self::focused_input(app).pop();
            }
            KeyCode::Char(c) => Self::focused_input(app).push(c),
            _ => {}
        }
    }

    fn handle_list(app: &mut App, code: KeyCode) {
        match code {
            KeyCode::Up => app.move_cursor(false),
            KeyCode::Down => app.move_cursor(true),
            KeyCode::Enter => app.select_current(),
            // Dismiss the overlay without a selection.
            KeyCode::Esc => app.views.close(View::Home),
            _ => {}
        }
    }

    fn handle_result(app: &mut App, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Backspace => app.views.return_to_breadcrumb_origin(),
            KeyCode::Esc => app.views.close(View::Home),
            _ => {}
        }
    }

    fn handle_settings(app: &mut App, code: KeyCode) {
        // Settings contents live outside this core; only dismissal is wired.
        if code == KeyCode::Esc {
            app.views.close(View::Home);
        }
    }

    fn focused_input(app: &mut App) -> &mut String {
        match app.focus {
            Focus::Term => &mut app.term_input,
            Focus::Context => &mut app.context_input,
        }
    }
}
