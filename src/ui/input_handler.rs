use crate::app::AppState;
use crate::constants::WHEEL_SCROLL_ROWS;
use crate::error::Result;
use crate::types::UiMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

pub struct InputHandler;

impl InputHandler {
    /// Quit keys work everywhere except while typing into the form
    fn handle_quit(app: &mut AppState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
                true
            }
            KeyCode::Char('q') if app.ui_mode != UiMode::ContactForm => {
                app.should_quit = true;
                true
            }
            _ => false,
        }
    }

    pub fn handle_key(&mut self, app: &mut AppState, key: KeyEvent) -> Result<()> {
        // Any key dismisses the splash and is otherwise swallowed
        if app.splash.is_visible() {
            app.splash.skip(&mut app.timers);
            return Ok(());
        }

        if Self::handle_quit(app, key) {
            return Ok(());
        }

        match app.ui_mode {
            UiMode::ContactForm => Self::handle_contact_form(app, key),
            UiMode::Help => Self::handle_help(app, key),
            UiMode::Normal => Self::handle_page(app, key),
        }
    }

    fn handle_page(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => app.close_all(),

            // Section navigation
            KeyCode::Down => app.next_section(),
            KeyCode::Up => app.previous_section(),

            // Scrolling
            KeyCode::Char('j') => app.scroll_down(1),
            KeyCode::Char('k') => app.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
            KeyCode::PageUp => app.page_up(),
            KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),

            // Navbar links
            KeyCode::Char(c @ '1'..='9') => {
                let link = c as usize - '1' as usize;
                app.go_to_link(link);
            }

            // Page actions
            KeyCode::Char('c') => app.open_contact_form(),
            KeyCode::Char('d') => app.request_cv_download(),
            KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),

            _ => {}
        }
        Ok(())
    }

    fn handle_contact_form(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                tracing::debug!("Contact form closed");
                app.ui_mode = UiMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => app.contact.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.contact.focus_previous(),
            KeyCode::Enter => app.submit_contact(),
            KeyCode::Backspace => app.contact.backspace(),
            KeyCode::Char(c) => app.contact.input(c),
            _ => {}
        }
        Ok(())
    }

    fn handle_help(app: &mut AppState, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => {
                app.ui_mode = UiMode::Normal;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn handle_mouse(&mut self, app: &mut AppState, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            // The smoke trail follows the pointer over everything
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                app.on_pointer_move(mouse.column, mouse.row);
            }
            _ if app.ui_mode != UiMode::Normal || app.splash.is_visible() => {}
            MouseEventKind::ScrollDown => app.scroll_down(WHEEL_SCROLL_ROWS),
            MouseEventKind::ScrollUp => app.scroll_up(WHEEL_SCROLL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => app.on_click(mouse.column, mouse.row),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Field;
    use crate::page::Portfolio;
    use crate::types::Config;

    fn create_test_app() -> AppState {
        let config = Config {
            splash_enabled: false,
            ..Config::default()
        };
        AppState::new(config, Portfolio::builtin().unwrap(), 100, 30)
    }

    fn press(handler: &mut InputHandler, app: &mut AppState, code: KeyCode) {
        handler
            .handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit() {
        let mut handler = InputHandler;
        let mut app = create_test_app();
        press(&mut handler, &mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_splash_swallows_first_key() {
        let mut handler = InputHandler;
        let mut app = AppState::new(Config::default(), Portfolio::builtin().unwrap(), 100, 30);
        press(&mut handler, &mut app, KeyCode::Char('q'));
        assert!(!app.splash.is_visible());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_number_keys_follow_links() {
        let mut handler = InputHandler;
        let mut app = create_test_app();
        press(&mut handler, &mut app, KeyCode::Char('3'));
        app.tick(16);
        assert_eq!(app.navigator.active_link(), Some(2));

        // Out of range link numbers are ignored
        let offset = app.viewport.scroll_offset;
        press(&mut handler, &mut app, KeyCode::Char('9'));
        assert_eq!(app.viewport.scroll_offset, offset);
    }

    #[test]
    fn test_typing_q_in_form_does_not_quit() {
        let mut handler = InputHandler;
        let mut app = create_test_app();
        press(&mut handler, &mut app, KeyCode::Char('c'));
        assert_eq!(app.ui_mode, UiMode::ContactForm);

        press(&mut handler, &mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.contact.field(Field::Name).value, "q");

        press(&mut handler, &mut app, KeyCode::Tab);
        assert_eq!(app.contact.focused(), Field::Email);
        assert!(app.contact.field(Field::Name).error.is_some());

        press(&mut handler, &mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_help_toggles() {
        let mut handler = InputHandler;
        let mut app = create_test_app();
        press(&mut handler, &mut app, KeyCode::Char('?'));
        assert_eq!(app.ui_mode, UiMode::Help);
        press(&mut handler, &mut app, KeyCode::Char('?'));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_mouse_moves_spawn_smoke_and_wheel_scrolls() {
        let mut handler = InputHandler;
        let mut app = create_test_app();
        handler
            .handle_mouse(&mut app, mouse(MouseEventKind::Moved, 30, 10))
            .unwrap();
        assert_eq!(app.smoke.live_count(), 1);

        handler
            .handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 30, 10))
            .unwrap();
        assert_eq!(app.viewport.scroll_offset, WHEEL_SCROLL_ROWS);
    }

    #[test]
    fn test_wheel_ignored_under_popup() {
        let mut handler = InputHandler;
        let mut app = create_test_app();
        app.toggle_help();
        handler
            .handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 30, 10))
            .unwrap();
        assert_eq!(app.viewport.scroll_offset, 0);
    }
}
