//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gatehouse_core::session::View;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::login::LoginState;
use crate::state::{AppState, Notice};
use crate::{home, login};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.expire_notice(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::ValidationElapsed { ticket } => {
            // A quiet period can end after the form was torn down on login.
            if app.view() == View::Login {
                login::handle_validation_elapsed(&mut app.login, ticket);
            }
            vec![]
        }
        UiEvent::SessionChanged {
            authenticated,
            error,
        } => handle_session_changed(app, authenticated, error),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) if app.view() == View::Login => {
            login::handle_paste(&mut app.login, &text)
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
        return quit(app);
    }

    match app.view() {
        View::Login => login::handle_login_key(&mut app.login, key),
        View::Home => home::handle_home_key(key),
    }
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if app.view() == View::Login {
        app.login.form.teardown();
        effects.push(UiEffect::CancelValidation);
    }
    app.should_quit = true;
    effects.push(UiEffect::Quit);
    effects
}

fn handle_session_changed(
    app: &mut AppState,
    authenticated: bool,
    error: Option<String>,
) -> Vec<UiEffect> {
    let mut effects = Vec::new();

    if authenticated {
        // Leaving the login screen unmounts the form.
        app.login.form.teardown();
        effects.push(UiEffect::CancelValidation);
    } else {
        app.login = LoginState::new();
    }
    app.authenticated = authenticated;

    if let Some(error) = error {
        app.notice = Some(Notice::new(error));
    }

    effects
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use gatehouse_core::form::{Credentials, ValidationTicket};

    use super::*;

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn type_text(app: &mut AppState, text: &str) -> Vec<UiEffect> {
        text.chars()
            .flat_map(|c| update(app, press(KeyCode::Char(c))))
            .collect()
    }

    fn last_ticket(effects: &[UiEffect]) -> ValidationTicket {
        match effects.last() {
            Some(UiEffect::ScheduleValidation { ticket }) => *ticket,
            other => panic!("expected ScheduleValidation, got {other:?}"),
        }
    }

    /// Fills both fields and lets the quiet period elapse.
    fn fill_valid_form(app: &mut AppState) {
        type_text(app, "a@b.com");
        update(app, press(KeyCode::Tab));
        let effects = type_text(app, "longpass");
        let ticket = last_ticket(&effects);
        update(app, UiEvent::ValidationElapsed { ticket });
        assert!(app.login.form.is_valid());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = AppState::new(false);
        let release = UiEvent::Terminal(Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }));
        assert!(update(&mut app, release).is_empty());
        assert_eq!(app.login.form.email().value, "");
    }

    #[test]
    fn test_full_login_flow_emits_login_effect() {
        let mut app = AppState::new(false);
        fill_valid_form(&mut app);

        let effects = update(&mut app, press(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::Login {
                credentials: Credentials {
                    email: "a@b.com".to_string(),
                    password: "longpass".to_string(),
                }
            }]
        );
        // The view only flips once the controller reports back.
        assert_eq!(app.view(), View::Login);
    }

    #[test]
    fn test_session_changed_to_authenticated_tears_down_form() {
        let mut app = AppState::new(false);
        let effects = type_text(&mut app, "a@b.com");
        let stale = last_ticket(&effects);

        let effects = update(
            &mut app,
            UiEvent::SessionChanged {
                authenticated: true,
                error: None,
            },
        );
        assert_eq!(effects, vec![UiEffect::CancelValidation]);
        assert_eq!(app.view(), View::Home);
        assert_eq!(app.login.form.pending_ticket(), None);

        // A late timer event must not touch the torn-down form.
        let before = app.login.form.recompute_count();
        update(&mut app, UiEvent::ValidationElapsed { ticket: stale });
        assert_eq!(app.login.form.recompute_count(), before);
    }

    #[test]
    fn test_logout_mounts_fresh_form() {
        let mut app = AppState::new(false);
        fill_valid_form(&mut app);
        update(
            &mut app,
            UiEvent::SessionChanged {
                authenticated: true,
                error: None,
            },
        );

        assert_eq!(
            update(&mut app, press(KeyCode::Char('l'))),
            vec![UiEffect::Logout]
        );
        update(
            &mut app,
            UiEvent::SessionChanged {
                authenticated: false,
                error: None,
            },
        );
        assert_eq!(app.view(), View::Login);
        assert_eq!(app.login.form.email().value, "");
        assert!(!app.login.form.is_valid());
    }

    #[test]
    fn test_typing_l_on_login_screen_edits_field() {
        let mut app = AppState::new(false);
        let effects = update(&mut app, press(KeyCode::Char('l')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ScheduleValidation { .. }]
        ));
        assert_eq!(app.login.form.email().value, "l");
    }

    #[test]
    fn test_esc_on_login_cancels_validation_and_quits() {
        let mut app = AppState::new(false);
        type_text(&mut app, "a@");
        let effects = update(&mut app, press(KeyCode::Esc));
        assert_eq!(effects, vec![UiEffect::CancelValidation, UiEffect::Quit]);
        assert!(app.should_quit);
        assert_eq!(app.login.form.pending_ticket(), None);
    }

    #[test]
    fn test_esc_on_home_just_quits() {
        let mut app = AppState::new(true);
        assert_eq!(update(&mut app, press(KeyCode::Esc)), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_persist_error_sets_notice_but_still_switches() {
        let mut app = AppState::new(false);
        update(
            &mut app,
            UiEvent::SessionChanged {
                authenticated: true,
                error: Some("Failed to save session".to_string()),
            },
        );
        assert_eq!(app.view(), View::Home);
        assert_eq!(
            app.notice.as_ref().map(|n| n.text.as_str()),
            Some("Failed to save session")
        );
    }

    #[test]
    fn test_paste_ignored_on_home() {
        let mut app = AppState::new(true);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Paste("a@b.com".to_string())),
        );
        assert!(effects.is_empty());
    }
}
