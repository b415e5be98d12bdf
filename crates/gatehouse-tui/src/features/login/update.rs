//! Login feature reducer.
//!
//! Key handling for the form. Every value change returns a
//! `ScheduleValidation` effect; the runtime owns the actual timer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gatehouse_core::form::ValidationTicket;

use super::state::{Focus, LoginState};
use crate::common::{pop_grapheme, sanitize_input};
use crate::effects::UiEffect;

pub fn handle_login_key(login: &mut LoginState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            login.set_focus(login.focus.next());
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            login.set_focus(login.focus.prev());
            vec![]
        }
        KeyCode::Char('s') if ctrl => submit(login),
        KeyCode::Enter => {
            // Enter on a field submits when the form allows it, otherwise
            // it advances to the next control.
            if login.focus == Focus::Submit || login.form.is_valid() {
                submit(login)
            } else {
                login.set_focus(login.focus.next());
                vec![]
            }
        }
        KeyCode::Char('u') if ctrl => schedule(login.edit_focused(String::clear)),
        KeyCode::Backspace => schedule(login.edit_focused(|v| {
            pop_grapheme(v);
        })),
        KeyCode::Char(c) if !ctrl && !alt => {
            let typed = sanitize_input(&c.to_string());
            schedule(login.edit_focused(|v| v.push_str(&typed)))
        }
        _ => vec![],
    }
}

/// Inserts pasted text into the focused field.
pub fn handle_paste(login: &mut LoginState, text: &str) -> Vec<UiEffect> {
    let pasted = sanitize_input(text);
    schedule(login.edit_focused(|v| v.push_str(&pasted)))
}

/// Handles the end of a debounce quiet period.
pub fn handle_validation_elapsed(login: &mut LoginState, ticket: ValidationTicket) {
    login.form.on_quiet_period_elapsed(ticket);
}

fn schedule(ticket: Option<ValidationTicket>) -> Vec<UiEffect> {
    ticket
        .map(|ticket| vec![UiEffect::ScheduleValidation { ticket }])
        .unwrap_or_default()
}

fn submit(login: &mut LoginState) -> Vec<UiEffect> {
    match login.form.submit() {
        Some(credentials) => vec![UiEffect::Login { credentials }],
        None => {
            tracing::debug!("submit ignored: form is not valid");
            vec![]
        }
    }
}
