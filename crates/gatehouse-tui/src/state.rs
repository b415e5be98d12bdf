//! Application state composition.
//!
//! ```text
//! AppState
//! ├── authenticated: bool   (mirror of the view controller's flag)
//! ├── login: LoginState     (form values, validity, focus)
//! └── notice: Option<Notice> (transient footer message)
//! ```
//!
//! The login form is mounted fresh whenever the login screen is entered, so
//! logging out always shows empty fields.

use std::time::{Duration, Instant};

use gatehouse_core::session::View;

use crate::login::LoginState;

/// How long a footer notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Transient message shown in the footer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + NOTICE_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Whether the authenticated content is shown.
    pub authenticated: bool,
    /// Login screen state.
    pub login: LoginState,
    /// Footer notice, if any.
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(authenticated: bool) -> Self {
        Self {
            should_quit: false,
            authenticated,
            login: LoginState::new(),
            notice: None,
        }
    }

    pub fn view(&self) -> View {
        if self.authenticated {
            View::Home
        } else {
            View::Login
        }
    }

    /// Drops the notice once it has expired.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }
}
