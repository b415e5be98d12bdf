use gatehouse_core::form::{FieldState, LoginForm, ValidationTicket};

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Email,
    Password,
    Submit,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Email => Focus::Password,
            Focus::Password => Focus::Submit,
            Focus::Submit => Focus::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Email => Focus::Submit,
            Focus::Password => Focus::Email,
            Focus::Submit => Focus::Password,
        }
    }
}

/// Login screen state: the form plus focus.
#[derive(Debug, Default)]
pub struct LoginState {
    pub form: LoginForm,
    pub focus: Focus,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves focus, blurring the field that loses it.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        match self.focus {
            Focus::Email => self.form.on_email_blur(),
            Focus::Password => self.form.on_password_blur(),
            Focus::Submit => {}
        }
        self.focus = focus;
    }

    /// The field under focus, if focus is on a field.
    pub fn focused_field(&self) -> Option<&FieldState> {
        match self.focus {
            Focus::Email => Some(self.form.email()),
            Focus::Password => Some(self.form.password()),
            Focus::Submit => None,
        }
    }

    /// Replaces the focused field's value.
    ///
    /// Returns the ticket to debounce with, or `None` when focus is on the
    /// button.
    pub fn set_focused_value(&mut self, value: String) -> Option<ValidationTicket> {
        match self.focus {
            Focus::Email => Some(self.form.on_email_change(value)),
            Focus::Password => Some(self.form.on_password_change(value)),
            Focus::Submit => None,
        }
    }

    /// Applies `edit` to a copy of the focused field's value and stores the
    /// result if it changed.
    pub fn edit_focused<F>(&mut self, edit: F) -> Option<ValidationTicket>
    where
        F: FnOnce(&mut String),
    {
        let mut value = self.focused_field()?.value.clone();
        let before = value.clone();
        edit(&mut value);
        if value == before {
            return None;
        }
        self.set_focused_value(value)
    }
}
