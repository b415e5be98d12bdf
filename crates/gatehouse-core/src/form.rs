//! Login form state and validation.
//!
//! The form keeps two independent validity paths:
//! - per-field validity, set only when a field loses focus (blur)
//! - overall validity, recomputed only after a debounce quiet period
//!
//! A field may show no error while submit is still disabled, and the other
//! way round. Callers must not merge the two.
//!
//! ## Tickets
//!
//! Every value change hands out a fresh [`ValidationTicket`]. The caller arms
//! a debounce timer with it and reports back through
//! [`LoginForm::on_quiet_period_elapsed`]. Only the latest ticket recomputes;
//! anything older is dropped. This keeps last-write-wins even when a canceled
//! timer's message was already queued.

use crate::validation::{FieldValidity, credentials_are_valid, email_is_valid, password_is_valid};

/// Identifies the change that armed a debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidationTicket(pub u64);

/// Raw value and blur-computed validity of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub validity: FieldValidity,
}

/// Credentials handed to the login callback on submit.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    email: FieldState,
    password: FieldState,
    is_valid: bool,
    next_ticket: u64,
    pending: Option<ValidationTicket>,
    recompute_count: u64,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &FieldState {
        &self.email
    }

    pub fn password(&self) -> &FieldState {
        &self.password
    }

    /// Overall validity as of the last recomputation.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Ticket of the latest change still waiting for its quiet period.
    pub fn pending_ticket(&self) -> Option<ValidationTicket> {
        self.pending
    }

    /// Number of overall-validity recomputations so far.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Replaces the email value and returns the ticket to debounce with.
    #[must_use = "arm a debounce timer with the returned ticket"]
    pub fn on_email_change(&mut self, value: impl Into<String>) -> ValidationTicket {
        self.email.value = value.into();
        self.rearm()
    }

    /// Replaces the password value and returns the ticket to debounce with.
    #[must_use = "arm a debounce timer with the returned ticket"]
    pub fn on_password_change(&mut self, value: impl Into<String>) -> ValidationTicket {
        self.password.value = value.into();
        self.rearm()
    }

    pub fn on_email_blur(&mut self) {
        self.email.validity = FieldValidity::from_bool(email_is_valid(&self.email.value));
    }

    pub fn on_password_blur(&mut self) {
        self.password.validity = FieldValidity::from_bool(password_is_valid(&self.password.value));
    }

    /// Recomputes overall validity from the current raw values.
    ///
    /// Blur validity is not consulted.
    pub fn recompute_overall_validity(&mut self) {
        self.is_valid = credentials_are_valid(&self.email.value, &self.password.value);
        self.recompute_count += 1;
        tracing::debug!(valid = self.is_valid, "checking form validity");
    }

    /// Handles the end of a quiet period.
    ///
    /// Returns true if `ticket` was the latest change and validity was
    /// recomputed, false if the ticket is stale or the form was torn down.
    pub fn on_quiet_period_elapsed(&mut self, ticket: ValidationTicket) -> bool {
        if self.pending != Some(ticket) {
            tracing::trace!(ticket = ticket.0, "ignoring stale validation ticket");
            return false;
        }
        self.pending = None;
        self.recompute_overall_validity();
        true
    }

    /// Forgets the outstanding ticket so no late timer can recompute.
    pub fn teardown(&mut self) {
        if let Some(ticket) = self.pending.take() {
            tracing::debug!(ticket = ticket.0, "form torn down with pending validation");
        }
    }

    /// Returns the credentials to log in with, or `None` while the form is
    /// invalid. Values are left in place.
    pub fn submit(&self) -> Option<Credentials> {
        if !self.is_valid {
            return None;
        }
        Some(Credentials {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        })
    }

    fn rearm(&mut self) -> ValidationTicket {
        let ticket = ValidationTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(ticket);
        ticket
    }
}
