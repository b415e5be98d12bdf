//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover timers and session I/O only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never arms timers or writes the session store itself.

use gatehouse_core::form::{Credentials, ValidationTicket};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Cancel any pending validation timer and arm a new one for `ticket`.
    ScheduleValidation { ticket: ValidationTicket },

    /// Cancel the pending validation timer, if any.
    CancelValidation,

    /// Hand credentials to the view controller.
    Login { credentials: Credentials },

    /// Ask the view controller to switch back to the login screen.
    Logout,
}
