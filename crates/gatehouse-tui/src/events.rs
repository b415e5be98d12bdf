//! UI event types.
//!
//! All external inputs (terminal, timers, session results) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Timer callbacks do not touch state. They send an event into the runtime's
//! inbox, and the runtime feeds it to the reducer on the event-loop thread.

use crossterm::event::Event as CrosstermEvent;
use gatehouse_core::form::ValidationTicket;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (drives rendering and notice expiry).
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// A debounce quiet period elapsed for `ticket`.
    ValidationElapsed { ticket: ValidationTicket },

    /// The view controller flipped the session flag.
    SessionChanged {
        authenticated: bool,
        /// Set when persisting the flag failed.
        error: Option<String>,
    },
}
