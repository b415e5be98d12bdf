//! Core logic for Gatehouse: form validation, debouncing, session persistence.
//!
//! Nothing in this crate touches the terminal. The TUI crate drives these
//! types from its event loop.

pub mod config;
pub mod debounce;
pub mod form;
pub mod logging;
pub mod session;
pub mod validation;
