//! Shared helpers for rendering and text editing.

pub mod text;
pub mod widgets;

pub use text::{display_width, mask, pop_grapheme, sanitize_input, tail_fit};
pub use widgets::{ButtonState, centered_rect, render_button, render_card};
