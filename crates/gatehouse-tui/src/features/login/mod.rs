//! Login feature: the email/password form and its submit button.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{Focus, LoginState};
pub use update::{handle_login_key, handle_paste, handle_validation_elapsed};
