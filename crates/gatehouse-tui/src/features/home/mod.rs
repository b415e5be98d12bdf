//! Home feature: the authenticated content and the logout action.

mod render;
mod update;

pub use render::render_home;
pub use update::handle_home_key;
