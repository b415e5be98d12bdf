//! Feature slices. Each owns its state, reducer and render function.

pub mod home;
pub mod login;
