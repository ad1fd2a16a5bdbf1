//! Feature slices. Each owns its state, key handling, and rendering.

pub mod auth;
pub mod roster;
pub mod signup;
