//! Signup form feature slice.

mod render;
mod state;
mod update;

pub use render::{TEACHER_NOTICE, render_signup};
pub use state::SignupForm;
pub use update::{handle_key, handle_paste};
