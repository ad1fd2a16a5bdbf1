//! Roster feature slice: activity cards, participants, removal controls.

mod render;
mod state;
mod update;

pub use render::render_roster;
pub use state::RosterState;
pub use update::handle_key;
