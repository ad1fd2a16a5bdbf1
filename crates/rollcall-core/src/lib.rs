//! Core library for the rollcall sign-up board client.
//!
//! Owns the session state machine, the roster view model, and the guarded
//! mutation commands. Nothing here touches a terminal: drivers (the TUI and
//! the CLI) call these functions and map the returned outcomes to output.

pub mod activity;
pub mod api;
pub mod board;
pub mod commands;
pub mod config;
pub mod gate;
pub mod logging;
pub mod notify;
pub mod roster;
pub mod session;
