//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

pub mod download;
pub mod route;
