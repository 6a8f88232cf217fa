//! Airport route finder CLI library.
//!
//! Subcommand handlers, output formatting and terminal styling used by the
//! `airroute-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
