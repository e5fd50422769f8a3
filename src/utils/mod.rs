//! Utilities (external command execution).

pub mod command;

pub use command::run_checked;
