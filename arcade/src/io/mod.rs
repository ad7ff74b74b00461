//! I/O helpers for the session: config, checkpoints, console and signals.

pub mod checkpoint_store;
pub mod config;
pub mod console;
pub mod signals;
