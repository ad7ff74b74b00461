//! Menu-driven guessing games with checkpoint and resume.
//!
//! A session is a small state machine over the nodes menu, number game,
//! word game, command, interrupt and summary. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (session state, routing, input
//!   classification, the guessers). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (console, checkpoint files, config,
//!   signals). Isolated behind small types so tests can script them.
//!
//! Orchestration modules ([`menu`], [`command`], [`games`], [`step`],
//! [`looping`], [`start`]) coordinate core logic with I/O to run a session.

pub mod command;
pub mod context;
pub mod core;
pub mod exit_codes;
pub mod games;
pub mod io;
pub mod logging;
pub mod looping;
pub mod menu;
pub mod start;
pub mod step;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
