//! Deterministic, pure logic shared by the session core.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod classifier;
pub mod number_search;
pub mod selector;
pub mod session;
pub mod transition;
pub mod types;
pub mod word_guess;
