//! Stable exit codes for the arcade CLI.

/// Command succeeded. A played session always ends here, even after an
/// interrupt or an emergency save.
pub const OK: i32 = 0;
/// Command failed due to invalid config, arguments, or an unreadable checkpoint.
pub const INVALID: i32 = 1;
