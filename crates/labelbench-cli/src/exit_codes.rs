//! Process exit codes. Part of the CLI contract; scripts branch on them.

pub const EXIT_SUCCESS: i32 = 0;
/// Unhandled error: missing credential, unreadable config, I/O, generation failure.
pub const EXIT_FATAL: i32 = 2;
/// The dataset (or program artifact) a command needs does not exist.
pub const EXIT_MISSING_INPUT: i32 = 3;
