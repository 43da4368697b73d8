//! Process exit codes.

pub const SUCCESS: i32 = 0;
pub const FATAL: i32 = 2; // Config error, unsupported model type, or grader unavailable
