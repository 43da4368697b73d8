//! Grading engine internals.
//!
//! - prompt.rs: grading instruction and per-test turn template
//! - parse.rs: reply text to score
//! - run.rs: append, call, parse

pub(crate) mod parse;
pub(crate) mod prompt;
pub(crate) mod run;
