//! # CLI Command Implementations
//!
//! Each command lives in its own file and provides:
//! - An `Args` struct that defines the command's arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `kiro_doc_sync` library to do the work.

pub mod sync;
