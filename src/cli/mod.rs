//! Command-line surface for the `hpzpack` compressor binary.
//!
//! Argument parsing is hand-rolled (the teacher declares `clap` as a
//! dependency but never actually uses it in `src/`; this crate follows the
//! teacher's *actual* practice and drops `clap` entirely).

pub mod args;
pub mod constants;

pub use args::{parse_args, CompressOptions};
