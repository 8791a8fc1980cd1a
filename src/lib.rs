//! HPZT: a reversible text pre-transform stacked above DEFLATE, packaged as
//! a self-extracting archive format.
//!
//! Module map:
//! - [`dict`] — the phrase dictionary and its fingerprint (Component A)
//! - [`hpzt`] — the streaming encoder/decoder for the transform wire format
//!   (Components B/C/D)
//! - [`sink`] — STORE/DEFLATE stream codecs (Component E)
//! - [`container`] — HPZ1/HPZ2 footer framing (Component F)
//! - [`pipeline`] — compress/extract/inspect orchestration (Component G, K)
//! - [`cli`] — argument parsing and notification-level macros (Components H/J)
//! - [`error`] — the crate's error enum (Component I)
//! - [`config`] — compile-time tuning constants

pub mod cli;
pub mod config;
pub mod container;
pub mod crc32;
pub mod dict;
pub mod error;
pub mod hpzt;
pub mod pipeline;
pub mod sink;

pub use error::HpztError;
pub use hpzt::{Decoder, Encoder};
pub use sink::Method;
