//! Thin wrapper around the `crc32fast` crate providing the incremental CRC32
//! API used by the rest of this crate (mirrors the teacher's `xxhash.rs`,
//! which wraps `xxhash-rust` the same way: one struct alias, one oneshot fn).
//!
//! Polynomial 0xEDB88320, initial/final XOR 0xFFFFFFFF — `crc32fast` uses
//! this polynomial and XOR convention internally, matching `comp.cpp`'s
//! hand-rolled `crc32_update` table exactly.

pub use crc32fast::Hasher as Crc32State;

/// One-shot CRC32 over `data`. Equivalent to seeding a fresh [`Crc32State`],
/// updating once, and finalizing.
#[inline]
pub fn crc32_oneshot(data: &[u8]) -> u32 {
    let mut h = Crc32State::new();
    h.update(data);
    h.finalize()
}
