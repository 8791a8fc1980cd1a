//! Compile-time configuration constants for the compress/extract pipelines.
//!
//! Kept as named constants with provenance comments, mirroring the
//! teacher's `config.rs` idiom.

/// Size of each chunk read from the input file during compression.
/// Corresponds to the 1 MiB streaming chunk size in `comp.cpp::main`.
pub const COMPRESS_CHUNK_SIZE: usize = 1 << 20;

/// Size of each chunk read from the archive payload during extraction.
pub const EXTRACT_CHUNK_SIZE: usize = 1 << 20;

/// Default output filename for the self-extractor when `HPZT_OUTPUT` is
/// unset, matching `archive_main.cpp`'s hardcoded fallback.
pub const DEFAULT_EXTRACT_OUTPUT: &str = "output.hpzt.out";

/// Environment variable overriding the extractor's output filename.
pub const ENV_OUTPUT: &str = "HPZT_OUTPUT";

/// Environment variable setting the initial notification level.
pub const ENV_VERBOSITY: &str = "HPZT_VERBOSITY";

/// Unix permission bits applied to a freshly written archive (`chmod 0755`
/// in `comp.cpp::main`), so the self-extractor is directly executable.
#[cfg(unix)]
pub const ARCHIVE_PERMISSIONS: u32 = 0o755;
