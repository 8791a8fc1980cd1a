//! Error kinds for the HPZT codec and container layers.
//!
//! Mirrors the teacher's manual-enum idiom (no `thiserror`): a plain `enum`
//! with hand-written `Display` and `std::error::Error` impls. Pipeline and
//! CLI code wrap these in `anyhow::Result` at the edges.

use std::fmt;

/// Errors that can arise while encoding, decoding, or framing an archive.
#[derive(Debug)]
pub enum HpztError {
    /// Any filesystem read/write failure not already wrapped by `anyhow`.
    Io(std::io::Error),
    /// Footer magic (`HPZ1`/`HPZ2`) not found in the trailing bytes of a file.
    FooterMissing,
    /// Computed payload offset was zero or negative.
    BadPayloadOffset,
    /// HPZT v2 header's dictionary fingerprint does not match the local dictionary.
    DictMismatch { expected: u32, found: u32 },
    /// Byte following a `0x00` escape was not a recognized token.
    InvalidToken(u8),
    /// End of stream reached while the decoder was in a non-terminal state.
    TruncatedEscape,
    /// Decoded byte count did not match the footer's recorded original size.
    LengthMismatch { expected: u64, found: u64 },
    /// Running CRC32 did not match the footer's recorded CRC32.
    CrcMismatch { expected: u32, found: u32 },
    /// DEFLATE was requested but is not usable; decompression cannot proceed.
    CodecUnavailable,
    /// The underlying deflate/inflate stream reported an error status.
    CodecError(String),
}

impl fmt::Display for HpztError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HpztError::Io(e) => write!(f, "I/O error: {e}"),
            HpztError::FooterMissing => write!(f, "archive footer not found"),
            HpztError::BadPayloadOffset => write!(f, "computed payload offset is not positive"),
            HpztError::DictMismatch { expected, found } => write!(
                f,
                "dictionary fingerprint mismatch: archive has {found:#010x}, local dictionary is {expected:#010x}"
            ),
            HpztError::InvalidToken(b) => write!(f, "invalid escape token byte {b:#04x}"),
            HpztError::TruncatedEscape => write!(f, "stream ended mid-escape-sequence"),
            HpztError::LengthMismatch { expected, found } => write!(
                f,
                "decoded length mismatch: footer says {expected}, decoder produced {found}"
            ),
            HpztError::CrcMismatch { expected, found } => write!(
                f,
                "CRC32 mismatch: footer says {expected:#010x}, decoder computed {found:#010x}"
            ),
            HpztError::CodecUnavailable => write!(f, "DEFLATE codec unavailable"),
            HpztError::CodecError(msg) => write!(f, "codec error: {msg}"),
        }
    }
}

impl std::error::Error for HpztError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HpztError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HpztError {
    fn from(e: std::io::Error) -> Self {
        HpztError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_non_empty() {
        let variants: Vec<HpztError> = vec![
            HpztError::FooterMissing,
            HpztError::BadPayloadOffset,
            HpztError::DictMismatch { expected: 1, found: 2 },
            HpztError::InvalidToken(0x7f),
            HpztError::TruncatedEscape,
            HpztError::LengthMismatch { expected: 1, found: 2 },
            HpztError::CrcMismatch { expected: 1, found: 2 },
            HpztError::CodecUnavailable,
            HpztError::CodecError("boom".into()),
        ];
        for v in variants {
            assert!(!format!("{v}").is_empty());
        }
    }

    #[test]
    fn io_error_is_source() {
        use std::error::Error;
        let e = HpztError::from(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert!(e.source().is_some());
    }
}
