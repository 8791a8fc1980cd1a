//! Component F: container framer. Reads/writes the HPZ1/HPZ2 trailing
//! footer and locates payload bytes within a self-extracting archive.
//!
//! Ported from `original_source/src/comp.cpp` (footer write) and
//! `original_source/src/archive_main.cpp` (footer locate / read).

use crate::error::HpztError;
use crate::sink::Method;

pub const HPZ1_MAGIC: &[u8; 4] = b"HPZ1";
pub const HPZ2_MAGIC: &[u8; 4] = b"HPZ2";
pub const HPZ1_LEN: u64 = 24;
pub const HPZ2_LEN: u64 = 28;

/// A parsed container footer, independent of which wire layout it came from.
#[derive(Debug, Clone, Copy)]
pub struct Footer {
    pub method: Method,
    pub original_size: u64,
    pub compressed_size: u64,
    pub crc32: u32,
    /// Size in bytes of the footer itself (24 for HPZ1, 28 for HPZ2).
    pub footer_len: u64,
}

impl Footer {
    /// Serializes as an HPZ2 footer (28 bytes) — the format this crate's
    /// encoder always emits; HPZ1 is accepted on read only (`spec.md` §9).
    pub fn to_hpz2_bytes(&self) -> [u8; 28] {
        let mut b = [0u8; 28];
        b[0..4].copy_from_slice(HPZ2_MAGIC);
        b[4] = self.method.as_byte();
        // b[5..8] stay zero padding
        b[8..16].copy_from_slice(&self.original_size.to_le_bytes());
        b[16..24].copy_from_slice(&self.compressed_size.to_le_bytes());
        b[24..28].copy_from_slice(&self.crc32.to_le_bytes());
        b
    }

    /// Parses a trailing footer from the last `footer_len` bytes of a file,
    /// given the file's total size. Tries HPZ2 first, then HPZ1, matching
    /// `spec.md` §4.F's locate-payload procedure.
    pub fn parse(tail28: Option<&[u8; 28]>, tail24: Option<&[u8; 24]>) -> Result<Footer, HpztError> {
        if let Some(t) = tail28 {
            if &t[0..4] == HPZ2_MAGIC {
                let method = Method::from_byte(t[4]).ok_or(HpztError::CodecUnavailable)?;
                return Ok(Footer {
                    method,
                    original_size: u64::from_le_bytes(t[8..16].try_into().unwrap()),
                    compressed_size: u64::from_le_bytes(t[16..24].try_into().unwrap()),
                    crc32: u32::from_le_bytes(t[24..28].try_into().unwrap()),
                    footer_len: HPZ2_LEN,
                });
            }
        }
        if let Some(t) = tail24 {
            if &t[0..4] == HPZ1_MAGIC {
                return Ok(Footer {
                    method: Method::Deflate,
                    original_size: u64::from_le_bytes(t[4..12].try_into().unwrap()),
                    compressed_size: u64::from_le_bytes(t[12..20].try_into().unwrap()),
                    crc32: u32::from_le_bytes(t[20..24].try_into().unwrap()),
                    footer_len: HPZ1_LEN,
                });
            }
        }
        Err(HpztError::FooterMissing)
    }

    /// Computes the byte offset at which the compressed payload begins,
    /// given the total archive file size. Rejects non-positive offsets.
    pub fn payload_offset(&self, file_size: u64) -> Result<u64, HpztError> {
        let tail = self.footer_len + self.compressed_size;
        if tail >= file_size {
            return Err(HpztError::BadPayloadOffset);
        }
        let offset = file_size - tail;
        if offset == 0 {
            return Err(HpztError::BadPayloadOffset);
        }
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hpz2_round_trips() {
        let footer = Footer {
            method: Method::Deflate,
            original_size: 123_456,
            compressed_size: 98_765,
            crc32: 0xDEAD_BEEF,
            footer_len: HPZ2_LEN,
        };
        let bytes = footer.to_hpz2_bytes();
        let parsed = Footer::parse(Some(&bytes), None).unwrap();
        assert_eq!(parsed.method, Method::Deflate);
        assert_eq!(parsed.original_size, 123_456);
        assert_eq!(parsed.compressed_size, 98_765);
        assert_eq!(parsed.crc32, 0xDEAD_BEEF);
        assert_eq!(parsed.footer_len, HPZ2_LEN);
    }

    #[test]
    fn hpz1_legacy_accepted_as_deflate() {
        let mut t = [0u8; 24];
        t[0..4].copy_from_slice(HPZ1_MAGIC);
        t[4..12].copy_from_slice(&500u64.to_le_bytes());
        t[12..20].copy_from_slice(&300u64.to_le_bytes());
        t[20..24].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        let parsed = Footer::parse(None, Some(&t)).unwrap();
        assert_eq!(parsed.method, Method::Deflate);
        assert_eq!(parsed.original_size, 500);
        assert_eq!(parsed.footer_len, HPZ1_LEN);
    }

    #[test]
    fn neither_magic_is_footer_missing() {
        let t28 = [0u8; 28];
        let t24 = [0u8; 24];
        let result = Footer::parse(Some(&t28), Some(&t24));
        assert!(matches!(result, Err(HpztError::FooterMissing)));
    }

    #[test]
    fn hpz2_preferred_over_hpz1_when_both_present() {
        let mut t28 = [0u8; 28];
        t28[0..4].copy_from_slice(HPZ2_MAGIC);
        t28[4] = Method::Store.as_byte();
        t28[8..16].copy_from_slice(&10u64.to_le_bytes());
        t28[16..24].copy_from_slice(&10u64.to_le_bytes());
        let mut t24 = [0u8; 24];
        t24[0..4].copy_from_slice(HPZ1_MAGIC);
        let parsed = Footer::parse(Some(&t28), Some(&t24)).unwrap();
        assert_eq!(parsed.footer_len, HPZ2_LEN);
    }

    #[test]
    fn payload_offset_rejects_non_positive() {
        let footer = Footer {
            method: Method::Store,
            original_size: 0,
            compressed_size: 100,
            crc32: 0,
            footer_len: HPZ2_LEN,
        };
        // file exactly footer_len + compressed_size: offset would be 0.
        assert!(matches!(
            footer.payload_offset(HPZ2_LEN + 100),
            Err(HpztError::BadPayloadOffset)
        ));
        // file smaller than footer+compressed: offset would be negative.
        assert!(matches!(
            footer.payload_offset(10),
            Err(HpztError::BadPayloadOffset)
        ));
    }

    #[test]
    fn payload_offset_positive_case() {
        let footer = Footer {
            method: Method::Store,
            original_size: 0,
            compressed_size: 100,
            crc32: 0,
            footer_len: HPZ2_LEN,
        };
        let off = footer.payload_offset(HPZ2_LEN + 100 + 5000).unwrap();
        assert_eq!(off, 5000);
    }
}
