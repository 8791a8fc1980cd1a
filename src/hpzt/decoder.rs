//! Component D: the HPZT streaming decoder.
//!
//! Ported from `original_source/src/transform.h`'s `TransformDecoder::feed`,
//! extended with DASH/EQUAL states per the standardized token set. A pure
//! streaming state machine: any `feed` call must be resumable by another,
//! with no assumption about chunk boundaries (`spec.md` §4.D/§5).

use crate::crc32::Crc32State;
use crate::dict;
use crate::error::HpztError;
use crate::hpzt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscState {
    None,
    Seen00,
    SpaceLen,
    NlLen,
    DigitLen,
    DigitCopy,
    DashLen,
    EqualLen,
}

/// Streaming decoder. Owns the running CRC32 and byte-count of the
/// reconstructed output, which the extract pipeline compares against the
/// container footer.
pub struct Decoder {
    header_buf: Vec<u8>,
    header_done: bool,
    passthrough: bool,
    transforms: bool,
    state: EscState,
    digit_left: usize,
    crc: Crc32State,
    written: u64,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            header_buf: Vec::with_capacity(12),
            header_done: false,
            passthrough: false,
            transforms: false,
            state: EscState::None,
            digit_left: 0,
            crc: Crc32State::new(),
            written: 0,
        }
    }

    /// Total bytes emitted to `out` across all `feed` calls so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Running CRC32 of all bytes emitted so far.
    pub fn crc(&self) -> u32 {
        self.crc.clone().finalize()
    }

    /// Feeds a chunk of transform-stream bytes, appending reconstructed
    /// original bytes to `out`.
    pub fn feed(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), HpztError> {
        let mut idx = 0usize;
        if !self.header_done {
            idx = self.feed_header(input, out)?;
            if !self.header_done {
                return Ok(());
            }
        }
        self.feed_body(&input[idx..], out)
    }

    /// Must be called once no more input will arrive. Fails if the decoder
    /// is not in a terminal state (`spec.md` §4.D "End-of-stream condition").
    pub fn finish(&mut self, out: &mut Vec<u8>) -> Result<(), HpztError> {
        if !self.header_done {
            if self.header_buf.is_empty() {
                return Ok(());
            }
            return Err(HpztError::TruncatedEscape);
        }
        if !self.passthrough && self.state != EscState::None {
            return Err(HpztError::TruncatedEscape);
        }
        let _ = out;
        Ok(())
    }

    fn feed_header(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, HpztError> {
        let mut idx = 0usize;

        while self.header_buf.len() < 4 && idx < input.len() {
            self.header_buf.push(input[idx]);
            idx += 1;
        }
        if self.header_buf.len() < 4 {
            return Ok(idx);
        }
        if &self.header_buf[0..4] != hpzt::MAGIC {
            self.emit_slice(out, &self.header_buf.clone());
            self.passthrough = true;
            self.transforms = false;
            self.header_done = true;
            return Ok(idx);
        }

        while self.header_buf.len() < 5 && idx < input.len() {
            self.header_buf.push(input[idx]);
            idx += 1;
        }
        if self.header_buf.len() < 5 {
            return Ok(idx);
        }
        let version = self.header_buf[4];
        let total = if version >= 2 { 12 } else { 8 };

        while self.header_buf.len() < total && idx < input.len() {
            self.header_buf.push(input[idx]);
            idx += 1;
        }
        if self.header_buf.len() < total {
            return Ok(idx);
        }

        let flags = self.header_buf[5];
        self.transforms = flags & hpzt::FLAG_ALL != 0;

        if total == 12 {
            let found = u32::from_le_bytes(self.header_buf[8..12].try_into().unwrap());
            let expected = dict::index().fingerprint();
            if found != expected {
                return Err(HpztError::DictMismatch { expected, found });
            }
        }

        self.header_done = true;
        Ok(idx)
    }

    fn feed_body(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), HpztError> {
        if self.passthrough || !self.transforms {
            self.emit_slice(out, input);
            return Ok(());
        }

        for &b in input {
            match self.state {
                EscState::None => {
                    if b == 0x00 {
                        self.state = EscState::Seen00;
                    } else {
                        self.emit_byte(out, b);
                    }
                }
                EscState::Seen00 => match b {
                    0x00 => {
                        self.emit_byte(out, 0x00);
                        self.state = EscState::None;
                    }
                    hpzt::TOKEN_SPACE => self.state = EscState::SpaceLen,
                    hpzt::TOKEN_NL => self.state = EscState::NlLen,
                    hpzt::TOKEN_DIGITS => self.state = EscState::DigitLen,
                    hpzt::TOKEN_DASH => self.state = EscState::DashLen,
                    hpzt::TOKEN_EQUAL => self.state = EscState::EqualLen,
                    id => {
                        let phrase = dict::index()
                            .phrase(id)
                            .ok_or(HpztError::InvalidToken(id))?;
                        self.emit_slice(out, phrase);
                        self.state = EscState::None;
                    }
                },
                EscState::SpaceLen => {
                    self.emit_repeated(out, b' ', b as usize + 4);
                    self.state = EscState::None;
                }
                EscState::NlLen => {
                    self.emit_repeated(out, b'\n', b as usize + 2);
                    self.state = EscState::None;
                }
                EscState::DashLen => {
                    self.emit_repeated(out, b'-', b as usize + 4);
                    self.state = EscState::None;
                }
                EscState::EqualLen => {
                    self.emit_repeated(out, b'=', b as usize + 5);
                    self.state = EscState::None;
                }
                EscState::DigitLen => {
                    self.digit_left = b as usize + 3;
                    self.state = EscState::DigitCopy;
                }
                EscState::DigitCopy => {
                    self.emit_byte(out, b);
                    self.digit_left -= 1;
                    if self.digit_left == 0 {
                        self.state = EscState::None;
                    }
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn emit_byte(&mut self, out: &mut Vec<u8>, b: u8) {
        out.push(b);
        self.crc.update(&[b]);
        self.written += 1;
    }

    #[inline]
    fn emit_slice(&mut self, out: &mut Vec<u8>, bytes: &[u8]) {
        out.extend_from_slice(bytes);
        self.crc.update(bytes);
        self.written += bytes.len() as u64;
    }

    #[inline]
    fn emit_repeated(&mut self, out: &mut Vec<u8>, b: u8, n: usize) {
        out.extend(std::iter::repeat(b).take(n));
        self.written += n as u64;
        for _ in 0..n {
            self.crc.update(&[b]);
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
