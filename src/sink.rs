//! Component E: the stream sink abstraction — STORE (passthrough) and
//! DEFLATE (zlib), both exposing a uniform `write`/`finish` contract.
//!
//! The DEFLATE backend is built on `flate2::{Compress, Decompress}` in
//! streaming mode, grounded in the pack's rsync `compressed_token.rs`
//! reference (`Compress::new`/`compress`/`FlushCompress` usage pattern).
//! `original_source/src/dlz.cpp` dlopen's libz at runtime so the original
//! program can run without it; here `flate2` is linked normally, so that
//! fallback layer does not apply — `CodecUnavailable` is kept only for the
//! case of an unrecognized method byte on read.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::error::HpztError;

/// Compression method recorded in the HPZ2 footer (`spec.md` §4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Store = 0,
    Deflate = 1,
}

impl Method {
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(b: u8) -> Option<Method> {
        match b {
            0 => Some(Method::Store),
            1 => Some(Method::Deflate),
            _ => None,
        }
    }
}

const CHUNK: usize = 64 * 1024;

/// Write-side sink: accepts encoder output, produces the compressed
/// payload written to the archive.
pub enum Sink {
    Store { written: u64 },
    Deflate { compress: Box<Compress>, written: u64 },
}

impl Sink {
    pub fn new(method: Method) -> Self {
        match method {
            Method::Store => Sink::Store { written: 0 },
            Method::Deflate => Sink::Deflate {
                compress: Box::new(Compress::new(Compression::new(9), true)),
                written: 0,
            },
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Sink::Store { .. } => Method::Store,
            Sink::Deflate { .. } => Method::Deflate,
        }
    }

    /// Number of compressed bytes produced so far.
    pub fn compressed_len(&self) -> u64 {
        match self {
            Sink::Store { written } => *written,
            Sink::Deflate { written, .. } => *written,
        }
    }

    /// Feeds `data` through the sink, appending produced compressed bytes to
    /// `out`.
    pub fn write(&mut self, data: &[u8], out: &mut Vec<u8>) -> Result<(), HpztError> {
        match self {
            Sink::Store { written } => {
                out.extend_from_slice(data);
                *written += data.len() as u64;
                Ok(())
            }
            Sink::Deflate { compress, written } => {
                let mut buf = [0u8; CHUNK];
                let mut input = data;
                loop {
                    let before_in = compress.total_in();
                    let before_out = compress.total_out();
                    let status = compress
                        .compress(input, &mut buf, FlushCompress::None)
                        .map_err(|e| HpztError::CodecError(e.to_string()))?;
                    let consumed = (compress.total_in() - before_in) as usize;
                    let produced = (compress.total_out() - before_out) as usize;
                    out.extend_from_slice(&buf[..produced]);
                    *written += produced as u64;
                    input = &input[consumed..];
                    if input.is_empty() {
                        break;
                    }
                    if status == Status::BufError && produced == 0 && consumed == 0 {
                        return Err(HpztError::CodecError("deflate made no progress".into()));
                    }
                }
                Ok(())
            }
        }
    }

    /// Flushes and terminates the sink, appending any remaining compressed
    /// bytes to `out`.
    pub fn finish(mut self, out: &mut Vec<u8>) -> Result<(), HpztError> {
        if let Sink::Deflate { compress, written } = &mut self {
            let mut buf = [0u8; CHUNK];
            loop {
                let before_out = compress.total_out();
                let status = compress
                    .compress(&[], &mut buf, FlushCompress::Finish)
                    .map_err(|e| HpztError::CodecError(e.to_string()))?;
                let produced = (compress.total_out() - before_out) as usize;
                out.extend_from_slice(&buf[..produced]);
                *written += produced as u64;
                if status == Status::StreamEnd {
                    break;
                }
                if produced == 0 {
                    return Err(HpztError::CodecError("deflate finish made no progress".into()));
                }
            }
        }
        Ok(())
    }
}

/// Read-side counterpart: inflates (or passes through) compressed payload
/// bytes back into the HPZT transform stream.
pub enum SinkReader {
    Store,
    Deflate { decompress: Box<Decompress> },
}

impl SinkReader {
    pub fn new(method: Method) -> Self {
        match method {
            Method::Store => SinkReader::Store,
            Method::Deflate => SinkReader::Deflate {
                decompress: Box::new(Decompress::new(true)),
            },
        }
    }

    /// Feeds a chunk of compressed bytes, appending decompressed bytes to
    /// `out`.
    pub fn write(&mut self, data: &[u8], out: &mut Vec<u8>) -> Result<(), HpztError> {
        match self {
            SinkReader::Store => {
                out.extend_from_slice(data);
                Ok(())
            }
            SinkReader::Deflate { decompress } => {
                let mut buf = [0u8; CHUNK];
                let mut input = data;
                loop {
                    let before_in = decompress.total_in();
                    let before_out = decompress.total_out();
                    let status = decompress
                        .decompress(input, &mut buf, FlushDecompress::None)
                        .map_err(|e| HpztError::CodecError(e.to_string()))?;
                    let consumed = (decompress.total_in() - before_in) as usize;
                    let produced = (decompress.total_out() - before_out) as usize;
                    out.extend_from_slice(&buf[..produced]);
                    input = &input[consumed..];
                    if status == Status::StreamEnd || input.is_empty() {
                        break;
                    }
                    if produced == 0 && consumed == 0 {
                        return Err(HpztError::CodecError("inflate made no progress".into()));
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trip() {
        let mut sink = Sink::new(Method::Store);
        let mut compressed = Vec::new();
        sink.write(b"hello world", &mut compressed).unwrap();
        sink.finish(&mut compressed).unwrap();
        assert_eq!(compressed, b"hello world");

        let mut reader = SinkReader::new(Method::Store);
        let mut out = Vec::new();
        reader.write(&compressed, &mut out).unwrap();
        assert_eq!(out, b"hello world");
    }

    #[test]
    fn deflate_round_trip_small() {
        let data = b"the quick brown fox jumps over the lazy dog ".repeat(50);
        let mut sink = Sink::new(Method::Deflate);
        let mut compressed = Vec::new();
        sink.write(&data, &mut compressed).unwrap();
        sink.finish(&mut compressed).unwrap();
        assert!(compressed.len() < data.len());

        let mut reader = SinkReader::new(Method::Deflate);
        let mut out = Vec::new();
        reader.write(&compressed, &mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn deflate_round_trip_chunked_write() {
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let mut sink = Sink::new(Method::Deflate);
        let mut compressed = Vec::new();
        for chunk in data.chunks(4096) {
            sink.write(chunk, &mut compressed).unwrap();
        }
        sink.finish(&mut compressed).unwrap();

        let mut reader = SinkReader::new(Method::Deflate);
        let mut out = Vec::new();
        for chunk in compressed.chunks(1024) {
            reader.write(chunk, &mut out).unwrap();
        }
        assert_eq!(out, data);
    }

    #[test]
    fn method_byte_round_trips() {
        assert_eq!(Method::from_byte(0), Some(Method::Store));
        assert_eq!(Method::from_byte(1), Some(Method::Deflate));
        assert_eq!(Method::from_byte(2), None);
    }
}
