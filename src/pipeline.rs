//! Component G (+K): the compress, extract, and inspect pipelines that tie
//! the dictionary, codec, sink, and container components together.
//!
//! Compress is grounded in `original_source/src/comp.cpp::main`; extract in
//! `original_source/src/archive_main.cpp::main`; inspect (supplemental) in
//! `original_source/src/hpzt_dump.cpp`.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::config::{COMPRESS_CHUNK_SIZE, EXTRACT_CHUNK_SIZE};
use crate::container::{Footer, HPZ1_LEN, HPZ2_LEN};
use crate::crc32::Crc32State;
use crate::dict;
use crate::error::HpztError;
use crate::hpzt::{Decoder, Encoder};
use crate::sink::{Method, Sink, SinkReader};

/// Result of a successful compress run, useful for CLI summary output.
pub struct CompressReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub method: Method,
}

/// Copies `stub_path` verbatim, appends the HPZT-transformed, sink-encoded
/// payload for `input_path`, and appends the HPZ2 footer. Mirrors
/// `comp.cpp::main`'s streaming compress loop.
pub fn compress_archive(
    input_path: &str,
    stub_path: Option<&str>,
    output_path: &str,
    method: Method,
    flags: u8,
) -> anyhow::Result<CompressReport> {
    let mut input = File::open(input_path)
        .map_err(|e| anyhow::anyhow!("{input_path}: {e}"))?;

    let mut output = File::create(output_path)
        .map_err(|e| anyhow::anyhow!("{output_path}: {e}"))?;

    if let Some(stub_path) = stub_path {
        let mut stub = File::open(stub_path)
            .map_err(|e| anyhow::anyhow!("{stub_path}: {e}"))?;
        std::io::copy(&mut stub, &mut output)?;
    }

    let mut encoder = Encoder::new(flags);
    let mut sink = Sink::new(method);
    let mut crc = Crc32State::new();
    let mut original_size: u64 = 0;

    if encoder.transforms_enabled() {
        encoder.write_header();
        let header_bytes = encoder.take_output();
        let mut compressed = Vec::new();
        sink.write(&header_bytes, &mut compressed)?;
        output.write_all(&compressed)?;
    }

    let mut buf = vec![0u8; COMPRESS_CHUNK_SIZE];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        crc.update(&buf[..n]);
        original_size += n as u64;
        encoder.process(&buf[..n], false);
        let transformed = encoder.take_output();
        if !transformed.is_empty() {
            let mut compressed = Vec::new();
            sink.write(&transformed, &mut compressed)?;
            output.write_all(&compressed)?;
        }
    }

    encoder.process(&[], true);
    let tail = encoder.take_output();
    let mut compressed = Vec::new();
    sink.write(&tail, &mut compressed)?;
    output.write_all(&compressed)?;

    let mut final_bytes = Vec::new();
    let compressed_method = sink.method();
    let compressed_size_before_finish = sink.compressed_len();
    sink.finish(&mut final_bytes)?;
    output.write_all(&final_bytes)?;
    let compressed_size = compressed_size_before_finish + final_bytes.len() as u64;

    let footer = Footer {
        method: compressed_method,
        original_size,
        compressed_size,
        crc32: crc.finalize(),
        footer_len: HPZ2_LEN,
    };
    output.write_all(&footer.to_hpz2_bytes())?;
    output.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(crate::config::ARCHIVE_PERMISSIONS);
        std::fs::set_permissions(output_path, perms)?;
    }

    Ok(CompressReport {
        original_size,
        compressed_size,
        method: compressed_method,
    })
}

/// Result of a successful extract run.
pub struct ExtractReport {
    pub bytes_written: u64,
}

/// Locates the footer at the tail of `archive_path`, reads the payload, and
/// writes the reconstructed original bytes to `output_path`. Mirrors
/// `archive_main.cpp::main`.
pub fn extract_archive(archive_path: &Path, output_path: &Path) -> anyhow::Result<ExtractReport> {
    let mut archive = File::open(archive_path)?;
    let file_size = archive.metadata()?.len();

    let footer = read_footer(&mut archive, file_size)?;
    let payload_off = footer.payload_offset(file_size).map_err(anyhow::Error::from)?;

    archive.seek(SeekFrom::Start(payload_off))?;

    let mut output = File::create(output_path)?;
    let mut reader = SinkReader::new(footer.method);
    let mut decoder = Decoder::new();

    let mut remaining = footer.compressed_size;
    let mut buf = vec![0u8; EXTRACT_CHUNK_SIZE];
    while remaining > 0 {
        let want = (buf.len() as u64).min(remaining) as usize;
        archive.read_exact(&mut buf[..want])?;
        remaining -= want as u64;

        let mut decompressed = Vec::new();
        reader.write(&buf[..want], &mut decompressed)?;

        let mut decoded = Vec::new();
        decoder.feed(&decompressed, &mut decoded).map_err(anyhow::Error::from)?;
        output.write_all(&decoded)?;
    }

    let mut tail_out = Vec::new();
    decoder.finish(&mut tail_out).map_err(anyhow::Error::from)?;
    output.write_all(&tail_out)?;
    output.flush()?;

    if decoder.written() != footer.original_size {
        return Err(HpztError::LengthMismatch {
            expected: footer.original_size,
            found: decoder.written(),
        }
        .into());
    }
    if decoder.crc() != footer.crc32 {
        return Err(HpztError::CrcMismatch {
            expected: footer.crc32,
            found: decoder.crc(),
        }
        .into());
    }

    Ok(ExtractReport {
        bytes_written: decoder.written(),
    })
}

/// Reads the trailing footer of an open file, preferring HPZ2 (28 bytes)
/// and falling back to legacy HPZ1 (24 bytes), per `spec.md` §4.F.
pub fn read_footer(file: &mut File, file_size: u64) -> Result<Footer, HpztError> {
    let tail28 = if file_size >= HPZ2_LEN {
        let mut buf = [0u8; 28];
        file.seek(SeekFrom::Start(file_size - HPZ2_LEN)).map_err(HpztError::from)?;
        file.read_exact(&mut buf).map_err(HpztError::from)?;
        Some(buf)
    } else {
        None
    };
    let tail24 = if file_size >= HPZ1_LEN {
        let mut buf = [0u8; 24];
        file.seek(SeekFrom::Start(file_size - HPZ1_LEN)).map_err(HpztError::from)?;
        file.read_exact(&mut buf).map_err(HpztError::from)?;
        Some(buf)
    } else {
        None
    };
    Footer::parse(tail28.as_ref(), tail24.as_ref())
}

/// Supplemental read-only diagnostic report (Component K), grounded in
/// `hpzt_dump.cpp`.
pub struct InspectReport {
    pub file_size: u64,
    pub footer_kind: &'static str,
    pub method: Method,
    pub original_size: u64,
    pub compressed_size: u64,
    pub payload_offset: u64,
    pub hpzt_version: Option<u8>,
    pub hpzt_flags: Option<u8>,
    pub dict_fingerprint_match: Option<bool>,
}

pub fn inspect_archive(path: &Path) -> anyhow::Result<InspectReport> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();
    if file_size < HPZ1_LEN {
        anyhow::bail!("file too small to contain a footer");
    }
    let footer = read_footer(&mut file, file_size)?;
    let payload_offset = footer.payload_offset(file_size)?;
    let footer_kind = if footer.footer_len == HPZ2_LEN { "HPZ2" } else { "HPZ1" };

    file.seek(SeekFrom::Start(payload_offset))?;
    let mut head = [0u8; 12];
    let read = read_best_effort(&mut file, &mut head);

    let mut hpzt_version = None;
    let mut hpzt_flags = None;
    let mut dict_fingerprint_match = None;
    if read >= 8 && &head[0..4] == crate::hpzt::MAGIC {
        hpzt_version = Some(head[4]);
        hpzt_flags = Some(head[5]);
        if head[4] >= 2 && read >= 12 {
            let found = u32::from_le_bytes(head[8..12].try_into().unwrap());
            dict_fingerprint_match = Some(found == dict::index().fingerprint());
        }
    }

    Ok(InspectReport {
        file_size,
        footer_kind,
        method: footer.method,
        original_size: footer.original_size,
        compressed_size: footer.compressed_size,
        payload_offset,
        hpzt_version,
        hpzt_flags,
        dict_fingerprint_match,
    })
}

fn read_best_effort(file: &mut File, buf: &mut [u8]) -> usize {
    let mut total = 0;
    while total < buf.len() {
        match file.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(_) => break,
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn compress_then_extract_round_trip_deflate() {
        let dir = tempfile::tempdir().unwrap();
        let input_text = b"{{cite web|title=Test}} [[Category:Demo]]\n\n\n1234567890 ---- ====".to_vec();
        let input = write_temp(&dir, "input.txt", &input_text);
        let stub = write_temp(&dir, "stub", b"#!/bin/sh\n# fake stub\n");
        let archive = dir.path().join("out.hpz");

        let flags = crate::hpzt::FLAG_ALL;
        let report = compress_archive(
            input.to_str().unwrap(),
            Some(stub.to_str().unwrap()),
            archive.to_str().unwrap(),
            Method::Deflate,
            flags,
        )
        .unwrap();
        assert_eq!(report.original_size, input_text.len() as u64);

        let output = dir.path().join("reconstructed.txt");
        let extract_report = extract_archive(&archive, &output).unwrap();
        assert_eq!(extract_report.bytes_written, input_text.len() as u64);

        let reconstructed = std::fs::read(&output).unwrap();
        assert_eq!(reconstructed, input_text);
    }

    #[test]
    fn compress_then_extract_round_trip_store_no_transform() {
        let dir = tempfile::tempdir().unwrap();
        let input_text = b"plain bytes, nothing special here.".to_vec();
        let input = write_temp(&dir, "input.txt", &input_text);
        let stub = write_temp(&dir, "stub", b"stub-bytes");
        let archive = dir.path().join("out.hpz");

        compress_archive(
            input.to_str().unwrap(),
            Some(stub.to_str().unwrap()),
            archive.to_str().unwrap(),
            Method::Store,
            0,
        )
        .unwrap();

        let output = dir.path().join("reconstructed.txt");
        extract_archive(&archive, &output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), input_text);
    }

    #[test]
    fn inspect_reports_footer_and_header_fields() {
        let dir = tempfile::tempdir().unwrap();
        let input_text = b"hello world ".repeat(100);
        let input = write_temp(&dir, "input.txt", &input_text);
        let stub = write_temp(&dir, "stub", b"stub");
        let archive = dir.path().join("out.hpz");

        compress_archive(
            input.to_str().unwrap(),
            Some(stub.to_str().unwrap()),
            archive.to_str().unwrap(),
            Method::Deflate,
            crate::hpzt::FLAG_ALL,
        )
        .unwrap();

        let report = inspect_archive(&archive).unwrap();
        assert_eq!(report.footer_kind, "HPZ2");
        assert_eq!(report.original_size, input_text.len() as u64);
        assert_eq!(report.hpzt_version, Some(2));
        assert_eq!(report.dict_fingerprint_match, Some(true));
    }

    #[test]
    fn extract_fails_on_truncated_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_temp(&dir, "broken.hpz", b"too small");
        let output = dir.path().join("out.txt");
        assert!(extract_archive(&archive, &output).is_err());
    }
}
