//! Archive inspector. Prints footer and (if present) HPZT header fields for
//! a `.hpz` archive without modifying or extracting it.
//!
//! Ported from `original_source/src/hpzt_dump.cpp::main`. Supplemental to
//! the core compress/extract pipeline.

use std::path::Path;

fn main() {
    hpzt::cli::constants::apply_env_verbosity();

    let argv: Vec<String> = std::env::args().collect();
    if argv.len() != 2 {
        eprintln!("Usage: {} <archive>", argv.first().map(String::as_str).unwrap_or("hpzdump"));
        std::process::exit(2);
    }
    let path = Path::new(&argv[1]);

    let report = match hpzt::pipeline::inspect_archive(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            std::process::exit(1);
        }
    };

    println!("archive={}", path.display());
    println!("size_total={}", report.file_size);
    println!(
        "method={}",
        match report.method {
            hpzt::sink::Method::Deflate => "ZLIB",
            hpzt::sink::Method::Store => "STORE",
        }
    );
    println!("orig_size={}", report.original_size);
    println!("comp_size={}", report.compressed_size);
    println!("payload_off={}", report.payload_offset);
    println!("footer={}", report.footer_kind);
    println!("payload_has_hpzt={}", if report.hpzt_version.is_some() { "yes" } else { "no" });
    if let Some(ver) = report.hpzt_version {
        println!("hpzt_ver={ver}");
        println!("hpzt_flags=0x{:02x}", report.hpzt_flags.unwrap_or(0));
        if let Some(matched) = report.dict_fingerprint_match {
            println!("dict_fingerprint_match={}", if matched { "yes" } else { "no" });
        }
    }
}
