//! Self-extractor stub. Prepended verbatim ahead of the HPZT+DEFLATE
//! payload by `hpzpack`, producing a self-extracting archive: running the
//! resulting file locates its own trailing footer, decodes the payload, and
//! writes the reconstructed original bytes out.
//!
//! Ported from `original_source/src/archive_main.cpp::main`.

use std::path::PathBuf;

fn output_path() -> PathBuf {
    std::env::var(hpzt::config::ENV_OUTPUT)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(hpzt::config::DEFAULT_EXTRACT_OUTPUT))
}

fn main() {
    hpzt::cli::constants::apply_env_verbosity();

    let exe = match std::env::current_exe() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[ERROR] cannot determine self path: {e}");
            std::process::exit(2);
        }
    };

    let out_path = output_path();
    match hpzt::pipeline::extract_archive(&exe, &out_path) {
        Ok(report) => {
            eprintln!("[OK] wrote {} ({} bytes)", out_path.display(), report.bytes_written);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("[ERROR] {e}");
            std::process::exit(1);
        }
    }
}
