//! Binary entry point for the `hpzpack` compressor.
//!
//! Parses arguments, builds a self-extracting archive by prefixing the
//! compiled `archive_stub` binary to the HPZT+DEFLATE payload, and appends
//! the HPZ2 footer. Corresponds to the post-argument-parsing section of
//! `main()` in `original_source/src/comp.cpp`.

use hpzt::cli::{parse_args, CompressOptions};
use hpzt::pipeline::compress_archive;
use hpzt::sink::Method;

/// Locates the compiled `archive_stub` binary next to the running
/// `hpzpack` executable. Mirrors `comp.cpp`'s `dirname_of(argv[0])` lookup
/// for its helper stub.
fn find_stub() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    let candidate = dir.join("archive_stub");
    if candidate.is_file() {
        return Some(candidate.to_string_lossy().into_owned());
    }
    None
}

fn run(opts: CompressOptions) -> i32 {
    hpzt::displaylevel!(3, "hpzpack: compressing {} -> {}", opts.input, opts.output);

    let stub = find_stub();
    if stub.is_none() {
        hpzt::displaylevel!(
            2,
            "warning: archive_stub not found next to hpzpack; archive will not be self-extracting"
        );
    }

    match compress_archive(&opts.input, stub.as_deref(), &opts.output, opts.method, opts.flags) {
        Ok(report) => {
            let method_name = match report.method {
                Method::Store => "store",
                Method::Deflate => "deflate",
            };
            hpzt::displaylevel!(
                3,
                "{}: {} bytes -> {} bytes ({})",
                opts.input,
                report.original_size,
                report.compressed_size,
                method_name
            );
            0
        }
        Err(e) => {
            hpzt::display!("hpzpack: {}: {}\n", opts.input, e);
            1
        }
    }
}

fn print_usage() {
    hpzt::displayout!(
        "usage: hpzpack [options] <input> <output>\n\n\
         options:\n\
         \x20 --method=zlib|store   compression backend (default: zlib)\n\
         \x20 --no-transform        disable the HPZT text pre-transform entirely\n\
         \x20 --no-dict             disable dictionary phrase substitution\n\
         \x20 --no-space-run        disable space run-length encoding\n\
         \x20 --no-nl-run           disable newline run-length encoding\n\
         \x20 --no-digit-run        disable digit run-length encoding\n\
         \x20 --no-dash-run         disable dash run-length encoding\n\
         \x20 --no-equals-run       disable equals-sign run-length encoding\n\
         \x20 -v, --verbose         increase notification level\n\
         \x20 -q, --quiet           decrease notification level\n\
         \x20 -h, --help            print this message and exit\n"
    );
}

fn main() {
    hpzt::cli::constants::apply_env_verbosity();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if hpzt::cli::args::is_help_request(&argv) {
        print_usage();
        std::process::exit(0);
    }

    let opts = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            if hpzt::cli::constants::display_level() >= 1 {
                eprintln!("hpzpack: {e}");
            }
            std::process::exit(2);
        }
    };

    let exit_code = run(opts);
    std::process::exit(exit_code);
}
