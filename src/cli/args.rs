//! Command-line argument parsing for `hpzpack`.
//!
//! Hand-rolled, matching the teacher's actual CLI practice (the teacher's
//! `Cargo.toml` names `clap` but never calls into it from `src/`). The entry
//! points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, for unit tests).

use anyhow::bail;

use crate::hpzt::{FLAG_DASH, FLAG_DICT, FLAG_DIGITS, FLAG_EQUAL, FLAG_NL, FLAG_SPACE};
use crate::sink::Method;

/// Fully parsed compressor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOptions {
    pub input: String,
    pub output: String,
    pub method: Method,
    pub flags: u8,
}

/// Parses `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> anyhow::Result<CompressOptions> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

/// Parses an explicit argument list (argv[1..]), callable from tests
/// without touching `std::env`.
pub fn parse_args_from(argv: &[String]) -> anyhow::Result<CompressOptions> {
    let mut method = Method::Deflate;
    let mut flags: u8 = FLAG_DICT | FLAG_SPACE | FLAG_NL | FLAG_DIGITS | FLAG_DASH | FLAG_EQUAL;
    let mut positionals: Vec<&str> = Vec::new();

    let mut i = 0usize;
    while i < argv.len() {
        let arg = argv[i].as_str();
        match arg {
            "-h" | "--help" => {
                // Handled by the caller via `is_help_request` before parsing
                // proper begins; skip here so it never reaches positionals.
            }
            "-v" | "--verbose" => {
                let prev = crate::cli::constants::display_level();
                crate::cli::constants::set_display_level(prev + 1);
            }
            "-q" | "--quiet" => {
                let prev = crate::cli::constants::display_level();
                crate::cli::constants::set_display_level(prev.saturating_sub(1));
            }
            "--no-transform" => flags = 0,
            "--no-dict" => flags &= !FLAG_DICT,
            "--no-space-run" => flags &= !FLAG_SPACE,
            "--no-nl-run" => flags &= !FLAG_NL,
            "--no-digit-run" => flags &= !FLAG_DIGITS,
            "--no-dash-run" => flags &= !FLAG_DASH,
            "--no-equals-run" => flags &= !FLAG_EQUAL,
            _ if arg.starts_with("--method=") => {
                let v = &arg["--method=".len()..];
                method = match v {
                    "zlib" => Method::Deflate,
                    "store" => Method::Store,
                    other => bail!("bad usage: unknown --method value '{other}' (expected zlib or store)"),
                };
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                bail!("bad usage: unrecognized option '{arg}'");
            }
            _ => positionals.push(arg),
        }
        i += 1;
    }

    if positionals.len() != 2 {
        bail!(
            "bad usage: expected exactly 2 positional arguments (input, output_archive), got {}",
            positionals.len()
        );
    }

    Ok(CompressOptions {
        input: positionals[0].to_string(),
        output: positionals[1].to_string(),
        method,
        flags,
    })
}

/// Error returned by [`parse_args_from`] when the caller requested help
/// text rather than an invalid invocation. Distinguishes "print help, exit
/// 0" from "print usage error, exit 2" at the call site.
pub fn is_help_request(argv: &[String]) -> bool {
    argv.iter().any(|a| a == "-h" || a == "--help")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn minimal_invocation_defaults() {
        let opts = parse_args_from(&args(&["in.txt", "out.hpz"])).unwrap();
        assert_eq!(opts.input, "in.txt");
        assert_eq!(opts.output, "out.hpz");
        assert_eq!(opts.method, Method::Deflate);
        assert_eq!(flags_all_enabled(opts.flags), true);
    }

    fn flags_all_enabled(flags: u8) -> bool {
        flags == (FLAG_DICT | FLAG_SPACE | FLAG_NL | FLAG_DIGITS | FLAG_DASH | FLAG_EQUAL)
    }

    #[test]
    fn method_store_flag() {
        let opts = parse_args_from(&args(&["--method=store", "in.txt", "out.hpz"])).unwrap();
        assert_eq!(opts.method, Method::Store);
    }

    #[test]
    fn no_transform_clears_all_flags() {
        let opts = parse_args_from(&args(&["--no-transform", "in.txt", "out.hpz"])).unwrap();
        assert_eq!(opts.flags, 0);
    }

    #[test]
    fn individual_feature_disable_flags() {
        let opts = parse_args_from(&args(&["--no-dict", "--no-dash-run", "in.txt", "out.hpz"])).unwrap();
        assert_eq!(opts.flags & FLAG_DICT, 0);
        assert_eq!(opts.flags & FLAG_DASH, 0);
        assert_ne!(opts.flags & FLAG_SPACE, 0);
    }

    #[test]
    fn missing_positionals_is_usage_error() {
        assert!(parse_args_from(&args(&["in.txt"])).is_err());
        assert!(parse_args_from(&args(&[])).is_err());
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        assert!(parse_args_from(&args(&["--bogus", "in.txt", "out.hpz"])).is_err());
    }

    #[test]
    fn unknown_method_is_usage_error() {
        assert!(parse_args_from(&args(&["--method=lzma", "in.txt", "out.hpz"])).is_err());
    }

    #[test]
    fn help_request_detected() {
        assert!(is_help_request(&args(&["-h"])));
        assert!(is_help_request(&args(&["--help"])));
        assert!(!is_help_request(&args(&["in.txt", "out.hpz"])));
    }
}
