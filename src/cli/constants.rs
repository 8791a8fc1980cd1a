//! Notification-level globals and display macros.
//!
//! Mirrors the teacher's `cli/constants.rs`: a single process-wide atomic
//! verbosity level gates `eprint!`/`print!` calls throughout the crate via
//! macros, rather than routing through an external logging framework. 0 =
//! silent, 1 = errors only, 2 = normal (default), 3+ = verbose.

use std::sync::atomic::{AtomicU32, Ordering};

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current notification level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the notification level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Seeds the notification level from `HPZT_VERBOSITY`, if set and parseable.
/// Called once at the start of each binary's `main`, before argv parsing, so
/// `-v`/`-q` still adjust relative to whatever the environment requested.
pub fn apply_env_verbosity() {
    if let Ok(val) = std::env::var(crate::config::ENV_VERBOSITY) {
        if let Ok(level) = val.parse::<u32>() {
            set_display_level(level);
        }
    }
}

/// Print to stdout unconditionally.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr only when the notification level is at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}

/// Print to stderr only in debug builds.
#[macro_export]
macro_rules! debugoutput {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        eprintln!($($arg)*);
    };
}

/// Print a diagnostic to stderr (gated at level 1) and exit with `$code`.
#[macro_export]
macro_rules! end_process {
    ($code:expr, $($arg:tt)*) => {{
        if $crate::cli::constants::display_level() >= 1 {
            eprint!("hpzpack: ");
            eprintln!($($arg)*);
        }
        std::process::exit($code as i32);
    }};
}
