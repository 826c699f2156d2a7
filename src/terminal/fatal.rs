//! Fatal-error path.
//!
//! A terminal in an unknown state cannot be recovered from inside the
//! process; the only safe move is to wipe the display so the error is
//! readable and get out with a failing status.

use std::fmt::Display;
use std::io::{self, Write};
use std::process;

use super::escape;

/// Reset the display, report the error on stderr, and terminate.
///
/// Callers restore terminal attributes first (guard drop or exit) so the
/// shell gets a usable terminal back.
pub fn die(context: &str, err: impl Display) -> ! {
    let mut out = io::stdout();
    let _ = write!(out, "{}{}", escape::CLEAR_SCREEN, escape::CURSOR_HOME);
    let _ = out.flush();

    eprintln!("scrawl: {context}: {err}");
    process::exit(1);
}
