//! Session banner
//!
//! Printed before raw mode is entered; nothing here may run while the
//! terminal is raw.

use chrono::Local;

use crate::terminal::escape::{BOLD, DIM, FG_BLUE, FG_CYAN, FG_GRAY, RESET};
use crate::terminal::WindowSize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the session banner: title on the left, geometry, timeout, and date
/// on the right, with a rule stretched to the terminal width.
pub fn print_session_banner(size: WindowSize, timeout_ms: u64) {
    let now = Local::now();
    let date_str = now.format("%A %B %e, %Y %l:%M %p").to_string();
    let date_str = date_str.split_whitespace().collect::<Vec<_>>().join(" ");

    let title = format!("{BOLD}{FG_CYAN}scrawl{RESET} {FG_GRAY}v{VERSION}{RESET}");
    let right_plain = format!(
        "{}x{} · {}ms · {}",
        size.cols, size.rows, timeout_ms, date_str
    );
    let right_side = format!("{FG_GRAY}{right_plain}{RESET}");

    // Plain lengths (escape codes excluded); +4 accounts for the leading
    // space, the two spaces around the rule, and the trailing space
    let title_plain_len = "scrawl".len() + 2 + VERSION.len();
    let right_plain_len = right_plain.chars().count();
    let rule_len = (size.cols as usize).saturating_sub(title_plain_len + right_plain_len + 4);
    let rule = format!("{FG_BLUE}{}{RESET}", "─".repeat(rule_len));

    println!();
    println!(" {title} {rule} {right_side} ");
    println!("{DIM} press keys to see their bytes · ctrl-q quits{RESET}");
    println!();
}
