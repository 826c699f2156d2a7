//! Raw-mode lifecycle for the controlling terminal.
//!
//! Entering raw mode snapshots the current attributes and applies a derived
//! set that delivers bytes immediately and unprocessed: no echo, no line
//! buffering, no signal keys, no flow control, no output post-processing.
//! The snapshot is owned by a guard and restored when the guard exits or is
//! dropped, so every exit path (normal, error, panic unwind) puts the
//! terminal back.

use std::os::fd::AsFd;
use std::time::Duration;

use anyhow::{Context, Result};
use rustix::termios::{
    self, ControlModes, InputModes, LocalModes, OptionalActions, OutputModes, SpecialCodeIndex,
    Termios,
};

/// Guard owning the pre-raw attribute snapshot for a terminal fd.
///
/// Restores exactly once: through [`exit`](Self::exit) when the caller wants
/// the failure surfaced, or best-effort in `Drop` on unwind paths.
pub struct RawModeGuard<F: AsFd> {
    fd: F,
    original: Termios,
    restored: bool,
}

impl<F: AsFd> RawModeGuard<F> {
    /// Switch the terminal into raw mode, returning the guard that restores it.
    ///
    /// `timeout` bounds how long a read may wait for input; it is rounded to
    /// deciseconds (the kernel's VTIME granularity) and clamped to at least
    /// one, so reads always return promptly even with no input.
    pub fn enter(fd: F, timeout: Duration) -> Result<Self> {
        let original = termios::tcgetattr(&fd).context("get terminal attributes")?;

        let raw = raw_attributes(&original, timeout_deciseconds(timeout));
        termios::tcsetattr(&fd, OptionalActions::Flush, &raw)
            .context("set raw terminal attributes")?;

        Ok(Self {
            fd,
            original,
            restored: false,
        })
    }

    /// The attribute snapshot taken before raw mode was applied.
    pub fn original(&self) -> &Termios {
        &self.original
    }

    /// Restore the snapshot, consuming the guard.
    ///
    /// A failure here means the terminal may be left corrupted; callers
    /// should treat it as fatal.
    pub fn exit(mut self) -> Result<()> {
        self.restored = true;
        termios::tcsetattr(&self.fd, OptionalActions::Flush, &self.original)
            .context("restore terminal attributes")
    }
}

impl<F: AsFd> Drop for RawModeGuard<F> {
    fn drop(&mut self) {
        if !self.restored {
            // Unwind path: nothing useful to do with a failure here
            let _ = termios::tcsetattr(&self.fd, OptionalActions::Flush, &self.original);
        }
    }
}

/// Derive the raw attribute set from a cooked snapshot.
///
/// Input: no break-to-SIGINT, no CR-to-NL translation, no parity checking,
/// no high-bit stripping, no XON/XOFF flow control. Output: no
/// post-processing. Control: 8-bit characters. Local: no echo, no canonical
/// buffering, no extended input processing, no signal keys. Reads return
/// after one byte or `vtime` deciseconds, whichever comes first.
pub fn raw_attributes(original: &Termios, vtime: u8) -> Termios {
    let mut raw = original.clone();

    raw.input_modes &= !(InputModes::BRKINT
        | InputModes::ICRNL
        | InputModes::INPCK
        | InputModes::ISTRIP
        | InputModes::IXON);
    raw.output_modes &= !OutputModes::OPOST;
    raw.control_modes |= ControlModes::CS8;
    raw.local_modes &=
        !(LocalModes::ECHO | LocalModes::ICANON | LocalModes::IEXTEN | LocalModes::ISIG);
    raw.special_codes[SpecialCodeIndex::VMIN] = 0;
    raw.special_codes[SpecialCodeIndex::VTIME] = vtime;

    raw
}

/// Convert a read timeout to VTIME deciseconds, clamped to 1..=255.
fn timeout_deciseconds(timeout: Duration) -> u8 {
    (timeout.as_millis() / 100).clamp(1, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::testing::open_pty;

    fn assert_same_attributes(a: &Termios, b: &Termios) {
        assert_eq!(a.input_modes, b.input_modes);
        assert_eq!(a.output_modes, b.output_modes);
        assert_eq!(a.control_modes, b.control_modes);
        assert_eq!(a.local_modes, b.local_modes);
        assert_eq!(
            a.special_codes[SpecialCodeIndex::VMIN],
            b.special_codes[SpecialCodeIndex::VMIN]
        );
        assert_eq!(
            a.special_codes[SpecialCodeIndex::VTIME],
            b.special_codes[SpecialCodeIndex::VTIME]
        );
    }

    #[test]
    fn test_enter_exit_round_trip() {
        let pty = open_pty();
        let before = termios::tcgetattr(&pty.slave).unwrap();

        let guard = RawModeGuard::enter(&pty.slave, Duration::from_millis(100)).unwrap();
        let during = termios::tcgetattr(&pty.slave).unwrap();
        assert!(!during.local_modes.contains(LocalModes::ECHO));
        guard.exit().unwrap();

        let after = termios::tcgetattr(&pty.slave).unwrap();
        assert_same_attributes(&before, &after);
    }

    #[test]
    fn test_drop_restores() {
        let pty = open_pty();
        let before = termios::tcgetattr(&pty.slave).unwrap();
        {
            let _guard = RawModeGuard::enter(&pty.slave, Duration::from_millis(100)).unwrap();
        }
        let after = termios::tcgetattr(&pty.slave).unwrap();
        assert_same_attributes(&before, &after);
    }

    #[test]
    fn test_raw_attribute_derivation() {
        let pty = open_pty();
        let original = termios::tcgetattr(&pty.slave).unwrap();
        let raw = raw_attributes(&original, 3);

        assert!(!raw.input_modes.intersects(
            InputModes::BRKINT
                | InputModes::ICRNL
                | InputModes::INPCK
                | InputModes::ISTRIP
                | InputModes::IXON
        ));
        assert!(!raw.output_modes.contains(OutputModes::OPOST));
        assert!(raw.control_modes.contains(ControlModes::CS8));
        assert!(!raw.local_modes.intersects(
            LocalModes::ECHO | LocalModes::ICANON | LocalModes::IEXTEN | LocalModes::ISIG
        ));
        assert_eq!(raw.special_codes[SpecialCodeIndex::VMIN], 0);
        assert_eq!(raw.special_codes[SpecialCodeIndex::VTIME], 3);
    }

    #[test]
    fn test_timeout_clamping() {
        assert_eq!(timeout_deciseconds(Duration::ZERO), 1);
        assert_eq!(timeout_deciseconds(Duration::from_millis(100)), 1);
        assert_eq!(timeout_deciseconds(Duration::from_millis(250)), 2);
        assert_eq!(timeout_deciseconds(Duration::from_millis(25_499)), 254);
        assert_eq!(timeout_deciseconds(Duration::from_secs(60)), 255);
    }
}
