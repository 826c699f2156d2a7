//! Pseudo-terminal fixture for terminal-layer tests.
//!
//! Tests must not touch the attributes of whatever terminal the test runner
//! happens to be attached to, so each test opens its own pty pair and runs
//! against the slave side.

use std::fs::{File, OpenOptions};
use std::os::unix::ffi::OsStrExt;

use rustix::pty::{self, OpenptFlags};

pub(crate) struct PtyPair {
    /// Write side: bytes written here arrive as keyboard input on `slave`.
    pub master: File,
    /// The terminal under test.
    pub slave: File,
}

/// Open a fresh pty pair, panicking on failure; a box without ptys cannot
/// run these tests at all.
pub(crate) fn open_pty() -> PtyPair {
    let master = pty::openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY).expect("openpt");
    pty::grantpt(&master).expect("grantpt");
    pty::unlockpt(&master).expect("unlockpt");

    let name = pty::ptsname(&master, Vec::new()).expect("ptsname");
    let slave = OpenOptions::new()
        .read(true)
        .write(true)
        .open(std::ffi::OsStr::from_bytes(name.to_bytes()))
        .expect("open pty slave");

    PtyPair {
        master: File::from(master),
        slave,
    }
}
