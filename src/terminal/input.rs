//! Single-keypress input.
//!
//! With VMIN=0 and VTIME set, a read on the terminal returns after at most
//! the configured timeout, with zero bytes when no key arrived. This module
//! hides those empty wakeups and the transient errno values from callers:
//! a call only ever produces the next byte or a genuinely failed read.

use std::os::fd::AsFd;

use anyhow::{Context, Result};
use rustix::io::Errno;

/// Block (within the read timeout) until one byte is available and return it.
///
/// Timeout expiries, `EINTR`, and `EAGAIN` are retried silently; any other
/// read failure is returned and should be treated as fatal.
pub fn read_keypress(fd: impl AsFd) -> Result<u8> {
    let mut byte = [0u8; 1];
    loop {
        match rustix::io::read(&fd, &mut byte[..]) {
            Ok(1) => return Ok(byte[0]),
            // VTIME expired with no input
            Ok(_) => continue,
            Err(err) if err == Errno::INTR || err == Errno::AGAIN => continue,
            Err(err) => {
                return Err(std::io::Error::from(err)).context("read keypress from terminal")
            }
        }
    }
}
