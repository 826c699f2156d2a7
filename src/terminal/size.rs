//! Terminal window geometry.

use std::os::fd::AsFd;

use anyhow::{bail, Context, Result};
use rustix::termios;

/// Visible terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

/// Query the OS for the terminal's current geometry.
///
/// Fails if the winsize ioctl fails or the terminal reports zero columns,
/// a degenerate size no layout can use.
pub fn window_size(fd: impl AsFd) -> Result<WindowSize> {
    let ws = termios::tcgetwinsize(&fd).context("query terminal window size")?;
    if ws.ws_col == 0 {
        bail!("terminal reports zero columns");
    }
    Ok(WindowSize {
        rows: ws.ws_row,
        cols: ws.ws_col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::testing::open_pty;
    use rustix::termios::Winsize;

    fn set_size(fd: impl AsFd, rows: u16, cols: u16) {
        termios::tcsetwinsize(
            &fd,
            Winsize {
                ws_row: rows,
                ws_col: cols,
                ws_xpixel: 0,
                ws_ypixel: 0,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_reports_pty_geometry() {
        let pty = open_pty();
        set_size(&pty.slave, 24, 80);
        assert_eq!(
            window_size(&pty.slave).unwrap(),
            WindowSize { rows: 24, cols: 80 }
        );

        set_size(&pty.slave, 50, 132);
        assert_eq!(
            window_size(&pty.slave).unwrap(),
            WindowSize {
                rows: 50,
                cols: 132
            }
        );
    }

    #[test]
    fn test_zero_columns_is_an_error() {
        let pty = open_pty();
        set_size(&pty.slave, 24, 0);
        assert!(window_size(&pty.slave).is_err());
    }
}
