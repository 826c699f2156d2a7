//! Terminal control layer
//!
//! Groups everything that touches the terminal directly:
//! - Raw-mode lifecycle (attribute snapshot and restore)
//! - Single-keypress input
//! - Window geometry
//! - ANSI escape sequences
//! - Fatal-error handling with display reset

pub mod escape;
pub mod fatal;
pub mod input;
pub mod raw;
pub mod size;

#[cfg(test)]
pub(crate) mod testing;

pub use input::read_keypress;
pub use raw::RawModeGuard;
pub use size::{window_size, WindowSize};
