mod banner;
mod config;
mod terminal;

use std::io::{self, Write};
use std::panic;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rustix::termios::{self, OptionalActions, Termios};

use crate::config::Config;
use crate::terminal::escape::{self, key};
use crate::terminal::{fatal, read_keypress, window_size, RawModeGuard};

/// Command-line options. The surface is tiny, so parsing is by hand.
#[derive(Clone, Debug, PartialEq)]
struct Args {
    /// Override the configured read timeout
    timeout_ms: Option<u64>,
    /// Whether to print the session banner
    banner: bool,
    version: bool,
    help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            banner: true,
            version: false,
            help: false,
        }
    }
}

fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = argv.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-t" | "--timeout" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{arg} requires a value in milliseconds"))?;
                let ms = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid timeout '{value}'"))?;
                args.timeout_ms = Some(ms);
            }
            "--no-banner" => args.banner = false,
            "-V" | "--version" => args.version = true,
            "-h" | "--help" => args.help = true,
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(args)
}

fn usage() {
    println!("usage: scrawl [-t MS] [--no-banner]");
    println!();
    println!("  -t, --timeout MS   keypress read timeout in milliseconds (default 100)");
    println!("      --no-banner    skip the session banner");
    println!("  -V, --version      print version");
    println!("  -h, --help         show this help");
}

/// Restore the terminal before the default panic output runs, so the
/// message prints readably on a cooked terminal.
fn install_panic_hook(original: Termios) {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = termios::tcsetattr(io::stdin(), OptionalActions::Flush, &original);
        print!("{}{}", escape::CLEAR_SCREEN, escape::CURSOR_HOME);
        hook(info);
    }));
}

/// Human-readable form of a keypress byte for the echo loop.
fn describe_keypress(byte: u8) -> String {
    match byte {
        key::ESC => format!("{byte} (ESC)"),
        key::CR => format!("{byte} (CR)"),
        key::DEL => format!("{byte} (DEL)"),
        _ if byte.is_ascii_graphic() || byte == b' ' => {
            format!("{} ('{}')", byte, byte as char)
        }
        _ => format!("{byte}"),
    }
}

/// Read and echo keypresses until Ctrl-Q; returns how many keys were seen.
///
/// Output post-processing is off while this runs, so every line ends with
/// an explicit CRLF.
fn key_loop() -> Result<u64> {
    let mut keypresses = 0u64;
    loop {
        let byte = read_keypress(io::stdin())?;
        if byte == key::ctrl(b'q') {
            return Ok(keypresses);
        }
        keypresses += 1;
        print!("{}\r\n", describe_keypress(byte));
        let _ = io::stdout().flush();
    }
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("scrawl: {message}");
            usage();
            std::process::exit(2);
        }
    };

    if args.help {
        usage();
        return Ok(());
    }
    if args.version {
        println!("scrawl {}", banner::VERSION);
        return Ok(());
    }

    let config = Config::load_or_init().context("load configuration")?;
    let timeout_ms = args.timeout_ms.unwrap_or(config.read_timeout_ms);

    let size = window_size(io::stdout()).context("query window size")?;

    // Banner goes out while the terminal is still cooked
    if args.banner {
        banner::print_session_banner(size, timeout_ms);
    }

    let guard = RawModeGuard::enter(io::stdin(), Duration::from_millis(timeout_ms))
        .context("enter raw mode")?;
    install_panic_hook(guard.original().clone());

    let started = Instant::now();
    let keypresses = match key_loop() {
        Ok(count) => count,
        Err(err) => {
            // Put the terminal back before the fatal path wipes the screen
            drop(guard);
            fatal::die("read", err);
        }
    };

    if let Err(err) = guard.exit() {
        fatal::die("restore terminal", err);
    }

    if config.clear_on_exit {
        print!("{}{}", escape::CLEAR_SCREEN, escape::CURSOR_HOME);
        let _ = io::stdout().flush();
    }

    // Summary prints after the terminal is cooked again
    println!(
        "Session: {} keypresses in {}s",
        keypresses,
        started.elapsed().as_secs()
    );

    Ok(())
}
