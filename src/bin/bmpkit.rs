//! Interactive BMP shell.
//!
//! Usage: `bmpkit [FILE]`. Log verbosity comes from `BMPKIT_LOG`
//! (a level such as `debug`, or `bmpkit=trace` style directives;
//! default `warn`).

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use bmpkit::shell::{Command, Flow, Session};
use tracing_subscriber::EnvFilter;

/// Route the library's `log` records to stderr, filtered by `BMPKIT_LOG`.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("BMPKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();

    let mut session = Session::new();
    if let Some(path) = std::env::args_os().nth(1) {
        match session.execute(Command::Load(path.into())) {
            Ok(Flow::Continue(msg)) => println!("{msg}"),
            Ok(Flow::Exit) => return ExitCode::SUCCESS,
            Err(e) => eprintln!("{e}"),
        }
    }

    println!("BMP shell. Type 'help' for commands.");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("\n> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                return ExitCode::FAILURE;
            }
        }
        match session.run_line(&line) {
            Ok(Flow::Continue(msg)) if msg.is_empty() => {}
            Ok(Flow::Continue(msg)) => println!("{msg}"),
            Ok(Flow::Exit) => break,
            Err(e) => println!("{e}"),
        }
    }

    println!("Goodbye!");
    ExitCode::SUCCESS
}
