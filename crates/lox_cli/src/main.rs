//! lox: command-line host for the lox front end.
//!
//! Usage:
//!   lox [options] [script]
//!
//! With a script argument the file is scanned once; without one an
//! interactive prompt scans each entered line.

mod error;
mod reporter;
mod tracing_config;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser as ClapParser};
use error::{CliError, EXIT_DATA_ERROR};
use lox_scanner::Scanner;
use lox_syntax::Token;
use reporter::ConsoleReporter;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "lox", about = "Scan lox source into tokens")]
struct Cli {
    /// Script to scan. Starts an interactive prompt when omitted.
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<PathBuf>,

    /// Print every token of the script to stdout.
    #[arg(long)]
    tokens: bool,

    /// Colorize diagnostics and show source excerpts when stderr is a terminal.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pretty: bool,
}

fn main() {
    tracing_config::init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            tracing::debug!(error = %err, "argument parsing failed");
            exit_with(CliError::Usage);
        }
    };

    let result = match cli.scripts.as_slice() {
        [] => run_prompt(&cli),
        [script] => run_file(&cli, script),
        _ => Err(CliError::Usage),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(err) => exit_with(err),
    }
}

fn exit_with(err: CliError) -> ! {
    eprintln!("{}", err);
    process::exit(err.exit_code());
}

fn run_file(cli: &Cli, path: &Path) -> Result<i32, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "scanning file");

    let mut reporter = ConsoleReporter::stderr(&source, use_color(cli));
    let tokens = Scanner::new(&source).scan_tokens_into(&mut reporter);

    if cli.tokens {
        print_tokens(&tokens)?;
    }

    if reporter.had_error() {
        tracing::debug!(errors = reporter.error_count(), "scan reported errors");
        return Ok(EXIT_DATA_ERROR);
    }
    Ok(0)
}

fn run_prompt(cli: &Cli) -> Result<i32, CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let entry = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if entry.is_empty() {
            break;
        }

        // Each entry gets its own reporter, so errors never carry over.
        let mut reporter = ConsoleReporter::stderr(entry, use_color(cli));
        let tokens = Scanner::new(entry).scan_tokens_into(&mut reporter);
        print_tokens(&tokens)?;
    }

    Ok(0)
}

fn print_tokens(tokens: &[Token]) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    for token in tokens {
        writeln!(out, "{}", token)?;
    }
    out.flush()?;
    Ok(())
}

fn use_color(cli: &Cli) -> bool {
    cli.pretty && stderr_is_terminal()
}

fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: isatty only inspects the descriptor.
        unsafe { libc::isatty(libc::STDERR_FILENO) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
