use clap::Parser;
use minilisp::diagnostic::{self, Diagnostic};
use minilisp::interpreter::{parse_and_run, RunError};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "minilisp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mini-LISP interpreter", long_about = None)]
struct Args {
    /// Source file to run; standard input is read to end-of-stream when
    /// omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let source_name = args
        .file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let source = match read_source(&args) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Three outcomes, all ending the process with a success status: a
    // syntax error prints its fixed line, a type violation has already
    // printed its own, and every other runtime failure stops silently.
    match parse_and_run(&source, &mut out) {
        Ok(()) => {}
        Err(RunError::Syntax(error)) => {
            writeln!(out, "syntax error").ok();
            debug_report(&source, &source_name, &error.to_diagnostic());
        }
        Err(RunError::Runtime(error)) => {
            debug_report(&source, &source_name, &error.to_diagnostic());
        }
    }
    out.flush().ok();
}

fn read_source(args: &Args) -> Result<String, String> {
    match &args.file {
        Some(path) => read_file(path),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read from stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Renders the underlying diagnostic to stderr when `MINILISP_DEBUG` is
/// set. Stdout carries only the language's fixed output either way.
fn debug_report(source: &str, source_name: &str, diagnostic: &Diagnostic) {
    if std::env::var_os("MINILISP_DEBUG").is_some() {
        eprint!("{}", diagnostic::render(source, source_name, diagnostic));
    }
}
