//! soda-drv - front-end driver
//!
//! ============================================================================
//! DRIVER OVERVIEW
//! ============================================================================
//!
//! This crate is the one external-collaborator surface spec §1 actually asks
//! this workspace to build: a thin CLI that runs the front-end pipeline over
//! one file and reports what happened. It owns none of the phases itself —
//! `soda-lex`, `soda-par`, and `soda-sem` do the real work — only argument
//! parsing, source acquisition, diagnostic printing, and exit codes.
//!
//! ```text
//! source text
//!      │
//!      ▼
//! soda_par::Parser::new   (tokenizes via soda_lex internally)
//!      │
//!      ▼
//! Parser::parse            ──▶ Tu, or a syntax error
//!      │
//!      ▼
//! soda_sem::analyze        ──▶ scope pass, then type-reference pass
//!      │
//!      ▼
//! debug AST dump (stdout)  or diagnostics (stderr)
//! ```
//!
//! EXIT CODES (spec §6):
//! - 0: the translation unit parsed and analyzed with no diagnostics.
//! - 1: a syntax error — the reader, tokenizer, or parser reported one.
//! - 2: a semantic error — the scope or type-reference pass reported one.
//! - anything else: an I/O or usage failure, surfaced as an `anyhow::Error`.
//!
//! There is no backend here and no pretty-printer that reconstructs source
//! text: spec §1 names both as external collaborators this workspace is not
//! responsible for, and the debug dump in [`dump`] is deliberately not that
//! pretty-printer.

pub mod cli;
pub mod dump;

use std::io::Read;

use anyhow::{Context, Result};
use cli::{Action, Config, Input};
use soda_par::Parser;
use soda_sem::analyze;
use soda_util::diagnostic::Handler;
use soda_util::symbol::Symbol;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_SYNTAX_ERROR: i32 = 1;
pub const EXIT_SEMANTIC_ERROR: i32 = 2;
/// Distinct from both diagnostic exit codes so a script can tell "the
/// program has a bug" apart from "the driver couldn't even run it".
pub const EXIT_USAGE_OR_IO_ERROR: i32 = 3;

/// Parses `argv` (sans `argv[0]`), runs the requested action, and returns
/// the process exit code. I/O failures and argument errors become
/// `anyhow::Error`s; the caller in `main.rs` is the only place that prints
/// them and picks [`EXIT_USAGE_OR_IO_ERROR`].
pub fn main() -> Result<i32> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_args(&args)
}

fn run_args(args: &[String]) -> Result<i32> {
    match cli::parse_args(args).context("parsing arguments")? {
        Action::Help => {
            print!("{}", cli::USAGE);
            Ok(EXIT_SUCCESS)
        }
        Action::Version => {
            println!("sodac {}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
        Action::Compile(config) => compile(&config),
    }
}

fn compile(config: &Config) -> Result<i32> {
    let (source, file_name) = read_source(config)?;
    let file = Symbol::intern(&file_name);
    let mut handler = Handler::new();

    let mut parser = Parser::new(&source, file, &mut handler);
    let parsed = parser.parse();

    // Lexical errors land directly in `handler` during tokenization inside
    // `Parser::new`, independently of whether `parse()` itself succeeds.
    if handler.has_errors() {
        print_diagnostics(&handler, &file_name);
        return Ok(EXIT_SYNTAX_ERROR);
    }

    let mut tu = match parsed {
        Ok(tu) => tu,
        Err(err) => {
            eprintln!("{}", err.to_diagnostic().render(&file_name));
            return Ok(EXIT_SYNTAX_ERROR);
        }
    };

    analyze(&mut tu, &mut handler);
    if handler.has_errors() {
        print_diagnostics(&handler, &file_name);
        return Ok(EXIT_SEMANTIC_ERROR);
    }

    print!("{}", dump::dump_tu(&tu));
    Ok(EXIT_SUCCESS)
}

fn read_source(config: &Config) -> Result<(String, String)> {
    match &config.input {
        Input::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading source from stdin")?;
            Ok((buf, "<stdin>".to_string()))
        }
        Input::File(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((source, path.display().to_string()))
        }
    }
}

fn print_diagnostics(handler: &Handler, file_name: &str) {
    for diag in handler.diagnostics() {
        eprintln!("{}", diag.render(file_name));
    }
}
