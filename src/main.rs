use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser as _, Subcommand};
use php_cst::cst::sexpr;
use php_cst::lexer::Lexer;
use php_cst::parser::Parser;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(name = "php-cst", about = "Inspect the PHP 7 concrete syntax tree of a file")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream.
    Tokens {
        file: PathBuf,
        #[arg(long)]
        json: bool,
        /// Show the mode stack each token was scanned under.
        #[arg(long)]
        modes: bool,
    },
    /// Print the syntax tree.
    Tree {
        file: PathBuf,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        trivia: bool,
    },
    /// Report syntax errors and lexical anomalies.
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Tokens { file, json, modes } => {
            let source = read(&file)?;
            let tokens: Vec<_> = Lexer::new(&source).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    let (line, column) = line_column(&source, token.offset);
                    print!("{line}:{column} {} {:?}", token.kind.name(), token.text(&source));
                    if modes {
                        print!(" {:?}", token.mode_stack);
                    }
                    println!();
                }
            }
        }
        Command::Tree { file, json, trivia } => {
            let source = read(&file)?;
            let root = php_cst::parse(&source);
            if json {
                println!("{}", serde_json::to_string(&root)?);
            } else if trivia {
                println!("{}", sexpr::format_with_trivia(&root, &source));
            } else {
                println!("{}", sexpr::format(&root, &source));
            }
        }
        Command::Check { files } => {
            let mut failed = 0;
            for file in &files {
                let source = read(file)?;
                let mut parser = Parser::new(&source);
                let root = parser.parse();
                for error in root.errors() {
                    let (line, column) = line_column(&source, error.unexpected.offset);
                    match error.expected {
                        Some(expected) => println!(
                            "{}:{line}:{column}: expected {}, found {}",
                            file.display(),
                            expected.text(),
                            error.unexpected.kind.text()
                        ),
                        None => println!(
                            "{}:{line}:{column}: unexpected {}",
                            file.display(),
                            error.unexpected.kind.text()
                        ),
                    }
                }
                for anomaly in parser.anomalies() {
                    let (line, column) = line_column(&source, anomaly.offset);
                    println!("{}:{line}:{column}: {:?}", file.display(), anomaly.kind);
                }
                if !root.errors().is_empty() {
                    failed += 1;
                }
            }
            if failed > 0 {
                tracing::info!(failed, total = files.len(), "syntax errors found");
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// One-based line and column (in bytes) of `offset`.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source.as_bytes()[..offset.min(source.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}
