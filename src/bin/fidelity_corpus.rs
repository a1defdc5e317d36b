use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use clap::Parser as _;
use php_cst::parser::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Parses every `.php` file under a directory and checks that the tree
/// spells out the file exactly.
#[derive(clap::Parser)]
struct Cli {
    dir: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    println!("Scanning directory: {}", cli.dir.display());
    let files = find_php_files(&cli.dir);
    println!("Found {} PHP files", files.len());

    let total = files.len();
    let processed = AtomicUsize::new(0);
    let clean = AtomicUsize::new(0);
    let with_errors = AtomicUsize::new(0);
    let with_anomalies = AtomicUsize::new(0);
    let mismatched = AtomicUsize::new(0);
    let unreadable = AtomicUsize::new(0);

    let start = Instant::now();

    files.par_iter().for_each(|path| {
        let code = match fs::read_to_string(path) {
            Ok(code) => code,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "skipping unreadable file");
                unreadable.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        let mut parser = Parser::new(&code);
        let root = parser.parse();

        if root.text(&code) != code {
            let count = mismatched.fetch_add(1, Ordering::Relaxed);
            if count < 5 {
                println!("Fidelity mismatch: {}", path.display());
            }
        } else if root.errors().is_empty() {
            clean.fetch_add(1, Ordering::Relaxed);
        } else {
            with_errors.fetch_add(1, Ordering::Relaxed);
        }
        if !parser.anomalies().is_empty() {
            with_anomalies.fetch_add(1, Ordering::Relaxed);
        }

        let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
        if done.is_multiple_of(50) {
            print!("\rProcessed {done}/{total} files...");
            let _ = std::io::stdout().flush();
        }
    });

    let mismatched = mismatched.load(Ordering::Relaxed);
    println!("\n\n--------------------------------------------------");
    println!("Scan complete in {:.2?}", start.elapsed());
    println!("Total files: {total}");
    println!("Clean: {}", clean.load(Ordering::Relaxed));
    println!("With syntax errors: {}", with_errors.load(Ordering::Relaxed));
    println!("With lexical anomalies: {}", with_anomalies.load(Ordering::Relaxed));
    println!("Unreadable: {}", unreadable.load(Ordering::Relaxed));
    println!("Fidelity mismatches: {mismatched}");

    Ok(if mismatched > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn find_php_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "php"))
        .collect()
}
