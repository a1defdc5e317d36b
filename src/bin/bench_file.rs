use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser as _;
use php_cst::parser::Parser;
use pprof::protos::Message;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
struct Cli {
    file: PathBuf,
    #[arg(long, default_value_t = 200)]
    iterations: u32,
    #[arg(long, default_value_t = 50)]
    warmup: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let code = fs::read_to_string(&cli.file).with_context(|| format!("failed to read {}", cli.file.display()))?;
    let iterations = cli.iterations.max(1);

    println!("Benchmarking: {}", cli.file.display());
    println!("File size: {:.2} KB", code.len() as f64 / 1024.0);

    println!("Warming up...");
    for _ in 0..cli.warmup {
        std::hint::black_box(Parser::new(std::hint::black_box(&code)).parse());
    }

    println!("Running {iterations} iterations...");
    let guard = pprof::ProfilerGuardBuilder::default()
        .frequency(1000)
        .blocklist(&["libc", "libgcc", "pthread", "vdso"])
        .build()
        .context("failed to start profiler")?;

    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(Parser::new(std::hint::black_box(&code)).parse());
    }
    let duration = start.elapsed();

    match guard.report().build() {
        Ok(report) => {
            let profile = report.pprof().context("failed to encode profile")?;
            let mut content = Vec::new();
            profile.write_to_vec(&mut content).context("failed to encode profile")?;
            File::create("profile.pb")?.write_all(&content)?;
            println!("Profile written to profile.pb");

            report.flamegraph(File::create("flamegraph.svg")?).context("failed to render flamegraph")?;
            println!("Flamegraph written to flamegraph.svg");
        }
        Err(err) => tracing::warn!(%err, "no profile collected"),
    }

    let average = duration / iterations;
    let throughput = (code.len() as f64 * f64::from(iterations)) / duration.as_secs_f64() / 1_024.0 / 1_024.0;

    println!("Total time: {duration:?}");
    println!("Average time: {average:?}");
    println!("Throughput: {throughput:.2} MB/s");
    Ok(())
}
