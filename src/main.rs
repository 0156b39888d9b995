use clap::Parser;
use std::fs;
use std::path::PathBuf;

use exsmoke::{run_examples, with_clean_working_directory, RunOptions};

#[derive(Parser)]
#[command(name = "exsmoke")]
#[command(version = "0.1.0")]
#[command(about = "Smoke-run analysis example scripts for a bounded number of events")]
struct Cli {
    /// Directory containing example scripts
    dir: PathBuf,
    /// Glob matched against each script's file stem
    #[arg(long, default_value = "*")]
    pattern: String,
    /// Number of simulated events each example is run with
    #[arg(long, default_value_t = 10)]
    nevents: u32,
    /// File name of a known-broken example to skip (repeatable)
    #[arg(long)]
    broken: Vec<String>,
    /// Write a JSON run report to this path
    #[arg(long)]
    report_json: Option<PathBuf>,
    /// Run in the invoking working directory instead of a scratch one
    #[arg(long)]
    keep_cwd: bool,
    /// Verbose harness tracing on stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug = cli.debug || std::env::var("EXSMOKE_DEBUG").is_ok();
    if debug {
        eprintln!(
            "[EXSMOKE][dbg] build {} ({}) @ {}",
            option_env!("GIT_HASH").unwrap_or("no-git"),
            env!("GIT_DIRTY"),
            env!("BUILD_UNIX"),
        );
    }

    // Resolve before any chdir so the scripts stay reachable from the scratch dir.
    let dir = fs::canonicalize(&cli.dir)?;
    let opts = RunOptions {
        nevents: cli.nevents,
        broken: cli.broken,
        debug,
    };

    let report = if cli.keep_cwd {
        run_examples(&dir, &cli.pattern, &opts)?
    } else {
        with_clean_working_directory(|| run_examples(&dir, &cli.pattern, &opts))??
    };

    // Written after the scratch scope ends, so a relative path lands next to
    // the invoking directory rather than inside the removed scratch dir.
    if let Some(path) = &cli.report_json {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    println!(
        "{} passed, {} failed, {} skipped",
        report.passed, report.failed, report.skipped
    );
    if report.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
