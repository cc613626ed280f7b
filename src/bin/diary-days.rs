// src/bin/diary-days.rs
//
// diary-days: count week days and weekend days in a diary date list
//
// Input lines are `DD Mon YYYY`, optionally followed by a `# comment`. Blank
// and comment-only lines are skipped. Each date is counted as the day after
// it. A malformed line aborts the run.
//
// Default input: diary-dates.txt in the current directory.

use anyhow::Context;
use blogtext::dates::count_days;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Date list
    #[arg(default_value = "diary-dates.txt")]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    let cli = Cli::parse();

    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let counts = count_days(&src).with_context(|| format!("in {}", cli.input.display()))?;

    println!("{counts}");
    Ok(())
}
