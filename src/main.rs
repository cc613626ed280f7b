// src/main.rs
//
// blogtext: tidy a blog-post HTML fragment
//
// - Prose paragraphs get the blog's `<br />` separators; day headings, quote
//   and float containers and lists are left bare.
// - <pre> blocks: build-environment path prefixes stripped, lines wrapped to
//   --width (continuations indented by four), content escaped.
// - <tt> spans: content escaped verbatim.
// - Em-dashes and double quotes in prose become &mdash; and &quot;.
// - The result is printed to stdout, then checked for tag balance. Mismatches
//   are printed after the output and do not change the exit status.
//
// CLI flags:
//   --width <N>     : wrap width for preformatted lines (default 80)
//   --no-validate   : skip the tag-balance check
// Default input: in.html in the current directory.

use anyhow::Context;
use blogtext::{reflow::reflow, validate::validate, wrap::Wrap};
use clap::{ArgAction, Parser};
use std::fs;
use std::path::PathBuf;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Wrap width for preformatted blocks
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u16).range(8..))]
    width: u16,

    /// Skip the tag-balance check of the output
    #[arg(long = "no-validate", action = ArgAction::SetTrue)]
    no_validate: bool,

    /// Input file
    #[arg(default_value = "in.html")]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    let cli = Cli::parse();

    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let text = reflow(&src, Wrap::new(cli.width.into()));
    println!("{text}");

    if !cli.no_validate {
        let mismatches = validate(&text);
        for mismatch in &mismatches {
            println!("{mismatch}");
        }
        log::debug!("{} tag mismatches", mismatches.len());
    }
    Ok(())
}
