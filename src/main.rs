// src/main.rs

mod aggregate;
mod analyzer;
mod blame;
mod cli;
mod error;
mod extract;
mod filter;
mod git;
mod log;
mod model;
mod renderer;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use extract::GitExtractor;
use indicatif::ProgressBar;
use model::Identity;
use std::io;
use std::process;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let start_time = Instant::now();

    // 1. Pick the files to blame
    let files = git::file_list(&args.repository, &args.revision).with_context(|| {
        format!(
            "get file list for {} ({})",
            args.repository.display(),
            args.revision
        )
    })?;
    let total = files.len();

    let selected = filter::select_by_extensions(files, &args.extensions, &args.languages)
        .context("select by extensions")?;
    let selected = filter::select_by_glob(selected, &args.exclude, &args.restrict_to)
        .context("select by globs")?;
    info!(total, selected = selected.len(), "selected files");

    // 2. Blame them in parallel
    let identity = Identity::from_use_committer(args.use_committer);
    let extractor = GitExtractor::new(&args.repository, &args.revision, identity);

    let bar = ProgressBar::new(selected.len() as u64);
    bar.set_message("Blaming files");

    let mut stats = match analyzer::analyze(&selected, &extractor, args.jobs, &bar) {
        Ok(stats) => stats,
        Err(err) => {
            bar.abandon();
            return Err(err).context("fame");
        }
    };

    // 3. Print
    renderer::sort(&mut stats, args.order_by);
    let mut out = io::stdout().lock();
    renderer::render(&mut out, &stats, args.format).context("output")?;

    info!(elapsed = ?start_time.elapsed(), authors = stats.len(), "done");
    Ok(())
}
