// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use clap::{Parser, Subcommand};
use hk_idcode::geometry::constants::MAX_ROWS;
use hk_idcode::{
    verify_pattern, HowardSolver, PatternFile, Result, SearchConfig, SearchContext, SearchError,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// Search for a minimum-density periodic identifying code of the hexagonal
/// grid with ROWS rows.
#[derive(Parser, Debug)]
#[command(name = "hkcode", version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Number of rows of the grid.
    #[arg(required = true, value_parser = clap::value_parser!(u8).range(1..=MAX_ROWS as i64))]
    rows: Option<u8>,

    /// Where to write the pattern.
    #[arg(long, short, default_value = hk_idcode::config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Worker threads (defaults to one per core).
    #[arg(long, short = 'j')]
    threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that a pattern file describes an identifying code and print its density.
    Verify {
        /// Pattern file, as written by a search.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match (cli.command, cli.rows) {
        (Some(Command::Verify { file }), _) => verify(&file),
        (None, Some(rows)) => search(usize::from(rows), cli.output, cli.threads),
        (None, None) => unreachable!("clap requires ROWS without a subcommand"),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn search(rows: usize, output: PathBuf, threads: Option<usize>) -> Result<bool> {
    let config = SearchConfig::new(rows)?
        .with_output(output)
        .with_threads(threads);
    let mut ctx = SearchContext::new(config);

    let outcome = match ctx.config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|err| SearchError::ThreadPool {
                    threads,
                    reason: err.to_string(),
                })?;
            pool.install(|| ctx.run(&HowardSolver))?
        }
        None => ctx.run(&HowardSolver)?,
    };

    println!(
        "Configuration graph: {} vertices, {} arcs",
        outcome.graph_nodes, outcome.graph_arcs
    );
    println!(
        "rows: {}\tcolumns: {}\tdensity: {}",
        outcome.pattern.rows, outcome.pattern.columns, outcome.pattern.density
    );
    println!(
        "Enumeration {}, graph {}, solve {}, total {}",
        format_duration(outcome.timings.enumeration),
        format_duration(outcome.timings.graph),
        format_duration(outcome.timings.solve),
        format_duration(outcome.timings.total())
    );
    print!("{}", ctx.statistics);
    print!("{}", outcome.artifact);
    Ok(true)
}

fn verify(file: &Path) -> Result<bool> {
    let pattern = PatternFile::read(file)?;
    let verification = verify_pattern(&pattern)?;
    println!(
        "rows: {}\tcolumns: {}\tmembers: {}\tdensity: {}",
        verification.rows, verification.columns, verification.members, verification.density
    );
    match &verification.violation {
        None => {
            println!("{}: valid identifying code", file.display());
            Ok(true)
        }
        Some(violation) => {
            println!("{}: not an identifying code: {}", file.display(), violation);
            Ok(false)
        }
    }
}

/// `1h 02m 03s`, `2m 03s`, `3.456s` or `12ms`.
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let seconds = duration.as_secs();
    if seconds >= 3600 {
        format!("{}h {:02}m {:02}s", seconds / 3600, (seconds / 60) % 60, seconds % 60)
    } else if seconds >= 60 {
        format!("{}m {:02}s", seconds / 60, seconds % 60)
    } else if seconds >= 1 {
        format!("{}.{:03}s", seconds, millis % 1000)
    } else {
        format!("{}ms", millis)
    }
}
