//! Binary entry point: load the block list, sweep it, print the report.
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::Colorize;
use log::debug;

use pingsweep::block;
use pingsweep::input::{Config, Opts, DEFAULT_RANGES_FILE};
use pingsweep::probe::PingProber;
use pingsweep::report::ScanReport;
use pingsweep::scanner::Scanner;
use pingsweep::sweep::Sweep;
use pingsweep::{detail, output, warning};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut opts = Opts::read();
    let config = Config::read(opts.config_path.clone());
    opts.merge(&config);
    debug!("Main() `opts` arguments are {:?}", opts);

    // JSON goes to stdout, so advisory output is silenced there too.
    let quiet = opts.greppable || opts.json;

    if !quiet {
        print_opening(&opts);
    }

    // First run convenience: seed the default block list with a sample
    // instead of failing on a file the user never had a chance to write.
    if opts.ranges == Path::new(DEFAULT_RANGES_FILE) && !opts.ranges.exists() {
        block::write_sample_file(&opts.ranges)
            .with_context(|| format!("could not create sample {DEFAULT_RANGES_FILE}"))?;
        warning!(
            format!(
                "No block list found. A sample {DEFAULT_RANGES_FILE} was created; edit it with your blocks and run again."
            ),
            false,
            opts.accessible
        );
        return Ok(());
    }

    let lines = block::load_blocks(&opts.ranges)?;
    detail!(
        format!("Loaded {} address blocks from {:?}", lines.len(), opts.ranges),
        quiet,
        opts.accessible
    );

    let scanner = Scanner::new(
        Arc::new(PingProber),
        opts.batch_size,
        Duration::from_secs(opts.timeout),
        quiet,
        opts.accessible,
    );
    let sweep = Sweep::new(scanner, opts.samples, quiet, opts.accessible);

    let started = Instant::now();
    let report = sweep.run(&lines).await;
    let duration = started.elapsed();

    if opts.json {
        println!("{}", report.to_json()?);
    } else if opts.greppable {
        for addr in report.reachable() {
            println!("{addr}");
        }
    } else {
        print_summary(&report, duration, opts.accessible);
    }

    Ok(())
}

/// Prints the banner and the run parameters.
#[cfg(not(tarpaulin_include))]
fn print_opening(opts: &Opts) {
    debug!("Printing opening");
    if opts.accessible {
        println!("pingsweep {}", env!("CARGO_PKG_VERSION"));
    } else {
        println!("{}", format!("pingsweep {}", env!("CARGO_PKG_VERSION")).bold());
    }
    detail!(
        format!(
            "Testing {} random addresses per block, timeout {}s, batch size {}",
            opts.samples, opts.timeout, opts.batch_size
        ),
        false,
        opts.accessible
    );
}

/// Prints the final results block of a finished sweep.
#[cfg(not(tarpaulin_include))]
fn print_summary(report: &ScanReport, duration: Duration, accessible: bool) {
    let reachable = report.reachable();

    if reachable.is_empty() {
        warning!(
            "No reachable addresses found in any block".to_owned(),
            false,
            accessible
        );
    } else {
        output!(
            format!("Found {} reachable addresses:", reachable.len()),
            false,
            accessible
        );
        for addr in &reachable {
            if accessible {
                println!("{addr}");
            } else {
                println!("  {}", addr.to_string().green());
            }
        }
    }

    detail!(
        format!(
            "Blocks processed: {} ({} skipped)",
            report.blocks_processed(),
            report.blocks_skipped()
        ),
        false,
        accessible
    );
    detail!(
        format!("Addresses probed: {}", report.total_probed()),
        false,
        accessible
    );
    detail!(
        format!("Reachable: {}", report.total_reachable()),
        false,
        accessible
    );
    detail!(format!("Sweep completed in {duration:.2?}"), false, accessible);
}
