//! This crate exposes the internal functionality of the
//! pingsweep reachability sweeper.
//!
//! pingsweep answers one question about a declared set of IPv4 address
//! blocks: which hosts in there are up right now? Instead of walking
//! every address of every block, it draws a bounded random sample per
//! block and probes the sampled addresses concurrently under a
//! per-probe time budget.
//!
//! ## Architecture Overview
//!
//! A sweep flows through three stages, driven by
//! [`Sweep`](crate::sweep::Sweep):
//!
//! 1. **Sampling**: [`sampler`](crate::sampler) draws distinct random
//!    candidates from each [`Block`](crate::block::Block), varying only
//!    the last octet.
//! 2. **Probing**: [`Scanner`](crate::scanner::Scanner) dispatches one
//!    probe per candidate through any [`Prober`](crate::probe::Prober)
//!    capability, capped at `batch_size` probes in flight, and records
//!    exactly one outcome per candidate.
//! 3. **Reporting**: [`ScanReport`](crate::report::ScanReport)
//!    accumulates per-block results and derives the numerically sorted
//!    global reachable list.
//!
//! The probing mechanism is pluggable: the stock
//! [`PingProber`](crate::probe::PingProber) shells out to the system
//! `ping` binary, and anything implementing the `Prober` trait (fakes
//! included) can be substituted without touching the scheduling core.
//!
//! ## Basic Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use pingsweep::probe::PingProber;
//! use pingsweep::scanner::Scanner;
//! use pingsweep::sweep::Sweep;
//!
//! # #[tokio::main]
//! # async fn main() {
//! // One probe batch of at most 10 concurrent pings, 3s each.
//! let scanner = Scanner::new(
//!     Arc::new(PingProber),
//!     10,
//!     Duration::from_secs(3),
//!     true,   // greppable: no advisory output
//!     false,  // accessible
//! );
//!
//! // Draw 100 candidates per block.
//! let sweep = Sweep::new(scanner, 100, true, false);
//!
//! let lines = vec!["192.168.1.0/24".to_owned()];
//! let report = sweep.run(&lines).await;
//!
//! for addr in report.reachable() {
//!     println!("{addr}");
//! }
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Only a block list that cannot be read at all aborts a run
//! ([`InputError`](crate::error::InputError)). Malformed block lines,
//! unreachable addresses and misbehaving probes are all absorbed into
//! the report as data; an all-unreachable pass is an ordinary result.
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/pingsweep/0.3.0")]

pub mod tui;

pub mod input;

pub mod error;

pub mod block;

pub mod sampler;

pub mod probe;

pub mod scanner;

pub mod report;

pub mod sweep;
