//! Drives a whole scan pass over the block list.
use std::str::FromStr;

use log::debug;

use crate::block::Block;
use crate::report::{BlockResult, ScanReport};
use crate::sampler;
use crate::scanner::{self, Scanner};
use crate::{detail, warning};

/// The orchestrator: samples each block, hands the candidates to the
/// scanner, and accumulates per-block and global results.
///
/// Blocks run strictly sequentially; one block's batch fully drains
/// before the next block is sampled. The report is owned and mutated
/// here alone, so accumulation needs no synchronization.
pub struct Sweep {
    scanner: Scanner,
    samples_per_block: usize,
    greppable: bool,
    accessible: bool,
}

impl Sweep {
    /// Builds an orchestrator around a configured [`Scanner`].
    pub fn new(scanner: Scanner, samples_per_block: usize, greppable: bool, accessible: bool) -> Self {
        Self {
            scanner,
            samples_per_block,
            greppable,
            accessible,
        }
    }

    /// Runs the full pass and returns the finished report.
    ///
    /// A malformed line is recorded as a skipped block and never aborts
    /// the run; an all-unreachable pass is an ordinary result.
    pub async fn run(&self, lines: &[String]) -> ScanReport {
        let mut report = ScanReport::default();

        for (nr, line) in lines.iter().enumerate() {
            detail!(
                format!("[{}/{}] Testing block: {}", nr + 1, lines.len(), line),
                self.greppable,
                self.accessible
            );

            let block = match Block::from_str(line) {
                Ok(block) => block,
                Err(e) => {
                    warning!(
                        format!("Skipping block {:?}: {}", line, e),
                        self.greppable,
                        self.accessible
                    );
                    report.push(BlockResult::skipped(line.clone(), e.to_string()));
                    continue;
                }
            };

            let candidates = sampler::sample(&block, self.samples_per_block);
            debug!("Sampled {} candidates from {}", candidates.len(), block);

            let reachable = if candidates.is_empty() {
                Vec::new()
            } else {
                let records = self.scanner.run_batch(&candidates).await;
                scanner::reachable(&records)
            };

            detail!(
                format!(
                    "Block {}: {}/{} addresses reachable",
                    block,
                    reachable.len(),
                    candidates.len()
                ),
                self.greppable,
                self.accessible
            );

            report.push(BlockResult {
                block: line.clone(),
                candidates,
                reachable,
                error: None,
            });
        }

        report
    }
}
