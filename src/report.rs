//! Result accumulation for a whole scan pass.
use std::net::Ipv4Addr;

use itertools::Itertools;
use serde_derive::Serialize;

/// Everything recorded for one block of the input list.
///
/// `candidates` holds the addresses tried, in sampling order;
/// `reachable` the subset that answered. A line that failed to parse
/// gets a result with no candidates and the parse error text.
#[derive(Debug, Clone, Serialize)]
pub struct BlockResult {
    /// The block line as it appeared in the input.
    pub block: String,
    /// Candidate addresses tried, in sampling order.
    pub candidates: Vec<Ipv4Addr>,
    /// The candidates that answered their probe.
    pub reachable: Vec<Ipv4Addr>,
    /// Parse failure that caused this block to be skipped, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BlockResult {
    /// A zero-candidate result for a line that could not be parsed.
    pub fn skipped(block: String, error: String) -> Self {
        Self {
            block,
            candidates: Vec::new(),
            reachable: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether this block was skipped over a parse failure.
    pub fn is_skipped(&self) -> bool {
        self.error.is_some()
    }
}

/// The global accumulation across all blocks of a scan pass.
///
/// Owned and mutated exclusively by the orchestrator; totals are always
/// derived from what was actually sampled, never re-sampled.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Per-block results, in input order.
    pub blocks: Vec<BlockResult>,
}

impl ScanReport {
    /// Appends one finished block result.
    pub fn push(&mut self, result: BlockResult) {
        self.blocks.push(result);
    }

    /// How many input lines were processed, skipped blocks included.
    pub fn blocks_processed(&self) -> usize {
        self.blocks.len()
    }

    /// How many blocks were skipped over parse failures.
    pub fn blocks_skipped(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_skipped()).count()
    }

    /// How many candidate addresses were probed in total.
    pub fn total_probed(&self) -> usize {
        self.blocks.iter().map(|b| b.candidates.len()).sum()
    }

    /// How many addresses answered across all blocks.
    pub fn total_reachable(&self) -> usize {
        self.blocks.iter().map(|b| b.reachable.len()).sum()
    }

    /// All reachable addresses across all blocks, sorted by numeric
    /// address value rather than lexicographically.
    pub fn reachable(&self) -> Vec<Ipv4Addr> {
        self.blocks
            .iter()
            .flat_map(|b| b.reachable.iter().copied())
            .sorted()
            .collect()
    }

    /// Serializes the report, with derived totals, as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "blocks": self.blocks,
            "total_blocks": self.blocks_processed(),
            "total_probed": self.total_probed(),
            "total_reachable": self.total_reachable(),
            "reachable": self.reachable(),
        }))
    }
}
