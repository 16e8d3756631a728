//! Core functionality for actual probing behaviour.
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use futures::stream::{self, StreamExt};
use log::debug;

use crate::probe::{ProbeOutcome, Prober};

/// One probed address paired with what came back for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRecord {
    /// The candidate address that was probed.
    pub addr: Ipv4Addr,
    /// The outcome recorded for it.
    pub outcome: ProbeOutcome,
}

/// The batch scheduler: dispatches one probe per candidate address with
/// bounded parallelism and collects exactly one outcome per candidate.
///
/// `batch_size` caps how many probes are in flight at any instant.
/// Completion order is arbitrary; aggregation does not depend on it.
#[derive(Clone)]
pub struct Scanner {
    prober: Arc<dyn Prober>,
    batch_size: u16,
    timeout: Duration,
    greppable: bool,
    accessible: bool,
}

impl Scanner {
    /// Builds a scanner around any [`Prober`] capability.
    pub fn new(
        prober: Arc<dyn Prober>,
        batch_size: u16,
        timeout: Duration,
        greppable: bool,
        accessible: bool,
    ) -> Self {
        Self {
            prober,
            batch_size,
            timeout,
            greppable,
            accessible,
        }
    }

    /// Probes every candidate address and returns one record per
    /// candidate, in completion order.
    ///
    /// Each probe runs as its own runtime task so that a panic inside
    /// the probing capability is confined to that task and recorded as
    /// [`ProbeOutcome::Error`]: a batch never fails and never loses an
    /// address. At most `batch_size` probes are in flight at once.
    /// # Example
    ///
    /// ```compile_fail
    /// scanner.run_batch(&candidates).await
    /// ```
    ///
    pub async fn run_batch(&self, candidates: &[Ipv4Addr]) -> Vec<ProbeRecord> {
        debug!(
            "Start probing batch. Batch size {} Number of candidates {} Timeout {:?}",
            self.batch_size,
            candidates.len(),
            self.timeout
        );

        let records = stream::iter(candidates.iter().copied())
            .map(|addr| {
                let prober = Arc::clone(&self.prober);
                let timeout = self.timeout;
                async move {
                    let task = tokio::spawn(async move { prober.probe(addr, timeout).await });
                    let outcome = match task.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            debug!("Probe task for {} died: {}", addr, e);
                            ProbeOutcome::Error
                        }
                    };
                    ProbeRecord { addr, outcome }
                }
            })
            .buffer_unordered(usize::from(self.batch_size.max(1)))
            .inspect(|record| self.fmt_outcome(record))
            .collect::<Vec<_>>()
            .await;

        debug!("Outcomes collected: {}", records.len());
        records
    }

    /// Formats and prints one per-address progress line.
    fn fmt_outcome(&self, record: &ProbeRecord) {
        if self.greppable {
            return;
        }
        let line = match record.outcome {
            ProbeOutcome::Reachable => format!("✓ {} - {}", record.addr, record.outcome),
            ProbeOutcome::Unreachable => format!("✗ {} - {}", record.addr, record.outcome),
            ProbeOutcome::Error => format!("! {} - {}", record.addr, record.outcome),
        };
        if self.accessible {
            println!("{line}");
        } else {
            match record.outcome {
                ProbeOutcome::Reachable => println!("{}", line.green()),
                ProbeOutcome::Unreachable => println!("{}", line.red()),
                ProbeOutcome::Error => println!("{}", line.yellow()),
            }
        }
    }
}

/// Filters a batch down to the addresses whose outcome was reachable.
/// Order follows the record order and is not otherwise specified.
pub fn reachable(records: &[ProbeRecord]) -> Vec<Ipv4Addr> {
    records
        .iter()
        .filter(|record| record.outcome.is_reachable())
        .map(|record| record.addr)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{reachable, Scanner};
    use crate::probe::{ProbeOutcome, Prober};
    use async_trait::async_trait;
    use rand::Rng;
    use std::collections::{HashMap, HashSet};
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Prober with a pre-assigned outcome per address.
    struct ScriptedProber {
        outcomes: HashMap<Ipv4Addr, ProbeOutcome>,
    }

    #[async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeOutcome {
            self.outcomes
                .get(&addr)
                .copied()
                .unwrap_or(ProbeOutcome::Unreachable)
        }
    }

    /// Prober that sleeps a random few milliseconds so completions
    /// interleave out of submission order.
    struct JitterProber;

    #[async_trait]
    impl Prober for JitterProber {
        async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeOutcome {
            let delay = rand::rng().random_range(0..20);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if addr.octets()[3] % 2 == 0 {
                ProbeOutcome::Reachable
            } else {
                ProbeOutcome::Unreachable
            }
        }
    }

    /// Prober that tracks the peak number of simultaneous callers.
    struct GaugeProber {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Prober for GaugeProber {
        async fn probe(&self, _addr: Ipv4Addr, _timeout: Duration) -> ProbeOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            ProbeOutcome::Reachable
        }
    }

    /// Prober that panics for odd last octets.
    struct FaultyProber;

    #[async_trait]
    impl Prober for FaultyProber {
        async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeOutcome {
            assert!(addr.octets()[3] % 2 == 0, "injected fault");
            ProbeOutcome::Reachable
        }
    }

    fn candidates(count: u8) -> Vec<Ipv4Addr> {
        (1..=count).map(|i| Ipv4Addr::new(10, 0, 0, i)).collect()
    }

    fn scanner(prober: Arc<dyn Prober>, batch_size: u16) -> Scanner {
        Scanner::new(prober, batch_size, Duration::from_millis(100), true, true)
    }

    #[tokio::test]
    async fn one_record_per_candidate_under_interleaving() {
        let addrs = candidates(100);
        let records = scanner(Arc::new(JitterProber), 10).run_batch(&addrs).await;

        assert_eq!(records.len(), addrs.len());
        let probed: HashSet<Ipv4Addr> = records.iter().map(|r| r.addr).collect();
        let submitted: HashSet<Ipv4Addr> = addrs.iter().copied().collect();
        assert_eq!(probed, submitted);
    }

    #[tokio::test]
    async fn reachable_subset_matches_scripted_outcomes() {
        let addrs = candidates(6);
        let outcomes: HashMap<Ipv4Addr, ProbeOutcome> = vec![
            (addrs[0], ProbeOutcome::Reachable),
            (addrs[1], ProbeOutcome::Unreachable),
            (addrs[2], ProbeOutcome::Reachable),
            (addrs[3], ProbeOutcome::Error),
            (addrs[4], ProbeOutcome::Unreachable),
            (addrs[5], ProbeOutcome::Reachable),
        ]
        .into_iter()
        .collect();

        let records = scanner(Arc::new(ScriptedProber { outcomes }), 3)
            .run_batch(&addrs)
            .await;

        let mut alive = reachable(&records);
        alive.sort_unstable();
        assert_eq!(alive, vec![addrs[0], addrs[2], addrs[5]]);
    }

    #[tokio::test]
    async fn batch_size_caps_in_flight_probes() {
        let prober = Arc::new(GaugeProber {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let addrs = candidates(100);

        scanner(Arc::clone(&prober) as Arc<dyn Prober>, 10)
            .run_batch(&addrs)
            .await;

        let peak = prober.peak.load(Ordering::SeqCst);
        assert!(peak <= 10, "observed {} simultaneous probes", peak);
        assert!(peak > 1, "probes never overlapped");
    }

    #[tokio::test]
    async fn panicking_capability_becomes_error_outcome() {
        let addrs = candidates(10);
        let records = scanner(Arc::new(FaultyProber), 4).run_batch(&addrs).await;

        assert_eq!(records.len(), addrs.len());
        for record in &records {
            let expected = if record.addr.octets()[3] % 2 == 0 {
                ProbeOutcome::Reachable
            } else {
                ProbeOutcome::Error
            };
            assert_eq!(record.outcome, expected, "for {}", record.addr);
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_no_records() {
        let records = scanner(Arc::new(JitterProber), 10).run_batch(&[]).await;
        assert!(records.is_empty());
    }
}
