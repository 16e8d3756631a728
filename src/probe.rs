//! The reachability capability consumed by the scanner.
use std::fmt;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;
use tokio::time;

/// Extra wait granted on top of the configured timeout before a probe
/// subprocess is considered wedged and abandoned.
const GRACE: Duration = Duration::from_secs(1);

/// What came back from probing a single address.
///
/// `Error` marks a failure of the probing mechanism itself and is kept
/// distinct from `Unreachable` for diagnostics; both count as
/// not-reachable when results are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The address answered within the timeout.
    Reachable,
    /// The address did not answer, or the probe timed out.
    Unreachable,
    /// The probe could not be carried out at all.
    Error,
}

impl ProbeOutcome {
    /// Whether this outcome counts towards the reachable list.
    pub fn is_reachable(self) -> bool {
        self == ProbeOutcome::Reachable
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable => f.write_str("REACHABLE"),
            ProbeOutcome::Unreachable => f.write_str("UNREACHABLE"),
            ProbeOutcome::Error => f.write_str("ERROR"),
        }
    }
}

/// A single-address reachability check.
///
/// Implementations must enforce `timeout` themselves (never blocking
/// past it plus a small grace margin) and must translate every internal
/// failure into [`ProbeOutcome::Error`] instead of panicking outward.
/// The scanner is responsible for running probes concurrently.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes `addr`, reporting within `timeout` plus a grace margin.
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeOutcome;
}

/// Probes by running the system `ping` binary, one echo request per
/// address, with the subprocess's own timeout flag set from `timeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PingProber;

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeOutcome {
        let mut command = Command::new("ping");

        #[cfg(windows)]
        command.args(["-n", "1", "-w", &timeout.as_millis().to_string()]);
        #[cfg(not(windows))]
        command.args(["-c", "1", "-W", &timeout.as_secs().max(1).to_string()]);

        command
            .arg(addr.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        // ping enforces the timeout itself; the outer timeout only
        // reaps a subprocess that failed to honor its own deadline.
        match time::timeout(timeout + GRACE, command.status()).await {
            Ok(Ok(status)) if status.success() => ProbeOutcome::Reachable,
            Ok(Ok(_)) => ProbeOutcome::Unreachable,
            Ok(Err(e)) => {
                debug!("Could not launch ping for {}: {}", addr, e);
                ProbeOutcome::Error
            }
            Err(_) => {
                debug!("ping for {} overran its grace window", addr);
                ProbeOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProbeOutcome;

    #[test]
    fn only_reachable_counts_as_reachable() {
        assert!(ProbeOutcome::Reachable.is_reachable());
        assert!(!ProbeOutcome::Unreachable.is_reachable());
        assert!(!ProbeOutcome::Error.is_reachable());
    }

    #[test]
    fn outcomes_format_like_progress_lines() {
        assert_eq!(ProbeOutcome::Reachable.to_string(), "REACHABLE");
        assert_eq!(ProbeOutcome::Error.to_string(), "ERROR");
    }
}
