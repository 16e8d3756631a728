//! Random sampling of candidate addresses from a block.
use std::net::Ipv4Addr;

use rand::Rng;

use crate::block::Block;

/// Lowest last octet a candidate may carry. `.0` is excluded as the
/// network-like address of the sampled space.
pub const LAST_OCTET_MIN: u8 = 1;

/// Highest last octet a candidate may carry. `.255` is excluded as the
/// broadcast-like address of the sampled space.
pub const LAST_OCTET_MAX: u8 = 254;

/// Draw attempts allowed per requested candidate before sampling stops.
///
/// The bound keeps sampling finite when `count` approaches or exceeds
/// the 254 distinct last-octet values: the loop then returns fewer
/// candidates instead of hanging on an unreachable target count.
const ATTEMPTS_PER_CANDIDATE: usize = 10;

/// Draws up to `count` distinct candidate addresses from `block` using
/// the process-wide random generator.
pub fn sample(block: &Block, count: usize) -> Vec<Ipv4Addr> {
    sample_with(block, count, &mut rand::rng())
}

/// Draws up to `count` distinct candidate addresses from `block` with a
/// caller-supplied generator, in draw order.
///
/// Each draw picks a uniform last octet in
/// [`LAST_OCTET_MIN`, `LAST_OCTET_MAX`] and keeps the resulting address
/// if it has not been drawn before. Sampling stops at `count` distinct
/// candidates or after `count * 10` draws, whichever comes first.
pub fn sample_with<R: Rng>(block: &Block, count: usize, rng: &mut R) -> Vec<Ipv4Addr> {
    let mut candidates = Vec::with_capacity(count.min(usize::from(LAST_OCTET_MAX)));
    let max_attempts = count.saturating_mul(ATTEMPTS_PER_CANDIDATE);

    let mut attempts = 0;
    while candidates.len() < count && attempts < max_attempts {
        let candidate = block.address(rng.random_range(LAST_OCTET_MIN..=LAST_OCTET_MAX));
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
        attempts += 1;
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::{sample, sample_with, LAST_OCTET_MAX, LAST_OCTET_MIN};
    use crate::block::Block;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::net::Ipv4Addr;

    fn block() -> Block {
        "192.168.1.0/24".parse().unwrap()
    }

    #[test]
    fn sample_respects_requested_count() {
        let candidates = sample(&block(), 10);
        assert_eq!(candidates.len(), 10);
    }

    #[test]
    fn sample_never_repeats_candidates() {
        let candidates = sample(&block(), 100);
        let distinct: HashSet<Ipv4Addr> = candidates.iter().copied().collect();
        assert_eq!(distinct.len(), candidates.len());
    }

    #[test]
    fn sample_stays_within_octet_bounds() {
        for candidate in sample(&block(), 100) {
            let [a, b, c, d] = candidate.octets();
            assert_eq!([a, b, c], [192, 168, 1]);
            assert!((LAST_OCTET_MIN..=LAST_OCTET_MAX).contains(&d));
        }
    }

    #[test]
    fn sample_terminates_when_count_exceeds_address_space() {
        // 254 distinct last octets exist; asking for more must still
        // return within the attempt bound, with fewer results.
        let candidates = sample(&block(), 300);
        assert!(candidates.len() < 300);
        let distinct: HashSet<Ipv4Addr> = candidates.iter().copied().collect();
        assert_eq!(distinct.len(), candidates.len());
    }

    #[test]
    fn sample_with_zero_count_is_empty() {
        assert!(sample(&block(), 0).is_empty());
    }

    #[test]
    fn seeded_sampling_is_deterministic() {
        let first = sample_with(&block(), 20, &mut StdRng::seed_from_u64(99));
        let second = sample_with(&block(), 20, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}
