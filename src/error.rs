//! Typed errors for input loading and block-line parsing.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the block-list input. This is the only error that
/// aborts a run; everything discovered per line or per address is
/// recorded in the report instead of propagated.
#[derive(Debug, Error)]
pub enum InputError {
    /// The block list could not be read at all.
    #[error("could not read block list {path:?}: {source}")]
    Load {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// A single malformed block line. The offending block is skipped with a
/// zero-candidate result and the run continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBlockError {
    /// No `/` between the base address and the prefix length.
    #[error("missing `/` prefix separator, expected `a.b.c.d/prefix`")]
    MissingPrefix,
    /// The base address did not split into exactly four octet groups.
    #[error("expected four octet groups, found {0}")]
    OctetGroups(usize),
    /// An octet group was not a number between 0 and 255.
    #[error("octet {0:?} is not a number between 0 and 255")]
    InvalidOctet(String),
    /// The prefix length after `/` was not a number.
    #[error("prefix length {0:?} is not a number")]
    InvalidPrefix(String),
}
