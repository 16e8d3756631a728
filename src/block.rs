//! Provides functions to parse address blocks and load block lists.
use std::fmt;
use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;
use std::str::FromStr;

use crate::error::{InputError, ParseBlockError};

/// Contents written by [`write_sample_file`] on first run.
const SAMPLE_RANGES: &str = "\
# Address blocks to test (CIDR notation)
# One block per line
78.46.0.0/15
";

/// A declared IPv4 address block, parsed from `a.b.c.d/prefix` notation.
///
/// Only the first three octets take part in sampling: candidates are
/// always formed by varying the last octet, so every block is treated as
/// a /24-equivalent space. The declared prefix length is accepted and
/// kept for display but not enforced against the sampling range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    octets: [u8; 3],
    prefix: u8,
    source: String,
}

impl Block {
    /// The three fixed leading octets of this block.
    pub fn base_octets(&self) -> [u8; 3] {
        self.octets
    }

    /// The declared prefix length.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Forms a concrete address from this block's fixed octets and the
    /// given last octet.
    pub fn address(&self, last_octet: u8) -> Ipv4Addr {
        Ipv4Addr::new(self.octets[0], self.octets[1], self.octets[2], last_octet)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Block {
    type Err = ParseBlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (network, prefix) = s
            .split_once('/')
            .ok_or(ParseBlockError::MissingPrefix)?;

        let prefix = prefix
            .parse::<u8>()
            .map_err(|_| ParseBlockError::InvalidPrefix(prefix.to_owned()))?;

        let groups: Vec<&str> = network.split('.').collect();
        if groups.len() != 4 {
            return Err(ParseBlockError::OctetGroups(groups.len()));
        }

        let mut octets = [0u8; 3];
        for (slot, group) in octets.iter_mut().zip(&groups) {
            *slot = group
                .parse::<u8>()
                .map_err(|_| ParseBlockError::InvalidOctet((*group).to_owned()))?;
        }
        // The fourth octet is replaced during sampling but must still be valid.
        groups[3]
            .parse::<u8>()
            .map_err(|_| ParseBlockError::InvalidOctet(groups[3].to_owned()))?;

        Ok(Self {
            octets,
            prefix,
            source: s.to_owned(),
        })
    }
}

/// Reads the block list at `path` and returns its block lines.
///
/// Blank lines and lines beginning with `#` are dropped and surrounding
/// whitespace is trimmed. Lines are returned unparsed: a malformed block
/// is a per-block condition handled during the scan, while an unreadable
/// file is the one fatal error of a run.
pub fn load_blocks(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Load {
        path: path.to_owned(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

/// Writes a commented sample block list, used to seed the default input
/// file on first run.
pub fn write_sample_file(path: &Path) -> io::Result<()> {
    fs::write(path, SAMPLE_RANGES)
}
