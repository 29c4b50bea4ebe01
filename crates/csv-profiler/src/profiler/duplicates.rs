//! Bounded-memory duplicate row detection.
//!
//! Each row is reduced to a canonical string (values in column order, null as
//! the empty string, joined by [`FIELD_SEPARATOR`]) and hashed with SHA-256.
//! Only the 32-byte digests are kept.
//!
//! Known limitations:
//! - values containing the separator character can make two different rows
//!   share a canonical form
//! - once more than `seen_hashes_limit` hashes are tracked, detection stops:
//!   later rows are neither checked nor remembered, so the duplicate count is
//!   an undercount from that point on

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Separator between values in a row's canonical form (ASCII unit separator).
pub const FIELD_SEPARATOR: char = '\u{1F}';

type RowHash = [u8; 32];

/// Counts rows whose full value tuple was already seen.
#[derive(Debug)]
pub struct DuplicateDetector {
    seen: HashSet<RowHash>,
    limit: usize,
    duplicates: u64,
    buffer: String,
}

impl DuplicateDetector {
    pub fn new(seen_hashes_limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            limit: seen_hashes_limit,
            duplicates: 0,
            buffer: String::new(),
        }
    }

    /// Observe one row; returns true if it was counted as a duplicate.
    ///
    /// The capacity check runs before the lookup. While the tracked set holds
    /// at most `limit` hashes the row is checked and, if new, inserted, so the
    /// set can reach `limit + 1` entries. Beyond that the row is ignored.
    pub fn observe<'a, I>(&mut self, row: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        if self.is_saturated() {
            return false;
        }

        let hash = self.hash_row(row);
        if self.seen.contains(&hash) {
            self.duplicates += 1;
            true
        } else {
            self.seen.insert(hash);
            false
        }
    }

    /// Whether the tracked set outgrew the limit and detection has stopped.
    pub fn is_saturated(&self) -> bool {
        self.seen.len() > self.limit
    }

    pub fn duplicate_count(&self) -> u64 {
        self.duplicates
    }

    pub fn tracked_hashes(&self) -> usize {
        self.seen.len()
    }

    fn hash_row<'a, I>(&mut self, row: I) -> RowHash
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        self.buffer.clear();
        for (i, value) in row.into_iter().enumerate() {
            if i > 0 {
                self.buffer.push(FIELD_SEPARATOR);
            }
            self.buffer.push_str(value.unwrap_or(""));
        }
        Sha256::digest(self.buffer.as_bytes()).into()
    }
}
