
//! Describes the data stored at the start of each compressed file,
//! and the symbol statistics that drive the adaptive code.

pub mod header;

use std::fmt;
use crate::error::{Error, Result};


/// Number of distinct symbols. Each symbol is one byte.
pub const ALPHABET_SIZE: usize = 256;


/// Occurrence count for each of the 256 byte values.
///
/// While coding, the table holds the number of occurrences
/// that have not been processed yet. The sum of all counts
/// is the number of symbols still to be encoded or decoded.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {

    /// A table where no symbol occurs.
    pub fn new() -> Self {
        FrequencyTable { counts: [0; ALPHABET_SIZE] }
    }

    /// Use the specified counts. The index is the symbol value.
    /// Fails if the sum of all counts does not fit into 64 bits.
    pub fn from_counts(counts: [u64; ALPHABET_SIZE]) -> Result<Self> {
        let table = FrequencyTable { counts };

        if table.total().is_none() {
            return Err(Error::invalid("sum of all frequencies is too large"));
        }

        Ok(table)
    }

    /// Count how often each byte value occurs in the data.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        for &symbol in bytes { table.increment(symbol); }
        table
    }

    /// All counts, indexed by symbol value.
    pub fn counts(&self) -> &[u64; ALPHABET_SIZE] {
        &self.counts
    }

    /// The number of remaining occurrences of this symbol.
    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Add one occurrence.
    #[inline]
    pub fn increment(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Mark one occurrence of the symbol as processed.
    /// The symbol must still have a non-zero count.
    #[inline]
    pub fn decrement(&mut self, symbol: u8) {
        let count = &mut self.counts[symbol as usize];
        debug_assert_ne!(*count, 0, "decrementing a symbol that does not occur anymore");
        *count -= 1;
    }

    /// The largest count of any symbol, zero if the table is empty.
    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all counts.
    /// Returns `None` if the sum does not fit into 64 bits,
    /// which can only happen for a damaged header.
    pub fn total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0_u64, |sum, &count| sum.checked_add(count))
    }

    /// Number of symbols with a non-zero count.
    pub fn live_count(&self) -> usize {
        self.counts.iter().filter(|&&count| count != 0).count()
    }

    /// Whether no symbol has any occurrences left.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// All symbols with a non-zero count, in ascending symbol order.
    pub fn live_symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().copied().enumerate()
            .filter(|&(_, count)| count != 0)
            .map(|(symbol, count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self { Self::new() }
}

/// Only lists the symbols that occur.
impl fmt::Debug for FrequencyTable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.live_symbols()).finish()
    }
}
