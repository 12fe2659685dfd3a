//! Read-only reporting over a chained hash table
//!
//! [`TableStats`] and [`TableDump`] are snapshots: they hold plain numbers or
//! borrowed chains and never mutate the table. Their `Display` impls provide the
//! text rendering used by the profiling binary.

use std::fmt;

use crate::ChainedHashTable;

/// Width of the label column in the rendered statistics
const LABEL_WIDTH: usize = 28;

/// Snapshot of table statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStats {
    /// Number of buckets
    pub capacity: usize,
    /// Number of stored items
    pub item_count: usize,
    /// `item_count / capacity`
    pub load_factor: f64,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Number of buckets with an empty chain
    pub empty_buckets: usize,
    /// Mean length of the non-empty chains, `None` when the table is empty
    pub avg_chain_length: Option<f64>,
    /// Number of growths performed so far
    pub resize_count: usize,
}

impl<T> ChainedHashTable<T> {
    /// Collects a statistics snapshot in one pass over the buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn stats(&self) -> TableStats {
        let (longest_chain, non_empty) = self
            .buckets()
            .iter()
            .map(Vec::len)
            .fold((0, 0_usize), |(longest, non_empty), len| {
                (longest.max(len), if len > 0 { non_empty + 1 } else { non_empty })
            });

        TableStats {
            capacity: self.capacity(),
            item_count: self.len(),
            load_factor: self.load_factor(),
            longest_chain,
            empty_buckets: self.capacity() - non_empty,
            avg_chain_length: (non_empty > 0)
                .then(|| self.len() as f64 / non_empty as f64),
            resize_count: self.resize_count(),
        }
    }

    /// Returns every non-empty bucket as `(index, chain)` in ascending index order
    #[must_use]
    pub fn dump(&self) -> Vec<(usize, &[T])> {
        self.buckets()
            .iter()
            .enumerate()
            .filter(|(_, chain)| !chain.is_empty())
            .map(|(index, chain)| (index, chain.as_slice()))
            .collect()
    }

    /// Same as [`dump`](Self::dump), wrapped for text rendering
    #[must_use]
    pub fn dump_view(&self) -> TableDump<'_, T> {
        TableDump { entries: self.dump() }
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hashtable statistics:")?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "  current table size:", self.capacity)?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "  # items in table:", self.item_count)?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "  current load factor:", self.load_factor)?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "  longest chain length:", self.longest_chain)?;
        writeln!(f, "{:<LABEL_WIDTH$}{}", "  # 0-length chains:", self.empty_buckets)?;
        match self.avg_chain_length {
            Some(avg) => writeln!(f, "{:<LABEL_WIDTH$}{}", "  avg (non-0) chain length:", avg),
            None => writeln!(f, "{:<LABEL_WIDTH$}n/a", "  avg (non-0) chain length:"),
        }
    }
}

/// Non-empty buckets of a table, borrowed for rendering
#[derive(Debug, Clone)]
pub struct TableDump<'a, T> {
    /// `(bucket index, chain)` pairs in ascending index order
    entries: Vec<(usize, &'a [T])>,
}

impl<'a, T> TableDump<'a, T> {
    /// Returns the `(bucket index, chain)` pairs
    #[must_use]
    pub fn entries(&self) -> &[(usize, &'a [T])] {
        &self.entries
    }
}

impl<T: fmt::Display> fmt::Display for TableDump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hashtable contents:")?;
        for (index, chain) in &self.entries {
            write!(f, "{index}: [")?;
            for (position, item) in chain.iter().enumerate() {
                if position > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
