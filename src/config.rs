//! Construction parameters for [`ChainedHashTable`](crate::ChainedHashTable)

use crate::error::{Result, TableError};

/// Bucket count used by `Default`
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor used by `Default`
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Number of resizes after which the chain-length trigger is switched off.
///
/// Every resize at least doubles the bucket array, so this also caps how far a
/// hash function that piles items into one bucket (or a run of duplicates) can
/// inflate the table: at most `2^17` times the initial capacity.
pub const DEFAULT_MAX_RESIZES: usize = 16;

/// Validated settings for a chained hash table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated at construction
    pub initial_capacity: usize,
    /// Growth happens once `len / capacity` exceeds this value
    pub max_load_factor: f64,
    /// Growth happens once a chain is longer than this; `None` means unbounded
    pub max_chain_length: Option<usize>,
    /// Resizes allowed before the chain-length trigger is ignored
    pub max_resizes: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR)
    }
}

impl TableConfig {
    /// Creates a configuration with no chain-length bound
    #[must_use]
    pub fn new(initial_capacity: usize, max_load_factor: f64) -> Self {
        Self {
            initial_capacity,
            max_load_factor,
            max_chain_length: None,
            max_resizes: DEFAULT_MAX_RESIZES,
        }
    }

    /// Bounds the length of any single chain
    #[must_use]
    pub fn with_max_chain_length(mut self, max_chain_length: usize) -> Self {
        self.max_chain_length = Some(max_chain_length);
        self
    }

    /// Overrides the safety-valve threshold
    #[must_use]
    pub fn with_max_resizes(mut self, max_resizes: usize) -> Self {
        self.max_resizes = max_resizes;
        self
    }

    /// Checks every parameter, rejecting the first one out of range
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] when the initial capacity is
    /// zero, the load factor is not a finite positive number, or the chain
    /// bound is zero.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::invalid_config("initial capacity must be greater than 0"));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(TableError::invalid_config(format!(
                "load factor must be a finite number greater than 0.0, got {}",
                self.max_load_factor
            )));
        }
        if self.max_chain_length == Some(0) {
            return Err(TableError::invalid_config("max chain length must be greater than 0"));
        }
        Ok(())
    }
}
