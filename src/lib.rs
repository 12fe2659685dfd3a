//! # Chained Hash Table
//!
//! A Rust implementation of a hash table that resolves collisions by separate
//! chaining.
//!
//! [`ChainedHashTable`] stores whole items (duplicates allowed) and finds or
//! removes them by equality. It grows to `2 * capacity + 1` buckets whenever
//! the load factor passes its maximum or, optionally, when a chain grows past a
//! length bound. Items supply their own signed hash code through [`HashCode`];
//! wrap any `std::hash::Hash` type in [`Hashed`] to store it.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chained_hash::ChainedHashTable;
//!
//! // 10 buckets, grow once load factor exceeds 0.85, chains at most 4 long
//! let mut table = ChainedHashTable::with_max_chain_length(10, 0.85, 4).unwrap();
//!
//! table.insert("apple".to_string());
//! table.insert("banana".to_string());
//! table.insert("apple".to_string());
//!
//! assert_eq!(table.len(), 3);
//! assert!(table.lookup(&"apple".to_string()).is_some());
//!
//! // Only the first copy is removed
//! assert_eq!(table.delete(&"apple".to_string()), Some("apple".to_string()));
//! assert!(table.lookup(&"apple".to_string()).is_some());
//! assert_eq!(table.delete(&"cherry".to_string()), None);
//! ```
//!
//! ## Reporting
//!
//! ```rust
//! use chained_hash::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new(4, 0.75).unwrap();
//! table.extend([0_i64, 4, 8, 12]);
//!
//! let stats = table.stats();
//! assert_eq!(stats.capacity, 9);
//! assert_eq!(stats.item_count, 4);
//!
//! for (index, chain) in table.dump() {
//!     println!("{index}: {chain:?}");
//! }
//! println!("{}", table.dump_view());
//! ```

/// Module implementing the separate-chaining table and its resize protocol
mod chained_table;
/// Construction parameters and their validation
mod config;
/// Error type shared by all fallible operations
mod error;
/// Signed hash codes supplied by stored items
mod hash_code;
/// Statistics snapshots and bucket dumps
mod stats;
/// Utility functions and traits for the table
mod utils;

pub use chained_table::{ChainedHashTable, Iter};
pub use config::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MAX_RESIZES, TableConfig,
};
pub use error::{Result, TableError};
pub use hash_code::{HashCode, Hashed};
pub use stats::{TableDump, TableStats};
pub use utils::{TableExtensions, from_items};
