//! Error handling for the chained hash table
//!
//! Only construction and optional-item insertion can fail. A missing item on
//! lookup or delete is reported as `None`, not as an error.

use thiserror::Error;

/// Errors produced by [`ChainedHashTable`](crate::ChainedHashTable) construction and insertion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A construction parameter is out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Which parameter was rejected and why
        message: String,
    },

    /// An absent item was offered for insertion
    #[error("Cannot insert an absent item")]
    NullItem,
}

impl TableError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration { message: message.into() }
    }
}

/// Result type specialized for table operations
pub type Result<T> = std::result::Result<T, TableError>;
