//! Utility functions and traits for `ChainedHashTable`

use crate::{ChainedHashTable, HashCode, Result, TableConfig};

/// Extension trait for chained tables that provides additional utility methods
pub trait TableExtensions<T> {
    /// Returns the stored items as a Vec, in bucket order then chain order
    fn items(&self) -> Vec<T>;

    /// Returns true if the table holds an item equal to `item`
    fn contains_item(&self, item: &T) -> bool;

    /// Returns how many stored items are equal to `item`
    fn occurrences(&self, item: &T) -> usize;
}

impl<T> TableExtensions<T> for ChainedHashTable<T>
where
    T: HashCode + Eq + Clone,
{
    fn items(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn contains_item(&self, item: &T) -> bool {
        self.lookup(item).is_some()
    }

    fn occurrences(&self, item: &T) -> usize {
        // Equal items share a hash code, so they all sit in the same chain
        self.dump()
            .into_iter()
            .flat_map(|(_, chain)| chain.iter())
            .filter(|stored| *stored == item)
            .count()
    }
}

/// Creates a `ChainedHashTable` from a configuration and an iterator of items
///
/// # Errors
///
/// Returns [`TableError::InvalidConfiguration`](crate::TableError::InvalidConfiguration)
/// when `config` fails validation.
pub fn from_items<T, I>(config: TableConfig, iter: I) -> Result<ChainedHashTable<T>>
where
    T: HashCode + Eq,
    I: IntoIterator<Item = T>,
{
    let mut table = ChainedHashTable::from_config(config)?;
    table.extend(iter);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items() {
        let table = from_items(TableConfig::new(2, 0.75), ["a", "b", "c"]).unwrap();

        assert_eq!(table.lookup(&"a"), Some(&"a"));
        assert_eq!(table.lookup(&"c"), Some(&"c"));
        assert_eq!(table.len(), 3);
        assert!(table.load_factor() <= 0.75);
    }

    #[test]
    fn test_from_items_rejects_bad_config() {
        assert!(from_items(TableConfig::new(0, 0.75), [1_i64]).is_err());
    }

    #[test]
    fn test_items_and_occurrences() {
        let table = from_items(TableConfig::new(4, 2.0), [3_i64, 7, 3, -1, 3]).unwrap();

        let mut items = table.items();
        items.sort_unstable();
        assert_eq!(items, vec![-1, 3, 3, 3, 7]);

        assert_eq!(table.occurrences(&3), 3);
        assert_eq!(table.occurrences(&8), 0);
        assert!(table.contains_item(&-1));
        assert!(!table.contains_item(&8));
    }
}
