use std::{iter::Flatten, mem, slice};

use crate::{
    config::TableConfig,
    error::{Result, TableError},
    hash_code::HashCode,
};

/// A hash table that resolves collisions by separate chaining.
///
/// Every bucket holds a chain of items in insertion order. Duplicates are kept.
/// The table grows to `2 * capacity + 1` buckets whenever the load factor rises
/// above its maximum, or a chain grows longer than the configured bound. The
/// chain-length trigger switches itself off after `max_resizes` growths so a
/// hash function that sends everything to one bucket cannot grow the table
/// forever; the load-factor trigger always stays active.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct ChainedHashTable<T> {
    /// One chain per bucket; the vector length is the table capacity
    buckets: Vec<Vec<T>>,
    /// Total number of stored items across all chains
    len: usize,
    /// Growth threshold for `len / capacity`
    max_load_factor: f64,
    /// Growth threshold for a single chain, `None` when unbounded
    max_chain_length: Option<usize>,
    /// Number of growths performed so far
    resize_count: usize,
    /// Resizes allowed before the chain-length trigger is ignored
    max_resizes: usize,
}

impl<T> Default for ChainedHashTable<T> {
    fn default() -> Self {
        Self::from_valid_config(TableConfig::default())
    }
}

impl<T> ChainedHashTable<T> {
    /// Creates an empty table with `initial_capacity` buckets and no chain bound
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] when `initial_capacity` is 0
    /// or `max_load_factor` is not a finite positive number.
    pub fn new(initial_capacity: usize, max_load_factor: f64) -> Result<Self> {
        Self::from_config(TableConfig::new(initial_capacity, max_load_factor))
    }

    /// Creates an empty table that also grows when a chain exceeds `max_chain_length`
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] when any parameter is out of range.
    pub fn with_max_chain_length(
        initial_capacity: usize,
        max_load_factor: f64,
        max_chain_length: usize,
    ) -> Result<Self> {
        Self::from_config(
            TableConfig::new(initial_capacity, max_load_factor)
                .with_max_chain_length(max_chain_length),
        )
    }

    /// Creates an empty table from a full configuration
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] when `config` fails validation.
    pub fn from_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Builds the table without re-checking `config`
    fn from_valid_config(config: TableConfig) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            max_load_factor: config.max_load_factor,
            max_chain_length: config.max_chain_length,
            resize_count: 0,
            max_resizes: config.max_resizes,
        }
    }

    /// Returns the number of items in the table, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the configured maximum load factor
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns the configured chain bound, `None` when unbounded
    #[must_use]
    pub fn max_chain_length(&self) -> Option<usize> {
        self.max_chain_length
    }

    /// Returns how many times the table has grown
    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    /// Returns the length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns the number of buckets whose chain is empty
    #[must_use]
    pub fn empty_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns an iterator over the items, in bucket order then chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.buckets.iter().flatten() }
    }

    /// Read-only view of the bucket array for reporting
    pub(crate) fn buckets(&self) -> &[Vec<T>] {
        &self.buckets
    }

    /// True while the chain-length trigger may still force growth
    fn chain_trigger_armed(&self) -> bool {
        self.max_chain_length.is_some() && self.resize_count <= self.max_resizes
    }

    /// True when a chain of `chain_len` items breaks the chain bound
    fn chain_exceeded(&self, chain_len: usize) -> bool {
        self.chain_trigger_armed() && self.max_chain_length.is_some_and(|max| chain_len > max)
    }

    /// True when the load factor is above its maximum
    fn load_exceeded(&self) -> bool {
        self.load_factor() > self.max_load_factor
    }
}

impl<T> ChainedHashTable<T>
where
    T: HashCode + Eq,
{
    /// Maps an item to its bucket
    fn slot_for(&self, item: &T) -> usize {
        bucket_index(item.hash_code(), self.buckets.len())
    }

    /// Returns the first stored item equal to `item`, if any
    #[must_use]
    pub fn lookup(&self, item: &T) -> Option<&T> {
        let slot = self.slot_for(item);
        self.buckets.get(slot)?.iter().find(|stored| *stored == item)
    }

    /// Returns true if an item equal to `item` is stored
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.lookup(item).is_some()
    }

    /// Appends `item` to the end of its chain, then grows the table if needed.
    ///
    /// Duplicates are not checked for. Growth may happen several times in one
    /// call when a single resize does not restore the bounds.
    pub fn insert(&mut self, item: T) {
        let slot = self.slot_for(&item);
        let chain_len = self.push_into(slot, item);

        if self.load_exceeded() || self.chain_exceeded(chain_len) {
            self.resize();
            while self.load_exceeded() || self.chain_exceeded(self.longest_chain()) {
                self.resize();
            }
        }
    }

    /// Inserts an optional item, rejecting `None` before touching the table
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NullItem`] when `item` is `None`.
    pub fn try_insert(&mut self, item: Option<T>) -> Result<()> {
        let item = item.ok_or(TableError::NullItem)?;
        self.insert(item);
        Ok(())
    }

    /// Removes and returns the first stored item equal to `item`.
    ///
    /// Remaining items in the chain keep their order. The table never shrinks.
    pub fn delete(&mut self, item: &T) -> Option<T> {
        let slot = self.slot_for(item);
        let chain = self.buckets.get_mut(slot)?;
        let position = chain.iter().position(|stored| stored == item)?;
        let removed = chain.remove(position);
        self.len = self.len.saturating_sub(1);
        Some(removed)
    }

    /// Appends to the chain at `slot` and returns the chain's new length
    fn push_into(&mut self, slot: usize, item: T) -> usize {
        // `slot` comes from `slot_for`, so it is always below the capacity
        match self.buckets.get_mut(slot) {
            Some(chain) => {
                chain.push(item);
                self.len = self.len.saturating_add(1);
                chain.len()
            }
            None => 0,
        }
    }

    /// Rebuilds the table with `2 * capacity + 1` buckets.
    ///
    /// Items are moved bucket by bucket, each chain in its stored order, so
    /// items that share a new bucket keep their relative order. Migration does
    /// not evaluate the growth triggers; the caller re-checks once afterwards.
    fn resize(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity.saturating_mul(2).saturating_add(1);
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.len = 0;

        for item in old_buckets.into_iter().flatten() {
            let slot = self.slot_for(&item);
            self.push_into(slot, item);
        }

        self.resize_count = self.resize_count.saturating_add(1);
        log::debug!(
            "resized chained table from {} to {} buckets ({} items, resize #{})",
            old_capacity,
            new_capacity,
            self.len,
            self.resize_count
        );
        if self.max_chain_length.is_some() && self.resize_count == self.max_resizes.saturating_add(1)
        {
            log::warn!(
                "chain length bound disabled after {} resizes; longest chain is {}",
                self.resize_count,
                self.longest_chain()
            );
        }
    }
}

impl<T> Extend<T> for ChainedHashTable<T>
where
    T: HashCode + Eq,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a ChainedHashTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Allocates `capacity` empty chains
fn empty_buckets<T>(capacity: usize) -> Vec<Vec<T>> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}

/// Folds a signed hash code into `[0, capacity)`.
///
/// The remainder takes the sign of the code, so negative remainders are
/// shifted up by `capacity`. `capacity` must be non-zero.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn bucket_index(code: i64, capacity: usize) -> usize {
    let capacity = capacity as i128;
    let mut index = i128::from(code) % capacity;
    if index < 0 {
        index += capacity;
    }
    index as usize
}

/// Iterator over the items of a chained hash table
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    /// Chains flattened in bucket order
    inner: Flatten<slice::Iter<'a, Vec<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChainedHashTable, HashCode, TableConfig, TableError, bucket_index};
    use proptest::prelude::*;

    /// Item with a caller-chosen hash code; `tag` tells equal-coded items apart
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Coded {
        code: i64,
        tag: u32,
    }

    impl HashCode for Coded {
        fn hash_code(&self) -> i64 {
            self.code
        }
    }

    fn coded(code: i64, tag: u32) -> Coded {
        Coded { code, tag }
    }

    fn assert_count_matches<T>(table: &ChainedHashTable<T>) {
        let total: usize = table.buckets.iter().map(Vec::len).sum();
        assert_eq!(table.len(), total);
    }

    #[test]
    fn test_new_table_is_empty() {
        let table: ChainedHashTable<i64> = ChainedHashTable::new(4, 0.75).unwrap();
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.resize_count(), 0);
        assert_eq!(table.max_chain_length(), None);
        assert_eq!(table.empty_bucket_count(), 4);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            ChainedHashTable::<i64>::new(0, 0.75),
            Err(TableError::InvalidConfiguration { .. })
        ));
        assert!(ChainedHashTable::<i64>::new(4, 0.0).is_err());
        assert!(ChainedHashTable::<i64>::new(4, -0.5).is_err());
        assert!(ChainedHashTable::<i64>::with_max_chain_length(4, 0.75, 0).is_err());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = ChainedHashTable::new(8, 0.75).unwrap();
        table.insert("apple".to_string());
        table.insert("banana".to_string());

        assert_eq!(table.lookup(&"apple".to_string()).map(String::as_str), Some("apple"));
        assert_eq!(table.lookup(&"banana".to_string()).map(String::as_str), Some("banana"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_absent_item_is_not_found() {
        let mut table = ChainedHashTable::new(4, 0.75).unwrap();
        assert_eq!(table.lookup(&coded(0, 1)), None);
        assert_eq!(table.delete(&coded(0, 1)), None);

        // Same bucket, different item
        table.insert(coded(0, 1));
        assert_eq!(table.lookup(&coded(4, 2)), None);
        assert_eq!(table.delete(&coded(4, 2)), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_returns_stored_instance() {
        #[derive(Debug)]
        struct Loose {
            code: i64,
            payload: &'static str,
        }
        impl PartialEq for Loose {
            fn eq(&self, other: &Self) -> bool {
                self.code == other.code
            }
        }
        impl Eq for Loose {}
        impl HashCode for Loose {
            fn hash_code(&self) -> i64 {
                self.code
            }
        }

        let mut table = ChainedHashTable::new(4, 0.75).unwrap();
        table.insert(Loose { code: 3, payload: "stored" });
        let found = table.lookup(&Loose { code: 3, payload: "probe" }).unwrap();
        assert_eq!(found.payload, "stored");
    }

    #[test]
    fn test_delete_keeps_chain_order() {
        let mut table = ChainedHashTable::new(4, 10.0).unwrap();
        for tag in 0..4 {
            table.insert(coded(0, tag));
        }

        assert_eq!(table.delete(&coded(0, 1)), Some(coded(0, 1)));
        assert_eq!(table.len(), 3);
        let chain: Vec<u32> = table.iter().map(|item| item.tag).collect();
        assert_eq!(chain, vec![0, 2, 3]);
        assert_count_matches(&table);
    }

    #[test]
    fn test_delete_never_shrinks() {
        let mut table = ChainedHashTable::new(2, 1.0).unwrap();
        for code in 0..10 {
            table.insert(code);
        }
        let capacity = table.capacity();
        for code in 0..10 {
            assert_eq!(table.delete(&code), Some(code));
        }
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut table = ChainedHashTable::new(8, 0.75).unwrap();
        table.insert(42_i64);
        table.insert(42_i64);
        assert_eq!(table.len(), 2);

        assert_eq!(table.delete(&42), Some(42));
        assert_eq!(table.lookup(&42), Some(&42));
        assert_eq!(table.delete(&42), Some(42));
        assert_eq!(table.lookup(&42), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_negative_hash_code_is_normalized() {
        assert_eq!(bucket_index(-1, 4), 3);
        assert_eq!(bucket_index(-4, 4), 0);
        assert_eq!(bucket_index(-9, 4), 3);
        assert_eq!(bucket_index(i64::MIN, 9), 1);
        assert_eq!(bucket_index(i64::MAX, 9), 7);

        let mut table = ChainedHashTable::new(4, 0.75).unwrap();
        table.insert(coded(-1, 0));
        assert_eq!(table.dump(), vec![(3, &[coded(-1, 0)][..])]);
        assert_eq!(table.lookup(&coded(-1, 0)), Some(&coded(-1, 0)));
    }

    #[test]
    fn test_load_factor_resize() {
        let mut table = ChainedHashTable::new(4, 0.75).unwrap();
        let items: Vec<Coded> = [0, 4, 8, 12].into_iter().map(|code| coded(code, 0)).collect();

        for item in &items[..3] {
            table.insert(*item);
        }
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.longest_chain(), 3);

        table.insert(items[3]);
        assert_eq!(table.capacity(), 9);
        assert_eq!(table.resize_count(), 1);
        for item in &items {
            assert_eq!(table.lookup(item), Some(item));
        }

        table.insert(coded(16, 0));
        assert_eq!(table.len(), 5);
        assert_eq!(table.capacity(), 9);
        assert!(table.load_factor() <= 0.75);
        assert_count_matches(&table);
    }

    #[test]
    fn test_chain_length_resize() {
        let mut table = ChainedHashTable::with_max_chain_length(10, 1.0, 2).unwrap();
        table.insert(coded(0, 0));
        table.insert(coded(10, 0));
        assert_eq!(table.capacity(), 10);

        table.insert(coded(20, 0));
        assert_eq!(table.capacity(), 21);
        assert_eq!(table.resize_count(), 1);
        assert_eq!(table.longest_chain(), 1);
        assert!((table.load_factor() - 3.0 / 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeated_resize_until_bounds_hold() {
        // 0, 210 and 420 share a bucket at capacities 10 and 21, but not at 43
        let mut table = ChainedHashTable::with_max_chain_length(10, 1.0, 2).unwrap();
        table.insert(coded(0, 0));
        table.insert(coded(210, 0));
        assert_eq!(table.capacity(), 10);

        table.insert(coded(420, 0));
        assert_eq!(table.capacity(), 43);
        assert_eq!(table.resize_count(), 2);
        assert_eq!(table.longest_chain(), 1);
        assert_count_matches(&table);
    }

    #[test]
    fn test_safety_valve_stops_chain_growth() {
        let config = TableConfig::new(10, 1.0).with_max_chain_length(2).with_max_resizes(2);
        let mut table = ChainedHashTable::from_config(config).unwrap();
        for _ in 0..3 {
            table.insert(coded(5, 0));
        }

        // 10 -> 21 -> 43 -> 87, then the chain trigger is off for good
        assert_eq!(table.resize_count(), 3);
        assert_eq!(table.capacity(), 87);
        assert_eq!(table.longest_chain(), 3);

        table.insert(coded(5, 0));
        assert_eq!(table.capacity(), 87);
        assert_eq!(table.longest_chain(), 4);
    }

    #[test]
    fn test_load_factor_still_grows_after_valve() {
        let config = TableConfig::new(1, 2.0).with_max_chain_length(1).with_max_resizes(0);
        let mut table = ChainedHashTable::from_config(config).unwrap();
        for _ in 0..7 {
            table.insert(coded(0, 0));
        }
        assert!(table.load_factor() <= 2.0);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_resize_preserves_relative_order() {
        let mut table = ChainedHashTable::new(1, 100.0).unwrap();
        for tag in 0..5 {
            table.insert(coded(7, tag));
        }
        for _ in 0..3 {
            table.resize();
        }
        let tags: Vec<u32> = table.iter().map(|item| item.tag).collect();
        assert_eq!(tags, vec![0, 1, 2, 3, 4]);
        assert_eq!(table.capacity(), 15);
    }

    #[test]
    fn test_try_insert_rejects_none() {
        let mut table: ChainedHashTable<i64> = ChainedHashTable::new(4, 0.75).unwrap();
        assert_eq!(table.try_insert(None), Err(TableError::NullItem));
        assert!(table.is_empty());
        assert_eq!(table.try_insert(Some(9)), Ok(()));
        assert!(table.contains(&9));
    }

    #[test]
    fn test_extend_and_iter() {
        let mut table = ChainedHashTable::default();
        table.extend(0_i64..20);
        assert_eq!(table.len(), 20);

        let mut seen: Vec<i64> = (&table).into_iter().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    /// Replays inserts (`true`) and deletes (`false`) and checks the table after each step
    fn replay(config: TableConfig, ops: &[(bool, i64)]) -> Result<(), TestCaseError> {
        let mut table = ChainedHashTable::from_config(config).unwrap();
        let mut model: Vec<i64> = Vec::new();

        for &(is_insert, value) in ops {
            let before = table.capacity();
            if is_insert {
                table.insert(value);
                model.push(value);
            } else {
                let removed = table.delete(&value);
                match model.iter().position(|stored| *stored == value) {
                    Some(position) => {
                        model.remove(position);
                        prop_assert_eq!(removed, Some(value));
                    }
                    None => prop_assert_eq!(removed, None),
                }
            }

            let total: usize = table.buckets.iter().map(Vec::len).sum();
            prop_assert_eq!(table.len(), total);
            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.load_factor() <= config.max_load_factor);

            let mut capacity = before;
            while capacity < table.capacity() {
                capacity = 2 * capacity + 1;
            }
            prop_assert_eq!(capacity, table.capacity());

            for stored in &model {
                prop_assert_eq!(table.lookup(stored), Some(stored));
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_operations_keep_invariants(
            initial_capacity in 1_usize..8,
            max_load_factor in 0.25_f64..3.0,
            max_chain_length in proptest::option::of(1_usize..4),
            ops in proptest::collection::vec((any::<bool>(), -40_i64..40), 0..150),
        ) {
            let mut config = TableConfig::new(initial_capacity, max_load_factor).with_max_resizes(6);
            config.max_chain_length = max_chain_length;
            replay(config, &ops)?;
        }

        #[test]
        fn prop_chain_bound_holds_before_valve(codes in proptest::collection::hash_set(-500_i64..500, 0..100)) {
            let mut table = ChainedHashTable::with_max_chain_length(3, 4.0, 2).unwrap();
            for code in codes {
                table.insert(code);
                if table.resize_count() <= crate::config::DEFAULT_MAX_RESIZES {
                    prop_assert!(table.longest_chain() <= 2);
                }
            }
        }

        #[test]
        fn prop_bucket_index_in_range(code in any::<i64>(), capacity in 1_usize..10_000) {
            prop_assert!(bucket_index(code, capacity) < capacity);
        }
    }
}
