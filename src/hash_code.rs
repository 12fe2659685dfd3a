//! The hash contract items must satisfy to be stored in a chained table

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
};

/// An item's own hash value.
///
/// The value is signed and may be negative; the table folds it into a bucket
/// index itself. Items that compare equal must return the same code.
pub trait HashCode {
    /// Returns the hash code of this item
    fn hash_code(&self) -> i64;
}

/// Implements `HashCode` for integers that widen losslessly into `i64`
macro_rules! lossless_hash_code {
    ($($t:ty),*) => {
        $(
            impl HashCode for $t {
                fn hash_code(&self) -> i64 {
                    i64::from(*self)
                }
            }
        )*
    };
}

/// Implements `HashCode` for integers reinterpreted bit-for-bit as `i64`
macro_rules! wrapping_hash_code {
    ($($t:ty),*) => {
        $(
            impl HashCode for $t {
                #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
                fn hash_code(&self) -> i64 {
                    *self as i64
                }
            }
        )*
    };
}

lossless_hash_code!(i8, i16, i32, i64, u8, u16, u32, bool);
wrapping_hash_code!(isize, u64, usize);

impl HashCode for char {
    fn hash_code(&self) -> i64 {
        i64::from(u32::from(*self))
    }
}

impl HashCode for str {
    fn hash_code(&self) -> i64 {
        std_hash_code(self)
    }
}

impl HashCode for String {
    fn hash_code(&self) -> i64 {
        self.as_str().hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Box<T> {
    fn hash_code(&self) -> i64 {
        (**self).hash_code()
    }
}

/// Hashes through `DefaultHasher` with its fixed keys so codes are stable per build
#[allow(clippy::cast_possible_wrap)]
fn std_hash_code<T: Hash + ?Sized>(value: &T) -> i64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish() as i64
}

/// Adapter that lets any `Hash + Eq` type live in a chained table.
///
/// ```rust
/// use chained_hash::{ChainedHashTable, Hashed};
///
/// let mut table = ChainedHashTable::new(8, 0.75).unwrap();
/// table.insert(Hashed((1, "one")));
/// assert!(table.lookup(&Hashed((1, "one"))).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hashed<T>(pub T);

impl<T: Hash> HashCode for Hashed<T> {
    fn hash_code(&self) -> i64 {
        std_hash_code(&self.0)
    }
}

impl<T: fmt::Display> fmt::Display for Hashed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
