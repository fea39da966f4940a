use std::fmt;
use std::marker::PhantomData;

use crate::Bitable;

/// Set of flags packed into a `u64`.
///
/// Device samples use it for the per-control button levels of a hand, so
/// most helpers here answer "what changed between two polls".
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmask<T: Bitable>(u64, PhantomData<T>);

impl<T: Bitable> Bitmask<T> {
    /// Create a new bitmask from a slice of values.
    pub fn new(values: &[T]) -> Self {
        let bits = values.iter().fold(0, |acc, v| acc | v.bit());
        Self(bits, PhantomData)
    }

    /// Create an empty bitmask.
    pub const fn empty() -> Self {
        Self(0, PhantomData)
    }

    #[inline]
    pub fn contains(&self, flag: T) -> bool {
        (self.0 & flag.bit()) != 0
    }

    #[inline]
    pub fn insert(&mut self, flag: T) {
        self.0 |= flag.bit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Flags present in `self` but not in `other`.
    #[inline]
    pub fn difference(&self, other: &Bitmask<T>) -> Self {
        Self(self.0 & !other.0, PhantomData)
    }

    /// Flags that are set now but were clear in `previous` (rising edges).
    #[inline]
    pub fn newly_set(&self, previous: &Bitmask<T>) -> Self {
        self.difference(previous)
    }

    /// Flags that were set in `previous` but are clear now (falling edges).
    #[inline]
    pub fn newly_cleared(&self, previous: &Bitmask<T>) -> Self {
        previous.difference(self)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

impl<T: Bitable> Default for Bitmask<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Bitable> fmt::Debug for Bitmask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitmask({:#b})", self.0)
    }
}

impl<T: Bitable> FromIterator<T> for Bitmask<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let bits = iter.into_iter().fold(0, |acc, v| acc | v.bit());
        Self(bits, PhantomData)
    }
}
