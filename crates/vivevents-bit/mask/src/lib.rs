mod bitmask;

pub use bitmask::Bitmask;

/// A flag that occupies a single bit of a [`Bitmask`].
pub trait Bitable {
    fn bit(&self) -> u64;
    fn index(&self) -> u32;
}
