//! Provide `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` is built on `foldhash` with a fixed seed, so hash results
//! only depend on the input.
//!
//! `NoOpHasher` passes a single `u64` straight through, which is all a
//! `TypeId` key needs.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// A type alias for [`foldhash::fast::FoldHasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use vc_utils::hash::FixedHashState;
///
/// let hash = |v: &str| {
///     let mut hasher = FixedHashState.build_hasher();
///     v.hash(&mut hasher);
///     hasher.finish()
/// };
///
/// assert_eq!(hash("sku"), hash("sku"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that uses the last written `u64` as the hash value.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`NoOpHasher`]s, intended for keys that are already well distributed.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}
