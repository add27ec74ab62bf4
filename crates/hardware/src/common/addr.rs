//! Address decomposition.
//!
//! Splits a physical address into the tag and set index used by one cache level.
//! The low `B` bits are the block offset, the next `C - B - S` bits select the set,
//! and the remaining high bits form the tag. A fully associative level (`C - B == S`)
//! has no index bits, so every address maps to set 0.

use crate::config::CacheGeometry;

/// Tag and set index of an address for a particular cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decomposed {
    /// High-order address bits identifying the block within its set.
    pub tag: u64,
    /// Set the block maps to.
    pub index: u64,
}

/// Decomposes `addr` into `(tag, index)` for `geometry`.
///
/// Total and side-effect free; the same address and geometry always produce the
/// same result.
///
/// # Arguments
///
/// * `addr` - The physical address of the access.
/// * `geometry` - Geometry of the level being accessed.
#[inline]
pub fn decompose(addr: u64, geometry: &CacheGeometry) -> Decomposed {
    let shifted = addr >> geometry.b;
    let index_bits = geometry.index_bits();
    if index_bits == 0 {
        return Decomposed {
            tag: shifted,
            index: 0,
        };
    }

    let tag = shifted >> index_bits;
    let index = shifted - (tag << index_bits);
    Decomposed { tag, index }
}

/// Rounds `addr` down to a `2^block_bits` byte boundary.
#[inline]
pub fn block_align(addr: u64, block_bits: u32) -> u64 {
    (addr >> block_bits) << block_bits
}
