//! RNG seed derivation utilities for deterministic session behavior.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! contexts (initial deck shuffle per category, later reshuffles and turn
//! selection) from a base session seed.

use xxhash_rust::xxh3::xxh3_64;

use super::category::Category;

/// Derive the seed used to shuffle one category when a deck set is built.
///
/// Same base + same category = same order; different categories of the same
/// session are shuffled independently.
pub fn derive_category_seed(base: u64, category: Category) -> u64 {
    base.wrapping_add(xxh3_64(category.code().as_bytes()))
        .wrapping_add(1) // Offset to distinguish from step seeds
}

/// Derive the seed for the `cursor`-th random decision taken by a live session
/// (first turn holder, reshuffle after an approved undo).
pub fn derive_step_seed(base: u64, cursor: u64) -> u64 {
    // Different multiplier from category derivation to ensure separation
    base.wrapping_add(cursor.wrapping_mul(1_000_003))
        .wrapping_add(2)
}
