//! Random number generation helpers.
//!
//! The engine owns one master [`StdRng`]. Each generation draws a base seed
//! from it, and every offspring slot derives its own generator from that base
//! and its index. Slot results therefore do not depend on scheduling order.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates the generator for one offspring slot.
pub fn slot_rng(base: u64, slot: usize) -> StdRng {
    // splitmix64 finalizer, so neighbouring slots get unrelated seeds
    let mut z = base.wrapping_add(
        (slot as u64)
            .wrapping_add(1)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15),
    );
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    create_rng(z ^ (z >> 31))
}
