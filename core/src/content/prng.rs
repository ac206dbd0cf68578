//! Deterministic pseudo-random protocol: every stream draw is a pure
//! function of (seed, key, call-order) per spec §4.3's determinism clause.
//!
//! No reference implementation survived retrieval for this spec (the
//! `original_source` pack kept no files under its size filter), so this
//! follows the spec's own description of the key format in §4.2 rather
//! than a reverse-engineered source: a named key folds its bytes against a
//! fixed irrational multiplier into `[0, 1)`, and a per-key node counter
//! (the "call-order") is mixed in so repeated draws on the same key in the
//! same seed advance rather than repeat.

use crate::card::Edition;
use crate::seed::{Seed, SEED_LEN};
use wide::f64x8;

/// Folding multiplier for the byte-fold hash. Chosen irrational so repeated
/// folds don't fall into a short cycle.
const FOLD_MULT: f64 = 1.1239285023;

/// Folds a key string's bytes into `[0, 1)`. Pure function of the bytes.
pub fn pseudohash(key: &str) -> f64 {
    let mut num: f64 = 1.0;
    for &b in key.as_bytes().iter().rev() {
        num = (FOLD_MULT * num + b as f64).rem_euclid(1.0);
    }
    num
}

/// A single named PRNG stream for one seed, e.g. `"sho_sho1"` (shop stream,
/// ante 1). Each `.next()` call folds in the seed string and an
/// incrementing node counter, then advances the counter — so the same
/// stream drawn twice in a row yields two different values, matching the
/// "the same stream, called twice, advances" rule in spec §4.3.
#[derive(Debug, Clone)]
pub struct Stream {
    key: String,
    node: u64,
}

impl Stream {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            node: 1,
        }
    }

    /// Draw the next value in `[0, 1)` for `seed`.
    pub fn next(&mut self, seed: &Seed) -> f64 {
        let composite = format!("{}{}{}", self.key, self.node, seed);
        self.node += 1;
        pseudohash(&composite)
    }

    /// Draw an index in `0..n` (n > 0).
    pub fn next_index(&mut self, seed: &Seed, n: usize) -> usize {
        debug_assert!(n > 0, "next_index requires a non-empty range");
        let draw = self.next(seed);
        ((draw * n as f64) as usize).min(n - 1)
    }
}

/// Lane-parallel pseudohash over 8 seeds sharing one key, used by the
/// vector pre-filter (spec §4.4) to draw a whole batch's worth of tag or
/// voucher rolls in one SIMD pass.
///
/// `pseudohash` folds `format!("{key}{seed}")` back-to-front, so the
/// seed's bytes (the suffix, the part that differs per lane) fold in
/// first, then the shared key bytes fold in after. This folds the seed
/// bytes with genuine lane-wise `f64x8` arithmetic, one byte position at a
/// time across all 8 lanes at once, then continues folding the common key
/// bytes as a lane-broadcast constant — unlike scalar-looping the 8 lanes
/// and packing the results, which performs no vector arithmetic at all.
pub fn pseudohash_batch(key: &str, seeds: &[Seed; 8]) -> f64x8 {
    let mult = f64x8::splat(FOLD_MULT);
    let mut num = f64x8::splat(1.0);

    for i in (0..SEED_LEN).rev() {
        let byte_lane: [f64; 8] = std::array::from_fn(|lane| seeds[lane].as_bytes()[i] as f64);
        num = fold_step(mult, num, f64x8::from(byte_lane));
    }
    for &b in key.as_bytes().iter().rev() {
        num = fold_step(mult, num, f64x8::splat(b as f64));
    }
    num
}

/// One lane-wise fold step: `(mult * num + byte).rem_euclid(1.0)`. Every
/// value that reaches this is non-negative (bytes are ASCII, `num` stays
/// in `[0, 1)`), so `rem_euclid(1.0)` is just `x - x.floor()` here.
fn fold_step(mult: f64x8, num: f64x8, byte: f64x8) -> f64x8 {
    let x = mult * num + byte;
    x - x.floor()
}

/// Edition thresholds for the probabilistic fallback path (spec §4.7).
/// Checked rarest-first: a roll under the Polychrome threshold is also
/// under every wider threshold, so the first match in this order is the
/// rarest edition the roll qualifies for.
const POLYCHROME_THRESHOLD: f64 = 0.01;
const HOLOGRAPHIC_THRESHOLD: f64 = 0.02;
const FOIL_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = 0.10;

/// Resolves a probabilistic edition roll to an `Edition` using the fixed
/// thresholds from spec §4.7. Only used by the legacy roll-based path; the
/// canonical shop path reads the edition directly off the provider's item.
pub fn edition_from_roll(roll: f64) -> Edition {
    if roll < POLYCHROME_THRESHOLD {
        Edition::Polychrome
    } else if roll < HOLOGRAPHIC_THRESHOLD {
        Edition::Holographic
    } else if roll < FOIL_THRESHOLD {
        Edition::Foil
    } else if roll < NEGATIVE_THRESHOLD {
        Edition::Negative
    } else {
        Edition::Base
    }
}
