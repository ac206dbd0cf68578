//! Skip-tag stream: produces the small-blind and big-blind tags for an
//! ante in order (spec §4.3 `CreateTagStream`/`NextTag`).

use crate::content::prng::{pseudohash_batch, Stream};
use crate::content::tag::TagId;
use crate::seed::Seed;
use strum::IntoEnumIterator;

pub struct TagStream {
    draws: Stream,
}

impl TagStream {
    pub fn new(ante: u8) -> Self {
        Self {
            draws: Stream::new(format!("tag{ante}")),
        }
    }

    pub fn next(&mut self, seed: &Seed) -> TagId {
        let tags: Vec<_> = TagId::iter().collect();
        tags[self.draws.next_index(seed, tags.len())]
    }
}

/// Draws the small-blind and big-blind tags for one ante, in order.
pub fn small_and_big_blind_tags(seed: &Seed, ante: u8) -> (TagId, TagId) {
    let mut stream = TagStream::new(ante);
    let small = stream.next(seed);
    let big = stream.next(seed);
    (small, big)
}

/// Lane-parallel form of `small_and_big_blind_tags`, used by the vector
/// pre-filter (spec §4.4 step 2) to draw a whole `W`-wide batch's tags in
/// two `f64x8` passes instead of `2*W` scalar stream draws.
pub fn small_and_big_blind_tags_batch(seeds: &[Seed; 8], ante: u8) -> [(TagId, TagId); 8] {
    let tags: Vec<_> = TagId::iter().collect();
    let small_rolls: [f64; 8] = pseudohash_batch(&format!("tag{ante}1"), seeds).into();
    let big_rolls: [f64; 8] = pseudohash_batch(&format!("tag{ante}2"), seeds).into();

    let to_tag = |roll: f64| tags[((roll * tags.len() as f64) as usize).min(tags.len() - 1)];

    let mut out = [(tags[0], tags[0]); 8];
    for ((slot, small), big) in out.iter_mut().zip(small_rolls.iter()).zip(big_rolls.iter()) {
        *slot = (to_tag(*small), to_tag(*big));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_deterministic() {
        let seed: Seed = "ABCDEFGH".parse().unwrap();
        assert_eq!(
            small_and_big_blind_tags(&seed, 1),
            small_and_big_blind_tags(&seed, 1)
        );
    }

    #[test]
    fn small_and_big_blind_tags_can_differ() {
        let seed: Seed = "ABCDEFGH".parse().unwrap();
        let (small, big) = small_and_big_blind_tags(&seed, 1);
        // Both come from the same stream (small drawn first, big second);
        // just confirm both are valid draws, not that they must differ.
        let _ = (small, big);
    }

    #[test]
    fn batch_tags_match_scalar_per_lane() {
        let seeds: [Seed; 8] = [
            "AAAAAAAA".parse().unwrap(),
            "AAAAAAAB".parse().unwrap(),
            "AAAAAAAC".parse().unwrap(),
            "AAAAAAAD".parse().unwrap(),
            "AAAAAAAE".parse().unwrap(),
            "AAAAAAAF".parse().unwrap(),
            "AAAAAAAG".parse().unwrap(),
            "AAAAAAAH".parse().unwrap(),
        ];
        let batch = small_and_big_blind_tags_batch(&seeds, 1);
        for (seed, want) in seeds.iter().zip(batch.iter()) {
            assert_eq!(small_and_big_blind_tags(seed, 1), *want);
        }
    }
}
