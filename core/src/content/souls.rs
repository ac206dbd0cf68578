//! Soul-joker stream: resolves the legendary joker spawned when a Soul
//! card appears inside an opened Arcana/Spectral/Celestial pack (spec
//! §4.6).

use crate::content::joker::JokerId;
use crate::content::prng::Stream;
use crate::seed::Seed;
use strum::IntoEnumIterator;

pub struct SoulJokerStream {
    draws: Stream,
}

impl SoulJokerStream {
    /// Created once per successful Soul detection within an ante walk
    /// (spec §4.6: "The soul-joker stream is created per successful Soul
    /// detection").
    pub fn new(ante: u8) -> Self {
        Self {
            draws: Stream::new(format!("sou{ante}")),
        }
    }

    pub fn next(&mut self, seed: &Seed) -> JokerId {
        let legendaries: Vec<_> = JokerId::iter().filter(|j| j.is_soul_exclusive()).collect();
        debug_assert!(!legendaries.is_empty(), "no legendary jokers registered");
        let i = self.draws.next_index(seed, legendaries.len());
        legendaries[i]
    }
}
