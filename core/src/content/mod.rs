//! Content Provider: the generated per-ante game content the filter reads.
//!
//! This is the "external collaborator" surface spec §1 declares out of
//! scope for its own internals — but since the spec is the whole program,
//! this module *is* that collaborator's implementation, built as a set of
//! pure functions of `(seed, ante, call-order)` (spec §4.3). It owns no
//! game-rule logic (scoring, deck state, player actions) and exposes only
//! the operations table in spec §4.3.

pub mod consumable;
pub mod joker;
pub mod packs;
pub mod prng;
pub mod shop;
pub mod tags;
pub mod tag;
pub mod voucher;
pub mod souls;

use crate::ante::Ante;
use crate::error::ProviderError;
use crate::query::clause::Category;
use crate::seed::Seed;
use packs::{BoosterPackStream, ContentStream, PackDraw, PackHeader, PackType};
use souls::SoulJokerStream;
use std::sync::Once;

/// Walks one ante's booster-pack stream end to end, opening every pack and
/// recording its contents. Each pack-type content stream (arcana,
/// celestial, spectral, standard, buffoon) is created at most once during
/// the walk, lazily at first use (spec §4.6 stream-initialisation rule).
pub struct PackWalk {
    pub packs: Vec<(PackHeader, Vec<PackDraw>)>,
}

impl PackWalk {
    pub fn run(seed: &Seed, ante: Ante) -> Self {
        let mut headers = BoosterPackStream::new(ante.get());
        let mut arcana: Option<ContentStream> = None;
        let mut celestial: Option<ContentStream> = None;
        let mut spectral: Option<ContentStream> = None;
        let mut standard: Option<ContentStream> = None;
        let mut buffoon: Option<ContentStream> = None;

        let mut packs = Vec::with_capacity(ante.pack_count());
        for _ in 0..ante.pack_count() {
            let header = headers.next(seed);
            let contents = match header.pack_type {
                PackType::Arcana => arcana
                    .get_or_insert_with(|| ContentStream::arcana(ante.get()))
                    .contents(seed, header.size, header.pack_type),
                PackType::Celestial => celestial
                    .get_or_insert_with(|| ContentStream::celestial(ante.get()))
                    .contents(seed, header.size, header.pack_type),
                PackType::Spectral => spectral
                    .get_or_insert_with(|| ContentStream::spectral(ante.get()))
                    .contents(seed, header.size, header.pack_type),
                PackType::Standard => standard
                    .get_or_insert_with(|| ContentStream::standard(ante.get()))
                    .contents(seed, header.size, header.pack_type),
                PackType::Buffoon => buffoon
                    .get_or_insert_with(|| ContentStream::buffoon(ante.get()))
                    .contents(seed, header.size, header.pack_type),
            };
            packs.push((header, contents));
        }
        Self { packs }
    }

    /// Resolves the legendary joker spawned by the first Soul card found
    /// while walking this ante's packs, if any (spec §4.6 SoulJoker
    /// algorithm). The soul-joker stream is created once per successful
    /// detection, not once per walk.
    pub fn first_soul_joker(&self, seed: &Seed, ante: Ante) -> Option<crate::content::joker::JokerId> {
        if self.packs.iter().any(|(_, contents)| packs::contains_the_soul(contents)) {
            let mut stream = SoulJokerStream::new(ante.get());
            Some(stream.next(seed))
        } else {
            None
        }
    }
}

/// Logs an unimplemented-category hit exactly once per category for the
/// life of the process (spec §7b), then the caller treats the clause as
/// never-satisfied.
pub fn warn_unimplemented_once(category: Category) {
    static BOSS: Once = Once::new();
    static PLAYING_CARD_IN_DECK: Once = Once::new();

    let once = match category {
        Category::Boss => &BOSS,
        // PlayingCard-in-deck (rather than in-pack) is the other declared
        // stub per spec §1; the shop/pack path is implemented.
        _ => &PLAYING_CARD_IN_DECK,
    };
    once.call_once(|| {
        let err = ProviderError::Unimplemented(category);
        tracing::warn!(%err, "treating clause as never-satisfied");
    });
}
