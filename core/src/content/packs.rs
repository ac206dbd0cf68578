//! Booster pack streams: headers, per-type content streams, and the
//! membership test the evaluator runs against opened contents.
//!
//! Grounded on `core/src/shop/packs.rs`'s `PackType`/pack-size shape,
//! re-expressed as a pure stream of `(seed, ante, call-order)` draws
//! instead of state mutated on a live `Game` (spec §4.3).

use crate::card::{Card, Rank, Suit};
use crate::content::consumable::{PlanetId, SpectralId, TarotId};
use crate::content::joker::JokerId;
use crate::content::prng::Stream;
use crate::seed::Seed;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum PackType {
    Arcana,
    Celestial,
    Spectral,
    Buffoon,
    Standard,
}

impl PackType {
    /// How many cards a pack of this type offers, before the player picks a
    /// subset. Jumbo/Mega size variants are out of scope; every pack here
    /// is the base size (spec §1 non-goal: reproducing the source game's
    /// rules in full).
    pub fn size(self) -> usize {
        match self {
            PackType::Arcana | PackType::Standard => 3,
            PackType::Celestial => 3,
            PackType::Spectral => 2,
            PackType::Buffoon => 2,
        }
    }

    /// Whether a Soul card can appear in this pack's contents (spec §4.6:
    /// Arcana and Spectral definitely, Celestial provider-permitting).
    pub fn can_contain_soul(self) -> bool {
        matches!(self, PackType::Arcana | PackType::Spectral | PackType::Celestial)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackHeader {
    pub pack_type: PackType,
    pub size: usize,
}

/// A single item drawn from an opened pack's content stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackDraw {
    Tarot(TarotId),
    Planet(PlanetId),
    Spectral(SpectralId),
    Joker(JokerId),
    PlayingCard(Card),
    /// The card that triggers a legendary-joker draw (spec glossary "The
    /// Soul"). Only ever produced by an Arcana/Spectral/Celestial stream.
    TheSoul,
}

/// Stateful stream of pack headers for one ante, drawn in pack-open order.
pub struct BoosterPackStream {
    draws: Stream,
}

const PACK_TYPE_WEIGHTS: [(PackType, usize); 5] = [
    (PackType::Standard, 4),
    (PackType::Buffoon, 2),
    (PackType::Arcana, 4),
    (PackType::Celestial, 4),
    (PackType::Spectral, 2),
];

impl BoosterPackStream {
    pub fn new(ante: u8) -> Self {
        Self {
            draws: Stream::new(format!("pak{ante}")),
        }
    }

    /// Draw the next pack header (spec §4.3 `NextBoosterPack`).
    pub fn next(&mut self, seed: &Seed) -> PackHeader {
        let total: usize = PACK_TYPE_WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut roll = self.draws.next_index(seed, total);
        let pack_type = PACK_TYPE_WEIGHTS
            .iter()
            .find_map(|&(pt, w)| {
                if roll < w {
                    Some(pt)
                } else {
                    roll -= w;
                    None
                }
            })
            .unwrap_or(PackType::Standard);
        PackHeader {
            pack_type,
            size: pack_type.size(),
        }
    }
}

/// One content stream per pack type; lazily created at most once per ante
/// walk (spec §4.6 stream-initialisation rule).
pub struct ContentStream {
    key: &'static str,
    draws: Stream,
}

/// Probability a Soul card displaces an ordinary draw in a soul-eligible
/// pack. Not part of the canonical edition thresholds (§4.7); an
/// independent roll per item slot.
const SOUL_APPEARANCE_CHANCE: f64 = 0.003;

impl ContentStream {
    fn new(key: &'static str, ante: u8) -> Self {
        Self {
            key,
            draws: Stream::new(format!("{key}{ante}")),
        }
    }

    pub fn arcana(ante: u8) -> Self {
        Self::new("ar1", ante)
    }

    pub fn celestial(ante: u8) -> Self {
        Self::new("pla", ante)
    }

    pub fn spectral(ante: u8) -> Self {
        Self::new("spe", ante)
    }

    pub fn standard(ante: u8) -> Self {
        Self::new("sta", ante)
    }

    pub fn buffoon(ante: u8) -> Self {
        Self::new("buf", ante)
    }

    /// Fetch `size` items from this stream (spec §4.3 `GetPackContents`).
    pub fn contents(&mut self, seed: &Seed, size: usize, pack_type: PackType) -> Vec<PackDraw> {
        (0..size)
            .map(|_| self.draw_one(seed, pack_type))
            .collect()
    }

    fn draw_one(&mut self, seed: &Seed, pack_type: PackType) -> PackDraw {
        if pack_type.can_contain_soul() && self.draws.next(seed) < SOUL_APPEARANCE_CHANCE {
            return PackDraw::TheSoul;
        }
        match self.key {
            "ar1" => {
                let tarots: Vec<_> = TarotId::iter().collect();
                let i = self.draws.next_index(seed, tarots.len());
                PackDraw::Tarot(tarots[i])
            }
            "pla" => {
                let planets: Vec<_> = PlanetId::iter().collect();
                let i = self.draws.next_index(seed, planets.len());
                PackDraw::Planet(planets[i])
            }
            "spe" => {
                let spectrals: Vec<_> = SpectralId::iter().collect();
                let i = self.draws.next_index(seed, spectrals.len());
                PackDraw::Spectral(spectrals[i])
            }
            "buf" => {
                let jokers: Vec<_> = JokerId::iter().filter(|j| !j.is_soul_exclusive()).collect();
                let i = self.draws.next_index(seed, jokers.len());
                PackDraw::Joker(jokers[i])
            }
            "sta" => {
                let ranks = Rank::ranks();
                let suits = Suit::suits();
                let r = ranks[self.draws.next_index(seed, ranks.len())];
                let s = suits[self.draws.next_index(seed, suits.len())];
                PackDraw::PlayingCard(Card::new(r, s))
            }
            other => unreachable!("unknown content stream key {other:?}"),
        }
    }
}

/// Tests whether an opened pack's contents contain the given draw, per
/// spec §4.3's `Contains(itemType)`.
pub fn contains(contents: &[PackDraw], target: &PackDraw) -> bool {
    contents.contains(target)
}

pub fn contains_the_soul(contents: &[PackDraw]) -> bool {
    contents.iter().any(|d| matches!(d, PackDraw::TheSoul))
}
