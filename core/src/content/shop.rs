//! Shop generation: the full per-ante slot list, and the cheap
//! vector-friendly membership filters the pre-filter calls directly
//! without materialising a whole shop per lane (spec §4.3, §4.4).

use crate::ante::Ante;
use crate::card::Edition;
use crate::content::consumable::{PlanetId, SpectralId, TarotId};
use crate::content::joker::JokerId;
use crate::content::prng::{edition_from_roll, pseudohash_batch, Stream};
use crate::content::voucher::VoucherId;
use crate::seed::Seed;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopItem {
    Joker(JokerId),
    Tarot(TarotId),
    Planet(PlanetId),
    Spectral(SpectralId),
}

#[derive(Debug, Clone, Copy)]
pub struct ShopSlot {
    pub item: ShopItem,
    pub edition: Edition,
}

/// Weighted category roll for a shop slot: mostly jokers, with consumables
/// filling the rest (ballpark ratios for a deterministic filter, not a
/// reproduction of the live game's exact shop weights — spec §1 non-goal).
const CATEGORY_WEIGHTS: [(u8, usize); 4] = [(0, 6), (1, 2), (2, 1), (3, 1)];

/// Generates the full shop for one ante (spec §4.3 `GenerateFullShop`),
/// with `Ante::shop_slots()` slots.
pub fn generate_full_shop(seed: &Seed, ante: Ante) -> Vec<ShopSlot> {
    let mut item_draws = Stream::new(format!("sho{}", ante.get()));
    let mut edition_draws = Stream::new(format!("shoed{}", ante.get()));

    (0..ante.shop_slots())
        .map(|_| {
            let total: usize = CATEGORY_WEIGHTS.iter().map(|(_, w)| w).sum();
            let mut roll = item_draws.next_index(seed, total);
            let category = CATEGORY_WEIGHTS
                .iter()
                .find_map(|&(cat, w)| {
                    if roll < w {
                        Some(cat)
                    } else {
                        roll -= w;
                        None
                    }
                })
                .unwrap_or(0);

            let item = match category {
                0 => {
                    let jokers: Vec<_> =
                        JokerId::iter().filter(|j| !j.is_soul_exclusive()).collect();
                    ShopItem::Joker(jokers[item_draws.next_index(seed, jokers.len())])
                }
                1 => {
                    let tarots: Vec<_> = TarotId::iter().collect();
                    ShopItem::Tarot(tarots[item_draws.next_index(seed, tarots.len())])
                }
                2 => {
                    let planets: Vec<_> = PlanetId::iter().collect();
                    ShopItem::Planet(planets[item_draws.next_index(seed, planets.len())])
                }
                _ => {
                    let spectrals: Vec<_> = SpectralId::iter().collect();
                    ShopItem::Spectral(spectrals[item_draws.next_index(seed, spectrals.len())])
                }
            };

            let edition = edition_from_roll(edition_draws.next(seed));
            ShopSlot { item, edition }
        })
        .collect()
}

/// How many slots `GenerateFullShop` fills for this ante (spec §4.3).
pub fn max_shop_slots(ante: Ante) -> usize {
    ante.shop_slots()
}

/// The voucher shown at the ante's shop (spec §4.3 `GetAnteFirstVoucher`).
pub fn ante_first_voucher(seed: &Seed, ante: Ante) -> VoucherId {
    let vouchers: Vec<_> = VoucherId::iter().collect();
    let mut draws = Stream::new(format!("vch{}", ante.get()));
    vouchers[draws.next_index(seed, vouchers.len())]
}

/// Lane-parallel form of `ante_first_voucher`: draws all 8 lanes' first
/// vouchers in one `f64x8` pass (spec §4.4's vector pre-filter operates on
/// a `W`-wide batch at a time). The composite key built here must match
/// `Stream`'s own key-plus-node-plus-seed format exactly, since this is
/// the ante's very first draw on the `"vch<ante>"` stream (node 1).
pub fn ante_first_voucher_batch(seeds: &[Seed; 8], ante: Ante) -> [VoucherId; 8] {
    let vouchers: Vec<_> = VoucherId::iter().collect();
    let key = format!("vch{}1", ante.get());
    let rolls: [f64; 8] = pseudohash_batch(&key, seeds).into();
    let mut out = [vouchers[0]; 8];
    for (lane, roll) in out.iter_mut().zip(rolls.iter()) {
        let idx = ((roll * vouchers.len() as f64) as usize).min(vouchers.len() - 1);
        *lane = vouchers[idx];
    }
    out
}

/// Per-lane membership test for whether an ante's shop contains the given
/// item, across a `W`-wide batch of seeds (spec §4.4 step 3: "vectorisable
/// shop-category clauses"). Bit `i` of the returned mask is set when lane
/// `i`'s shop contains `item`.
///
/// A shop slot is a weighted, multi-draw roll rather than a single
/// `f64x8`-friendly fold, so this reuses the scalar generator per lane
/// instead of re-deriving that weighting in lane-parallel form. It still
/// runs once per batch ahead of the single-seed evaluator, giving the same
/// early-out benefit the voucher and tag batch draws do.
pub fn shop_has_item_batch(seeds: &[Seed; 8], ante: Ante, item: ShopItem) -> u8 {
    let mut mask = 0u8;
    for (i, seed) in seeds.iter().enumerate() {
        if generate_full_shop(seed, ante).iter().any(|slot| slot.item == item) {
            mask |= 1 << i;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_slot_count_matches_ante() {
        let seed: Seed = "AAAAAAAA".parse().unwrap();
        let a1 = Ante::new(1).unwrap();
        let a2 = Ante::new(2).unwrap();
        assert_eq!(generate_full_shop(&seed, a1).len(), a1.shop_slots());
        assert_eq!(generate_full_shop(&seed, a2).len(), a2.shop_slots());
    }

    #[test]
    fn shop_generation_is_deterministic() {
        let seed: Seed = "AAAAAAAA".parse().unwrap();
        let ante = Ante::new(1).unwrap();
        let a = generate_full_shop(&seed, ante);
        let b = generate_full_shop(&seed, ante);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.item, y.item);
            assert_eq!(x.edition, y.edition);
        }
    }

    #[test]
    fn first_voucher_is_deterministic() {
        let seed: Seed = "ABCD1234".parse().unwrap();
        let ante = Ante::new(1).unwrap();
        assert_eq!(ante_first_voucher(&seed, ante), ante_first_voucher(&seed, ante));
    }

    #[test]
    fn batch_voucher_matches_scalar_per_lane() {
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
        let ante = Ante::new(1).unwrap();
        let batch = ante_first_voucher_batch(&seeds, ante);
        for (seed, want) in seeds.iter().zip(batch.iter()) {
            assert_eq!(ante_first_voucher(seed, ante), *want);
        }
    }

    #[test]
    fn shop_has_item_batch_matches_scalar_per_lane() {
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
        let ante = Ante::new(1).unwrap();
        let item = ShopItem::Planet(crate::content::consumable::PlanetId::Mercury);
        let mask = shop_has_item_batch(&seeds, ante, item);
        for (i, seed) in seeds.iter().enumerate() {
            let want = generate_full_shop(seed, ante).iter().any(|slot| slot.item == item);
            assert_eq!((mask >> i) & 1 == 1, want);
        }
    }
}
