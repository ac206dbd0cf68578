//! Vector Pre-Filter (spec §4.4): a cheap, lane-parallel first pass over a
//! `W`-wide batch of seeds that can only narrow the batch's live-lane mask,
//! never wrongly reject a lane the single-seed evaluator would accept.
//!
//! Only MUST clauses feed the mask — a MUST-NOT or SHOULD clause never
//! causes a lane to drop here, since this stage exists purely to skip the
//! single-seed evaluator's cost on batches no MUST clause could satisfy,
//! not to replace MUST-NOT/SHOULD semantics.

use crate::ante::Ante;
use crate::content::consumable::{PlanetId, SpectralId};
use crate::content::shop::{ante_first_voucher_batch, shop_has_item_batch, ShopItem};
use crate::content::tags::small_and_big_blind_tags_batch;
use crate::query::clause::{Category, Clause, Target};
use crate::query::config::OuijaConfig;
use crate::seed::Seed;
use strum::IntoEnumIterator;

/// Lane-liveness bitmask for a `W=8`-wide seed batch. Bit `i` set means lane
/// `i` is still a candidate after every vectorisable clause has run.
pub type VectorMask = u8;

/// All 8 lanes live.
pub const ALL_LANES: VectorMask = 0xff;

/// Runs the vector pre-filter over one batch of 8 consecutive seeds,
/// starting from an all-ones mask (spec §4.4: "invoked once per W-wide
/// batch with an all-ones mask").
pub fn prefilter(seeds: &[Seed; 8], config: &OuijaConfig) -> VectorMask {
    let mut mask = ALL_LANES;

    mask &= voucher_mask(seeds, &config.must);
    if mask == 0 {
        return mask;
    }

    mask &= tag_mask(seeds, &config.must);
    if mask == 0 {
        return mask;
    }

    mask &= shop_category_mask(seeds, &config.must);
    mask
}

/// Step 1: voucher clauses, special OR-union (spec §4.4.1): "the union mask
/// across all (clause, ante) pairs ... is AND-ed into the running mask" —
/// one single union spanning every MUST Voucher clause's every requested
/// ante, AND-ed in once. This is deliberately a union *across clauses*, not
/// an intersection of each clause's own union (spec §9 open question:
/// "preserve this exactly; it is surprising and deliberate per the
/// source") — a lane survives if *any* voucher clause could match at *any*
/// of its antes, even if a different voucher clause wouldn't. The
/// single-seed evaluator still requires every MUST clause to hold; this
/// step is a coarser, conservative pre-filter, not a precise AND-of-musts.
fn voucher_mask(seeds: &[Seed; 8], must: &[Clause]) -> VectorMask {
    let mut found_at_any = 0u8;
    let mut saw_voucher_clause = false;
    for clause in must.iter().filter(|c| c.category() == Category::Voucher) {
        saw_voucher_clause = true;
        let target = match clause.target {
            Target::Voucher(v) => v,
            _ => unreachable!("Category::Voucher clause always carries Target::Voucher"),
        };
        for &ante in &clause.search_antes {
            let batch = ante_first_voucher_batch(seeds, ante);
            for (lane, voucher) in batch.iter().enumerate() {
                if target.map_or(true, |want| want == *voucher) {
                    found_at_any |= 1 << lane;
                }
            }
        }
    }
    if saw_voucher_clause {
        found_at_any
    } else {
        ALL_LANES
    }
}

/// Step 2: tag clauses (spec §4.4.2). Per clause, OR across its requested
/// antes; across clauses, AND.
fn tag_mask(seeds: &[Seed; 8], must: &[Clause]) -> VectorMask {
    let mut mask = ALL_LANES;
    for clause in must.iter().filter(|c| {
        matches!(
            c.category(),
            Category::Tag | Category::SmallBlindTag | Category::BigBlindTag
        )
    }) {
        let mut found_at_any = 0u8;
        for &ante in &clause.search_antes {
            let batch = small_and_big_blind_tags_batch(seeds, ante.get());
            for (lane, (small, big)) in batch.iter().enumerate() {
                let matched = match clause.target {
                    Target::SmallBlindTag(want) => want.map_or(true, |w| w == *small),
                    Target::BigBlindTag(want) => want.map_or(true, |w| w == *big),
                    Target::Tag(want) => {
                        want.map_or(true, |w| w == *small) || want.map_or(true, |w| w == *big)
                    }
                    _ => unreachable!("tag_mask only iterates tag-family clauses"),
                };
                if matched {
                    found_at_any |= 1 << lane;
                }
            }
        }
        mask &= found_at_any;
    }
    mask
}

/// Step 3: vectorisable shop-category clauses, Planet and Spectral today
/// (spec §4.4.3). Tarot and Joker shop membership are just as cheap to
/// compute per lane, but are left to the single-seed evaluator since the
/// spec names only Planet/Spectral as vectorised "today".
fn shop_category_mask(seeds: &[Seed; 8], must: &[Clause]) -> VectorMask {
    let mut mask = ALL_LANES;
    for clause in must.iter() {
        let items: Vec<ShopItem> = match clause.target {
            Target::Planet(Some(p)) => vec![ShopItem::Planet(p)],
            Target::Planet(None) => PlanetId::iter().map(ShopItem::Planet).collect(),
            Target::Spectral(Some(s)) => vec![ShopItem::Spectral(s)],
            Target::Spectral(None) => SpectralId::iter().map(ShopItem::Spectral).collect(),
            _ => continue,
        };
        if !clause.source_flags.include_shop_stream {
            // This clause only searches packs; the shop path can't refute
            // it, so it contributes nothing to the vector mask (no false
            // reject) and is left entirely to the single-seed evaluator.
            continue;
        }

        let mut found_at_any = 0u8;
        for &ante in &clause.search_antes {
            for &item in &items {
                found_at_any |= shop_has_item_batch(seeds, ante, item);
            }
        }
        mask &= found_at_any;
    }
    mask
}
