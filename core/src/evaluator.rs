//! Single-Seed Evaluator (spec §4.5-4.6): the per-category predicates and
//! three-phase MUST / MUST-NOT / SHOULD pass that decides whether one seed
//! is a result.

use std::collections::HashMap;

use crate::ante::Ante;
use crate::card::{Card, Edition};
use crate::content::joker::JokerId;
use crate::content::packs::{PackDraw, PackType};
use crate::content::shop::{ante_first_voucher, generate_full_shop, ShopItem, ShopSlot};
use crate::content::tag::TagId;
use crate::content::tags::small_and_big_blind_tags;
use crate::content::{warn_unimplemented_once, PackWalk};
use crate::query::clause::{Category, Clause, Modifiers, Target};
use crate::query::config::OuijaConfig;
use crate::result::OuijaResult;
use crate::seed::Seed;

/// Per-seed memoisation of the content provider reads a query's clauses
/// repeatedly ask for: a shop or a pack walk for the same (seed, ante) is
/// generated at most once per evaluation (spec §5: "each vector/single
/// context owns its own stream state").
struct SeedContext<'a> {
    seed: &'a Seed,
    shops: HashMap<u8, Vec<ShopSlot>>,
    pack_walks: HashMap<u8, PackWalk>,
}

impl<'a> SeedContext<'a> {
    fn new(seed: &'a Seed) -> Self {
        Self {
            seed,
            shops: HashMap::new(),
            pack_walks: HashMap::new(),
        }
    }

    fn shop(&mut self, ante: Ante) -> &[ShopSlot] {
        let seed = self.seed;
        self.shops
            .entry(ante.get())
            .or_insert_with(|| generate_full_shop(seed, ante))
    }

    fn pack_walk(&mut self, ante: Ante) -> &PackWalk {
        let seed = self.seed;
        self.pack_walks
            .entry(ante.get())
            .or_insert_with(|| PackWalk::run(seed, ante))
    }
}

/// Evaluates one seed against a resolved query, returning the seed's result
/// only if it should be emitted (spec §4.5: Phase A/B reject outright,
/// Phase C's `MinimumScore` gates emission).
pub fn evaluate(seed: &Seed, config: &OuijaConfig) -> Option<OuijaResult> {
    let mut ctx = SeedContext::new(seed);
    let mut desired_negatives = 0u32;

    // Phase A — MUST: first unsatisfied clause rejects the seed.
    for clause in &config.must {
        if !satisfies_clause(&mut ctx, clause) {
            return None;
        }
        if is_desired_negative_clause(clause) {
            desired_negatives += 1;
        }
    }

    // Phase B — MUST-NOT: any satisfied clause rejects the seed.
    for clause in &config.must_not {
        if satisfies_clause(&mut ctx, clause) {
            return None;
        }
    }

    // Phase C — SHOULD scoring.
    let mut total_score = 0i64;
    let mut score_breakdown = Vec::with_capacity(config.should.len());
    for clause in &config.should {
        if satisfies_clause(&mut ctx, clause) {
            total_score += clause.score;
            score_breakdown.push(clause.score);
            if is_desired_negative_clause(clause) {
                desired_negatives += 1;
            }
        } else {
            score_breakdown.push(0);
        }
    }

    if total_score < config.minimum_score {
        return None;
    }

    let desired_negatives = config.score_desired_negatives.then_some(desired_negatives);
    let natural_negatives = config
        .score_natural_negatives
        .then(|| count_natural_negatives(&mut ctx, config));

    Some(OuijaResult {
        seed: *seed,
        total_score,
        score_breakdown,
        natural_negatives,
        desired_negatives,
        success: true,
    })
}

/// A clause is satisfied iff any of its declared antes matches (spec §4.5:
/// "A clause is satisfied iff any of its SearchAntes yields a match"),
/// short-circuiting on the first match (spec §4.6 "Short-circuiting within
/// a clause").
fn satisfies_clause(ctx: &mut SeedContext, clause: &Clause) -> bool {
    clause
        .search_antes
        .iter()
        .any(|&ante| matches_at_ante(ctx, clause, ante))
}

/// Whether a matched clause counts toward `DesiredNegativeJokers` (spec
/// §4.5 "Negative-joker counters"). Callers only invoke this once they've
/// already confirmed the clause matched.
fn is_desired_negative_clause(clause: &Clause) -> bool {
    matches!(clause.category(), Category::Joker | Category::SoulJoker)
        && clause.modifiers.edition == Some(Edition::Negative)
}

/// Scans every ante any clause in the query touches for shop joker slots
/// with `Edition::Negative`, regardless of what any clause requested (spec
/// §4.5: "counts any negative-edition joker seen regardless of clause-
/// requested edition"). The pack-dealt jokers carry no edition in this
/// provider (only shop slots do), so the sweep is shop-only.
fn count_natural_negatives(ctx: &mut SeedContext, config: &OuijaConfig) -> u32 {
    let mut antes: Vec<Ante> = config
        .must
        .iter()
        .chain(&config.must_not)
        .chain(&config.should)
        .flat_map(|c| c.search_antes.iter().copied())
        .collect();
    antes.sort_by_key(|a| a.get());
    antes.dedup();

    antes
        .into_iter()
        .map(|ante| {
            ctx.shop(ante)
                .iter()
                .filter(|slot| {
                    matches!(slot.item, ShopItem::Joker(_)) && slot.edition == Edition::Negative
                })
                .count() as u32
        })
        .sum()
}

fn matches_at_ante(ctx: &mut SeedContext, clause: &Clause, ante: Ante) -> bool {
    match clause.target {
        Target::Joker(target) => joker_matches(ctx, clause, ante, target),
        Target::SoulJoker(target) => soul_joker_matches(ctx, ante, target, &clause.modifiers),
        Target::Tarot(target) => {
            consumable_matches(ctx, clause, ante, |d| match d {
                PackDraw::Tarot(t) => Some(*t),
                _ => None,
            })
            .map_or(false, |found| target.map_or(true, |want| want == found))
                || (clause.source_flags.include_shop_stream
                    && shop_has(ctx.shop(ante), |item| match item {
                        ShopItem::Tarot(t) => target.map_or(true, |want| want == *t),
                        _ => false,
                    }))
        }
        Target::Planet(target) => {
            consumable_matches(ctx, clause, ante, |d| match d {
                PackDraw::Planet(p) => Some(*p),
                _ => None,
            })
            .map_or(false, |found| target.map_or(true, |want| want == found))
                || (clause.source_flags.include_shop_stream
                    && shop_has(ctx.shop(ante), |item| match item {
                        ShopItem::Planet(p) => target.map_or(true, |want| want == *p),
                        _ => false,
                    }))
        }
        Target::Spectral(target) => {
            consumable_matches(ctx, clause, ante, |d| match d {
                PackDraw::Spectral(s) => Some(*s),
                _ => None,
            })
            .map_or(false, |found| target.map_or(true, |want| want == found))
                || (clause.source_flags.include_shop_stream
                    && shop_has(ctx.shop(ante), |item| match item {
                        ShopItem::Spectral(s) => target.map_or(true, |want| want == *s),
                        _ => false,
                    }))
        }
        Target::PlayingCard => playing_card_matches(ctx, clause, ante),
        Target::Tag(target) => tag_matches_any(ante, ctx.seed, target),
        Target::SmallBlindTag(target) => {
            let (small, _) = small_and_big_blind_tags(ctx.seed, ante.get());
            target.map_or(true, |want| want == small)
        }
        Target::BigBlindTag(target) => {
            let (_, big) = small_and_big_blind_tags(ctx.seed, ante.get());
            target.map_or(true, |want| want == big)
        }
        Target::Voucher(target) => {
            let voucher = ante_first_voucher(ctx.seed, ante);
            target.map_or(true, |want| want == voucher)
        }
        Target::Boss => {
            warn_unimplemented_once(Category::Boss);
            false
        }
    }
}

fn tag_matches_any(ante: Ante, seed: &Seed, target: Option<TagId>) -> bool {
    let (small, big) = small_and_big_blind_tags(seed, ante.get());
    target.map_or(true, |want| want == small) || target.map_or(true, |want| want == big)
}

fn shop_has(slots: &[ShopSlot], pred: impl Fn(&ShopItem) -> bool) -> bool {
    slots.iter().any(|slot| pred(&slot.item))
}

/// Walks `clause`'s ante's pack headers looking for `extract`'s target
/// variant in any opened pack's contents (spec §4.6 Tarot/Planet/Spectral
/// "pack path"). Returns the first matching draw, if any.
fn consumable_matches<T: Copy>(
    ctx: &mut SeedContext,
    clause: &Clause,
    ante: Ante,
    extract: impl Fn(&PackDraw) -> Option<T>,
) -> Option<T> {
    if !clause.source_flags.include_booster_packs {
        return None;
    }
    ctx.pack_walk(ante)
        .packs
        .iter()
        .flat_map(|(_, contents)| contents.iter())
        .find_map(|draw| extract(draw))
}

/// Joker (non-legendary) predicate (spec §4.6). Checks shop, then
/// buffoon-pack contents, then skip-tag presence, per the clause's source
/// flags — any one of the three satisfying the clause.
fn joker_matches(ctx: &mut SeedContext, clause: &Clause, ante: Ante, target: Option<JokerId>) -> bool {
    if clause.source_flags.include_shop_stream {
        let edition = clause.modifiers.edition;
        let found = ctx.shop(ante).iter().any(|slot| match slot.item {
            ShopItem::Joker(j) => {
                target.map_or(true, |want| want == j) && edition.map_or(true, |e| e == slot.edition)
            }
            _ => false,
        });
        if found {
            return true;
        }
    }

    if clause.source_flags.include_booster_packs {
        let found = ctx
            .pack_walk(ante)
            .packs
            .iter()
            .filter(|(header, _)| header.pack_type == PackType::Buffoon)
            .flat_map(|(_, contents)| contents.iter())
            .any(|draw| matches!(draw, PackDraw::Joker(j) if target.map_or(true, |want| want == *j)));
        if found {
            return true;
        }
    }

    if clause.source_flags.include_skip_tags && target.is_none() {
        // Specific-joker identification via skip tags needs provider
        // support this implementation doesn't have (spec §4.6): only the
        // "any joker" case can be satisfied this way.
        let (small, big) = small_and_big_blind_tags(ctx.seed, ante.get());
        let spawns_joker = |tag: TagId| matches!(tag, TagId::Rare | TagId::Uncommon);
        if spawns_joker(small) || spawns_joker(big) {
            return true;
        }
    }

    false
}

/// SoulJoker predicate (spec §4.6): walks the ante's packs once, and if any
/// pack contained a Soul card, draws the legendary it spawns and compares
/// against the target.
fn soul_joker_matches(
    ctx: &mut SeedContext,
    ante: Ante,
    target: Option<JokerId>,
    modifiers: &Modifiers,
) -> bool {
    let seed = ctx.seed;
    let walk = ctx.pack_walk(ante);
    let Some(joker) = walk.first_soul_joker(seed, ante) else {
        return false;
    };
    if !target.map_or(true, |want| want == joker) {
        return false;
    }
    // The provider never attaches an edition to a soul-spawned joker (only
    // shop slots carry one), so an edition modifier on a SoulJoker clause
    // can't be confirmed; gate acceptance on it anyway per spec ("Edition
    // check gates acceptance"), which means such a clause never matches.
    modifiers.edition.is_none()
}

/// PlayingCard predicate (spec §4.6): walks standard-pack headers and
/// tests every dealt card against the clause's optional modifier filter.
fn playing_card_matches(ctx: &mut SeedContext, clause: &Clause, ante: Ante) -> bool {
    if !clause.source_flags.include_booster_packs {
        warn_unimplemented_once(Category::PlayingCard);
        return false;
    }
    ctx.pack_walk(ante)
        .packs
        .iter()
        .filter(|(header, _)| header.pack_type == PackType::Standard)
        .flat_map(|(_, contents)| contents.iter())
        .any(|draw| matches!(draw, PackDraw::PlayingCard(card) if card_matches(card, &clause.modifiers)))
}

fn card_matches(card: &Card, modifiers: &Modifiers) -> bool {
    modifiers.rank.map_or(true, |r| r == card.rank)
        && modifiers.suit.map_or(true, |s| s == card.suit)
        && modifiers.enhancement.map_or(true, |e| card.enhancement == Some(e))
        && modifiers.seal.map_or(true, |s| card.seal == Some(s))
        && modifiers.edition.map_or(true, |e| e == card.edition)
}
