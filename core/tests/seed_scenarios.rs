//! The six worked query scenarios from spec §8. No external PRNG reference
//! vectors ship with this pack, so these pin the *relative* behavior the
//! scenarios describe against the deterministic provider, rather than a
//! hardcoded seed → outcome table.

use ouija_core::ante::Ante;
use ouija_core::content::joker::JokerId;
use ouija_core::content::shop::ante_first_voucher;
use ouija_core::content::tag::TagId;
use ouija_core::content::tags::small_and_big_blind_tags;
use ouija_core::content::voucher::VoucherId;
use ouija_core::evaluator::evaluate;
use ouija_core::query::clause::{Category, Clause, Modifiers, SourceFlags, Target};
use ouija_core::query::config::{Deck, OuijaConfig, Stake};
use ouija_core::seed::Seed;

const SAMPLE_SIZE: usize = 1_000;

fn first_n_seeds(n: usize) -> Vec<Seed> {
    let mut seeds = Vec::with_capacity(n);
    let mut s = Seed::MIN;
    for _ in 0..n {
        seeds.push(s);
        s = s.next();
    }
    seeds
}

fn base_config(must: Vec<Clause>, should: Vec<Clause>, minimum_score: i64) -> OuijaConfig {
    OuijaConfig {
        must,
        must_not: vec![],
        should,
        deck: Deck::default(),
        stake: Stake::default(),
        max_search_ante: 8,
        minimum_score,
        score_natural_negatives: false,
        score_desired_negatives: false,
    }
}

fn voucher_clause(value: Option<VoucherId>, antes: Vec<Ante>) -> Clause {
    Clause {
        target: Target::Voucher(value),
        search_antes: antes,
        source_flags: SourceFlags::for_category(Category::Voucher),
        modifiers: Modifiers::default(),
        score: 0,
    }
}

/// Scenario 1: a MUST Voucher=Telescope clause accepts exactly the seeds
/// whose ante-1 first voucher is Telescope.
#[test]
fn scenario_1_voucher_clause_matches_exactly_the_telescope_seeds() {
    let ante1 = Ante::new(1).unwrap();
    let config = base_config(vec![voucher_clause(Some(VoucherId::Telescope), vec![ante1])], vec![], 0);

    for seed in first_n_seeds(SAMPLE_SIZE) {
        let accepted = evaluate(&seed, &config).is_some();
        let is_telescope = ante_first_voucher(&seed, ante1) == VoucherId::Telescope;
        assert_eq!(accepted, is_telescope, "seed {seed} disagreed with direct voucher check");
    }
}

/// Scenario 2: a MUST SoulJoker=Perkeo clause accepts iff the first Soul
/// card found while walking ante 1 or 2's packs resolves to Perkeo.
#[test]
fn scenario_2_soul_joker_clause_matches_first_soul_resolution() {
    use ouija_core::content::PackWalk;

    let ante1 = Ante::new(1).unwrap();
    let ante2 = Ante::new(2).unwrap();
    let config = base_config(
        vec![Clause {
            target: Target::SoulJoker(Some(JokerId::Perkeo)),
            search_antes: vec![ante1, ante2],
            source_flags: SourceFlags::for_category(Category::SoulJoker),
            modifiers: Modifiers::default(),
            score: 0,
        }],
        vec![],
        0,
    );

    for seed in first_n_seeds(200) {
        let accepted = evaluate(&seed, &config).is_some();
        let matches_directly = [ante1, ante2]
            .iter()
            .any(|&ante| PackWalk::run(&seed, ante).first_soul_joker(&seed, ante) == Some(JokerId::Perkeo));
        assert_eq!(accepted, matches_directly, "seed {seed} disagreed with direct soul-joker walk");
    }
}

/// Scenario 3: additive SHOULD scoring with a minimum gate — a seed is
/// accepted only once Blueprint (worth 10) plus an optional +5 NegativeTag
/// stack clears the 10-point minimum.
#[test]
fn scenario_3_should_clauses_stack_additively_and_respect_minimum() {
    let antes123: Vec<Ante> = (1..=3).map(|n| Ante::new(n).unwrap()).collect();
    let ante1 = Ante::new(1).unwrap();

    let blueprint = Clause {
        target: Target::Joker(Some(JokerId::Blueprint)),
        search_antes: antes123,
        source_flags: SourceFlags::for_category(Category::Joker),
        modifiers: Modifiers::default(),
        score: 10,
    };
    let negative_tag = Clause {
        target: Target::Tag(Some(TagId::Negative)),
        search_antes: vec![ante1],
        source_flags: SourceFlags::for_category(Category::Tag),
        modifiers: Modifiers::default(),
        score: 5,
    };
    let config = base_config(vec![], vec![blueprint, negative_tag], 10);

    for seed in first_n_seeds(SAMPLE_SIZE) {
        if let Some(result) = evaluate(&seed, &config) {
            assert!(result.total_score >= 10, "seed {seed} emitted below the minimum");
            assert!(
                result.total_score == 10 || result.total_score == 15,
                "seed {seed} scored {} outside {{10,15}}",
                result.total_score
            );
        }
    }
}

/// Scenario 4: a MUST-NOT Voucher=Hieroglyph clause rejects every seed
/// whose ante-1 voucher is Hieroglyph, independent of whether the rest of
/// the query would otherwise qualify.
#[test]
fn scenario_4_must_not_voucher_excludes_hieroglyph_seeds() {
    let ante1 = Ante::new(1).unwrap();
    let must_tag = Clause {
        target: Target::Tag(None),
        search_antes: vec![ante1],
        source_flags: SourceFlags::for_category(Category::Tag),
        modifiers: Modifiers::default(),
        score: 0,
    };
    let config = OuijaConfig {
        must: vec![must_tag],
        must_not: vec![voucher_clause(Some(VoucherId::Hieroglyph), vec![ante1])],
        should: vec![],
        deck: Deck::default(),
        stake: Stake::default(),
        max_search_ante: 8,
        minimum_score: 0,
        score_natural_negatives: false,
        score_desired_negatives: false,
    };

    for seed in first_n_seeds(SAMPLE_SIZE) {
        if ante_first_voucher(&seed, ante1) == VoucherId::Hieroglyph {
            assert!(evaluate(&seed, &config).is_none(), "seed {seed} should be excluded");
        }
    }
}

/// Scenario 5: one SHOULD clause of score 1 per ante 1..8 yields a total
/// score equal to the count of antes satisfied, never double-counted.
#[test]
fn scenario_5_total_score_equals_antes_satisfied() {
    let should: Vec<Clause> = (1..=8)
        .map(|n| {
            let ante = Ante::new(n).unwrap();
            let (small, _) = small_and_big_blind_tags(&Seed::MIN, ante.get());
            Clause {
                target: Target::SmallBlindTag(Some(small)),
                search_antes: vec![ante],
                source_flags: SourceFlags::for_category(Category::SmallBlindTag),
                modifiers: Modifiers::default(),
                score: 1,
            }
        })
        .collect();
    let config = base_config(vec![], should, 0);

    let result = evaluate(&Seed::MIN, &config).expect("minimum score 0 always emits");
    let satisfied = result.score_breakdown.iter().filter(|&&s| s == 1).count() as i64;
    assert_eq!(result.total_score, satisfied);
    assert!(result.total_score <= 8);
}

/// Scenario 6: a 33-clause SHOULD list must be rejected at load, before any
/// seed is ever searched.
#[test]
fn scenario_6_too_many_should_clauses_rejected_at_load() {
    let ante1 = Ante::new(1).unwrap();
    let should: Vec<Clause> = (0..33).map(|_| voucher_clause(None, vec![ante1])).collect();
    let config = base_config(vec![], should, 0);
    assert!(config.validate().is_err());
}
