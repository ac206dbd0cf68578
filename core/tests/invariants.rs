//! Universal invariants and boundary behaviours from spec §8, exercised
//! against a sample of the seed space.

use ouija_core::ante::Ante;
use ouija_core::content::joker::JokerId;
use ouija_core::content::shop::ante_first_voucher;
use ouija_core::content::voucher::VoucherId;
use ouija_core::evaluator::evaluate;
use ouija_core::query::clause::{Category, Clause, Modifiers, SourceFlags, Target};
use ouija_core::query::config::{Deck, OuijaConfig, Stake};
use ouija_core::seed::Seed;
use ouija_core::vector::prefilter;

const SAMPLE_SIZE: usize = 500;

fn first_n_seeds(n: usize) -> Vec<Seed> {
    let mut seeds = Vec::with_capacity(n);
    let mut s = Seed::MIN;
    for _ in 0..n {
        seeds.push(s);
        s = s.next();
    }
    seeds
}

fn batches_of_8(seeds: &[Seed]) -> Vec<[Seed; 8]> {
    seeds
        .chunks_exact(8)
        .map(|chunk| {
            let mut batch = [Seed::MIN; 8];
            batch.copy_from_slice(chunk);
            batch
        })
        .collect()
}

fn base_config(must: Vec<Clause>, must_not: Vec<Clause>, should: Vec<Clause>, minimum_score: i64) -> OuijaConfig {
    OuijaConfig {
        must,
        must_not,
        should,
        deck: Deck::default(),
        stake: Stake::default(),
        max_search_ante: 8,
        minimum_score,
        score_natural_negatives: false,
        score_desired_negatives: false,
    }
}

fn voucher_clause(value: Option<VoucherId>, ante: Ante) -> Clause {
    Clause {
        target: Target::Voucher(value),
        search_antes: vec![ante],
        source_flags: SourceFlags::for_category(Category::Voucher),
        modifiers: Modifiers::default(),
        score: 0,
    }
}

/// Vector pre-filter monotonicity: every seed the single-seed evaluator
/// accepts must have had its lane survive the pre-filter.
#[test]
fn prefilter_never_rejects_a_seed_the_evaluator_would_accept() {
    let ante1 = Ante::new(1).unwrap();
    let target = ante_first_voucher(&Seed::MIN, ante1);
    let config = base_config(vec![voucher_clause(Some(target), ante1)], vec![], vec![], 0);

    for batch in batches_of_8(&first_n_seeds(SAMPLE_SIZE)) {
        let mask = prefilter(&batch, &config);
        for (lane, seed) in batch.iter().enumerate() {
            if evaluate(seed, &config).is_some() {
                assert_eq!(mask & (1 << lane), 1 << lane, "seed {seed} accepted but lane rejected by pre-filter");
            }
        }
    }
}

/// Determinism: re-evaluating the same seed against the same query always
/// produces the identical verdict and score.
#[test]
fn evaluate_is_a_pure_function_of_seed_and_query() {
    let ante1 = Ante::new(1).unwrap();
    let clause = Clause {
        target: Target::Joker(Some(JokerId::Blueprint)),
        search_antes: vec![ante1],
        source_flags: SourceFlags::for_category(Category::Joker),
        modifiers: Modifiers::default(),
        score: 3,
    };
    let config = base_config(vec![], vec![], vec![clause], 0);

    for seed in first_n_seeds(SAMPLE_SIZE) {
        let a = evaluate(&seed, &config);
        let b = evaluate(&seed, &config);
        assert_eq!(a, b, "seed {seed} evaluated inconsistently across runs");
    }
}

/// Clause short-circuit: reordering a clause's SearchAntes cannot change
/// acceptance, only search cost.
#[test]
fn ante_order_within_a_clause_does_not_affect_acceptance() {
    let antes: Vec<Ante> = (1..=4).map(|n| Ante::new(n).unwrap()).collect();
    let forward = voucher_clause(Some(VoucherId::Telescope), antes[0]);
    let mut forward_multi = forward.clone();
    forward_multi.search_antes = antes.clone();
    let mut reversed_multi = forward_multi.clone();
    reversed_multi.search_antes.reverse();

    let forward_config = base_config(vec![forward_multi], vec![], vec![], 0);
    let reversed_config = base_config(vec![reversed_multi], vec![], vec![], 0);

    for seed in first_n_seeds(SAMPLE_SIZE) {
        assert_eq!(
            evaluate(&seed, &forward_config).is_some(),
            evaluate(&seed, &reversed_config).is_some(),
            "seed {seed} disagreed across ante orderings"
        );
    }
}

/// `MustNot(C) ⇔ ¬Must(C)`: over the same clause contents, negation is
/// exact for every seed in the sample.
#[test]
fn must_not_is_the_exact_negation_of_must() {
    let ante1 = Ante::new(1).unwrap();
    let clause = voucher_clause(Some(VoucherId::Telescope), ante1);

    let must_config = base_config(vec![clause.clone()], vec![], vec![], 0);
    let must_not_config = base_config(vec![], vec![clause], vec![], 0);

    for seed in first_n_seeds(SAMPLE_SIZE) {
        let must_accepts = evaluate(&seed, &must_config).is_some();
        let must_not_accepts = evaluate(&seed, &must_not_config).is_some();
        assert_ne!(must_accepts, must_not_accepts, "seed {seed} broke Must/MustNot exactness");
    }
}

/// Score cap: TotalScore never exceeds the sum of every Should clause's
/// declared score.
#[test]
fn total_score_never_exceeds_the_sum_of_should_scores() {
    let antes: Vec<Ante> = (1..=3).map(|n| Ante::new(n).unwrap()).collect();
    let should: Vec<Clause> = antes
        .iter()
        .map(|&ante| {
            let mut c = voucher_clause(None, ante);
            c.score = 4;
            c
        })
        .collect();
    let cap: i64 = should.iter().map(|c| c.score).sum();
    let config = base_config(vec![], vec![], should, 0);

    for seed in first_n_seeds(SAMPLE_SIZE) {
        if let Some(result) = evaluate(&seed, &config) {
            assert!(result.total_score <= cap, "seed {seed} scored above the declared cap");
        }
    }
}

/// Idempotence: re-running the pre-filter over the same batch yields the
/// identical mask.
#[test]
fn prefilter_is_idempotent_over_the_same_batch() {
    let ante1 = Ante::new(1).unwrap();
    let config = base_config(vec![voucher_clause(Some(VoucherId::Telescope), ante1)], vec![], vec![], 0);

    for batch in batches_of_8(&first_n_seeds(SAMPLE_SIZE)) {
        assert_eq!(prefilter(&batch, &config), prefilter(&batch, &config));
    }
}

/// Boundary: empty Must + empty MustNot + empty Should with
/// MinimumScore >= 1 accepts nothing.
#[test]
fn empty_query_with_positive_minimum_score_accepts_nothing() {
    let config = base_config(vec![], vec![], vec![], 1);
    for seed in first_n_seeds(SAMPLE_SIZE) {
        assert!(evaluate(&seed, &config).is_none());
    }
}

/// Boundary: ante 1 opens `packs(1)=4` packs; ante 2 opens `packs(2)=6`.
#[test]
fn ante_one_opens_four_packs_ante_two_opens_six() {
    let ante1 = Ante::new(1).unwrap();
    let ante2 = Ante::new(2).unwrap();
    assert_eq!(ante1.pack_count(), 4);
    assert_eq!(ante2.pack_count(), 6);
}

/// Boundary: a Should clause's score is added at most once even when it
/// would match at more than one of its declared antes.
#[test]
fn should_clause_score_counted_once_even_with_multiple_matching_antes() {
    let antes: Vec<Ante> = (1..=8).map(|n| Ante::new(n).unwrap()).collect();
    let mut clause = voucher_clause(None, antes[0]);
    clause.search_antes = antes;
    clause.score = 9;
    let config = base_config(vec![], vec![], vec![clause], 0);

    let result = evaluate(&Seed::MIN, &config).expect("any-voucher always matches ante 1");
    assert_eq!(result.total_score, 9);
    assert_eq!(result.score_breakdown, vec![9]);
}
