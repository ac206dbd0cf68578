//! Search Driver (spec §4.8, §5): owns the outer loop over the seed
//! alphabet, partitions it across worker threads, and wires the vector
//! pre-filter into the single-seed evaluator for each surviving lane.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::SearchParams;
use crate::error::SearchError;
use crate::evaluator;
use crate::query::config::OuijaConfig;
use crate::result::{self, ResultSink};
use crate::seed::{Seed, ALPHABET};
use crate::vector;

/// Lane width the vector pre-filter operates on (spec §4.4, glossary
/// "typical target: 8").
const BATCH_WIDTH: u64 = 8;

/// Process-wide cancellation flag, polled at batch boundaries (spec §5).
/// A small newtype rather than a bare `Arc<AtomicBool>` so call sites read
/// `token.is_cancelled()` instead of an unexplained `load(Ordering::...)`.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Total size of the seed space: `ALPHABET.len() ^ SEED_LEN`. Comfortably
/// fits in `u64` (35^8 is roughly 2.25 trillion), which keeps the outer
/// loop on a range type rayon parallelises natively.
fn seed_space_size() -> u64 {
    (ALPHABET.len() as u64).pow(crate::seed::SEED_LEN as u32)
}

/// Owns one run: a resolved query, the run-level knobs, and the
/// cancellation flag threads poll.
pub struct SearchDriver {
    config: OuijaConfig,
    params: SearchParams,
    cancel: CancellationToken,
}

impl SearchDriver {
    pub fn new(config: OuijaConfig, params: SearchParams, cancel: CancellationToken) -> Self {
        Self {
            config,
            params,
            cancel,
        }
    }

    /// Runs the search to completion (or cancellation), returning the
    /// `Receiver` half of the result channel — the caller drains it for
    /// the CSV sink (spec §6 "Output row"). Fails fast with
    /// `SearchError::Cancelled` if the token handed to this driver was
    /// already cancelled before the run could start, rather than quietly
    /// handing back a receiver that will never see a result.
    pub fn run(&self) -> Result<result::ResultReceiver, SearchError> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let (sink, rx) = result::channel(self.params.cutoff);
        let total_batches = (seed_space_size() / BATCH_WIDTH).max(1);

        let pool = build_pool(self.params.threads);
        let config = &self.config;
        let cancel = &self.cancel;
        let start = self.params.start;
        let count_limit = self.params.count;
        let reported = AtomicU64::new(0);

        pool.install(|| {
            (0..total_batches).into_par_iter().try_for_each(|batch_index| {
                if cancel.is_cancelled() {
                    return None;
                }
                run_batch(start, batch_index, config, &sink, cancel, &reported, count_limit);
                Some(())
            });
        });

        Ok(rx)
    }
}

fn build_pool(threads: usize) -> rayon::ThreadPool {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if threads > 0 {
        builder = builder.num_threads(threads);
    }
    builder.build().expect("rayon thread pool initialises")
}

/// Evaluates one `BATCH_WIDTH`-wide batch of consecutive seeds starting
/// `batch_index * BATCH_WIDTH` seeds after `start` (spec §4.8): vector
/// pre-filter first, single-seed evaluator on survivors, results appended
/// to `sink`. `reported`/`count_limit` implement `SearchParams::count`
/// ("stop after this many results"): once the limit is hit, further lanes
/// in this batch are skipped and `cancel` is set so other in-flight
/// batches wind down too.
fn run_batch(
    start: Seed,
    batch_index: u64,
    config: &OuijaConfig,
    sink: &ResultSink,
    cancel: &CancellationToken,
    reported: &AtomicU64,
    count_limit: Option<u64>,
) {
    let mut seeds = [Seed::MIN; 8];
    let mut s = start.advance(batch_index * BATCH_WIDTH);
    for slot in seeds.iter_mut() {
        *slot = s;
        s = s.next();
    }

    let mask = vector::prefilter(&seeds, config);
    if mask == 0 {
        return;
    }

    for (lane, seed) in seeds.iter().enumerate() {
        if cancel.is_cancelled() {
            return;
        }
        if mask & (1 << lane) == 0 {
            continue;
        }
        if let Some(result) = evaluator::evaluate(seed, config) {
            if sink.enqueue(result) {
                let seen = reported.fetch_add(1, Ordering::SeqCst) + 1;
                if count_limit.is_some_and(|limit| seen >= limit) {
                    cancel.cancel();
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ante::Ante;
    use crate::content::shop::ante_first_voucher;
    use crate::query::clause::{Category, Clause, Modifiers, SourceFlags, Target};

    fn config_with(must: Vec<Clause>) -> OuijaConfig {
        OuijaConfig {
            must,
            must_not: vec![],
            should: vec![],
            deck: Default::default(),
            stake: Default::default(),
            max_search_ante: 8,
            minimum_score: 0,
            score_natural_negatives: false,
            score_desired_negatives: false,
        }
    }

    #[test]
    fn run_rejects_an_already_cancelled_token() {
        let config = config_with(vec![]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let driver = SearchDriver::new(config, SearchParams::new(), cancel);
        assert!(matches!(driver.run(), Err(SearchError::Cancelled)));
    }

    #[test]
    fn finds_the_known_matching_seed_within_one_batch() {
        let start: Seed = "AAAAAAAA".parse().unwrap();
        let ante = Ante::new(1).unwrap();
        let target = ante_first_voucher(&start, ante);
        let config = config_with(vec![Clause {
            target: Target::Voucher(Some(target)),
            search_antes: vec![ante],
            source_flags: SourceFlags::for_category(Category::Voucher),
            modifiers: Modifiers::default(),
            score: 0,
        }]);

        let mut params = SearchParams::new();
        params.start = start;
        let cancel = CancellationToken::new();
        let mut sink_results = Vec::new();
        let (sink, rx) = result::channel(params.cutoff);
        let reported = AtomicU64::new(0);
        run_batch(start, 0, &config, &sink, &cancel, &reported, None);
        drop(sink);
        while let Ok(r) = rx.try_recv() {
            sink_results.push(r);
        }
        assert!(sink_results.iter().any(|r| r.seed == start));
    }

    #[test]
    fn cancellation_stops_batch_early() {
        let start: Seed = "AAAAAAAA".parse().unwrap();
        let config = config_with(vec![]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (sink, rx) = result::channel(0);
        let reported = AtomicU64::new(0);
        run_batch(start, 0, &config, &sink, &cancel, &reported, None);
        drop(sink);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn count_limit_cancels_after_reaching_cap() {
        let start: Seed = "AAAAAAAA".parse().unwrap();
        let config = config_with(vec![]);
        let cancel = CancellationToken::new();
        let (sink, rx) = result::channel(0);
        let reported = AtomicU64::new(0);
        run_batch(start, 0, &config, &sink, &cancel, &reported, Some(2));
        drop(sink);
        let count = rx.try_iter().count();
        assert_eq!(count, 2);
        assert!(cancel.is_cancelled());
    }
}
