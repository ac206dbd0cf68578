use crate::seed::Seed;

const DEFAULT_CUTOFF: i64 = 0;
const DEFAULT_COUNT: Option<u64> = None;

/// Driver-level knobs, set once per run from CLI flags and passed to
/// `SearchDriver` alongside the resolved `OuijaConfig` query.
///
/// Kept separate from the query (spec §2A): `OuijaConfig` describes *what*
/// a seed must satisfy, `SearchParams` describes *how hard to look* for
/// one. The teacher's `Config` conflated both "rules of the game" and
/// "how many resources the run gets" in one struct; here the two concerns
/// don't share a single owner, an instance, or an invariant, so they stay
/// two separate types.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Minimum SHOULD-clause score a seed must reach to be reported.
    pub cutoff: i64,
    /// Worker thread count for the outer seed-space partition. `0` means
    /// "let rayon pick" (its default global pool size).
    pub threads: usize,
    /// First seed to probe; the driver walks forward from here.
    pub start: Seed,
    /// Stop after this many results are reported. `None` means run until
    /// the seed space is exhausted or cancelled.
    pub count: Option<u64>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            threads: 0,
            start: Seed::MIN,
            count: DEFAULT_COUNT,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new()
    }
}
