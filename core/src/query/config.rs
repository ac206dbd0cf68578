//! The resolved, read-only query (spec §3 `OuijaConfig`).

use crate::error::QueryError;
use crate::query::clause::Clause;

/// Cap on Should clauses imposed by the fixed-size score breakdown (spec
/// §3 `OuijaResult`, §4.1 validation).
pub const MAX_SHOULD_CLAUSES: usize = 32;

/// Starting deck variant. Spec declares this as a query-level knob but the
/// filter never reads deck-specific rules (spec §1 non-goal: reproducing
/// the source game's rules) — it is carried through to the result/CSV
/// layer only as provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deck {
    #[default]
    Red,
    Blue,
    Yellow,
    Green,
    Black,
    Magic,
    Nebula,
    Ghost,
    Abandoned,
    Checkered,
    Zodiac,
    Painted,
    Anaglyph,
    Plasma,
    Erratic,
}

/// Starting stake (difficulty) variant, carried through for the same
/// reason as `Deck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stake {
    #[default]
    White,
    Red,
    Green,
    Black,
    Blue,
    Purple,
    Orange,
    Gold,
}

/// The query: three clause lists plus global knobs (spec §3).
///
/// Constructed once per search by `query::load::resolve` and read-only
/// thereafter (spec §3 Lifecycle) — nothing in the hot path mutates this.
#[derive(Debug, Clone)]
pub struct OuijaConfig {
    pub must: Vec<Clause>,
    pub must_not: Vec<Clause>,
    pub should: Vec<Clause>,
    pub deck: Deck,
    pub stake: Stake,
    pub max_search_ante: u8,
    pub minimum_score: i64,
    pub score_natural_negatives: bool,
    pub score_desired_negatives: bool,
}

impl OuijaConfig {
    /// Validates clause-count and per-clause invariants not already
    /// enforced by construction (spec §4.1, §7a). `load::resolve` calls
    /// this after building clauses; kept separate so tests can construct
    /// an `OuijaConfig` directly and still exercise validation.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.should.len() > MAX_SHOULD_CLAUSES {
            return Err(QueryError::TooManyShouldClauses(self.should.len()));
        }
        for clause in self.must.iter().chain(&self.must_not).chain(&self.should) {
            if clause.search_antes.is_empty() {
                return Err(QueryError::EmptySearchAntes(clause.category()));
            }
        }
        Ok(())
    }
}
