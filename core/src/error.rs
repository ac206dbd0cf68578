use thiserror::Error;

use crate::query::clause::Category;

/// Failures that reject a query at load time, before any search starts.
///
/// Per spec this is the only error class that stops the process: a bad
/// query is never recovered from inside the hot path, it is refused
/// up front.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("clause category {0:?} does not resolve value {1:?}")]
    UnresolvedEnum(Category, String),
    #[error("unknown clause category: {0}")]
    UnknownCategory(String),
    #[error("clause for {0:?} has an empty searchAntes list")]
    EmptySearchAntes(Category),
    #[error("should-clause count {0} exceeds the 32-slot score breakdown cap")]
    TooManyShouldClauses(usize),
    #[error("invalid ante {0}: must be between 1 and maxSearchAnte")]
    InvalidAnte(usize),
}

/// A category the provider does not (yet) implement.
///
/// Per spec 7b, this is not propagated as a `Result` inside the per-seed
/// evaluation loop: a clause that hits this is logged once and then
/// treated as never-satisfied (MUST fails, MUST-NOT passes, SHOULD scores
/// zero).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderError {
    #[error("category {0:?} has no provider implementation")]
    Unimplemented(Category),
}

/// Errors surfaced by the search driver itself (not the per-seed hot path).
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid query")]
    Query(#[from] QueryError),
    #[error("search was cancelled before completion")]
    Cancelled,
}
