//! Stream-Cache Planner (spec §4.2): declares which per-ante PRNG keys a
//! query will need so the driver can prime them before the hot loop.
//!
//! Keys are canonical strings `<category-key><source-tag><ante>` with
//! source tags `sho` (shop), `ar1` (arcana), `buf` (buffoon), `sou`
//! (soul) — the same key format `content::prng::Stream` itself uses, so
//! a planned key and the stream it describes always agree.

use std::collections::BTreeSet;

use crate::query::clause::{Category, Clause};
use crate::query::config::OuijaConfig;

/// One key the search should have primed before evaluating any seed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CacheKey(pub String);

fn source_tags(clause: &Clause) -> Vec<&'static str> {
    let mut tags = Vec::new();
    if clause.source_flags.include_shop_stream {
        tags.push("sho");
    }
    if clause.source_flags.include_booster_packs {
        tags.push("ar1");
        tags.push("buf");
        if matches!(clause.category(), Category::SoulJoker) {
            tags.push("sou");
        }
    }
    if clause.source_flags.include_skip_tags {
        tags.push("tag");
    }
    tags
}

fn category_key(category: Category) -> &'static str {
    match category {
        Category::Joker => "jkr",
        Category::SoulJoker => "sjk",
        Category::Tarot => "tar",
        Category::Planet => "pla",
        Category::Spectral => "spe",
        Category::PlayingCard => "pcd",
        Category::Tag | Category::SmallBlindTag | Category::BigBlindTag => "tag",
        Category::Voucher => "vch",
        Category::Boss => "bos",
    }
}

/// Emits every `(clause, ante)` key exactly once, in a deterministic order
/// (sorted) so planner output is itself reproducible.
pub fn plan(config: &OuijaConfig) -> Vec<CacheKey> {
    let mut keys = BTreeSet::new();
    for clause in config.must.iter().chain(&config.must_not).chain(&config.should) {
        let cat_key = category_key(clause.category());
        for tag in source_tags(clause) {
            for ante in &clause.search_antes {
                keys.insert(CacheKey(format!("{cat_key}{tag}{}", ante.get())));
            }
        }
    }
    keys.into_iter().collect()
}
