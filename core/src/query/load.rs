//! Deserializes the query document (spec §6) and resolves every string
//! field to its enum, producing the typed `OuijaConfig` the hot path reads
//! (spec §4.1).
//!
//! This module is the thin version of the "query parsing" and "enum name
//! resolution" collaborators spec §1 names as external: it does not
//! validate JSON schema shape beyond what serde itself enforces, and
//! expects `RawClause::clause_type` / `value` to already be the enum's
//! variant name.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ante::Ante;
use crate::card::{Edition, Enhancement, Rank, Seal, Suit};
use crate::content::consumable::{PlanetId, SpectralId, TarotId};
use crate::content::joker::JokerId;
use crate::content::tag::TagId;
use crate::content::voucher::VoucherId;
use crate::error::QueryError;
use crate::query::clause::{Category, Clause, Modifiers, SourceFlags, Target};
use crate::query::config::{Deck, OuijaConfig, Stake};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawClause {
    #[serde(rename = "type")]
    pub clause_type: String,
    pub value: String,
    #[serde(rename = "searchAntes")]
    pub search_antes: Vec<u8>,
    #[serde(default)]
    pub score: i64,
    pub edition: Option<String>,
    pub enhancement: Option<String>,
    pub seal: Option<String>,
    pub rank: Option<String>,
    pub suit: Option<String>,
    #[serde(rename = "includeShopStream")]
    pub include_shop_stream: Option<bool>,
    #[serde(rename = "includeBoosterPacks")]
    pub include_booster_packs: Option<bool>,
    #[serde(rename = "includeSkipTags")]
    pub include_skip_tags: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawQuery {
    #[serde(default)]
    pub must: Vec<RawClause>,
    #[serde(default)]
    pub should: Vec<RawClause>,
    #[serde(rename = "mustNot", default)]
    pub must_not: Vec<RawClause>,
    #[serde(default)]
    pub deck: Option<String>,
    #[serde(default)]
    pub stake: Option<String>,
    #[serde(rename = "maxSearchAnte", default = "default_max_ante")]
    pub max_search_ante: u8,
    #[serde(rename = "minimumScore", default)]
    pub minimum_score: i64,
    #[serde(rename = "scoreNaturalNegatives", default)]
    pub score_natural_negatives: bool,
    #[serde(rename = "scoreDesiredNegatives", default)]
    pub score_desired_negatives: bool,
}

fn default_max_ante() -> u8 {
    crate::ante::DEFAULT_MAX_ANTE
}

fn category_from_str(s: &str) -> Result<Category, QueryError> {
    match s {
        "Joker" => Ok(Category::Joker),
        "SoulJoker" => Ok(Category::SoulJoker),
        "Tarot" => Ok(Category::Tarot),
        "Planet" => Ok(Category::Planet),
        "Spectral" => Ok(Category::Spectral),
        "PlayingCard" => Ok(Category::PlayingCard),
        "Tag" => Ok(Category::Tag),
        "SmallBlindTag" => Ok(Category::SmallBlindTag),
        "BigBlindTag" => Ok(Category::BigBlindTag),
        "Voucher" => Ok(Category::Voucher),
        "Boss" => Ok(Category::Boss),
        other => Err(QueryError::UnknownCategory(other.to_string())),
    }
}

fn target_from_raw(category: Category, value: &str) -> Result<Target, QueryError> {
    let any = value.eq_ignore_ascii_case("any");
    let unresolved = |cat: Category| QueryError::UnresolvedEnum(cat, value.to_string());

    Ok(match category {
        Category::Joker => Target::Joker(if any {
            None
        } else {
            Some(JokerId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::SoulJoker => Target::SoulJoker(if any {
            None
        } else {
            Some(JokerId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::Tarot => Target::Tarot(if any {
            None
        } else {
            Some(TarotId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::Planet => Target::Planet(if any {
            None
        } else {
            Some(PlanetId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::Spectral => Target::Spectral(if any {
            None
        } else {
            Some(SpectralId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::PlayingCard => Target::PlayingCard,
        Category::Tag => Target::Tag(if any {
            None
        } else {
            Some(TagId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::SmallBlindTag => Target::SmallBlindTag(if any {
            None
        } else {
            Some(TagId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::BigBlindTag => Target::BigBlindTag(if any {
            None
        } else {
            Some(TagId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::Voucher => Target::Voucher(if any {
            None
        } else {
            Some(VoucherId::from_str(value).map_err(|_| unresolved(category))?)
        }),
        Category::Boss => Target::Boss,
    })
}

fn resolve_clause(raw: &RawClause) -> Result<Clause, QueryError> {
    let category = category_from_str(&raw.clause_type)?;
    let target = target_from_raw(category, &raw.value)?;

    let search_antes = raw
        .search_antes
        .iter()
        .map(|&n| Ante::new(n).map_err(|_| QueryError::InvalidAnte(n as usize)))
        .collect::<Result<Vec<_>, _>>()?;
    if search_antes.is_empty() {
        return Err(QueryError::EmptySearchAntes(category));
    }

    let defaults = SourceFlags::for_category(category);
    let source_flags = SourceFlags {
        include_shop_stream: raw.include_shop_stream.unwrap_or(defaults.include_shop_stream),
        include_booster_packs: raw
            .include_booster_packs
            .unwrap_or(defaults.include_booster_packs),
        include_skip_tags: raw.include_skip_tags.unwrap_or(defaults.include_skip_tags),
    };

    let modifiers = Modifiers {
        edition: raw
            .edition
            .as_deref()
            .map(Edition::from_str)
            .transpose()
            .map_err(|_| QueryError::UnresolvedEnum(category, raw.edition.clone().unwrap()))?,
        enhancement: raw
            .enhancement
            .as_deref()
            .map(Enhancement::from_str)
            .transpose()
            .map_err(|_| QueryError::UnresolvedEnum(category, raw.enhancement.clone().unwrap()))?,
        seal: raw
            .seal
            .as_deref()
            .map(Seal::from_str)
            .transpose()
            .map_err(|_| QueryError::UnresolvedEnum(category, raw.seal.clone().unwrap()))?,
        rank: raw
            .rank
            .as_deref()
            .map(Rank::from_str)
            .transpose()
            .map_err(|_| QueryError::UnresolvedEnum(category, raw.rank.clone().unwrap()))?,
        suit: raw
            .suit
            .as_deref()
            .map(Suit::from_str)
            .transpose()
            .map_err(|_| QueryError::UnresolvedEnum(category, raw.suit.clone().unwrap()))?,
    };

    Ok(Clause {
        target,
        search_antes,
        source_flags,
        modifiers,
        score: raw.score,
    })
}

fn deck_from_str(s: &str) -> Deck {
    match s {
        "Blue" => Deck::Blue,
        "Yellow" => Deck::Yellow,
        "Green" => Deck::Green,
        "Black" => Deck::Black,
        "Magic" => Deck::Magic,
        "Nebula" => Deck::Nebula,
        "Ghost" => Deck::Ghost,
        "Abandoned" => Deck::Abandoned,
        "Checkered" => Deck::Checkered,
        "Zodiac" => Deck::Zodiac,
        "Painted" => Deck::Painted,
        "Anaglyph" => Deck::Anaglyph,
        "Plasma" => Deck::Plasma,
        "Erratic" => Deck::Erratic,
        _ => Deck::Red,
    }
}

fn stake_from_str(s: &str) -> Stake {
    match s {
        "Red" => Stake::Red,
        "Green" => Stake::Green,
        "Black" => Stake::Black,
        "Blue" => Stake::Blue,
        "Purple" => Stake::Purple,
        "Orange" => Stake::Orange,
        "Gold" => Stake::Gold,
        _ => Stake::White,
    }
}

/// Parses and resolves a query document in one pass (spec §4.1 load path).
pub fn resolve(raw: &RawQuery) -> Result<OuijaConfig, QueryError> {
    let must = raw.must.iter().map(resolve_clause).collect::<Result<Vec<_>, _>>()?;
    let must_not = raw
        .must_not
        .iter()
        .map(resolve_clause)
        .collect::<Result<Vec<_>, _>>()?;
    let should = raw.should.iter().map(resolve_clause).collect::<Result<Vec<_>, _>>()?;

    let config = OuijaConfig {
        must,
        must_not,
        should,
        deck: raw.deck.as_deref().map(deck_from_str).unwrap_or_default(),
        stake: raw.stake.as_deref().map(stake_from_str).unwrap_or_default(),
        max_search_ante: raw.max_search_ante,
        minimum_score: raw.minimum_score,
        score_natural_negatives: raw.score_natural_negatives,
        score_desired_negatives: raw.score_desired_negatives,
    };
    config.validate()?;
    Ok(config)
}

/// Parses a query document from its JSON text (the external collaborator
/// surface of spec §1/§6, kept thin).
pub fn resolve_json(text: &str) -> Result<OuijaConfig, QueryError> {
    let raw: RawQuery = serde_json::from_str(text)
        .map_err(|e| QueryError::UnknownCategory(format!("invalid query JSON: {e}")))?;
    resolve(&raw)
}
