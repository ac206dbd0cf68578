//! The atomic query unit (spec §3 `Clause`/`FilterItem`).

use serde::{Deserialize, Serialize};

use crate::ante::Ante;
use crate::card::{Edition, Enhancement, Rank, Seal, Suit};
use crate::content::consumable::{PlanetId, SpectralId, TarotId};
use crate::content::joker::JokerId;
use crate::content::tag::TagId;
use crate::content::voucher::VoucherId;

/// The clause taxonomy is closed (spec §9: "model as a tagged sum with one
/// arm per category"); `Category` tags which arm of `Target` a resolved
/// clause carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Joker,
    SoulJoker,
    Tarot,
    Planet,
    Spectral,
    PlayingCard,
    Tag,
    SmallBlindTag,
    BigBlindTag,
    Voucher,
    Boss,
}

/// The resolved target value of a clause, or "any" within its category.
/// `None` in each variant means "any value in this category satisfies the
/// clause" (spec §3 Value: "the specific target within the category
/// (enum), or 'any'").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Joker(Option<JokerId>),
    SoulJoker(Option<JokerId>),
    Tarot(Option<TarotId>),
    Planet(Option<PlanetId>),
    Spectral(Option<SpectralId>),
    PlayingCard,
    Tag(Option<TagId>),
    SmallBlindTag(Option<TagId>),
    BigBlindTag(Option<TagId>),
    Voucher(Option<VoucherId>),
    Boss,
}

impl Target {
    pub fn category(&self) -> Category {
        match self {
            Target::Joker(_) => Category::Joker,
            Target::SoulJoker(_) => Category::SoulJoker,
            Target::Tarot(_) => Category::Tarot,
            Target::Planet(_) => Category::Planet,
            Target::Spectral(_) => Category::Spectral,
            Target::PlayingCard => Category::PlayingCard,
            Target::Tag(_) => Category::Tag,
            Target::SmallBlindTag(_) => Category::SmallBlindTag,
            Target::BigBlindTag(_) => Category::BigBlindTag,
            Target::Voucher(_) => Category::Voucher,
            Target::Boss => Category::Boss,
        }
    }
}

/// Which content sources are in scope for a clause (spec §3 "Source
/// flags"). Default `shop=true`; pack/tag flags default off unless the
/// clause's category implies them (spec §4.1: "SoulJoker implicitly needs
/// packs").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFlags {
    pub include_shop_stream: bool,
    pub include_booster_packs: bool,
    pub include_skip_tags: bool,
}

impl SourceFlags {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::SoulJoker => Self {
                include_shop_stream: false,
                include_booster_packs: true,
                include_skip_tags: false,
            },
            Category::Tarot | Category::Planet | Category::Spectral => Self {
                include_shop_stream: true,
                include_booster_packs: true,
                include_skip_tags: false,
            },
            Category::Tag | Category::SmallBlindTag | Category::BigBlindTag => Self {
                include_shop_stream: false,
                include_booster_packs: false,
                include_skip_tags: true,
            },
            Category::PlayingCard => Self {
                include_shop_stream: false,
                include_booster_packs: true,
                include_skip_tags: false,
            },
            Category::Voucher | Category::Joker | Category::Boss => Self {
                include_shop_stream: true,
                include_booster_packs: false,
                include_skip_tags: false,
            },
        }
    }
}

/// Optional category-dependent modifiers a clause can filter on (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub edition: Option<Edition>,
    pub enhancement: Option<Enhancement>,
    pub seal: Option<Seal>,
    pub rank: Option<Rank>,
    pub suit: Option<Suit>,
}

/// A single resolved clause: the typed form produced once at load time
/// (spec §4.1). The hot path touches only this shape, never strings.
#[derive(Debug, Clone)]
pub struct Clause {
    pub target: Target,
    pub search_antes: Vec<Ante>,
    pub source_flags: SourceFlags,
    pub modifiers: Modifiers,
    /// Only meaningful for Should clauses; ignored by Must/MustNot.
    pub score: i64,
}

impl Clause {
    pub fn category(&self) -> Category {
        self.target.category()
    }
}
