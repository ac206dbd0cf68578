//! Voucher identifiers.
//!
//! Grounded on `core/src/vouchers/mod.rs`'s tiered voucher shape (base
//! vouchers with an upgraded counterpart), with the teacher's placeholder
//! variants replaced by the real base/upgrade pairs the spec's own worked
//! examples name directly (`Telescope`, `Hieroglyph`, spec §8 scenarios 1
//! and 4) plus their tier-mates, since a complete implementation must be
//! able to resolve any voucher a query names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display, EnumString)]
pub enum VoucherId {
    Overstock,
    OverstockPlus,
    ClearanceSale,
    Liquidation,
    Hone,
    GlowUp,
    RerollSurplus,
    RerollGlut,
    CrystalBall,
    OmenGlobe,
    Telescope,
    Observatory,
    Grabber,
    NachoTong,
    Wasteful,
    Recyclomancy,
    TarotMerchant,
    TarotTycoon,
    PlanetMerchant,
    PlanetTycoon,
    SeedMoney,
    MoneyTree,
    Blank,
    Antimatter,
    MagicTrick,
    Illusion,
    Hieroglyph,
    Petroglyph,
    DirectorsCut,
    Retcon,
    PaintBrush,
    Palette,
}

/// Upgrade tier within a voucher's base/upgraded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum VoucherTier {
    Base,
    Upgraded,
}

impl VoucherId {
    pub fn tier(self) -> VoucherTier {
        use VoucherId::*;
        match self {
            Overstock | Hone | RerollSurplus | CrystalBall | Telescope | Grabber | Wasteful
            | TarotMerchant | PlanetMerchant | SeedMoney | Blank | MagicTrick | Hieroglyph
            | DirectorsCut | PaintBrush => VoucherTier::Base,

            OverstockPlus | ClearanceSale | Liquidation | GlowUp | RerollGlut | OmenGlobe
            | Observatory | NachoTong | Recyclomancy | TarotTycoon | PlanetTycoon | MoneyTree
            | Antimatter | Illusion | Petroglyph | Retcon | Palette => VoucherTier::Upgraded,
        }
    }
}
