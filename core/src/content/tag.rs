//! Skip-tag identifiers.
//!
//! Grounded on the `colinsheppard-balatro-rs` fork's `skip_tags::traits`
//! module (not the chosen teacher, but present in the wider retrieval
//! pack): its 24-variant `TagId` enum grouped into Reward / Economic /
//! Shop-Enhancement / Utility tags. The spec's `NegativeTag` scenario
//! value (§8 scenario 3) maps to `TagId::Negative`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display, EnumString)]
pub enum TagId {
    // Reward tags
    Charm,
    Ethereal,
    Buffoon,
    Standard,
    Meteor,
    Rare,
    Uncommon,
    TopUp,

    // Economic tags
    Economy,
    Investment,
    Garbage,
    Speed,
    Handy,

    // Shop-enhancement tags
    Voucher,
    Coupon,
    D6,
    Foil,
    Holographic,
    Polychrome,
    Negative,

    // Utility tags
    Double,
    Boss,
    Orbital,
    Juggle,
}
