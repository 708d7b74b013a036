//! The six ordered rarity tiers and their tunable parameters.
//!
//! Tier order (E lowest, S highest) is the comparison order everywhere:
//! best-rarity tracking, gacha boost direction, attribute ranges.

use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rarity {
    /// Every tier, lowest first.
    pub const ALL: [Rarity; 6] = [Self::E, Self::D, Self::C, Self::B, Self::A, Self::S];

    /// Ordinal rank, 0 for E through 5 for S.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// The two highest tiers carry an aura.
    pub fn has_aura(self) -> bool {
        self.rank() + 2 >= Self::ALL.len()
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Rarity {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::Configuration(format!("Unknown rarity '{s}'")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityTier {
    pub rarity: Rarity,
    pub label: String,
    pub color: String,
    /// Base gacha weight at the minimum pack price.
    pub probability: f64,
    pub growth_base_seconds: i64,
    pub petal_yield: u64,
    /// Gold paid per petal of this tier.
    pub sell_price: u64,
    /// Weight gained per doubling of the pack price. Negative for common tiers.
    pub boost_factor: f64,
    pub name_prefixes: Vec<String>,
}

/// The full tier table, guaranteed to hold exactly one entry per rarity
/// in rank order. Construction is the only validation point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<RarityTier>", into = "Vec<RarityTier>")]
pub struct RarityTable {
    tiers: Vec<RarityTier>,
}

impl RarityTable {
    pub fn new(tiers: Vec<RarityTier>) -> GameResult<Self> {
        if tiers.len() != Rarity::ALL.len() {
            return Err(GameError::Configuration(format!(
                "expected {} rarity tiers, got {}",
                Rarity::ALL.len(),
                tiers.len()
            )));
        }

        for (expected, tier) in Rarity::ALL.iter().zip(&tiers) {
            if tier.rarity != *expected {
                return Err(GameError::Configuration(format!(
                    "rarity tiers out of order: expected {expected}, found {}",
                    tier.rarity
                )));
            }
            if !(tier.probability > 0.0) {
                return Err(GameError::Configuration(format!(
                    "tier {} needs a positive probability",
                    tier.rarity
                )));
            }
            if tier.growth_base_seconds <= 0 {
                return Err(GameError::Configuration(format!(
                    "tier {} needs a positive growth duration",
                    tier.rarity
                )));
            }
            if tier.name_prefixes.is_empty() {
                return Err(GameError::Configuration(format!(
                    "tier {} has no name prefixes",
                    tier.rarity
                )));
            }
        }

        // Higher investment must never favour a lower tier.
        if let Some(pair) = tiers
            .windows(2)
            .find(|w| w[1].boost_factor < w[0].boost_factor)
        {
            return Err(GameError::Configuration(format!(
                "boost factor for {} ({}) is below {} ({})",
                pair[1].rarity, pair[1].boost_factor, pair[0].rarity, pair[0].boost_factor
            )));
        }

        Ok(Self { tiers })
    }

    pub fn tier(&self, rarity: Rarity) -> &RarityTier {
        &self.tiers[rarity.rank()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RarityTier> {
        self.tiers.iter()
    }

    /// Base weights in rank order.
    pub fn base_weights(&self) -> Vec<(Rarity, f64)> {
        self.tiers.iter().map(|t| (t.rarity, t.probability)).collect()
    }
}

impl TryFrom<Vec<RarityTier>> for RarityTable {
    type Error = GameError;

    fn try_from(tiers: Vec<RarityTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<RarityTable> for Vec<RarityTier> {
    fn from(table: RarityTable) -> Self {
        table.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_rank() {
        assert!(Rarity::E < Rarity::D);
        assert!(Rarity::A < Rarity::S);
        assert_eq!(Rarity::ALL.iter().max(), Some(&Rarity::S));
    }

    #[test]
    fn only_top_two_tiers_have_aura() {
        let with_aura: Vec<_> = Rarity::ALL.into_iter().filter(|r| r.has_aura()).collect();
        assert_eq!(with_aura, vec![Rarity::A, Rarity::S]);
    }

    #[test]
    fn parses_keys_and_rejects_unknown() {
        assert_eq!("s".parse::<Rarity>().unwrap(), Rarity::S);
        assert_eq!(" B ".parse::<Rarity>().unwrap(), Rarity::B);
        let err = "Z".parse::<Rarity>().unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));
    }
}
