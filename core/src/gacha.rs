//! Price-sensitive pack odds.
//!
//! Paying more than the minimum shifts weight from common tiers toward
//! rare ones along a log2 curve:
//!
//!   boost    = log2(price / min_price)
//!   adjusted = max(floor, base + boost × tier.boost_factor)
//!   weight   = round2(adjusted / Σ adjusted × 100)
//!
//! The table is deterministic; the draw against it is not. Every seed in
//! a pack takes its rarity from a stream seeded by the EntropySource.

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    rarity::Rarity,
    rng::{EntropySource, SeededRng},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-tier pack odds in percent. Iterates in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    weights: BTreeMap<Rarity, f64>,
}

impl Distribution {
    fn from_pairs(pairs: impl IntoIterator<Item = (Rarity, f64)>) -> Self {
        Self { weights: pairs.into_iter().collect() }
    }

    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.weights.get(&rarity).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rarity, f64)> + '_ {
        self.weights.iter().map(|(r, w)| (*r, *w))
    }

    /// Weights as an ordered slice for `SeededRng::weighted_choice`.
    pub fn to_pairs(&self) -> Vec<(Rarity, f64)> {
        self.iter().collect()
    }
}

/// Odds for a pack bought at `price`. Rejects prices outside the shop range.
pub fn adjusted_distribution(price: u64, config: &GameConfig) -> GameResult<Distribution> {
    let shop = &config.shop;
    if price < shop.min_price {
        return Err(GameError::InvalidPrice { price, min_price: shop.min_price });
    }
    if price > shop.max_price {
        return Err(GameError::InvalidInput(format!(
            "Maximum price is {} gold (offered {price})",
            shop.max_price
        )));
    }
    Ok(compute(price, config))
}

/// Shop preview: any price is clamped into the valid range first.
pub fn preview_distribution(price: u64, config: &GameConfig) -> Distribution {
    let price = price.clamp(config.shop.min_price, config.shop.max_price);
    compute(price, config)
}

fn compute(price: u64, config: &GameConfig) -> Distribution {
    let min_price = config.shop.min_price;
    if price <= min_price {
        return Distribution::from_pairs(config.rarity.base_weights());
    }

    let boost = (price as f64 / min_price as f64).log2();
    let floor = config.shop.weight_floor;

    let adjusted: Vec<(Rarity, f64)> = config
        .rarity
        .iter()
        .map(|tier| {
            let weight = tier.probability + boost * tier.boost_factor;
            (tier.rarity, weight.max(floor))
        })
        .collect();

    let total: f64 = adjusted.iter().map(|(_, w)| w).sum();
    Distribution::from_pairs(
        adjusted
            .into_iter()
            .map(|(rarity, w)| (rarity, round2(w / total * 100.0))),
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Draw one rarity. A fresh entropy seed per call makes every draw an
/// independent, non-replayable event.
pub fn draw_rarity(
    distribution: &Distribution,
    entropy: &mut dyn EntropySource,
) -> GameResult<Rarity> {
    let mut rng = SeededRng::new(entropy.next_seed());
    rng.weighted_choice(&distribution.to_pairs())
}
