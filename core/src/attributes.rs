//! Procedural plant attributes derived from a single seed value.
//!
//! Everything here is a pure function of (seed, rarity, config).
//! The draw order in `generate` is the format contract for every plant
//! ever stored: append new draws at the end, never reorder.

use crate::{
    config::GameConfig,
    error::GameResult,
    rarity::{Rarity, RarityTier},
    rng::{SeededRng, Stream},
    types::{Amount, SeedValue},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualAttributes {
    pub name:            String,
    pub petal_count:     u32,
    pub petal_shape:     String,
    pub size:            u32,
    pub leaf_count:      u32,
    pub primary_color:   String,
    pub secondary_color: String,
    pub pattern:         String,
    pub complexity:      u32,
    /// Only the two highest tiers carry one.
    pub aura:            Option<String>,
}

/// Deterministic attribute generator. Same seed, same plant.
pub struct AttributeGenerator;

impl AttributeGenerator {
    pub fn generate(
        seed: SeedValue,
        rarity: Rarity,
        config: &GameConfig,
    ) -> GameResult<VisualAttributes> {
        let mut rng = SeededRng::for_stream(seed, Stream::Visual);
        let visual = &config.visual;
        let i = rarity.rank() as i64;

        let petal_count = rng.next_range(3 + i, 5 + i * 3);
        let petal_shape = rng.choice(&visual.petal_shapes)?.clone();

        let min_size = i.max(1);
        let size = rng.next_range(min_size, (min_size + 3).min(5));

        let leaf_count = rng.next_range(1, 3 + i);

        let primary_color = rng.choice(&visual.colors)?.clone();
        let secondary_color = rng.choice(&visual.colors)?.clone();

        // Rarer tiers unlock more of the pattern list.
        let unlocked = visual.patterns.len().min(2 + rarity.rank());
        let pattern = rng.choice(&visual.patterns[..unlocked])?.clone();

        let complexity = rng.next_range(1 + i, (3 + i * 2).min(10));

        let aura = if rarity.has_aura() {
            Some(rng.choice(&visual.auras[1..])?.clone())
        } else {
            None
        };

        let name = Self::generate_name(&mut rng, config.tier(rarity), config)?;

        Ok(VisualAttributes {
            name,
            petal_count: petal_count as u32,
            petal_shape,
            size: size as u32,
            leaf_count: leaf_count as u32,
            primary_color,
            secondary_color,
            pattern,
            complexity: complexity as u32,
            aura,
        })
    }

    /// "Prefix Suffix", continuing the caller's stream.
    fn generate_name(
        rng: &mut SeededRng,
        tier: &RarityTier,
        config: &GameConfig,
    ) -> GameResult<String> {
        let prefix = rng.choice(&tier.name_prefixes)?;
        let suffix = rng.choice(&config.visual.name_suffixes)?;
        Ok(format!("{prefix} {suffix}"))
    }

    /// Petals produced at harvest: base yield ±20%, never below one.
    pub fn petal_yield(seed: SeedValue, rarity: Rarity, config: &GameConfig) -> Amount {
        let mut rng = SeededRng::for_stream(seed, Stream::Yield);
        let v = &config.variation;
        let variation = v.yield_min + rng.next_float() * v.yield_span;
        let base = config.tier(rarity).petal_yield as f64;
        ((base * variation).round() as Amount).max(1)
    }

    /// Seconds from planting to maturity: tier base scaled into
    /// [0.85, 1.25) by default, never below one second.
    pub fn growth_duration(seed: SeedValue, rarity: Rarity, config: &GameConfig) -> i64 {
        let mut rng = SeededRng::for_stream(seed, Stream::Growth);
        let v = &config.variation;
        let multiplier = v.growth_min + rng.next_float() * v.growth_span;
        let base = config.tier(rarity).growth_base_seconds as f64;
        ((base * multiplier).round() as i64).max(1)
    }
}
