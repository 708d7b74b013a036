//! Profile-wide statistics for the stats page.

use crate::{
    rarity::Rarity,
    state::{Player, SaveState},
    types::Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub player:                 Player,
    pub seeds_count:            usize,
    pub seeds_by_rarity:        BTreeMap<Rarity, usize>,
    pub plants_growing:         usize,
    pub total_harvested_plants: usize,
    pub harvested_by_rarity:    BTreeMap<Rarity, usize>,
    pub play_time_seconds:      i64,
}

impl GameStats {
    pub fn collect(state: &SaveState, now: Timestamp) -> Self {
        let mut seeds_by_rarity = BTreeMap::new();
        for seed in &state.inventory.seeds {
            *seeds_by_rarity.entry(seed.rarity).or_insert(0) += 1;
        }

        let mut harvested_by_rarity = BTreeMap::new();
        for record in &state.inventory.harvested {
            *harvested_by_rarity.entry(record.plant.rarity).or_insert(0) += 1;
        }

        Self {
            player: state.player.clone(),
            seeds_count: state.inventory.seeds.len(),
            seeds_by_rarity,
            plants_growing: state.garden.plants.len(),
            total_harvested_plants: state.inventory.harvested.len(),
            harvested_by_rarity,
            play_time_seconds: (now - state.player.created_at).max(0),
        }
    }
}
