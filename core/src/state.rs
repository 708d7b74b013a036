//! Persisted entities: the player, their inventory, and their garden.
//!
//! Cosmetic attributes are never stored here. A plant is its seed value,
//! rarity and timings; everything visible is re-derived on demand.

use crate::{
    attributes::VisualAttributes,
    config::GameConfig,
    error::{GameError, GameResult},
    rarity::Rarity,
    types::{Amount, EntityId, SeedValue, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

pub const SEED_ID_PREFIX: &str = "seed_";
pub const PLANT_ID_PREFIX: &str = "plant_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub id:          EntityId,
    pub rarity:      Rarity,
    pub seed:        SeedValue,
    /// Fixed when the seed is bought; inherited by the plant.
    pub petal_yield: Amount,
    pub created_at:  Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id:              EntityId,
    pub rarity:          Rarity,
    pub seed:            SeedValue,
    pub slot:            usize,
    pub planted_at:      Timestamp,
    pub growth_duration: i64,
    pub petal_yield:     Amount,
    #[serde(default)]
    pub harvested:       bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_planted:      u64,
    pub total_harvested:    u64,
    pub total_packs_bought: u64,
    pub total_gold_spent:   Amount,
    pub total_gold_earned:  Amount,
    pub total_petals_sold:  Amount,
    pub best_rarity:        Rarity,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_planted:      0,
            total_harvested:    0,
            total_packs_bought: 0,
            total_gold_spent:   0,
            total_gold_earned:  0,
            total_petals_sold:  0,
            best_rarity:        Rarity::E,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub gold:       Amount,
    /// Petal stock per tier. Missing keys mean zero.
    #[serde(default)]
    pub petals:     BTreeMap<Rarity, Amount>,
    #[serde(default)]
    pub stats:      PlayerStats,
    pub created_at: Timestamp,
}

impl Player {
    pub fn new(gold: Amount, created_at: Timestamp) -> Self {
        Self {
            gold,
            petals: BTreeMap::new(),
            stats: PlayerStats::default(),
            created_at,
        }
    }

    pub fn petals_of(&self, rarity: Rarity) -> Amount {
        self.petals.get(&rarity).copied().unwrap_or(0)
    }

    pub fn total_petals(&self) -> Amount {
        self.petals.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub plant:         Plant,
    pub visual:        VisualAttributes,
    pub petals_earned: Amount,
    pub harvested_at:  Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub seeds:     Vec<Seed>,
    /// Harvest archive, oldest first.
    #[serde(default)]
    pub harvested: Vec<HarvestRecord>,
}

impl Inventory {
    pub fn seed(&self, seed_id: &str) -> Option<&Seed> {
        self.seeds.iter().find(|s| s.id == seed_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Garden {
    pub plants: Vec<Plant>,
}

impl Garden {
    pub fn plant_in_slot(&self, slot: usize) -> Option<&Plant> {
        self.plants.iter().find(|p| p.slot == slot)
    }

    /// Unoccupied slots, ascending.
    pub fn free_slots(&self, max_slots: usize) -> Vec<usize> {
        (0..max_slots)
            .filter(|slot| self.plant_in_slot(*slot).is_none())
            .collect()
    }
}

/// Logical record keys in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Player,
    Inventory,
    Garden,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [Self::Player, Self::Inventory, Self::Garden];

    pub fn name(self) -> &'static str {
        match self {
            Self::Player    => "player",
            Self::Inventory => "inventory",
            Self::Garden    => "garden",
        }
    }
}

/// Everything one profile owns. Engine operations mutate a copy of this
/// and the store writes it back only when the whole operation succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveState {
    pub player:    Player,
    pub inventory: Inventory,
    pub garden:    Garden,
}

impl SaveState {
    pub fn new(starting_gold: Amount, now: Timestamp) -> Self {
        Self {
            player:    Player::new(starting_gold, now),
            inventory: Inventory::default(),
            garden:    Garden::default(),
        }
    }

    /// Structural checks applied whenever a state is loaded.
    pub fn validate(&self, config: &GameConfig) -> GameResult<()> {
        let corrupt = |kind: RecordKind, reason: String| GameError::CorruptRecord {
            kind: kind.name().to_string(),
            reason,
        };

        let mut seed_ids = HashSet::new();
        for seed in &self.inventory.seeds {
            if !seed_ids.insert(seed.id.as_str()) {
                return Err(corrupt(RecordKind::Inventory, format!("duplicate seed id {}", seed.id)));
            }
        }

        let mut plant_ids = HashSet::new();
        let mut slots = HashSet::new();
        for plant in &self.garden.plants {
            if !plant_ids.insert(plant.id.as_str()) {
                return Err(corrupt(RecordKind::Garden, format!("duplicate plant id {}", plant.id)));
            }
            if plant.slot >= config.garden.max_slots {
                return Err(corrupt(
                    RecordKind::Garden,
                    format!("plant {} sits in slot {} beyond the garden", plant.id, plant.slot),
                ));
            }
            if !slots.insert(plant.slot) {
                return Err(corrupt(RecordKind::Garden, format!("slot {} is occupied twice", plant.slot)));
            }
            if plant.growth_duration <= 0 {
                return Err(corrupt(
                    RecordKind::Garden,
                    format!("plant {} has a non-positive growth duration", plant.id),
                ));
            }
        }
        Ok(())
    }
}

pub fn new_seed_id() -> EntityId {
    format!("{SEED_ID_PREFIX}{}", Uuid::new_v4().simple())
}

pub fn new_plant_id() -> EntityId {
    format!("{PLANT_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Reject ids that could not have been issued by this engine.
pub fn check_entity_id(prefix: &str, id: &str) -> GameResult<()> {
    let well_formed = id
        .strip_prefix(prefix)
        .is_some_and(|hex| hex.len() == 32 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    if well_formed {
        Ok(())
    } else {
        let what = prefix.trim_end_matches('_');
        Err(GameError::InvalidInput(format!("Invalid {what} id: '{id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_ids_pass_their_own_check() {
        check_entity_id(SEED_ID_PREFIX, &new_seed_id()).unwrap();
        check_entity_id(PLANT_ID_PREFIX, &new_plant_id()).unwrap();
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for bad in ["", "seed_", "seed_XYZ", "plant_0123456789abcdef0123456789abcdef", "seed_0123"] {
            let err = check_entity_id(SEED_ID_PREFIX, bad).unwrap_err();
            assert!(matches!(err, GameError::InvalidInput(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn free_slots_skip_occupied() {
        let plant = |slot| Plant {
            id: new_plant_id(),
            rarity: Rarity::E,
            seed: 1,
            slot,
            planted_at: 0,
            growth_duration: 10,
            petal_yield: 1,
            harvested: false,
        };
        let garden = Garden { plants: vec![plant(1), plant(3)] };
        assert_eq!(garden.free_slots(5), vec![0, 2, 4]);
    }
}
