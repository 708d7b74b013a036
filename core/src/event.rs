//! The audit trail. Every committed player operation emits one event,
//! persisted in the same transaction as the state change it describes.

use crate::{
    rarity::Rarity,
    types::{Amount, EntityId, ProfileId, Timestamp},
};
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ProfileCreated {
        at: Timestamp,
        starting_gold: Amount,
    },
    PackPurchased {
        at: Timestamp,
        price: Amount,
        seed_ids: Vec<EntityId>,
        rarities: Vec<Rarity>,
    },
    SeedPlanted {
        at: Timestamp,
        seed_id: EntityId,
        plant_id: EntityId,
        rarity: Rarity,
        slot: usize,
        growth_duration: i64,
    },
    PlantHarvested {
        at: Timestamp,
        plant_id: EntityId,
        rarity: Rarity,
        petal_yield: Amount,
    },
    PetalsSold {
        at: Timestamp,
        rarity: Rarity,
        quantity: Amount,
        gold_earned: Amount,
    },
}

impl GameEvent {
    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ProfileCreated { .. } => "profile_created",
            Self::PackPurchased { .. }  => "pack_purchased",
            Self::SeedPlanted { .. }    => "seed_planted",
            Self::PlantHarvested { .. } => "plant_harvested",
            Self::PetalsSold { .. }     => "petals_sold",
        }
    }

    pub fn at(&self) -> Timestamp {
        match self {
            Self::ProfileCreated { at, .. }
            | Self::PackPurchased { at, .. }
            | Self::SeedPlanted { at, .. }
            | Self::PlantHarvested { at, .. }
            | Self::PetalsSold { at, .. } => *at,
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub profile_id: ProfileId,
    pub at:         Timestamp,
    pub event_type: String,
    pub payload:    String, // JSON-serialized GameEvent
}
