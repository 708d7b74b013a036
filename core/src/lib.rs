//! floragen-core: seed-gacha gardening engine.
//!
//! Deterministic visuals from a 32-bit seed, price-boosted rarity packs,
//! wall-clock growth, and an atomic SQLite save store.

pub mod attributes;
pub mod clock;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod event;
pub mod gacha;
pub mod growth;
pub mod rarity;
pub mod rng;
pub mod state;
pub mod stats;
pub mod store;
pub mod types;
