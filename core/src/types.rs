//! Shared primitive types used across the entire engine.

/// Unix time in whole seconds. All growth math runs on this unit.
pub type Timestamp = i64;

/// A stable, unique identifier for any seed or plant.
pub type EntityId = String;

/// The canonical save-profile identifier.
pub type ProfileId = String;

/// The 32-bit value a deterministic stream is seeded from.
pub type SeedValue = u32;

/// Gold and petal quantities.
pub type Amount = u64;
