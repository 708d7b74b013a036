//! The garden engine: the single entry point for callers.
//!
//! OPERATION SHAPE (every mutating call):
//!   1. Read the clock once.
//!   2. Hand a pure economy transition to `GardenStore::update_state`.
//!   3. The store commits state + event together, or nothing at all.
//!
//! RULES:
//!   - No operation reads ambient time; `now` comes from the Clock.
//!   - No operation caches readiness; growth is recomputed per call.
//!   - Fresh seed values only come from the EntropySource.

use crate::{
    attributes::{AttributeGenerator, VisualAttributes},
    clock::{Clock, ManualClock, SystemClock},
    config::GameConfig,
    economy::{self, HarvestOutcome, PackPurchase, SaleReceipt, SellOrder},
    error::GameResult,
    event::{EventLogEntry, GameEvent},
    gacha::{self, Distribution},
    growth::GrowthStatus,
    rarity::Rarity,
    rng::{EntropySource, OsEntropy, SeededEntropy},
    state::{Inventory, Plant, Player, SaveState},
    stats::GameStats,
    store::GardenStore,
    types::{Amount, ProfileId, SeedValue, Timestamp},
};
use serde::{Deserialize, Serialize};

/// One garden slot as the caller sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantView {
    pub plant:  Plant,
    pub growth: GrowthStatus,
    pub visual: VisualAttributes,
}

pub struct GardenEngine {
    pub profile_id: ProfileId,
    config:         GameConfig,
    store:          GardenStore,
    clock:          Box<dyn Clock>,
    entropy:        Box<dyn EntropySource>,
}

impl GardenEngine {
    pub fn new(
        profile_id: ProfileId,
        config: GameConfig,
        store: GardenStore,
        clock: Box<dyn Clock>,
        entropy: Box<dyn EntropySource>,
    ) -> Self {
        Self { profile_id, config, store, clock, entropy }
    }

    /// Production wiring: system clock, OS entropy, profile created on first use.
    pub fn build(profile_id: ProfileId, config: GameConfig, store: GardenStore) -> GameResult<Self> {
        let engine = Self::new(
            profile_id,
            config,
            store,
            Box::new(SystemClock),
            Box::new(OsEntropy),
        );
        engine.ensure_profile()?;
        Ok(engine)
    }

    /// Test wiring: in-memory store, default_test config, reproducible
    /// entropy from `seed`, and a caller-held manual clock.
    pub fn build_test(profile_id: ProfileId, seed: u64, clock: ManualClock) -> GameResult<Self> {
        Self::build_test_with_config(profile_id, seed, clock, GameConfig::default_test())
    }

    pub fn build_test_with_config(
        profile_id: ProfileId,
        seed: u64,
        clock: ManualClock,
        config: GameConfig,
    ) -> GameResult<Self> {
        let store = GardenStore::in_memory()?;
        store.migrate()?;
        let engine = Self::new(
            profile_id,
            config,
            store,
            Box::new(clock),
            Box::new(SeededEntropy::new(seed)),
        );
        engine.ensure_profile()?;
        Ok(engine)
    }

    /// Create the profile with starting balances if it does not exist yet.
    /// Returns true when a new profile was created.
    pub fn ensure_profile(&self) -> GameResult<bool> {
        if self.store.profile_exists(&self.profile_id)? {
            return Ok(false);
        }
        let now = self.clock.now();
        let starting_gold = self.config.starting.gold;
        let state = SaveState::new(starting_gold, now);
        let event = GameEvent::ProfileCreated { at: now, starting_gold };
        let created = self
            .store
            .init_profile(&self.profile_id, &state, &event, env!("CARGO_PKG_VERSION"))?;
        if created {
            log::info!("profile={} created with {starting_gold} gold", self.profile_id);
        }
        Ok(created)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &GardenStore {
        &self.store
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn state(&self) -> GameResult<SaveState> {
        self.store.load_state(&self.profile_id, &self.config)
    }

    pub fn player(&self) -> GameResult<Player> {
        Ok(self.state()?.player)
    }

    pub fn inventory(&self) -> GameResult<Inventory> {
        Ok(self.state()?.inventory)
    }

    pub fn garden_state(&self) -> GameResult<Vec<PlantView>> {
        self.garden_state_at(self.clock.now())
    }

    /// Every plant with its growth evaluated at `now`, ordered by slot.
    pub fn garden_state_at(&self, now: Timestamp) -> GameResult<Vec<PlantView>> {
        let mut plants = self.state()?.garden.plants;
        plants.sort_by_key(|p| p.slot);
        plants
            .into_iter()
            .map(|plant| {
                let visual = AttributeGenerator::generate(plant.seed, plant.rarity, &self.config)?;
                let growth = GrowthStatus::evaluate(&plant, now);
                Ok(PlantView { plant, growth, visual })
            })
            .collect()
    }

    pub fn free_slots(&self) -> GameResult<Vec<usize>> {
        Ok(self.state()?.garden.free_slots(self.config.garden.max_slots))
    }

    pub fn visual_attributes(&self, seed: SeedValue, rarity: Rarity) -> GameResult<VisualAttributes> {
        AttributeGenerator::generate(seed, rarity, &self.config)
    }

    pub fn pack_preview(&self, price: Amount) -> Distribution {
        gacha::preview_distribution(price, &self.config)
    }

    pub fn stats(&self) -> GameResult<GameStats> {
        Ok(GameStats::collect(&self.state()?, self.clock.now()))
    }

    pub fn event_log(&self) -> GameResult<Vec<EventLogEntry>> {
        self.store.events_for_profile(&self.profile_id)
    }

    // ── Operations ─────────────────────────────────────────────

    pub fn buy_pack(&mut self, price: Amount) -> GameResult<PackPurchase> {
        let now = self.clock.now();
        let config = &self.config;
        let entropy = self.entropy.as_mut();
        let result = self.store.update_state(&self.profile_id, config, now, |state| {
            let (purchase, event) = economy::buy_pack(state, config, price, now, entropy)?;
            Ok((purchase, vec![event]))
        });

        match &result {
            Ok(purchase) => {
                log::debug!("profile={} pack odds at {price}: {:?}", self.profile_id, purchase.distribution);
                let rarities: Vec<_> = purchase.seeds.iter().map(|s| s.rarity.key()).collect();
                log::info!("profile={} bought pack for {price}: [{}]", self.profile_id, rarities.join(", "));
            }
            Err(e) => log::warn!("profile={} buy_pack({price}) rejected: {e}", self.profile_id),
        }
        result
    }

    pub fn plant_seed(&mut self, seed_id: &str, slot: usize) -> GameResult<Plant> {
        let now = self.clock.now();
        let config = &self.config;
        let result = self.store.update_state(&self.profile_id, config, now, |state| {
            let (plant, event) = economy::plant_seed(state, config, seed_id, slot, now)?;
            Ok((plant, vec![event]))
        });

        match &result {
            Ok(plant) => log::info!(
                "profile={} planted {} [{}] in slot {slot}, ready in {}s",
                self.profile_id, plant.id, plant.rarity, plant.growth_duration
            ),
            Err(e) => log::warn!("profile={} plant_seed({seed_id}, {slot}) rejected: {e}", self.profile_id),
        }
        result
    }

    pub fn harvest(&mut self, plant_id: &str) -> GameResult<HarvestOutcome> {
        let now = self.clock.now();
        let config = &self.config;
        let result = self.store.update_state(&self.profile_id, config, now, |state| {
            let (outcome, event) = economy::harvest(state, config, plant_id, now)?;
            Ok((outcome, vec![event]))
        });

        match &result {
            Ok(outcome) => log::info!(
                "profile={} harvested {} [{}]: +{} petals",
                self.profile_id, outcome.visual.name, outcome.plant.rarity, outcome.petal_yield
            ),
            Err(e) => log::warn!("profile={} harvest({plant_id}) rejected: {e}", self.profile_id),
        }
        result
    }

    pub fn sell_petals(&mut self, order: SellOrder) -> GameResult<SaleReceipt> {
        let now = self.clock.now();
        let config = &self.config;
        let result = self.store.update_state(&self.profile_id, config, now, |state| {
            let (receipt, event) = economy::sell_petals(state, config, order, now)?;
            Ok((receipt, vec![event]))
        });

        match &result {
            Ok(receipt) => log::info!(
                "profile={} sold {} {} petals for {} gold",
                self.profile_id, receipt.quantity, receipt.rarity, receipt.gold_earned
            ),
            Err(e) => log::warn!(
                "profile={} sell_petals({} x{}) rejected: {e}",
                self.profile_id, order.rarity, order.quantity
            ),
        }
        result
    }
}
