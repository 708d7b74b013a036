//! Player-facing state transitions: buy, plant, harvest, sell.
//!
//! RULE: every function validates everything before touching `state`.
//! A returned Err means `state` is exactly as it was passed in.
//! Each success returns the event describing what changed.

use crate::{
    attributes::{AttributeGenerator, VisualAttributes},
    config::GameConfig,
    error::{GameError, GameResult},
    event::GameEvent,
    gacha::{self, Distribution},
    growth::GrowthStatus,
    rarity::Rarity,
    rng::EntropySource,
    state::{
        check_entity_id, new_plant_id, new_seed_id, HarvestRecord, Plant, SaveState, Seed,
        PLANT_ID_PREFIX, SEED_ID_PREFIX,
    },
    types::{Amount, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackPurchase {
    pub seeds:        Vec<Seed>,
    pub distribution: Distribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestOutcome {
    pub plant:       Plant,
    pub petal_yield: Amount,
    pub visual:      VisualAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellOrder {
    pub rarity:   Rarity,
    pub quantity: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub rarity:       Rarity,
    pub quantity:     Amount,
    pub gold_earned:  Amount,
    pub gold_balance: Amount,
}

pub fn buy_pack(
    state: &mut SaveState,
    config: &GameConfig,
    price: Amount,
    now: Timestamp,
    entropy: &mut dyn EntropySource,
) -> GameResult<(PackPurchase, GameEvent)> {
    let distribution = gacha::adjusted_distribution(price, config)?;

    if state.player.gold < price {
        return Err(GameError::InsufficientResources(format!(
            "Insufficient funds: you have {} gold, the pack costs {price}.",
            state.player.gold
        )));
    }

    let mut seeds = Vec::with_capacity(config.shop.pack_size);
    for _ in 0..config.shop.pack_size {
        let rarity = gacha::draw_rarity(&distribution, entropy)?;
        let seed_value = entropy.next_seed();
        seeds.push(Seed {
            id: new_seed_id(),
            rarity,
            seed: seed_value,
            petal_yield: AttributeGenerator::petal_yield(seed_value, rarity, config),
            created_at: now,
        });
    }

    let player = &mut state.player;
    player.gold -= price;
    player.stats.total_packs_bought += 1;
    player.stats.total_gold_spent += price;
    if let Some(best) = seeds.iter().map(|s| s.rarity).max() {
        player.stats.best_rarity = player.stats.best_rarity.max(best);
    }
    state.inventory.seeds.extend(seeds.iter().cloned());

    let event = GameEvent::PackPurchased {
        at: now,
        price,
        seed_ids: seeds.iter().map(|s| s.id.clone()).collect(),
        rarities: seeds.iter().map(|s| s.rarity).collect(),
    };
    Ok((PackPurchase { seeds, distribution }, event))
}

pub fn plant_seed(
    state: &mut SaveState,
    config: &GameConfig,
    seed_id: &str,
    slot: usize,
    now: Timestamp,
) -> GameResult<(Plant, GameEvent)> {
    check_entity_id(SEED_ID_PREFIX, seed_id)?;

    if slot >= config.garden.max_slots {
        return Err(GameError::InvalidInput(format!("Invalid slot: {slot}")));
    }
    if state.garden.plant_in_slot(slot).is_some() {
        return Err(GameError::PreconditionFailed(format!(
            "Slot {slot} is already occupied."
        )));
    }

    let index = state
        .inventory
        .seeds
        .iter()
        .position(|s| s.id == seed_id)
        .ok_or_else(|| GameError::InvalidInput(format!("Seed not found: {seed_id}")))?;

    let seed = state.inventory.seeds.remove(index);
    let growth_duration = AttributeGenerator::growth_duration(seed.seed, seed.rarity, config);
    log::debug!("seed={} rarity={} growth_duration={growth_duration}s", seed.id, seed.rarity);

    let plant = Plant {
        id: new_plant_id(),
        rarity: seed.rarity,
        seed: seed.seed,
        slot,
        planted_at: now,
        growth_duration,
        petal_yield: seed.petal_yield,
        harvested: false,
    };

    state.garden.plants.push(plant.clone());
    state.player.stats.total_planted += 1;

    let event = GameEvent::SeedPlanted {
        at: now,
        seed_id: seed.id,
        plant_id: plant.id.clone(),
        rarity: plant.rarity,
        slot,
        growth_duration: plant.growth_duration,
    };
    Ok((plant, event))
}

pub fn harvest(
    state: &mut SaveState,
    config: &GameConfig,
    plant_id: &str,
    now: Timestamp,
) -> GameResult<(HarvestOutcome, GameEvent)> {
    check_entity_id(PLANT_ID_PREFIX, plant_id)?;

    let index = state
        .garden
        .plants
        .iter()
        .position(|p| p.id == plant_id)
        .ok_or_else(|| GameError::InvalidInput(format!("Plant not found: {plant_id}")))?;

    let growing = &state.garden.plants[index];
    let status = GrowthStatus::evaluate(growing, now);
    if !status.ready {
        return Err(GameError::PreconditionFailed(format!(
            "This plant is not ready yet. Time remaining: {}",
            status.remaining_label
        )));
    }
    let visual = AttributeGenerator::generate(growing.seed, growing.rarity, config)?;

    let mut plant = state.garden.plants.remove(index);
    plant.harvested = true;
    let petal_yield = plant.petal_yield;

    let player = &mut state.player;
    *player.petals.entry(plant.rarity).or_insert(0) += petal_yield;
    player.stats.total_harvested += 1;

    state.inventory.harvested.push(HarvestRecord {
        plant: plant.clone(),
        visual: visual.clone(),
        petals_earned: petal_yield,
        harvested_at: now,
    });

    let event = GameEvent::PlantHarvested {
        at: now,
        plant_id: plant.id.clone(),
        rarity: plant.rarity,
        petal_yield,
    };
    Ok((HarvestOutcome { plant, petal_yield, visual }, event))
}

pub fn sell_petals(
    state: &mut SaveState,
    config: &GameConfig,
    order: SellOrder,
    now: Timestamp,
) -> GameResult<(SaleReceipt, GameEvent)> {
    let SellOrder { rarity, quantity } = order;
    if quantity == 0 {
        return Err(GameError::InvalidInput("Quantity must be at least 1.".into()));
    }

    let stock = state.player.petals_of(rarity);
    if stock < quantity {
        return Err(GameError::InsufficientResources(format!(
            "You only have {stock} {rarity} petals."
        )));
    }

    let too_large = || GameError::InvalidInput(format!("Quantity too large: {quantity}"));
    let gold_earned = quantity
        .checked_mul(config.tier(rarity).sell_price)
        .ok_or_else(too_large)?;
    let gold = state.player.gold.checked_add(gold_earned).ok_or_else(too_large)?;
    let stats = &state.player.stats;
    let total_gold_earned = stats.total_gold_earned.checked_add(gold_earned).ok_or_else(too_large)?;
    let total_petals_sold = stats.total_petals_sold.checked_add(quantity).ok_or_else(too_large)?;

    let player = &mut state.player;
    player.petals.insert(rarity, stock - quantity);
    player.gold = gold;
    player.stats.total_petals_sold = total_petals_sold;
    player.stats.total_gold_earned = total_gold_earned;

    let receipt = SaleReceipt {
        rarity,
        quantity,
        gold_earned,
        gold_balance: player.gold,
    };
    let event = GameEvent::PetalsSold { at: now, rarity, quantity, gold_earned };
    Ok((receipt, event))
}
