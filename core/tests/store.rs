//! Save-record persistence: profile creation, atomic updates, corruption.

use floragen_core::{
    clock::ManualClock,
    config::GameConfig,
    engine::GardenEngine,
    error::{ErrorKind, GameError},
    event::GameEvent,
    rarity::Rarity,
    state::{new_plant_id, Plant, Player, RecordKind, SaveState},
    store::GardenStore,
};

const T0: i64 = 1_700_000_000;

fn fresh_store() -> GardenStore {
    let store = GardenStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn created(gold: u64) -> GameEvent {
    GameEvent::ProfileCreated { at: T0, starting_gold: gold }
}

#[test]
fn migrations_are_idempotent() {
    let store = fresh_store();
    store.migrate().unwrap();
    assert!(!store.profile_exists("nobody").unwrap());
}

#[test]
fn init_profile_writes_all_records_once() {
    let store = fresh_store();
    let state = SaveState::new(100, T0);

    assert!(store.init_profile("p1", &state, &created(100), "test").unwrap());
    assert!(store.profile_exists("p1").unwrap());

    let other = SaveState::new(999, T0);
    assert!(!store.init_profile("p1", &other, &created(999), "test").unwrap());

    let config = GameConfig::default_test();
    assert_eq!(store.load_state("p1", &config).unwrap(), state);
    assert_eq!(store.event_count("p1", "profile_created").unwrap(), 1);

    let player: Option<Player> = store.get_record("p1", RecordKind::Player).unwrap();
    assert_eq!(player.unwrap().gold, 100);
}

#[test]
fn unknown_profile_is_not_found() {
    let store = fresh_store();
    let err = store.load_state("ghost", &GameConfig::default_test()).unwrap_err();
    assert!(matches!(err, GameError::ProfileNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Infrastructure);
}

#[test]
fn failed_update_writes_nothing() {
    let store = fresh_store();
    let config = GameConfig::default_test();
    store.init_profile("p2", &SaveState::new(100, T0), &created(100), "test").unwrap();

    let result: Result<(), _> = store.update_state("p2", &config, T0 + 5, |state| {
        state.player.gold = 0;
        state.player.petals.insert(Rarity::S, 50);
        Err(GameError::PreconditionFailed("abort after mutating".into()))
    });
    assert!(result.is_err());

    let state = store.load_state("p2", &config).unwrap();
    assert_eq!(state.player.gold, 100);
    assert_eq!(state.player.petals_of(Rarity::S), 0);
    assert_eq!(store.events_for_profile("p2").unwrap().len(), 1);
}

#[test]
fn successful_update_commits_state_and_events_together() {
    let store = fresh_store();
    let config = GameConfig::default_test();
    store.init_profile("p3", &SaveState::new(100, T0), &created(100), "test").unwrap();

    let gold = store
        .update_state("p3", &config, T0 + 5, |state| {
            state.player.gold -= 10;
            let event = GameEvent::PackPurchased {
                at: T0 + 5,
                price: 10,
                seed_ids: vec![],
                rarities: vec![],
            };
            Ok((state.player.gold, vec![event]))
        })
        .unwrap();
    assert_eq!(gold, 90);
    assert_eq!(store.load_state("p3", &config).unwrap().player.gold, 90);

    let log = store.events_for_profile("p3").unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].event_type, "pack_purchased");
    assert_eq!(log[1].at, T0 + 5);
    let replayed: GameEvent = serde_json::from_str(&log[1].payload).unwrap();
    assert!(matches!(replayed, GameEvent::PackPurchased { price: 10, .. }));
}

#[test]
fn structurally_invalid_garden_is_reported_as_corrupt() {
    let store = fresh_store();
    let config = GameConfig::default_test();
    store.init_profile("p4", &SaveState::new(100, T0), &created(100), "test").unwrap();

    let plant = |slot| Plant {
        id: new_plant_id(),
        rarity: Rarity::E,
        seed: 1,
        slot,
        planted_at: T0,
        growth_duration: 60,
        petal_yield: 5,
        harvested: false,
    };
    store
        .update_state("p4", &config, T0, |state| {
            state.garden.plants.push(plant(1));
            state.garden.plants.push(plant(1));
            Ok(((), vec![]))
        })
        .unwrap();

    let err = store.load_state("p4", &config).unwrap_err();
    match err {
        GameError::CorruptRecord { kind, reason } => {
            assert_eq!(kind, "garden");
            assert!(reason.contains("slot 1"), "unexpected reason: {reason}");
        }
        other => panic!("expected CorruptRecord, got {other:?}"),
    }
}

#[test]
fn engine_operations_leave_one_event_each() {
    let clock = ManualClock::starting_at(T0);
    let mut engine = GardenEngine::build_test("store-events".into(), 3, clock.clone()).unwrap();

    engine.buy_pack(10).unwrap();
    engine.buy_pack(10).unwrap();
    let _ = engine.buy_pack(1_000);

    let store = engine.store();
    assert_eq!(store.event_count("store-events", "profile_created").unwrap(), 1);
    assert_eq!(store.event_count("store-events", "pack_purchased").unwrap(), 2);
    assert_eq!(engine.player().unwrap().gold, 80);
}
