//! Growth is a pure function of (planted_at, growth_duration, now).

use floragen_core::{
    clock::ManualClock,
    engine::GardenEngine,
    error::{ErrorKind, GameError},
    growth::{self, GrowthStatus, READY_LABEL},
};

const T0: i64 = 1_700_000_000;

#[test]
fn percent_tracks_elapsed_time() {
    assert_eq!(growth::growth_percent(T0, 600, T0), 0.0);
    assert_eq!(growth::growth_percent(T0, 600, T0 + 150), 25.0);
    assert_eq!(growth::growth_percent(T0, 600, T0 + 300), 50.0);
    assert_eq!(growth::growth_percent(T0, 600, T0 + 600), 100.0);
    assert_eq!(growth::growth_percent(T0, 600, T0 + 10_000), 100.0);
}

#[test]
fn clock_before_planting_reads_zero() {
    assert_eq!(growth::growth_percent(T0, 600, T0 - 30), 0.0);
    assert_eq!(growth::remaining_seconds(T0, 600, T0 - 30), 630);
}

#[test]
fn never_reports_100_before_maturity() {
    // 3599 / 3600 rounds to 100.0 at one decimal, but the plant is not ready.
    let status = GrowthStatus::at(T0, 3600, T0 + 3599);
    assert_eq!(status.percent, 99.9);
    assert!(!status.ready);
    assert_eq!(status.remaining_seconds, 1);
    assert_eq!(status.remaining_label, "1s");
}

#[test]
fn readiness_flips_exactly_at_duration() {
    assert!(!growth::is_ready(T0, 90, T0 + 89));
    assert!(growth::is_ready(T0, 90, T0 + 90));
    let status = GrowthStatus::at(T0, 90, T0 + 90);
    assert!(status.ready);
    assert_eq!(status.remaining_label, READY_LABEL);
}

#[test]
fn remaining_time_labels() {
    assert_eq!(growth::format_remaining(3_720), "1h 2m");
    assert_eq!(growth::format_remaining(3_725), "1h 2m");
    assert_eq!(growth::format_remaining(3_600), "1h");
    assert_eq!(growth::format_remaining(245), "4m 5s");
    assert_eq!(growth::format_remaining(120), "2m");
    assert_eq!(growth::format_remaining(59), "59s");
    assert_eq!(growth::format_remaining(0), READY_LABEL);
    assert_eq!(growth::format_remaining(-5), READY_LABEL);
}

#[test]
fn harvest_is_refused_until_mature_then_allowed() {
    let clock = ManualClock::starting_at(T0);
    let mut engine = GardenEngine::build_test("growth-harvest".into(), 7, clock.clone()).unwrap();

    let pack = engine.buy_pack(10).unwrap();
    let plant = engine.plant_seed(&pack.seeds[0].id, 0).unwrap();

    clock.advance(plant.growth_duration - 1);
    let err = engine.harvest(&plant.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    assert!(
        err.to_string().starts_with("This plant is not ready yet. Time remaining:"),
        "unexpected message: {err}"
    );
    let views = engine.garden_state().unwrap();
    assert_eq!(views.len(), 1, "refused harvest must leave the plant in place");
    assert!(!views[0].growth.ready);

    clock.advance(1);
    assert!(engine.garden_state().unwrap()[0].growth.ready);
    let outcome = engine.harvest(&plant.id).unwrap();
    assert_eq!(outcome.plant.id, plant.id);
    assert!(outcome.plant.harvested);
}

#[test]
fn garden_view_and_harvest_agree_at_every_second() {
    let clock = ManualClock::starting_at(T0);
    let mut engine = GardenEngine::build_test("growth-agree".into(), 11, clock.clone()).unwrap();

    let pack = engine.buy_pack(10).unwrap();
    let plant = engine.plant_seed(&pack.seeds[0].id, 3).unwrap();

    for offset in [0, plant.growth_duration / 2, plant.growth_duration - 1] {
        let view = &engine.garden_state_at(T0 + offset).unwrap()[0];
        assert!(view.growth.percent < 100.0);
        assert!(!view.growth.ready);
    }

    clock.set(T0 + plant.growth_duration - 1);
    assert!(matches!(engine.harvest(&plant.id), Err(GameError::PreconditionFailed(_))));

    clock.set(T0 + plant.growth_duration);
    let view = &engine.garden_state().unwrap()[0];
    assert_eq!(view.growth.percent, 100.0);
    engine.harvest(&plant.id).unwrap();
}
