//! End-to-end tests driving the village through its public API.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use rust_decimal_macros::dec;
use willowbrook_core::{
    ActionDetail, Phase, Simulation, SimulationConfig, SimulationError, SimulationHandle,
};
use willowbrook_types::{BondTier, ErrorKind, ItemKey, PetPersonality, Sky, Species};

fn seeded(seed: u64) -> Simulation {
    let mut config = SimulationConfig::default();
    config.world.seed = seed;
    Simulation::new(config).unwrap()
}

fn run_days(sim: &mut Simulation, days: usize) -> String {
    let reports: Vec<_> = (0..days).map(|_| sim.advance_day().unwrap()).collect();
    serde_json::to_string(&reports).unwrap()
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn same_seed_same_village() {
    let first = run_days(&mut seeded(2024), 60);
    let second = run_days(&mut seeded(2024), 60);
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let first = run_days(&mut seeded(1), 30);
    let second = run_days(&mut seeded(2), 30);
    assert_ne!(first, second);
}

#[test]
fn new_game_replays_from_the_start() {
    let mut sim = seeded(7);
    let first = run_days(&mut sim, 20);

    sim.new_game(7).unwrap();
    assert_eq!(sim.day(), 0);
    let second = run_days(&mut sim, 20);
    assert_eq!(first, second);
}

#[test]
fn player_actions_replay_too() {
    let play = |sim: &mut Simulation| {
        sim.adopt("Russet", Species::Fox, PetPersonality::Mischievous).unwrap();
        sim.plant(0, 0, "Pea").unwrap();
        sim.buy(&ItemKey::new("honey_cake"), 1).unwrap();
        run_days(sim, 15)
    };
    assert_eq!(play(&mut seeded(11)), play(&mut seeded(11)));
}

// =============================================================================
// Example scenarios
// =============================================================================

#[test]
fn seed_42_first_morning() {
    let mut sim = seeded(42);
    let report = sim.advance_day().unwrap();

    assert_eq!(report.day, 1);
    assert_eq!(sim.day(), 1);
    let weather = sim.weather_today().unwrap();
    assert!(Sky::ALL.contains(&weather.sky));
    assert_eq!(weather.day, 1);
    assert!(!report.weather_summary.is_empty());
    assert!(!report.weather_description.is_empty());
}

#[test]
fn biscuit_fed_for_ten_days() {
    let mut sim = seeded(42);
    sim.adopt("Biscuit", Species::Dog, PetPersonality::Loyal).unwrap();
    let start_tier = sim.pets().pet("Biscuit").unwrap().bond_tier();

    let mut last = sim.pets().pet("Biscuit").unwrap().bond_points;
    for _ in 0..10 {
        sim.feed("Biscuit").unwrap();
        let now = sim.pets().pet("Biscuit").unwrap().bond_points;
        assert!(now > last, "feeding should always deepen the bond");
        sim.advance_day().unwrap();
        last = sim.pets().pet("Biscuit").unwrap().bond_points;
    }

    let pet = sim.pets().pet("Biscuit").unwrap();
    assert!(pet.bond_tier() > start_tier);
    assert!(pet.bond_tier() >= BondTier::Familiar);
}

#[test]
fn cannot_afford_three_rolls_with_five_coins() {
    let config = SimulationConfig::parse("market:\n  starting_coins: 5.00\n").unwrap();
    let mut sim = Simulation::new(config).unwrap();
    let rolls = ItemKey::new("cinnamon_roll");
    let unit = sim.market().compute_price(&rolls).unwrap();
    assert!(unit * dec!(3) > dec!(5.00));

    let err = sim.buy(&rolls, 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    assert_eq!(sim.wallet().balance(), dec!(5.00));
    assert_eq!(sim.inventory().quantity(&rolls), 0);
    assert!(sim.market().trade_log().is_empty());
}

#[test]
fn occupied_plot_survives_a_second_planting() {
    let mut sim = seeded(5);
    sim.plant(2, 3, "Tulip").unwrap();
    sim.advance_day().unwrap();
    let before = sim.garden().plot(2, 3).unwrap().clone();

    assert!(sim.plant(2, 3, "Pea").is_err());
    assert_eq!(sim.garden().plot(2, 3).unwrap(), &before);
}

// =============================================================================
// Invariants across many days
// =============================================================================

#[test]
fn a_long_year_keeps_every_invariant() {
    let mut sim = seeded(99);
    sim.adopt("Clover", Species::Rabbit, PetPersonality::Curious).unwrap();
    sim.plant(0, 0, "Strawberry").unwrap();

    for expected in 1..=120_u64 {
        let report = sim.advance_day().unwrap();
        assert_eq!(report.day, expected);
        assert_eq!(report.season, sim.status().season);

        for plot in sim.garden().plots() {
            assert!((0.0..=1.0).contains(&plot.progress));
        }
        for listing in sim.market().listings() {
            assert!(listing.price > dec!(0));
        }
        assert!(sim.wallet().balance() >= dec!(0));
    }
    assert_eq!(sim.status().year, 2);
}

#[test]
fn ripe_crops_go_to_the_basket_and_to_market() {
    let mut sim = seeded(3);
    sim.plant(0, 0, "Basil").unwrap();

    let mut ripe = false;
    for _ in 0..12 {
        sim.water_all().unwrap();
        sim.advance_day().unwrap();
        if sim.garden().plot(0, 0).unwrap().is_harvestable() {
            ripe = true;
            break;
        }
    }
    assert!(ripe, "basil should ripen within twelve tended days");

    let outcome = sim.harvest(0, 0).unwrap();
    assert!(matches!(outcome.detail, ActionDetail::Harvest(_)));
    assert_eq!(sim.inventory().basket().len(), 1);

    let coins = sim.wallet().balance();
    sim.sell_harvest("Basil").unwrap();
    assert!(sim.wallet().balance() > coins);
    assert!(sim.inventory().basket().is_empty());
}

// =============================================================================
// Forecast and re-entrancy
// =============================================================================

#[test]
fn forecast_leaves_the_game_alone() {
    let mut with_peek = seeded(8);
    let mut without = seeded(8);
    with_peek.advance_day().unwrap();
    without.advance_day().unwrap();

    let forecast = with_peek.forecast(5).unwrap();
    assert_eq!(forecast.len(), 5);
    assert_eq!(with_peek.day(), 1);

    assert_eq!(run_days(&mut with_peek, 10), run_days(&mut without, 10));
}

#[test]
fn forecast_beyond_the_horizon_is_refused() {
    let sim = seeded(8);
    let err = sim.forecast(30).unwrap_err();
    assert!(matches!(err, SimulationError::ForecastRange { requested: 30, .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn handle_rejects_an_advance_while_one_is_running() {
    let handle = SimulationHandle::new(SimulationConfig::default()).unwrap();
    let busy = handle.clone();

    handle
        .act(|sim| {
            assert_eq!(busy.advance_day().unwrap_err().kind(), ErrorKind::Conflict);
            assert!(busy.act(|inner| inner.write_journal("hello")).is_err());
            assert_eq!(sim.phase(), Phase::Idle);
            Ok(())
        })
        .unwrap();

    assert_eq!(handle.advance_day().unwrap().day, 1);
    assert!(handle.status().unwrap().journal.is_empty());
}
