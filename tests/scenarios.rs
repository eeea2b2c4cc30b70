//! End-to-end play through the public engine API.

use soul_reaper::games::souls::error::PurchaseError;
use soul_reaper::games::souls::logic::{self, PurchaseOutcome};
use soul_reaper::games::souls::actions::BUY_UPGRADE_BASE;
use soul_reaper::games::souls::scheduler::{SchedulerConfig, SchedulerStatus};
use soul_reaper::games::souls::state::{
    Achievement, AchievementKind, Catalog, GameEvent, GameState, Upgrade, UpgradeKind,
};
use soul_reaper::games::souls::SoulsGame;
use soul_reaper::games::Game;
use soul_reaper::input::InputEvent;

fn click_n(state: &mut GameState, n: usize) {
    for _ in 0..n {
        logic::click(state);
    }
}

#[test]
fn first_scythe() {
    let mut state = GameState::new();
    click_n(&mut state, 10);
    assert_eq!(state.souls(), 10);
    assert_eq!(
        state.drain_events(),
        vec![GameEvent::AchievementUnlocked { name: "First Soul" }]
    );

    let outcome = logic::purchase(&mut state, "scythe").unwrap();
    assert_eq!(
        outcome,
        PurchaseOutcome::Purchased {
            id: "scythe",
            kind: UpgradeKind::Click,
            cost: 10,
            owned: 1,
        }
    );
    assert_eq!(state.souls(), 0);
    assert_eq!(state.total_collected(), 10);
    assert_eq!(state.per_click_yield(), 2);
    assert_eq!(state.upgrade("scythe").unwrap().cost(), 12);
}

#[test]
fn broke_purchase_changes_nothing() {
    let mut state = GameState::new();
    click_n(&mut state, 5);
    state.drain_events();
    let before = state.snapshot();

    let outcome = logic::purchase(&mut state, "pact").unwrap();
    assert_eq!(outcome, PurchaseOutcome::InsufficientFunds { cost: 200, souls: 5 });
    assert!(!outcome.is_purchased());
    assert_eq!(state.snapshot(), before);
    assert!(state.drain_events().is_empty());
}

#[test]
fn unknown_upgrade_is_an_error() {
    let mut state = GameState::new();
    assert_eq!(
        logic::purchase(&mut state, "lantern"),
        Err(PurchaseError::NotFound("lantern".to_string()))
    );
}

#[test]
fn hundred_clicks_then_a_minion() {
    let mut game = SoulsGame::new();
    for _ in 0..100 {
        game.handle_input(&InputEvent::Key('c'));
    }
    assert_eq!(game.state().unlocked_count(), 2);

    // Fourth shop row is the minion.
    assert!(game.handle_input(&InputEvent::Key('4')));
    assert_eq!(game.state().passive_owned(), 1);
    assert_eq!(game.state().souls(), 0);
    assert_eq!(
        game.scheduler().status(),
        SchedulerStatus::Running { interval_ms: 1000 }
    );

    game.update(10_000.0);
    game.update(11_000.0);
    game.update(12_500.0);
    assert_eq!(game.state().souls(), 2);
    assert_eq!(game.state().total_collected(), 102);
}

#[test]
fn long_pause_is_capped() {
    let mut game = SoulsGame::new();
    for _ in 0..100 {
        game.click();
    }
    game.purchase("rift").unwrap();
    game.update(0.0);
    // An hour-long background tab still counts as one interval.
    game.update(3_600_000.0);
    assert_eq!(game.state().souls(), 1);
}

#[test]
fn snapshot_tracks_progress() {
    let mut game = SoulsGame::new();
    for _ in 0..60 {
        game.click();
    }
    game.purchase("spectral").unwrap();
    let snap = game.snapshot();
    assert_eq!(snap.souls, 10);
    assert_eq!(snap.total_collected, 60);
    assert_eq!(snap.per_click_yield, 6);
    assert_eq!(snap.passive_rate, 0);
    assert_eq!(snap.total_clicks, 60);
    assert_eq!(snap.total_upgrades, 1);
    assert_eq!(snap.upgrades[1].owned, 1);
    assert_eq!(snap.upgrades[1].cost, 65);
    assert!(snap.upgrades[0].affordable);
    assert!(!snap.upgrades[3].affordable);
}

fn cheap_catalog() -> Catalog {
    Catalog {
        upgrades: vec![
            Upgrade::new("knife", "Bone Knife", 1.0, 2.0, 3.0, UpgradeKind::Click),
            Upgrade::new("imp", "Imp", 2.0, 2.0, 1.0, UpgradeKind::Passive),
        ],
        achievements: vec![
            Achievement::new("Busy Imp", 4, AchievementKind::Passive),
            Achievement::new("Hoarder", 20, AchievementKind::Total),
        ],
    }
}

#[test]
fn custom_catalog_plays_through() {
    let mut state = GameState::with_catalog(cheap_catalog()).unwrap();
    logic::click(&mut state);
    logic::purchase(&mut state, "knife").unwrap(); // yield 4
    click_n(&mut state, 1);
    logic::purchase(&mut state, "imp").unwrap(); // rate 4
    assert_eq!(state.passive_rate(), 4);
    assert!(state.achievements()[0].unlocked);
    assert!(!state.achievements()[1].unlocked);

    logic::tick(&mut state, 4); // total 5 + 16
    assert_eq!(state.total_collected(), 21);
    assert!(state.achievements()[1].unlocked);
}

#[test]
fn custom_catalog_drives_scheduler() {
    let mut state = GameState::with_catalog(cheap_catalog()).unwrap();
    click_n(&mut state, 2);
    let config = SchedulerConfig {
        base_ms: 500,
        step_ms: 50,
        floor_ms: 100,
        max_frame_delta_ms: 5_000,
    };
    let mut game = SoulsGame::with_parts(state, config);
    game.purchase("imp").unwrap();
    assert_eq!(game.scheduler().interval_ms(), Some(500));

    game.update(0.0);
    game.update(2_000.0);
    assert_eq!(game.state().souls(), 4);
}

fn assert_armed_for_minions(game: &SoulsGame) {
    let expected = SchedulerConfig::default()
        .interval_for(game.state().passive_owned())
        .unwrap();
    assert_eq!(
        game.scheduler().status(),
        SchedulerStatus::Running {
            interval_ms: expected
        }
    );
}

#[test]
fn every_minion_purchase_path_arms_scheduler() {
    let mut game = SoulsGame::new();
    for _ in 0..500 {
        game.click();
    }

    game.purchase("rift").unwrap();
    assert_eq!(game.state().passive_owned(), 1);
    assert_armed_for_minions(&game);

    assert!(game.handle_input(&InputEvent::Key('4')));
    assert_eq!(game.state().passive_owned(), 2);
    assert_armed_for_minions(&game);

    assert!(game.handle_input(&InputEvent::Click(BUY_UPGRADE_BASE + 3)));
    assert_eq!(game.state().passive_owned(), 3);
    assert_armed_for_minions(&game);

    // Production actually flows after the last re-arm.
    let before = game.state().souls();
    game.update(0.0);
    for s in 1..=10u64 {
        game.update((s * 1000) as f64);
    }
    assert!(game.state().souls() > before);
}
