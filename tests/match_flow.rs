//! End-to-end tests for deposits, damage, invulnerability, and the
//! round/match state machine.

use glam::Vec2;

use race_to_agi::consts::*;
use race_to_agi::sim::{
    Hazard, HazardKind, MatchPhase, PlayerId, PlayerInput, ResourceKind, TickInput, WorldState,
    tick,
};

/// Fresh world with an empty field, so tests control every entity
fn quiet_world() -> WorldState {
    let mut world = WorldState::new(42);
    world.resources.clear();
    world
}

fn idle() -> TickInput {
    TickInput::default()
}

fn start_pressed() -> TickInput {
    TickInput {
        p1: PlayerInput { start: true, ..Default::default() },
        ..Default::default()
    }
}

/// Force the current round to end with the given winner and resolve the
/// RoundOver tick, leaving the world in Countdown or MatchOver
fn finish_round(world: &mut WorldState, winner: PlayerId) {
    world.players[winner.index()].progress = WIN_PROGRESS;
    tick(world, &idle(), SIM_DT);
    assert_eq!(world.phase, MatchPhase::RoundOver);
    tick(world, &idle(), SIM_DT);
}

/// Run the between-round countdown through to the next Playing phase
fn run_countdown(world: &mut WorldState) {
    assert!(matches!(world.phase, MatchPhase::Countdown { .. }));
    let budget = (5.0 / SIM_DT) as u32;
    for _ in 0..budget {
        tick(world, &idle(), SIM_DT);
        if world.phase == MatchPhase::Playing {
            return;
        }
    }
    panic!("countdown never finished");
}

// ── Deposits ─────────────────────────────────────────────────────────────────

#[test]
fn deposit_converts_inventory_and_zeroes_it() {
    let mut world = quiet_world();
    let p1 = &mut world.players[0];
    p1.inventory.add(ResourceKind::Data);
    p1.inventory.add(ResourceKind::Data);
    p1.inventory.add(ResourceKind::Compute);
    // P1 spawns on its own base, so the deposit lands this tick
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 30.0);
    assert!(world.players[0].inventory.is_empty());
}

#[test]
fn deposit_values_funding_lower() {
    let mut world = quiet_world();
    world.players[0].inventory.add(ResourceKind::Funding);
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 8.0);
}

#[test]
fn deposit_with_empty_inventory_is_a_noop() {
    let mut world = quiet_world();
    world.players[0].progress = 40.0;
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 40.0);
    assert!(world.events.is_empty() || !format!("{:?}", world.events).contains("Deposited"));
}

#[test]
fn deposit_requires_own_base() {
    let mut world = quiet_world();
    // P1 standing in the middle of the field, nowhere near a base
    world.players[0].pos = Vec2::new(400.0, 300.0);
    world.players[0].inventory.add(ResourceKind::Data);
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 0.0);
    assert_eq!(world.players[0].inventory.count(ResourceKind::Data), 1);
}

#[test]
fn deposit_clamps_progress_at_win_threshold() {
    let mut world = quiet_world();
    world.players[0].progress = 95.0;
    world.players[0].inventory.add(ResourceKind::Data);
    world.players[0].inventory.add(ResourceKind::Data);
    tick(&mut world, &idle(), SIM_DT);
    // Clamped to 100, and reaching 100 ends the round this tick
    assert_eq!(world.players[0].progress, 100.0);
    assert_eq!(world.phase, MatchPhase::RoundOver);
}

// ── Resource collection ──────────────────────────────────────────────────────

#[test]
fn collection_tie_break_goes_to_player_one() {
    let mut world = quiet_world();
    world.players[0].pos = Vec2::new(400.0, 300.0);
    world.players[1].pos = Vec2::new(400.0, 300.0);
    world.resources.push(race_to_agi::sim::Resource {
        pos: Vec2::new(400.0, 300.0),
        kind: ResourceKind::Compute,
    });
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].inventory.count(ResourceKind::Compute), 1);
    assert_eq!(world.players[1].inventory.count(ResourceKind::Compute), 0);
    assert!(world.resources.is_empty());
}

// ── Hazards and invulnerability ──────────────────────────────────────────────

#[test]
fn hazard_penalty_clamps_at_zero() {
    let mut world = quiet_world();
    world.players[0].progress = 5.0;
    world.hazards.push(Hazard {
        pos: world.players[0].pos,
        vel: Vec2::ZERO,
        kind: HazardKind::Scandal, // penalty 15
    });
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 0.0);
    assert!(world.hazards.is_empty());
}

#[test]
fn hazard_hit_grants_invulnerability_window() {
    let mut world = quiet_world();
    world.players[0].progress = 50.0;
    world.hazards.push(Hazard {
        pos: world.players[0].pos,
        vel: Vec2::ZERO,
        kind: HazardKind::Bug,
    });
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 40.0);
    assert!(world.players[0].is_invulnerable(world.clock));
    // A second hazard on the same spot does nothing while the window holds
    world.hazards.push(Hazard {
        pos: world.players[0].pos,
        vel: Vec2::ZERO,
        kind: HazardKind::Leak,
    });
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.players[0].progress, 40.0);
    assert_eq!(world.hazards.len(), 1);
}

#[test]
fn hazard_survives_invulnerable_contact_and_hits_later() {
    let mut world = quiet_world();
    world.players[0].progress = 50.0;
    world.players[0].invulnerable_until = world.clock + 0.5;
    world.hazards.push(Hazard {
        pos: world.players[0].pos,
        vel: Vec2::ZERO,
        kind: HazardKind::Leak, // penalty 12
    });

    // While invulnerable: no damage, hazard stays on the field
    for _ in 0..10 {
        tick(&mut world, &idle(), SIM_DT);
    }
    assert_eq!(world.players[0].progress, 50.0);
    assert_eq!(world.hazards.len(), 1);

    // Once the window expires the same hazard connects
    for _ in 0..((0.6 / SIM_DT) as u32) {
        tick(&mut world, &idle(), SIM_DT);
    }
    assert_eq!(world.players[0].progress, 38.0);
    assert!(world.hazards.is_empty());
}

// ── Coffee ───────────────────────────────────────────────────────────────────

#[test]
fn coffee_grants_timed_boost() {
    let mut world = quiet_world();
    world.coffees.push(race_to_agi::sim::Coffee { pos: world.players[1].pos });
    tick(&mut world, &idle(), SIM_DT);
    assert!(world.coffees.is_empty());
    assert!(world.players[1].is_boosted());
    assert!(world.players[1].boost_remaining <= BOOST_DURATION);
    assert!(!world.players[0].is_boosted());
}

// ── Round and match flow ─────────────────────────────────────────────────────

#[test]
fn round_win_requires_strictly_higher_progress() {
    let mut world = quiet_world();
    world.players[0].progress = 100.0;
    world.players[1].progress = 60.0;
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.phase, MatchPhase::RoundOver);
    assert_eq!(world.round_wins(PlayerId::One), 1);
    assert_eq!(world.round_wins(PlayerId::Two), 0);
}

#[test]
fn simultaneous_100_is_a_draw() {
    let mut world = quiet_world();
    world.players[0].progress = 100.0;
    world.players[1].progress = 100.0;
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.phase, MatchPhase::RoundOver);
    assert_eq!(world.round_wins, [0, 0]);
    // Round 1 of 3 with no decisive wins: on to the countdown, not match over
    tick(&mut world, &idle(), SIM_DT);
    assert!(matches!(world.phase, MatchPhase::Countdown { .. }));
}

#[test]
fn round_end_clears_the_field() {
    let mut world = quiet_world();
    world.hazards.push(Hazard {
        pos: Vec2::new(400.0, 300.0),
        vel: Vec2::ZERO,
        kind: HazardKind::Bug,
    });
    world.coffees.push(race_to_agi::sim::Coffee { pos: Vec2::new(300.0, 300.0) });
    world.players[0].progress = 100.0;
    tick(&mut world, &idle(), SIM_DT);
    assert!(world.resources.is_empty());
    assert!(world.hazards.is_empty());
    assert!(world.coffees.is_empty());
    assert!(world.projectiles.is_empty());
}

#[test]
fn simulation_is_frozen_outside_playing() {
    let mut world = quiet_world();
    world.players[0].progress = 100.0;
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.phase, MatchPhase::RoundOver);
    // Movement input does nothing while the round is over
    let pos = world.players[1].pos;
    let held = TickInput {
        p2: PlayerInput { left: true, ..Default::default() },
        ..Default::default()
    };
    tick(&mut world, &held, SIM_DT);
    assert_eq!(world.players[1].pos, pos);
}

#[test]
fn two_round_wins_end_the_match_early() {
    let mut world = quiet_world();
    finish_round(&mut world, PlayerId::One);
    run_countdown(&mut world);
    assert_eq!(world.round, 2);
    finish_round(&mut world, PlayerId::One);
    // 2-0 after round two: match over without playing round three
    assert_eq!(
        world.phase,
        MatchPhase::MatchOver { winner: Some(PlayerId::One) }
    );
}

#[test]
fn split_match_is_decided_in_round_three() {
    let mut world = quiet_world();
    finish_round(&mut world, PlayerId::One);
    run_countdown(&mut world);
    finish_round(&mut world, PlayerId::Two);
    run_countdown(&mut world);
    assert_eq!(world.round, 3);
    finish_round(&mut world, PlayerId::Two);
    assert_eq!(
        world.phase,
        MatchPhase::MatchOver { winner: Some(PlayerId::Two) }
    );
}

#[test]
fn tied_match_after_three_rounds_is_a_draw() {
    let mut world = quiet_world();
    finish_round(&mut world, PlayerId::One);
    run_countdown(&mut world);
    finish_round(&mut world, PlayerId::Two);
    run_countdown(&mut world);
    // Round three ties at 100/100
    world.players[0].progress = 100.0;
    world.players[1].progress = 100.0;
    tick(&mut world, &idle(), SIM_DT);
    tick(&mut world, &idle(), SIM_DT);
    assert_eq!(world.phase, MatchPhase::MatchOver { winner: None });
}

#[test]
fn next_round_preserves_wins_and_zeroes_players() {
    let mut world = quiet_world();
    world.players[1].inventory.add(ResourceKind::Data);
    world.players[1].boost_remaining = 10.0;
    finish_round(&mut world, PlayerId::One);
    run_countdown(&mut world);
    assert_eq!(world.round, 2);
    assert_eq!(world.round_wins, [1, 0]);
    for player in &world.players {
        assert_eq!(player.progress, 0.0);
        assert!(player.inventory.is_empty());
        assert_eq!(player.boost_remaining, 0.0);
    }
    // Fresh round seeds the field again
    assert_eq!(world.resources.len(), INITIAL_RESOURCES);
}

#[test]
fn match_restart_zeroes_everything() {
    let mut world = quiet_world();
    finish_round(&mut world, PlayerId::One);
    run_countdown(&mut world);
    finish_round(&mut world, PlayerId::One);
    assert!(matches!(world.phase, MatchPhase::MatchOver { .. }));
    // Idle ticks stay terminal
    for _ in 0..100 {
        tick(&mut world, &idle(), SIM_DT);
    }
    assert!(matches!(world.phase, MatchPhase::MatchOver { .. }));
    // Start press: brand-new match
    tick(&mut world, &start_pressed(), SIM_DT);
    assert_eq!(world.phase, MatchPhase::Playing);
    assert_eq!(world.round, 1);
    assert_eq!(world.round_wins, [0, 0]);
    assert_eq!(world.resources.len(), INITIAL_RESOURCES);
}

// ── Spawning under pressure ──────────────────────────────────────────────────

#[test]
fn populations_never_exceed_caps_over_a_long_run() {
    let mut world = WorldState::new(7);
    // Park both players in corners away from spawns so pickups accumulate
    world.players[0].pos = Vec2::new(PLAYER_MIN_X, PLAYER_MIN_Y);
    world.players[1].pos = Vec2::new(PLAYER_MAX_X, PLAYER_MAX_Y);
    // Two minutes of idle play
    for _ in 0..((120.0 / SIM_DT) as u32) {
        tick(&mut world, &idle(), SIM_DT);
        assert!(world.resources.len() <= RESOURCE_CAP);
        assert!(world.hazards.len() <= HAZARD_CAP);
        assert!(world.coffees.len() <= COFFEE_CAP);
        assert!(world.timers.resource <= RESOURCE_SPAWN_INTERVAL + SIM_DT);
        assert!(world.timers.coffee <= COFFEE_SPAWN_INTERVAL + SIM_DT);
        assert!(world.timers.hazard <= HAZARD_SPAWN_INTERVAL + SIM_DT);
    }
    // The resource cap is actually reached under idle pressure
    assert_eq!(world.resources.len(), RESOURCE_CAP);
}
