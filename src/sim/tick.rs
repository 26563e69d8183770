//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically, plus the
//! round/match state machine. One call per frame; the caller supplies the
//! elapsed time and an input snapshot, nothing else mutates the world.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::spawn;
use super::state::{Facing, GameEvent, MatchPhase, PlayerId, Projectile, WorldState};
use crate::consts::*;

/// One player's control state for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Held directional inputs
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire just pressed this tick
    pub fire: bool,
    /// Start/confirm just pressed this tick
    pub start: bool,
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub p1: PlayerInput,
    pub p2: PlayerInput,
}

impl TickInput {
    pub fn player(&self, id: PlayerId) -> &PlayerInput {
        match id {
            PlayerId::One => &self.p1,
            PlayerId::Two => &self.p2,
        }
    }

    fn start_pressed(&self) -> bool {
        self.p1.start || self.p2.start
    }
}

/// Advance the world by one tick of `dt` seconds
pub fn tick(world: &mut WorldState, input: &TickInput, dt: f32) {
    world.clock += dt as f64;

    match world.phase {
        MatchPhase::Playing => run_simulation(world, input, dt),

        // A finished round resolves on the following tick so the phase is
        // observable; a start press anywhere in the between-round flow
        // restarts the whole match instead.
        MatchPhase::RoundOver => {
            if input.start_pressed() {
                restart_match(world);
            } else {
                resolve_round_over(world);
            }
        }

        MatchPhase::Countdown { display, next_at } => {
            if input.start_pressed() {
                // Replacing the phase discards the pending deadline, so a
                // stale countdown can never fire after a manual restart
                restart_match(world);
            } else if world.clock >= next_at {
                world.phase = match display {
                    0 => {
                        start_next_round(world);
                        return;
                    }
                    1 => MatchPhase::Countdown {
                        display: 0,
                        next_at: next_at + COUNTDOWN_FINAL_DELAY_SECS,
                    },
                    n => MatchPhase::Countdown {
                        display: n - 1,
                        next_at: next_at + COUNTDOWN_STEP_SECS,
                    },
                };
            }
        }

        MatchPhase::MatchOver { .. } => {
            if input.start_pressed() {
                restart_match(world);
            }
        }
    }
}

/// One tick of active gameplay. Only runs in `Playing`.
fn run_simulation(world: &mut WorldState, input: &TickInput, dt: f32) {
    let clock = world.clock;

    // 1. Movement: per-axis displacement from held inputs, hard-clamped to
    // the playfield, facing from the dominant movement axis
    for id in PlayerId::ALL {
        let held = input.player(id);
        let step = world.players[id.index()].speed() * dt;
        let mut delta = Vec2::ZERO;
        if held.up {
            delta.y -= step;
        }
        if held.down {
            delta.y += step;
        }
        if held.left {
            delta.x -= step;
        }
        if held.right {
            delta.x += step;
        }

        let player = &mut world.players[id.index()];
        player.pos += delta;
        player.pos.x = player.pos.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        player.pos.y = player.pos.y.clamp(PLAYER_MIN_Y, PLAYER_MAX_Y);
        if delta != Vec2::ZERO {
            player.facing = facing_from_delta(delta);
        }
    }

    // 2. Deposit: carried inventory converts to progress at the player's own
    // base. At most once per tick, no-op when empty-handed.
    for id in PlayerId::ALL {
        let player = &mut world.players[id.index()];
        if !player.inventory.is_empty()
            && player.base.expand(BASE_CAPTURE_MARGIN).contains(player.pos)
        {
            let amount = player.inventory.total_points();
            player.progress = (player.progress + amount).min(WIN_PROGRESS);
            player.inventory.clear();
            world.events.push(GameEvent::Deposited { player: id, amount });
        }
    }

    // 3. Resource collection. P1 is checked before P2: the fixed iteration
    // order is the tie-break when both hitboxes cover the same pickup.
    let mut i = 0;
    while i < world.resources.len() {
        let pos = world.resources[i].pos;
        let collector = PlayerId::ALL
            .into_iter()
            .find(|id| world.players[id.index()].hitbox().contains(pos));
        if let Some(id) = collector {
            let kind = world.resources.remove(i).kind;
            world.players[id.index()].inventory.add(kind);
            world.events.push(GameEvent::ResourceCollected { player: id, kind });
        } else {
            i += 1;
        }
    }

    // 4. Hazard motion: mobile hazards bounce off the field margins and
    // occasionally wobble their heading so the paths never settle into a
    // fixed loop
    for hz in world.hazards.iter_mut() {
        if !hz.kind.is_mobile() {
            continue;
        }
        hz.pos += hz.vel * dt;

        if hz.pos.x <= HAZARD_MIN_X || hz.pos.x >= HAZARD_MAX_X {
            hz.pos.x = hz.pos.x.clamp(HAZARD_MIN_X, HAZARD_MAX_X);
            hz.vel.x = -hz.vel.x;
        }
        if hz.pos.y <= HAZARD_MIN_Y || hz.pos.y >= HAZARD_MAX_Y {
            hz.pos.y = hz.pos.y.clamp(HAZARD_MIN_Y, HAZARD_MAX_Y);
            hz.vel.y = -hz.vel.y;
        }

        if world.rng.random::<f32>() < HEADING_JITTER_RATE * dt {
            let jitter = world.rng.random_range(-HEADING_JITTER_MAX..=HEADING_JITTER_MAX);
            let heading = hz.vel.y.atan2(hz.vel.x) + jitter;
            hz.vel = Vec2::new(heading.cos(), heading.sin()) * BUG_SPEED;
        }
    }

    // 5. Hazard collision. An invulnerable player takes no damage and the
    // hazard survives to hit them again once the window expires.
    let mut i = 0;
    'hazards: while i < world.hazards.len() {
        let pos = world.hazards[i].pos;
        for id in PlayerId::ALL {
            let player = &world.players[id.index()];
            if !player.hitbox().contains(pos) || player.is_invulnerable(clock) {
                continue;
            }
            let kind = world.hazards.remove(i).kind;
            let penalty = kind.penalty();
            let player = &mut world.players[id.index()];
            player.progress = (player.progress - penalty).max(0.0);
            player.invulnerable_until = clock + INVULN_DURATION as f64;
            world.events.push(GameEvent::HazardHit { player: id, kind, penalty });
            continue 'hazards;
        }
        i += 1;
    }

    // 6. Coffee collection: first containing player gets the timed boost
    let mut i = 0;
    while i < world.coffees.len() {
        let pos = world.coffees[i].pos;
        let drinker = PlayerId::ALL
            .into_iter()
            .find(|id| world.players[id.index()].hitbox().contains(pos));
        if let Some(id) = drinker {
            world.coffees.remove(i);
            world.players[id.index()].boost_remaining = BOOST_DURATION;
            world.events.push(GameEvent::CoffeeCollected { player: id });
        } else {
            i += 1;
        }
    }

    // 7a. Fire: cooldown-gated, aimed at the opponent's position at fire time
    for id in PlayerId::ALL {
        if !input.player(id).fire || !world.players[id.index()].can_fire(clock) {
            continue;
        }
        let shooter = &world.players[id.index()];
        let target_pos = world.players[id.opponent().index()].pos;
        let dir = (target_pos - shooter.pos)
            .try_normalize()
            .unwrap_or_else(|| facing_vec(shooter.facing));
        let pos = shooter.pos;
        world.players[id.index()].shot_ready_at = clock + SHOT_COOLDOWN as f64;
        world.projectiles.push(Projectile {
            owner: id,
            pos,
            vel: dir * PROJECTILE_SPEED,
        });
        world.events.push(GameEvent::ProjectileFired { player: id });
    }

    // 7b. Projectile advance: hit the opponent or fly off the field.
    // Invulnerable targets are passed through, not consumed against.
    let cull_bounds = Rect::new(
        -PROJECTILE_BOUNDS_MARGIN,
        -PROJECTILE_BOUNDS_MARGIN,
        FIELD_WIDTH + PROJECTILE_BOUNDS_MARGIN * 2.0,
        FIELD_HEIGHT + PROJECTILE_BOUNDS_MARGIN * 2.0,
    );
    let mut i = 0;
    while i < world.projectiles.len() {
        let vel = world.projectiles[i].vel;
        world.projectiles[i].pos += vel * dt;
        let pos = world.projectiles[i].pos;
        let shooter = world.projectiles[i].owner;
        let target_id = shooter.opponent();

        let target = &world.players[target_id.index()];
        if target.hitbox().contains(pos) && !target.is_invulnerable(clock) {
            let target = &mut world.players[target_id.index()];
            target.progress = (target.progress - PROJECTILE_PENALTY).max(0.0);
            target.invulnerable_until = clock + INVULN_DURATION as f64;
            world.projectiles.remove(i);
            world.events.push(GameEvent::ProjectileHit {
                shooter,
                target: target_id,
                penalty: PROJECTILE_PENALTY,
            });
        } else if !cull_bounds.contains(pos) {
            world.projectiles.remove(i);
        } else {
            i += 1;
        }
    }

    // 8. Timed spawns
    spawn::run_spawners(world, dt);

    // 9. Win check: terminal for this tick's simulation
    if world.players.iter().any(|p| p.progress >= WIN_PROGRESS) {
        end_round(world);
        return;
    }

    // 10. Boost decay. Cooldown and invulnerability are absolute deadlines
    // against the clock, nothing to decrement.
    for player in &mut world.players {
        player.boost_remaining = (player.boost_remaining - dt).max(0.0);
    }
}

fn facing_from_delta(delta: Vec2) -> Facing {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 { Facing::East } else { Facing::West }
    } else if delta.y > 0.0 {
        Facing::South
    } else {
        Facing::North
    }
}

fn facing_vec(facing: Facing) -> Vec2 {
    match facing {
        Facing::North => Vec2::new(0.0, -1.0),
        Facing::East => Vec2::new(1.0, 0.0),
        Facing::South => Vec2::new(0.0, 1.0),
        Facing::West => Vec2::new(-1.0, 0.0),
    }
}

/// A player reached 100%: score the round, clear the field, stop simulating
fn end_round(world: &mut WorldState) {
    let p1 = world.players[0].progress;
    let p2 = world.players[1].progress;
    let winner = if p1 > p2 {
        Some(PlayerId::One)
    } else if p2 > p1 {
        Some(PlayerId::Two)
    } else {
        // Both crossed 100 on the same tick: a draw, nobody scores
        None
    };
    if let Some(id) = winner {
        world.round_wins[id.index()] += 1;
    }
    log::info!(
        "Round {} over: winner {:?} (P1 {:.0}% / P2 {:.0}%, wins {}-{})",
        world.round,
        winner,
        p1,
        p2,
        world.round_wins[0],
        world.round_wins[1]
    );

    world.resources.clear();
    world.hazards.clear();
    world.coffees.clear();
    world.projectiles.clear();

    world.events.push(GameEvent::RoundEnded { round: world.round, winner });
    world.phase = MatchPhase::RoundOver;
}

/// Decide where a finished round goes: match over, or countdown to the next
fn resolve_round_over(world: &mut WorldState) {
    let decided = world
        .round_wins
        .iter()
        .any(|&w| w >= ROUND_WINS_TO_TAKE_MATCH)
        || world.round >= MAX_ROUNDS;

    if decided {
        let winner = match world.round_wins[0].cmp(&world.round_wins[1]) {
            std::cmp::Ordering::Greater => Some(PlayerId::One),
            std::cmp::Ordering::Less => Some(PlayerId::Two),
            std::cmp::Ordering::Equal => None,
        };
        log::info!("Match over: winner {:?}", winner);
        world.events.push(GameEvent::MatchEnded { winner });
        world.phase = MatchPhase::MatchOver { winner };
    } else {
        world.phase = MatchPhase::Countdown {
            display: COUNTDOWN_START,
            next_at: world.clock + COUNTDOWN_STEP_SECS,
        };
    }
}

/// Countdown finished: next round on a freshly reset level
fn start_next_round(world: &mut WorldState) {
    world.round += 1;
    world.reset_round();
    world.phase = MatchPhase::Playing;
    world.events.push(GameEvent::RoundStarting { round: world.round });
    log::info!("Round {} starting", world.round);
}

/// Full match restart: round 1, win counters zeroed, fresh level
fn restart_match(world: &mut WorldState) {
    world.round = 1;
    world.round_wins = [0, 0];
    world.reset_round();
    world.phase = MatchPhase::Playing;
    world.events.push(GameEvent::RoundStarting { round: 1 });
    log::info!("Match restarted");
}
