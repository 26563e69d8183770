//! Race to AGI entry point
//!
//! Headless demo driver: runs a seeded match at a fixed timestep with two
//! scripted pilots and logs the event stream. Doubles as a smoke run for the
//! whole simulation without any presentation layer attached.

use race_to_agi::consts::*;
use race_to_agi::sim::{
    GameEvent, MatchPhase, PlayerId, PlayerInput, TickInput, WorldState, tick,
};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Race to AGI demo match, seed {seed}");

    let mut world = WorldState::new(seed);

    // Ten minutes of simulated play, far more than a match needs
    let max_ticks = (600.0 / SIM_DT) as u32;
    let mut finished = false;
    for _ in 0..max_ticks {
        let input = drive(&world);
        tick(&mut world, &input, SIM_DT);

        for event in world.drain_events() {
            report(&world, event);
        }

        if let MatchPhase::MatchOver { winner } = world.phase {
            match winner {
                Some(id) => log::info!("{:?} achieved AGI!", id),
                None => log::info!("No AGI today - the match is a draw"),
            }
            finished = true;
            break;
        }
    }
    if !finished {
        log::warn!("Demo hit the tick budget before the match was decided");
    }

    log::info!(
        "Final: round {} | P1 {:.0}% ({} wins) | P2 {:.0}% ({} wins)",
        world.round,
        world.player(PlayerId::One).progress,
        world.round_wins(PlayerId::One),
        world.player(PlayerId::Two).progress,
        world.round_wins(PlayerId::Two),
    );

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string_pretty(&world) {
            Ok(json) => log::debug!("final world state:\n{json}"),
            Err(e) => log::warn!("could not serialize world state: {e}"),
        }
    }
}

fn report(world: &WorldState, event: GameEvent) {
    match event {
        GameEvent::ResourceCollected { player, kind } => {
            log::info!("{player:?} collected {kind:?}");
        }
        GameEvent::Deposited { player, amount } => {
            log::info!(
                "{player:?} deposited +{amount:.0}% (now {:.0}%)",
                world.player(player).progress
            );
        }
        GameEvent::HazardHit { player, kind, penalty } => {
            log::info!("{player:?} ran into {kind:?}: -{penalty:.0}%");
        }
        GameEvent::CoffeeCollected { player } => {
            log::info!("{player:?} drank coffee - speed boost!");
        }
        GameEvent::ProjectileFired { player } => {
            log::debug!("{player:?} fired");
        }
        GameEvent::ProjectileHit { shooter, target, penalty } => {
            log::info!("{shooter:?} hit {target:?} for -{penalty:.0}%");
        }
        GameEvent::RoundEnded { round, winner } => match winner {
            Some(id) => log::info!("Round {round} goes to {id:?}"),
            None => log::info!("Round {round} ends in a tie"),
        },
        GameEvent::MatchEnded { .. } => {}
        GameEvent::RoundStarting { round } => {
            log::info!("Round {round} starting");
        }
    }
}

/// Scripted pilots for both players, demo only: chase the nearest resource,
/// head home with a decent load, take potshots when the cooldown allows
fn drive(world: &WorldState) -> TickInput {
    TickInput {
        p1: drive_player(world, PlayerId::One),
        p2: drive_player(world, PlayerId::Two),
    }
}

fn drive_player(world: &WorldState, id: PlayerId) -> PlayerInput {
    let player = world.player(id);

    let target = if player.inventory.total_points() >= 30.0 {
        player.base.center()
    } else {
        world
            .resources
            .iter()
            .min_by(|a, b| {
                let da = (a.pos - player.pos).length_squared();
                let db = (b.pos - player.pos).length_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|r| r.pos)
            .unwrap_or_else(|| player.base.center())
    };

    let delta = target - player.pos;
    let opponent_dist = (world.player(id.opponent()).pos - player.pos).length();

    PlayerInput {
        up: delta.y < -2.0,
        down: delta.y > 2.0,
        left: delta.x < -2.0,
        right: delta.x > 2.0,
        fire: player.can_fire(world.clock) && opponent_dist < 300.0,
        start: false,
    }
}
