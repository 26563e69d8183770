//! Game state and core simulation types
//!
//! Everything the tick function reads or writes lives in [`WorldState`];
//! there are no hidden globals. The whole struct serializes so a run can be
//! dumped and inspected mid-match.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Which player a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Fixed iteration order: P1 before P2 (the documented collection tie-break)
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Cardinal facing, tracked for the presentation layer's character sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

/// Collectible resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Data,
    Compute,
    Funding,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] =
        [ResourceKind::Data, ResourceKind::Compute, ResourceKind::Funding];

    /// Progress granted per unit when deposited
    pub fn points(self) -> f32 {
        match self {
            ResourceKind::Data => 10.0,
            ResourceKind::Compute => 10.0,
            ResourceKind::Funding => 8.0,
        }
    }

    fn index(self) -> usize {
        match self {
            ResourceKind::Data => 0,
            ResourceKind::Compute => 1,
            ResourceKind::Funding => 2,
        }
    }
}

/// Per-kind resource counts carried by a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u32; 3],
}

impl Inventory {
    pub fn count(&self, kind: ResourceKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn add(&mut self, kind: ResourceKind) {
        self.counts[kind.index()] += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total progress value of the carried load
    pub fn total_points(&self) -> f32 {
        ResourceKind::ALL
            .iter()
            .map(|&k| self.count(k) as f32 * k.points())
            .sum()
    }

    pub fn clear(&mut self) {
        self.counts = [0; 3];
    }
}

/// One player's full per-round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    pub facing: Facing,
    pub inventory: Inventory,
    /// Percent toward AGI, clamped to [0, 100]
    pub progress: f32,
    /// Coffee boost countdown in seconds, 0 when inactive
    pub boost_remaining: f32,
    /// Absolute clock time after which the player may fire again
    pub shot_ready_at: f64,
    /// Absolute clock time until which damage is ignored
    pub invulnerable_until: f64,
    /// HQ rectangle, fixed for the match
    pub base: Rect,
    spawn_pos: Vec2,
    spawn_facing: Facing,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        let (spawn_pos, spawn_facing, base) = match id {
            PlayerId::One => (
                Vec2::new(100.0, 100.0),
                Facing::South,
                Rect::new(50.0, 50.0, 100.0, 60.0),
            ),
            PlayerId::Two => (
                Vec2::new(700.0, 500.0),
                Facing::North,
                Rect::new(650.0, 490.0, 100.0, 60.0),
            ),
        };
        Self {
            id,
            pos: spawn_pos,
            facing: spawn_facing,
            inventory: Inventory::default(),
            progress: 0.0,
            boost_remaining: 0.0,
            shot_ready_at: 0.0,
            invulnerable_until: 0.0,
            base,
            spawn_pos,
            spawn_facing,
        }
    }

    /// Square hitbox centered on the player position
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, PLAYER_HITBOX, PLAYER_HITBOX)
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_remaining > 0.0
    }

    /// Movement speed in px/s for the current tick
    pub fn speed(&self) -> f32 {
        if self.is_boosted() {
            BASE_SPEED * BOOST_MULTIPLIER
        } else {
            BASE_SPEED
        }
    }

    pub fn is_invulnerable(&self, clock: f64) -> bool {
        clock < self.invulnerable_until
    }

    pub fn can_fire(&self, clock: f64) -> bool {
        clock >= self.shot_ready_at
    }

    /// Whole boost seconds left, for the HUD caffeine label
    pub fn boost_seconds(&self) -> u32 {
        self.boost_remaining.ceil().max(0.0) as u32
    }

    /// 1.0 right after firing, 0.0 when ready again (HUD cooldown bar)
    pub fn cooldown_fraction(&self, clock: f64) -> f32 {
        (((self.shot_ready_at - clock) as f32) / SHOT_COOLDOWN).clamp(0.0, 1.0)
    }

    /// Back to the spawn corner with everything zeroed, for a fresh round
    pub fn reset_for_round(&mut self) {
        self.pos = self.spawn_pos;
        self.facing = self.spawn_facing;
        self.inventory.clear();
        self.progress = 0.0;
        self.boost_remaining = 0.0;
        self.shot_ready_at = 0.0;
        self.invulnerable_until = 0.0;
    }
}

/// Hazard ("event") kinds, each with its own progress penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Roams the field, bouncing off the margins
    Bug,
    Scandal,
    Leak,
}

impl HazardKind {
    pub fn penalty(self) -> f32 {
        match self {
            HazardKind::Bug => 10.0,
            HazardKind::Scandal => 15.0,
            HazardKind::Leak => 12.0,
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, HazardKind::Bug)
    }
}

/// A hazard on the field. Stationary kinds keep a zero velocity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: HazardKind,
}

/// A resource pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub pos: Vec2,
    pub kind: ResourceKind,
}

/// A coffee pickup: position only, effect is the timed boost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coffee {
    pub pos: Vec2,
}

/// A projectile in flight, aimed at the opponent when fired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Current phase of the round/match state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Simulation active
    Playing,
    /// A round just ended; resolved into Countdown or MatchOver next tick
    RoundOver,
    /// Between rounds: displays 3-2-1, then a short beat, then next round
    Countdown {
        /// Number currently shown; 0 means the final "go" delay
        display: u8,
        /// Absolute clock time of the next step
        next_at: f64,
    },
    /// Terminal until a start press restarts the match
    MatchOver { winner: Option<PlayerId> },
}

/// Discrete notifications for the presentation layer (sounds, labels).
/// Pushed during the tick, drained by the caller; never read back by the sim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ResourceCollected { player: PlayerId, kind: ResourceKind },
    Deposited { player: PlayerId, amount: f32 },
    HazardHit { player: PlayerId, kind: HazardKind, penalty: f32 },
    CoffeeCollected { player: PlayerId },
    ProjectileFired { player: PlayerId },
    ProjectileHit { shooter: PlayerId, target: PlayerId, penalty: f32 },
    RoundEnded { round: u32, winner: Option<PlayerId> },
    MatchEnded { winner: Option<PlayerId> },
    RoundStarting { round: u32 },
}

/// Independent spawn accumulators, in seconds since last spawn intent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub resource: f32,
    pub coffee: f32,
    pub hazard: f32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; serialized so a resumed world spawns identically
    pub rng: Pcg32,
    /// Monotonic simulation clock in seconds, advanced once per tick
    pub clock: f64,
    /// Current round, 1-based
    pub round: u32,
    /// Round wins per player, indexed by `PlayerId::index`
    pub round_wins: [u32; 2],
    pub phase: MatchPhase,
    pub players: [Player; 2],
    pub resources: Vec<Resource>,
    pub hazards: Vec<Hazard>,
    pub coffees: Vec<Coffee>,
    pub projectiles: Vec<Projectile>,
    pub timers: SpawnTimers,
    /// Per-tick notifications; transient, not part of saved state
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl WorldState {
    /// Create a fresh match with the given seed
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: 0.0,
            round: 1,
            round_wins: [0, 0],
            phase: MatchPhase::Playing,
            players: [Player::new(PlayerId::One), Player::new(PlayerId::Two)],
            resources: Vec::new(),
            hazards: Vec::new(),
            coffees: Vec::new(),
            projectiles: Vec::new(),
            timers: SpawnTimers::default(),
            events: Vec::new(),
        };
        super::spawn::seed_initial_resources(&mut world);
        world
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn round_wins(&self, id: PlayerId) -> u32 {
        self.round_wins[id.index()]
    }

    /// Hand the queued notifications to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Level reset: clears the field and both players for a fresh round.
    /// Round-win counters are untouched; only a match reset zeroes those.
    pub fn reset_round(&mut self) {
        self.resources.clear();
        self.hazards.clear();
        self.coffees.clear();
        self.projectiles.clear();
        self.timers = SpawnTimers::default();
        for player in &mut self.players {
            player.reset_for_round();
        }
        super::spawn::seed_initial_resources(self);
    }
}
