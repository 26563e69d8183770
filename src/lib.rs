//! Race to AGI - a two-player arcade resource race
//!
//! Two startups scramble around a shared playfield collecting Data, Compute
//! and Funding, hauling them back to their HQ to push a 0-100% progress bar
//! toward AGI. Roaming hazards knock progress back, coffee grants a speed
//! boost, and each player can fire a cooldown-limited projectile at the
//! other. First to 100% takes the round; best of three takes the match.
//!
//! This crate is the deterministic core only:
//! - `sim`: game state, fixed-contract tick, collisions, spawning, and the
//!   round/match state machine
//!
//! Rendering, audio and input binding live outside the crate. They read
//! entity positions and HUD scalars from [`sim::WorldState`] and drain the
//! per-tick event queue for transient feedback; nothing they do feeds back
//! into gameplay.

pub mod sim;

pub use sim::{GameEvent, MatchPhase, PlayerId, TickInput, WorldState, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the arcade cabinet display)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player movement bounds (HUD strips at top/bottom are off limits)
    pub const PLAYER_MIN_X: f32 = 15.0;
    pub const PLAYER_MAX_X: f32 = 785.0;
    pub const PLAYER_MIN_Y: f32 = 80.0;
    pub const PLAYER_MAX_Y: f32 = 570.0;

    /// Player hitbox (square, centered on position)
    pub const PLAYER_HITBOX: f32 = 64.0;
    /// Bases capture a deposit when the player center is within this margin
    /// of the base rectangle (half the hitbox, so "hitbox touches base")
    pub const BASE_CAPTURE_MARGIN: f32 = PLAYER_HITBOX / 2.0;

    /// Base movement speed in px/s
    pub const BASE_SPEED: f32 = 90.0;
    /// Speed multiplier while caffeinated
    pub const BOOST_MULTIPLIER: f32 = 1.5;
    /// Coffee boost duration in seconds
    pub const BOOST_DURATION: f32 = 30.0;

    /// Round ends when a player's progress reaches this value
    pub const WIN_PROGRESS: f32 = 100.0;

    /// Entity spawn area (inset so icons never hug the walls)
    pub const SPAWN_MIN_X: f32 = 100.0;
    pub const SPAWN_MAX_X: f32 = 700.0;
    pub const SPAWN_MIN_Y: f32 = 100.0;
    pub const SPAWN_MAX_Y: f32 = 540.0;

    /// Resource spawn cadence
    pub const RESOURCE_SPAWN_INTERVAL: f32 = 2.0;
    pub const RESOURCE_CAP: usize = 10;
    /// Resources seeded at the start of every round
    pub const INITIAL_RESOURCES: usize = 5;

    /// Coffee spawn cadence
    pub const COFFEE_SPAWN_INTERVAL: f32 = 15.0;
    pub const COFFEE_CAP: usize = 2;

    /// Hazard spawn cadence
    pub const HAZARD_SPAWN_INTERVAL: f32 = 5.0;
    pub const HAZARD_CAP: usize = 3;

    /// Mobile hazards bounce inside this rectangle
    pub const HAZARD_MIN_X: f32 = 40.0;
    pub const HAZARD_MAX_X: f32 = 760.0;
    pub const HAZARD_MIN_Y: f32 = 100.0;
    pub const HAZARD_MAX_Y: f32 = 560.0;

    /// Bug hazard speed in px/s
    pub const BUG_SPEED: f32 = 60.0;
    /// Expected heading perturbations per second for mobile hazards
    pub const HEADING_JITTER_RATE: f32 = 1.2;
    /// Maximum heading perturbation in radians
    pub const HEADING_JITTER_MAX: f32 = 0.4;

    /// Seconds between shots per player
    pub const SHOT_COOLDOWN: f32 = 1.5;
    /// Projectile travel speed in px/s
    pub const PROJECTILE_SPEED: f32 = 260.0;
    /// Progress lost when a projectile connects
    pub const PROJECTILE_PENALTY: f32 = 8.0;
    /// Projectiles are culled this far outside the playfield
    pub const PROJECTILE_BOUNDS_MARGIN: f32 = 64.0;

    /// Damage immunity window after any hit, in seconds
    pub const INVULN_DURATION: f32 = 2.0;

    /// Match structure
    pub const MAX_ROUNDS: u32 = 3;
    pub const ROUND_WINS_TO_TAKE_MATCH: u32 = 2;

    /// Between-round countdown: starts at 3, one decrement per second
    pub const COUNTDOWN_START: u8 = 3;
    pub const COUNTDOWN_STEP_SECS: f64 = 1.0;
    /// Short beat between "go" and the next round actually starting
    pub const COUNTDOWN_FINAL_DELAY_SECS: f64 = 0.5;
}
