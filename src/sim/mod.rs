//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable player iteration order (P1 before P2) for collection tie-breaks
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{
    Coffee, GameEvent, Hazard, HazardKind, Inventory, MatchPhase, Player, PlayerId, Projectile,
    Resource, ResourceKind, WorldState,
};
pub use tick::{PlayerInput, TickInput, tick};
