//! Timed, capped, randomized entity spawning
//!
//! Each category (resources, coffee, hazards) has its own accumulator and
//! population cap. Once an accumulator exceeds its interval it is always
//! reset, whether or not the spawn went through - a capped population skips
//! the spawn rather than queueing it, so a freed slot yields exactly one new
//! entity on the next due interval and the accumulator stays bounded.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Coffee, Hazard, HazardKind, Resource, ResourceKind, WorldState};
use crate::consts::*;

/// Uniform random point in the inner spawn area
fn spawn_point(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(SPAWN_MIN_X..=SPAWN_MAX_X),
        rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y),
    )
}

/// Resource kind chosen uniformly among the three
fn roll_resource_kind(rng: &mut Pcg32) -> ResourceKind {
    ResourceKind::ALL[rng.random_range(0..ResourceKind::ALL.len())]
}

/// Weighted hazard roll: 20% scandal, 15% leak, 65% bug
fn roll_hazard_kind(rng: &mut Pcg32) -> HazardKind {
    let roll: f32 = rng.random();
    if roll < 0.20 {
        HazardKind::Scandal
    } else if roll < 0.35 {
        HazardKind::Leak
    } else {
        HazardKind::Bug
    }
}

pub fn spawn_resource(world: &mut WorldState) {
    let pos = spawn_point(&mut world.rng);
    let kind = roll_resource_kind(&mut world.rng);
    world.resources.push(Resource { pos, kind });
}

pub fn spawn_coffee(world: &mut WorldState) {
    let pos = spawn_point(&mut world.rng);
    world.coffees.push(Coffee { pos });
}

pub fn spawn_hazard(world: &mut WorldState) {
    let pos = spawn_point(&mut world.rng);
    let kind = roll_hazard_kind(&mut world.rng);
    let vel = if kind.is_mobile() {
        let heading = world.rng.random_range(0.0..std::f32::consts::TAU);
        Vec2::new(heading.cos(), heading.sin()) * BUG_SPEED
    } else {
        Vec2::ZERO
    };
    world.hazards.push(Hazard { pos, vel, kind });
}

/// Seed the round-start resource population
pub fn seed_initial_resources(world: &mut WorldState) {
    for _ in 0..INITIAL_RESOURCES {
        spawn_resource(world);
    }
}

/// Advance all three spawn accumulators by `dt` and spawn where due
pub fn run_spawners(world: &mut WorldState, dt: f32) {
    world.timers.resource += dt;
    if world.timers.resource > RESOURCE_SPAWN_INTERVAL {
        world.timers.resource = 0.0;
        if world.resources.len() < RESOURCE_CAP {
            spawn_resource(world);
        }
    }

    world.timers.coffee += dt;
    if world.timers.coffee > COFFEE_SPAWN_INTERVAL {
        world.timers.coffee = 0.0;
        if world.coffees.len() < COFFEE_CAP {
            spawn_coffee(world);
        }
    }

    world.timers.hazard += dt;
    if world.timers.hazard > HAZARD_SPAWN_INTERVAL {
        world.timers.hazard = 0.0;
        if world.hazards.len() < HAZARD_CAP {
            spawn_hazard(world);
        }
    }
}
