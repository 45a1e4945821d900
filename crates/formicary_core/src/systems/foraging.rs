//! Per-state steering and food handling: finding food, carrying it home,
//! delivering it, eating from the store and laying trails.

use super::behavior::{change_state, is_hungry};
use super::movement::{ant_speed, sense_gradient, Sensed};
use super::{AntContext, AntOutput};
use crate::colony::ColonyLogic;
use crate::config::{AppConfig, PheromoneConfig};
use crate::geometry::{distance, normalize, random_heading, seek};
use crate::lifecycle::{carry_capacity, eat_from_colony, is_at_home, load_food, unload_food};
use crate::pheromone::{PheromoneDeposit, PheromoneType};
use crate::traits::{TraitBounds, TraitLogic};
use crate::underground::brood::feed_queen;
use crate::underground::UndergroundGrid;
use formicary_data::{Ant, AntState, Colony, FoodSource, Layer, Position, Velocity};
use rand::Rng;

/// Weight of the home direction when a leashed wanderer turns back.
const LEASH_PULL: f64 = 1.5;
/// Weight of the nest gradient relative to the straight line home.
const NEST_BLEND: f64 = 0.5;

/// Sets the target velocity for the ant's state and handles food on the way.
pub fn steer<R: Rng>(ant: &mut Ant, ctx: &mut AntContext<'_>, output: &mut AntOutput, dt: f64, rng: &mut R) {
    match ant.layer {
        Layer::Surface => steer_surface(ant, ctx, output, dt, rng),
        Layer::Underground => steer_underground(ant, ctx, output, dt, rng),
    }
}

fn steer_surface<R: Rng>(ant: &mut Ant, ctx: &mut AntContext<'_>, output: &mut AntOutput, dt: f64, rng: &mut R) {
    match ant.state {
        AntState::Idle => {
            ant.target_velocity = Velocity::ZERO;
            if is_at_home(ant, ctx.colony, ctx.config.movement.home_arrival_distance) {
                output.eaten += eat_from_colony(ant, ctx.colony, &ctx.config.metabolism, dt);
            }
        }
        AntState::Digging => ant.target_velocity = Velocity::ZERO,
        AntState::Wandering => wander(ant, ctx, rng),
        AntState::Foraging => forage(ant, ctx, output, rng),
        AntState::Returning => return_home(ant, ctx, output, rng),
    }
}

fn steer_underground<R: Rng>(
    ant: &mut Ant,
    ctx: &mut AntContext<'_>,
    output: &mut AntOutput,
    dt: f64,
    rng: &mut R,
) {
    let cruise = ant_speed(ant, &ctx.config.movement);
    match ant.state {
        AntState::Idle => {
            ant.target_velocity = Velocity::ZERO;
            output.eaten += eat_from_colony(ant, ctx.colony, &ctx.config.metabolism, dt);
        }
        AntState::Digging => ant.target_velocity = Velocity::ZERO,
        AntState::Wandering => {
            if needs_new_heading(ant, ctx.config.movement.wander_interval) {
                ant.target_velocity = random_heading(rng, cruise);
                ant.time_since_turn = 0.0;
            }
        }
        AntState::Foraging => {
            let exit = ctx.underground.entrance_position();
            ant.target_velocity = seek(ant.position, exit, cruise);
        }
        AntState::Returning => {
            output.delivered += deliver_food(ant, ctx.colony, Some(&mut *ctx.underground), ctx.config);
            finish_return(ant, ctx.config);
        }
    }
}

#[inline]
fn needs_new_heading(ant: &Ant, wander_interval: f64) -> bool {
    ant.time_since_turn >= wander_interval || ant.target_velocity == Velocity::ZERO
}

fn random_unit<R: Rng>(rng: &mut R) -> (f64, f64) {
    let v = random_heading(rng, 1.0);
    (v.vx, v.vy)
}

/// Bends a heading back toward the colony once the ant is beyond its leash.
fn apply_leash(ant: &Ant, colony: &Colony, heading: (f64, f64), config: &AppConfig) -> (f64, f64) {
    let leash = config.movement.wander_leash * ant.traits.wandering_radius;
    if distance(ant.position, colony.position) <= leash {
        return heading;
    }
    let Some((hx, hy)) = normalize(
        colony.position.x - ant.position.x,
        colony.position.y - ant.position.y,
    ) else {
        return heading;
    };
    normalize(heading.0 + hx * LEASH_PULL, heading.1 + hy * LEASH_PULL).unwrap_or((hx, hy))
}

fn set_heading(ant: &mut Ant, heading: (f64, f64), cruise: f64) {
    ant.target_velocity = Velocity::new(heading.0 * cruise, heading.1 * cruise);
    ant.time_since_turn = 0.0;
}

fn wander<R: Rng>(ant: &mut Ant, ctx: &mut AntContext<'_>, rng: &mut R) {
    let config = ctx.config;
    let cruise = ant_speed(ant, &config.movement);
    // Hungry wanderers drift along nest trails; the rest look for food trails.
    let kind = if is_hungry(ant, &config.behavior) {
        PheromoneType::Nest
    } else {
        PheromoneType::Food
    };
    let sensed = sense_gradient(
        ctx.pheromones,
        kind,
        ant.position,
        ant.traits.pheromone_sensitivity,
        &config.pheromone,
        rng,
    );
    let heading = match sensed {
        Sensed::Gradient(x, y) => (x, y),
        Sensed::Explore => random_unit(rng),
        Sensed::Faint if needs_new_heading(ant, config.movement.wander_interval) => random_unit(rng),
        Sensed::Faint => return,
    };
    let heading = apply_leash(ant, ctx.colony, heading, config);
    set_heading(ant, heading, cruise);
}

/// Nearest non-empty food source whose edge lies within `sense_radius`, with its gap.
pub fn nearest_visible_food(
    position: Position,
    food_sources: &[FoodSource],
    sense_radius: f64,
) -> Option<(usize, f64)> {
    food_sources
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_depleted())
        .map(|(i, f)| (i, distance(position, f.position) - f.radius))
        .filter(|(_, gap)| *gap <= sense_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn forage<R: Rng>(ant: &mut Ant, ctx: &mut AntContext<'_>, output: &mut AntOutput, rng: &mut R) {
    let config = ctx.config;
    let cruise = ant_speed(ant, &config.movement);

    if ant.carried_food >= carry_capacity(&ant.traits, &config.metabolism) {
        change_state(ant, AntState::Returning);
        ant.target_velocity = seek(ant.position, ctx.colony.position, cruise);
        return;
    }

    if let Some((idx, gap)) =
        nearest_visible_food(ant.position, ctx.food_sources, config.movement.food_sense_radius)
    {
        if gap <= 0.0 {
            let taken = pick_up(ant, ctx, idx);
            if taken > 0.0 {
                output.picked_up += taken;
                change_state(ant, AntState::Returning);
                ant.target_velocity = seek(ant.position, ctx.colony.position, cruise);
                return;
            }
        }
        ant.target_velocity = seek(ant.position, ctx.food_sources[idx].position, cruise);
        return;
    }

    let sensed = sense_gradient(
        ctx.pheromones,
        PheromoneType::Food,
        ant.position,
        ant.traits.pheromone_sensitivity,
        &config.pheromone,
        rng,
    );
    match sensed {
        Sensed::Gradient(x, y) => {
            ant.followed_trail = true;
            set_heading(ant, (x, y), cruise);
        }
        Sensed::Faint if !needs_new_heading(ant, config.movement.wander_interval) => {}
        Sensed::Explore | Sensed::Faint => {
            let heading = apply_leash(ant, ctx.colony, random_unit(rng), config);
            set_heading(ant, heading, cruise);
        }
    }
}

/// Loads food from a source and applies the pickup nudges.
fn pick_up(ant: &mut Ant, ctx: &mut AntContext<'_>, idx: usize) -> f64 {
    let config = ctx.config;
    let food = &mut ctx.food_sources[idx];
    let taken = load_food(ant, food.remaining, &config.metabolism);
    food.remaining = (food.remaining - taken).max(0.0);
    if taken <= 0.0 {
        return 0.0;
    }

    let bounds = TraitBounds::from(&config.traits);
    let step = config.traits.nudge_step;
    ant.traits.nudge_speed(step, bounds);
    if ant.followed_trail {
        ant.traits.nudge_sensitivity(step, bounds);
    }
    let leash = config.movement.wander_leash * ant.traits.wandering_radius;
    if distance(ant.position, ctx.colony.position) > leash * 0.5 {
        ant.traits.nudge_wander_radius(step, bounds);
    }
    taken
}

fn return_home<R: Rng>(ant: &mut Ant, ctx: &mut AntContext<'_>, output: &mut AntOutput, rng: &mut R) {
    let config = ctx.config;
    if is_at_home(ant, ctx.colony, config.movement.home_arrival_distance) {
        output.delivered += deliver_food(ant, ctx.colony, None, config);
        finish_return(ant, config);
        return;
    }

    let cruise = ant_speed(ant, &config.movement);
    let Some((hx, hy)) = normalize(
        ctx.colony.position.x - ant.position.x,
        ctx.colony.position.y - ant.position.y,
    ) else {
        ant.target_velocity = Velocity::ZERO;
        return;
    };
    let heading = sense_gradient(
        ctx.pheromones,
        PheromoneType::Nest,
        ant.position,
        ant.traits.pheromone_sensitivity,
        &config.pheromone,
        rng,
    )
    .direction()
    .and_then(|(gx, gy)| normalize(hx + gx * NEST_BLEND, hy + gy * NEST_BLEND))
    .unwrap_or((hx, hy));
    ant.target_velocity = Velocity::new(heading.0 * cruise, heading.1 * cruise);
}

/// Unloads the ant into the colony store. Underground deliveries pass a share
/// to the queen. Returns the full amount unloaded.
pub fn deliver_food(
    ant: &mut Ant,
    colony: &mut Colony,
    underground: Option<&mut UndergroundGrid>,
    config: &AppConfig,
) -> f64 {
    let load = unload_food(ant);
    if load <= 0.0 {
        return 0.0;
    }
    let to_queen = match underground {
        Some(grid) => feed_queen(grid, load * config.underground.queen_feed_fraction.clamp(0.0, 1.0)),
        None => 0.0,
    };
    colony.deposit_food(load - to_queen);
    ant.traits
        .nudge_carry(config.traits.nudge_step, TraitBounds::from(&config.traits));
    load
}

/// Arrival home: settle into Idle and reward a survived hunger bail-out.
fn finish_return(ant: &mut Ant, config: &AppConfig) {
    if ant.hunger_bailout {
        ant.traits
            .nudge_efficiency(config.traits.nudge_step, TraitBounds::from(&config.traits));
        ant.hunger_bailout = false;
    }
    change_state(ant, AntState::Idle);
    ant.target_velocity = Velocity::ZERO;
}

/// Trail left behind this tick, if any. Nothing is laid underground.
pub fn trail_deposit(ant: &Ant, config: &PheromoneConfig, dt: f64) -> Option<PheromoneDeposit> {
    if ant.layer != Layer::Surface || !(dt.is_finite() && dt > 0.0) {
        return None;
    }
    let (kind, rate) = match ant.state {
        AntState::Foraging | AntState::Wandering => (PheromoneType::Nest, config.nest_deposit_rate),
        AntState::Returning if ant.is_carrying() => (PheromoneType::Food, config.food_deposit_rate),
        _ => return None,
    };
    Some(PheromoneDeposit {
        x: ant.position.x,
        y: ant.position.y,
        kind,
        amount: rate * dt as f32,
    })
}
