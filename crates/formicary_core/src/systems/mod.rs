//! Per-ant systems, run by the world in a fixed order every tick.

pub mod behavior;
pub mod digging;
pub mod evolution;
pub mod foraging;
pub mod movement;
pub mod transit;

use crate::config::AppConfig;
use crate::lifecycle::consume_energy;
use crate::pheromone::{PheromoneDeposit, PheromoneField, PheromoneType};
use crate::underground::UndergroundGrid;
use digging::DigOutcome;
use formicary_data::{Ant, AntState, Colony, FoodSource, Layer, Obstacle};
use rand::Rng;

/// Borrowed world state one ant acts on.
pub struct AntContext<'a> {
    pub config: &'a AppConfig,
    pub pheromones: &'a PheromoneField,
    pub obstacles: &'a [Obstacle],
    pub food_sources: &'a mut [FoodSource],
    pub colony: &'a mut Colony,
    pub underground: &'a mut UndergroundGrid,
    pub width: f64,
    pub height: f64,
}

/// What one ant did this tick, applied and counted by the caller.
#[derive(Debug, Default)]
pub struct AntOutput {
    pub pheromones: Vec<PheromoneDeposit>,
    pub delivered: f64,
    pub picked_up: f64,
    pub eaten: f64,
    pub dig: Option<DigOutcome>,
    pub died: bool,
}

/// Advances one ant by `dt`: metabolism, digging, state machine, steering,
/// motion, layer constraints and trail laying, in that order.
pub fn step_ant<R: Rng>(
    ant: &mut Ant,
    ctx: &mut AntContext<'_>,
    output: &mut AntOutput,
    dt: f64,
    rng: &mut R,
) {
    let config = ctx.config;

    consume_energy(ant, &config.metabolism, dt);
    if ant.is_dead() {
        output.died = true;
        return;
    }
    ant.time_in_state += dt;
    ant.time_since_turn += dt;
    ant.time_since_transition += dt;

    if ant.state == AntState::Digging {
        output.dig = digging::advance_digging(
            ant,
            ctx.underground,
            &config.underground,
            &config.traits,
            dt,
            rng,
        );
    } else {
        digging::try_start_digging(ant, ctx.underground, &config.underground, dt, rng);
    }

    behavior::update_state(ant, &config.behavior, dt, rng);
    foraging::steer(ant, ctx, output, dt, rng);
    movement::apply_inertia(ant, config.movement.turn_rate, dt);

    match ant.layer {
        Layer::Surface => {
            movement::avoid_obstacles(ant, ctx.obstacles, &config.movement);
            movement::integrate(ant, dt);
            movement::enforce_bounds(ant, ctx.width, ctx.height);
            if let Some(contact) = movement::resolve_penetration(ant, ctx.obstacles) {
                output.pheromones.push(PheromoneDeposit {
                    x: contact.x,
                    y: contact.y,
                    kind: PheromoneType::Danger,
                    amount: config.pheromone.danger_deposit_amount,
                });
            }
        }
        Layer::Underground => {
            let cruise = movement::ant_speed(ant, &config.movement);
            movement::integrate_underground(ant, ctx.underground, cruise, dt, rng);
            movement::confine_underground(ant, ctx.underground);
        }
    }

    if let Some(deposit) = foraging::trail_deposit(ant, &config.pheromone, dt) {
        output.pheromones.push(deposit);
    }
}
