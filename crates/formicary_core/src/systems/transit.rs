//! Moving ants between the surface and the nest through the entrance.

use super::behavior::{change_state, roll};
use super::foraging::deliver_food;
use crate::config::AppConfig;
use crate::geometry::distance;
use formicary_data::{Ant, AntState, Colony, Entrance, Layer, Velocity};
use rand::Rng;

/// A completed layer change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub to: Layer,
    /// Food unloaded on the way in.
    pub delivered: f64,
}

/// Whether the ant is close enough to its layer's side of the entrance and rested.
pub fn can_transition(ant: &Ant, entrance: &Entrance, cooldown: f64) -> bool {
    if ant.time_since_transition < cooldown {
        return false;
    }
    let point = match ant.layer {
        Layer::Surface => entrance.surface,
        Layer::Underground => entrance.underground,
    };
    distance(ant.position, point) <= entrance.radius
}

fn wants_to_cross<R: Rng>(ant: &Ant, config: &AppConfig, dt: f64, rng: &mut R) -> bool {
    let transit = &config.transit;
    match (ant.layer, ant.state) {
        (Layer::Surface, AntState::Returning) => true,
        (Layer::Surface, AntState::Idle) => {
            roll(rng, transit.idle_enter_chance * ant.traits.nursing, dt)
        }
        (Layer::Surface, AntState::Wandering) => roll(rng, transit.wander_enter_chance, dt),
        (Layer::Underground, AntState::Foraging) => true,
        (Layer::Underground, AntState::Idle) => roll(rng, transit.idle_exit_chance, dt),
        (Layer::Underground, AntState::Wandering) => roll(rng, transit.wander_exit_chance, dt),
        _ => false,
    }
}

/// Moves the ant through the entrance when eligible. Ants heading home drop
/// their load at the colony as they enter.
pub fn try_transition<R: Rng>(
    ant: &mut Ant,
    entrance: &Entrance,
    colony: &mut Colony,
    config: &AppConfig,
    dt: f64,
    rng: &mut R,
) -> Option<Transition> {
    if ant.state == AntState::Digging
        || !can_transition(ant, entrance, config.transit.transition_cooldown)
        || !wants_to_cross(ant, config, dt, rng)
    {
        return None;
    }

    let mut delivered = 0.0;
    let to = match ant.layer {
        Layer::Surface => {
            if ant.state == AntState::Returning {
                delivered = deliver_food(ant, colony, None, config);
                change_state(ant, AntState::Idle);
            }
            ant.position = entrance.underground;
            Layer::Underground
        }
        Layer::Underground => {
            ant.position = entrance.surface;
            Layer::Surface
        }
    };
    ant.layer = to;
    ant.velocity = Velocity::ZERO;
    ant.target_velocity = Velocity::ZERO;
    ant.time_since_transition = 0.0;
    Some(Transition { to, delivered })
}
