use crate::colony::ColonyLogic;
use crate::config::{AppConfig, MetabolismConfig};
use crate::traits::{random_profile_with_rng, TraitBounds};
use formicary_data::{Ant, AntState, Colony, Layer, Position, TraitProfile, Velocity};
use rand::Rng;
use uuid::Uuid;

pub fn create_ant_with_rng<R: Rng>(
    colony_id: Uuid,
    position: Position,
    config: &AppConfig,
    rng: &mut R,
) -> Ant {
    let id = Uuid::from_u128(rng.gen::<u128>());
    let traits = random_profile_with_rng(
        rng,
        config.traits.initial_variation,
        TraitBounds::from(&config.traits),
    );
    Ant {
        id,
        colony_id,
        position,
        velocity: Velocity::ZERO,
        target_velocity: Velocity::ZERO,
        state: AntState::Idle,
        time_in_state: 0.0,
        time_since_turn: 0.0,
        // Newborns may use the entrance straight away.
        time_since_transition: config.transit.transition_cooldown,
        energy: config
            .metabolism
            .initial_energy
            .clamp(0.0, config.metabolism.max_energy),
        carried_food: 0.0,
        layer: Layer::Surface,
        traits,
        dig: None,
        hunger_bailout: false,
        followed_trail: false,
    }
}

/// Spawns `count` ants uniformly within `radius` of the colony and registers them.
pub fn spawn_ants_with_rng<R: Rng>(
    colony: &mut Colony,
    count: usize,
    radius: f64,
    config: &AppConfig,
    rng: &mut R,
) -> Vec<Ant> {
    let mut ants = Vec::with_capacity(count);
    for _ in 0..count {
        let position = if radius > 0.0 {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let r = radius * rng.gen::<f64>().sqrt();
            Position::new(
                colony.position.x + angle.cos() * r,
                colony.position.y + angle.sin() * r,
            )
        } else {
            colony.position
        };
        let ant = create_ant_with_rng(colony.id, position, config, rng);
        colony.members.push(ant.id);
        ants.push(ant);
    }
    ants
}

#[inline]
pub fn carry_capacity(traits: &TraitProfile, config: &MetabolismConfig) -> f64 {
    config.base_carry_capacity * traits.carry_capacity
}

/// Per-second energy cost multiplier of a macro-state.
pub fn state_cost_factor(state: AntState, config: &MetabolismConfig) -> f64 {
    match state {
        AntState::Idle => config.idle_factor,
        AntState::Wandering | AntState::Foraging | AntState::Returning => config.moving_factor,
        AntState::Digging => config.digging_factor,
    }
}

/// Burns energy for `dt` seconds; returns the amount spent. Energy never drops below zero.
pub fn consume_energy(ant: &mut Ant, config: &MetabolismConfig, dt: f64) -> f64 {
    if !(dt.is_finite() && dt > 0.0) {
        return 0.0;
    }
    let efficiency = ant.traits.energy_efficiency.max(f64::EPSILON);
    let cost = (config.base_consumption * state_cost_factor(ant.state, config) * dt / efficiency)
        .max(0.0);
    let spent = cost.min(ant.energy.max(0.0));
    ant.energy = (ant.energy - cost).clamp(0.0, config.max_energy);
    spent
}

/// Eats from the colony store when hungry; returns the food taken.
pub fn eat_from_colony(
    ant: &mut Ant,
    colony: &mut Colony,
    config: &MetabolismConfig,
    dt: f64,
) -> f64 {
    if !(dt.is_finite() && dt > 0.0) || config.energy_per_food <= 0.0 {
        return 0.0;
    }
    if ant.energy >= config.max_energy * config.eat_below_fraction {
        return 0.0;
    }
    let room = (config.max_energy - ant.energy) / config.energy_per_food;
    let wanted = (config.eat_rate * dt).min(room.max(0.0));
    let eaten = colony.consume_food(wanted);
    ant.energy = (ant.energy + eaten * config.energy_per_food).clamp(0.0, config.max_energy);
    eaten
}

/// Loads food, bounded by the ant's capacity; returns the amount actually loaded.
pub fn load_food(ant: &mut Ant, available: f64, config: &MetabolismConfig) -> f64 {
    let capacity = carry_capacity(&ant.traits, config);
    let room = (capacity - ant.carried_food).max(0.0);
    let taken = available.max(0.0).min(room);
    ant.carried_food = (ant.carried_food + taken).clamp(0.0, capacity);
    taken
}

/// Empties the ant's load; returns what it carried.
pub fn unload_food(ant: &mut Ant) -> f64 {
    let load = ant.carried_food.max(0.0);
    ant.carried_food = 0.0;
    load
}

#[inline]
pub fn is_at_home(ant: &Ant, colony: &Colony, arrival_distance: f64) -> bool {
    match ant.layer {
        Layer::Underground => true,
        Layer::Surface => {
            crate::geometry::distance(ant.position, colony.position) <= arrival_distance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_colony;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (AppConfig, Colony, ChaCha8Rng) {
        let config = AppConfig::default();
        let colony = create_colony(Uuid::from_u128(9), Position::new(100.0, 100.0), 10.0);
        (config, colony, ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_spawned_ants_are_registered_and_unique() {
        let (config, mut colony, mut rng) = setup();
        let ants = spawn_ants_with_rng(&mut colony, 25, 15.0, &config, &mut rng);
        assert_eq!(ants.len(), 25);
        assert_eq!(colony.members.len(), 25);
        let mut ids: Vec<_> = ants.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 25);
        for ant in &ants {
            assert_eq!(ant.state, AntState::Idle);
            assert!(crate::geometry::distance(ant.position, colony.position) <= 15.0 + 1e-9);
        }
    }

    #[test]
    fn test_energy_consumption_scales_with_state_and_efficiency() {
        let (config, colony, mut rng) = setup();
        let mut ant = create_ant_with_rng(colony.id, colony.position, &config, &mut rng);
        ant.traits.energy_efficiency = 1.0;
        ant.state = AntState::Idle;
        let idle = consume_energy(&mut ant, &config.metabolism, 1.0);
        ant.state = AntState::Digging;
        let digging = consume_energy(&mut ant, &config.metabolism, 1.0);
        assert!((idle - 0.25).abs() < 1e-12);
        assert!((digging - 0.75).abs() < 1e-12);

        ant.traits.energy_efficiency = 2.0;
        let efficient = consume_energy(&mut ant, &config.metabolism, 1.0);
        assert!((efficient - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_energy_floors_at_zero() {
        let (config, colony, mut rng) = setup();
        let mut ant = create_ant_with_rng(colony.id, colony.position, &config, &mut rng);
        ant.energy = 0.1;
        consume_energy(&mut ant, &config.metabolism, 100.0);
        assert_eq!(ant.energy, 0.0);
        assert!(ant.is_dead());
    }

    #[test]
    fn test_eating_caps_at_max_energy() {
        let (mut config, mut colony, mut rng) = setup();
        config.metabolism.eat_rate = 100.0;
        let mut ant = create_ant_with_rng(colony.id, colony.position, &config, &mut rng);
        ant.energy = 75.0;
        let eaten = eat_from_colony(&mut ant, &mut colony, &config.metabolism, 1.0);
        assert!((eaten - 2.5).abs() < 1e-12);
        assert_eq!(ant.energy, config.metabolism.max_energy);
        assert!((colony.food_store - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_eating_when_fed_or_store_empty() {
        let (config, mut colony, mut rng) = setup();
        let mut ant = create_ant_with_rng(colony.id, colony.position, &config, &mut rng);
        assert_eq!(eat_from_colony(&mut ant, &mut colony, &config.metabolism, 1.0), 0.0);
        ant.energy = 10.0;
        colony.food_store = 0.0;
        assert_eq!(eat_from_colony(&mut ant, &mut colony, &config.metabolism, 1.0), 0.0);
        assert_eq!(ant.energy, 10.0);
    }

    #[test]
    fn test_load_food_respects_capacity() {
        let (config, colony, mut rng) = setup();
        let mut ant = create_ant_with_rng(colony.id, colony.position, &config, &mut rng);
        ant.traits.carry_capacity = 1.0;
        assert_eq!(load_food(&mut ant, 3.0, &config.metabolism), 3.0);
        assert_eq!(load_food(&mut ant, 10.0, &config.metabolism), 2.0);
        assert_eq!(ant.carried_food, 5.0);
        assert_eq!(unload_food(&mut ant), 5.0);
        assert!(!ant.is_carrying());
    }
}
