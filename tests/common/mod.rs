pub mod macros;

use formicary_lib::model::config::AppConfig;
use formicary_lib::model::state::{Ant, AntState, Layer, Position, TraitProfile};
use formicary_lib::model::world::World;
use uuid::Uuid;

type WorldMod = Box<dyn FnOnce(&mut World)>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    ants: usize,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        config.world.obstacle_count = 0;
        Self {
            config,
            ants: 0,
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_ants(mut self, count: usize) -> Self {
        self.ants = count;
        self
    }

    /// Zeroes every stochastic transition so ants only change state when a
    /// test forces them to.
    pub fn frozen(self) -> Self {
        self.with_config(|c| {
            c.behavior.idle_to_wander_chance = 0.0;
            c.behavior.wander_to_forage_chance = 0.0;
            c.behavior.wander_to_return_chance = 0.0;
            c.behavior.forage_to_return_chance = 0.0;
            c.underground.dig_start_chance = 0.0;
            c.transit.idle_enter_chance = 0.0;
            c.transit.wander_enter_chance = 0.0;
            c.transit.idle_exit_chance = 0.0;
            c.transit.wander_exit_chance = 0.0;
        })
    }

    pub fn with_world<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut World) + 'static,
    {
        self.mods.push(Box::new(modifier));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        world.initialize(self.ants);
        for modifier in self.mods {
            modifier(&mut world);
        }
        world
    }
}

/// Id of the only colony a builder-made world has.
#[allow(dead_code)]
pub fn home_colony(world: &World) -> Uuid {
    world.colonies()[0].id
}

#[allow(dead_code)]
pub fn ant_mut(world: &mut World, id: Uuid) -> &mut Ant {
    world
        .ants
        .iter_mut()
        .find(|a| a.id == id)
        .expect("Ant not found in world")
}

/// Spawns one baseline-trait ant at `position` and returns its id.
#[allow(dead_code)]
pub fn place_ant(world: &mut World, position: Position, layer: Layer, state: AntState) -> Uuid {
    let colony_id = home_colony(world);
    let id = world.spawn_ants(colony_id, 1)[0];
    let ant = ant_mut(world, id);
    ant.position = position;
    ant.layer = layer;
    ant.state = state;
    ant.traits = TraitProfile::baseline();
    id
}
