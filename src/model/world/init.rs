use crate::model::colony::create_colony;
use crate::model::config::AppConfig;
use crate::model::geometry::{generate_obstacles, spawn_food_source};
use crate::model::lifecycle::spawn_ants_with_rng;
use crate::model::metrics::Metrics;
use crate::model::pheromone::PheromoneField;
use crate::model::underground::UndergroundGrid;
use crate::model::world::World;
use formicary_data::{Entrance, FoodSource, Obstacle, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

impl World {
    /// Empty world: no colonies or ants yet, a fresh underground seed layout.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        Self::new_with_rng(config, rng)
    }

    pub fn new_with_rng(config: AppConfig, rng: ChaCha8Rng) -> anyhow::Result<Self> {
        config.validate()?;
        let pheromones =
            PheromoneField::from_config(&config.pheromone, config.world.width, config.world.height);
        let underground = UndergroundGrid::from_config(&config.underground);
        tracing::debug!(
            width = config.world.width,
            height = config.world.height,
            fingerprint = %config.fingerprint(),
            "World created"
        );

        Ok(Self {
            width: config.world.width,
            height: config.world.height,
            tick: 0,
            colonies: Vec::new(),
            ants: Vec::new(),
            food_sources: Vec::new(),
            obstacles: Vec::new(),
            pheromones,
            entrance: None,
            underground,
            rng,
            metrics: Metrics::with_log_interval(config.world.log_interval),
            killed_ids: Vec::new(),
            config,
        })
    }

    /// Seeds one colony at the centre with `agent_count` ants around it, the
    /// food sources, obstacles, the underground nest and its entrance.
    pub fn initialize(&mut self, agent_count: usize) {
        self.colonies.clear();
        self.ants.clear();
        self.food_sources.clear();
        self.obstacles.clear();
        self.pheromones.clear();
        self.underground = UndergroundGrid::from_config(&self.config.underground);
        self.entrance = None;
        self.tick = 0;

        let centre = Position::new(self.width / 2.0, self.height / 2.0);
        let clearance = self.config.colony.spawn_radius
            + self.config.transit.entrance_radius
            + self.config.movement.home_arrival_distance;
        self.obstacles = generate_obstacles(&mut self.rng, &self.config.world, centre, clearance);

        let colony_id = self.add_colony(centre);
        for _ in 0..self.config.world.food_source_count {
            let food = spawn_food_source(&mut self.rng, &self.config.world, centre, &self.obstacles);
            self.food_sources.push(food);
        }
        self.spawn_ants(colony_id, agent_count);

        tracing::info!(
            ants = self.ants.len(),
            food_sources = self.food_sources.len(),
            obstacles = self.obstacles.len(),
            "World initialized"
        );
    }

    /// Adds a colony; the first one also gets the nest entrance.
    pub fn add_colony(&mut self, position: Position) -> Uuid {
        let id = Uuid::from_u128(self.rng.gen::<u128>());
        self.colonies
            .push(create_colony(id, position, self.config.colony.initial_food));
        if self.entrance.is_none() {
            self.entrance = Some(Entrance {
                surface: position,
                underground: self.underground.entrance_position(),
                radius: self.config.transit.entrance_radius,
            });
        }
        id
    }

    /// Spawns ants around an existing colony. Unknown colonies get none.
    pub fn spawn_ants(&mut self, colony_id: Uuid, count: usize) -> Vec<Uuid> {
        let Some(colony) = self.colonies.iter_mut().find(|c| c.id == colony_id) else {
            tracing::warn!(%colony_id, "Cannot spawn ants for unknown colony");
            return Vec::new();
        };
        let ants = spawn_ants_with_rng(
            colony,
            count,
            self.config.colony.spawn_radius,
            &self.config,
            &mut self.rng,
        );
        let ids = ants.iter().map(|a| a.id).collect();
        self.ants.extend(ants);
        ids
    }

    pub fn add_food_source(&mut self, position: Position, radius: f64, amount: f64) {
        self.food_sources
            .push(FoodSource::new(position, radius, amount));
    }

    pub fn add_obstacle(&mut self, position: Position, radius: f64) {
        self.obstacles.push(Obstacle { position, radius });
    }
}
