use crate::model::config::AppConfig;
use crate::model::metrics::Metrics;
use crate::model::pheromone::PheromoneField;
use crate::model::underground::UndergroundGrid;
use formicary_data::{Ant, Colony, Entrance, FoodSource, Obstacle};
use rand_chacha::ChaCha8Rng;

pub mod finalize;
pub mod init;
pub mod state;
pub mod update;

/// The whole simulation: both layers, every colony and ant, and the RNG
/// all randomness is drawn from.
pub struct World {
    pub width: f64,
    pub height: f64,
    pub tick: u64,
    pub config: AppConfig,
    pub colonies: Vec<Colony>,
    pub ants: Vec<Ant>,
    pub food_sources: Vec<FoodSource>,
    pub obstacles: Vec<Obstacle>,
    pub pheromones: PheromoneField,
    pub entrance: Option<Entrance>,
    pub underground: UndergroundGrid,
    pub rng: ChaCha8Rng,
    pub metrics: Metrics,
    /// Ids of ants that died during the current tick.
    pub killed_ids: Vec<uuid::Uuid>,
}

impl World {
    pub fn colonies(&self) -> &[Colony] {
        &self.colonies
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn food_sources(&self) -> &[FoodSource] {
        &self.food_sources
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn pheromones(&self) -> &PheromoneField {
        &self.pheromones
    }

    pub fn underground(&self) -> &UndergroundGrid {
        &self.underground
    }

    pub fn entrance(&self) -> Option<&Entrance> {
        self.entrance.as_ref()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn population(&self) -> usize {
        self.ants.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.ants.is_empty()
    }

    pub fn colony(&self, id: uuid::Uuid) -> Option<&Colony> {
        self.colonies.iter().find(|c| c.id == id)
    }

    pub fn ant(&self, id: uuid::Uuid) -> Option<&Ant> {
        self.ants.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formicary_data::{AntState, Layer};

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(7);
        config
    }

    #[test]
    fn test_initialize_builds_both_layers() {
        let mut world = World::new(config()).expect("Failed to create world");
        world.initialize(20);
        assert_eq!(world.colonies().len(), 1);
        assert_eq!(world.population(), 20);
        assert_eq!(world.colonies()[0].members.len(), 20);
        assert_eq!(world.food_sources().len(), 2);
        assert_eq!(world.obstacles().len(), world.config.world.obstacle_count);
        let entrance = world.entrance().expect("entrance placed");
        assert_eq!(entrance.surface, world.colonies()[0].position);
        assert_eq!(entrance.underground, world.underground().entrance_position());
        assert!(world
            .ants()
            .iter()
            .all(|a| a.state == AntState::Idle && a.layer == Layer::Surface));
    }

    #[test]
    fn test_colony_sits_at_world_centre() {
        let mut world = World::new(config()).expect("Failed to create world");
        world.initialize(1);
        let c = &world.colonies()[0];
        assert_eq!(c.position.x, world.width / 2.0);
        assert_eq!(c.position.y, world.height / 2.0);
        assert!(world.colony(c.id).is_some());
    }
}
