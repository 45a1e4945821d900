use crate::model::colony::ColonyLogic;
use crate::model::geometry::spawn_food_source;
use crate::model::systems::evolution::{is_evolution_tick, run_evolution_cycle};
use crate::model::systems::transit::try_transition;
use crate::model::underground::brood;
use crate::model::world::World;
use formicary_data::Position;

impl World {
    /// Drops ants that starved this tick from the world and their colony.
    pub fn process_deaths(&mut self) {
        if self.killed_ids.is_empty() {
            return;
        }
        let killed = std::mem::take(&mut self.killed_ids);
        for id in &killed {
            if let Some(ant) = self.ants.iter().find(|a| a.id == *id) {
                if let Some(colony) = self.colonies.iter_mut().find(|c| c.id == ant.colony_id) {
                    colony.remove_member(id);
                }
                tracing::debug!(ant = %id, state = ?ant.state, layer = ?ant.layer, "Ant died");
            }
            self.metrics.record_death();
        }
        self.ants.retain(|a| !killed.contains(&a.id));
        self.killed_ids = killed;
    }

    /// Replaces every exhausted food source with a full one elsewhere.
    pub fn replace_depleted_food(&mut self) {
        let nest = self
            .colonies
            .first()
            .map_or(Position::new(self.width / 2.0, self.height / 2.0), |c| c.position);
        for i in 0..self.food_sources.len() {
            if !self.food_sources[i].is_depleted() {
                continue;
            }
            let fresh = spawn_food_source(&mut self.rng, &self.config.world, nest, &self.obstacles);
            tracing::debug!(
                x = fresh.position.x,
                y = fresh.position.y,
                amount = fresh.remaining,
                "Food source replaced"
            );
            self.food_sources[i] = fresh;
            self.metrics.increment_counter("food_replaced");
        }
    }

    /// Moves eligible ants through the entrance.
    pub fn process_transitions(&mut self, dt: f64) {
        let Some(entrance) = self.entrance else {
            return;
        };
        for ant in self.ants.iter_mut() {
            let Some(colony) = self.colonies.iter_mut().find(|c| c.id == ant.colony_id) else {
                continue;
            };
            if let Some(t) = try_transition(ant, &entrance, colony, &self.config, dt, &mut self.rng) {
                self.metrics.record_transition();
                if t.delivered > 0.0 {
                    self.metrics.record_delivery();
                }
                tracing::debug!(ant = %ant.id, to = ?t.to, delivered = t.delivered, "Layer transition");
            }
        }
    }

    /// Queen laying and egg ageing.
    pub fn update_brood(&mut self, dt: f64) {
        if let Some(egg) = brood::update_brood(&mut self.underground, &self.config.underground, dt) {
            self.metrics.record_egg();
            tracing::debug!(
                x = egg.tile_x,
                y = egg.tile_y,
                reserve = self.underground.queen.food_reserve,
                "Egg laid"
            );
        }
    }

    /// Runs a trait evolution cycle on the configured cadence.
    pub fn evolve_traits(&mut self) {
        if is_evolution_tick(self.tick, self.config.traits.evolution_interval) {
            run_evolution_cycle(&mut self.ants, &self.config.traits);
        }
    }
}
