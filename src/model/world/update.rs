use crate::model::colony::ColonyLogic;
use crate::model::systems::{step_ant, AntContext, AntOutput};
use crate::model::world::World;
use formicary_data::PheromoneType;
use std::time::Instant;

impl World {
    /// Advances the simulation by `dt` seconds.
    ///
    /// Order within a tick:
    /// 1. colony bookkeeping starts
    /// 2. every ant acts (metabolism, digging, state machine, steering,
    ///    motion, constraints, trail)
    /// 3. dead ants are removed
    /// 4. pheromones decay
    /// 5. pheromones diffuse (throttled)
    /// 6. depleted food sources are replaced
    /// 7. colony rates are smoothed
    /// 8. ants cross between layers
    /// 9. the queen lays and eggs age
    /// 10. traits evolve (throttled)
    ///
    /// A non-positive or non-finite `dt` only advances the tick counter.
    pub fn tick(&mut self, dt: f64) {
        let started = Instant::now();
        self.tick += 1;
        if !(dt.is_finite() && dt > 0.0) {
            self.record_tick(started);
            return;
        }

        for colony in &mut self.colonies {
            colony.begin_tick();
        }

        self.pass_ants(dt);
        self.process_deaths();

        self.pheromones
            .decay_all(dt, &self.config.pheromone.decay_rates);
        let interval = self.config.pheromone.diffusion_interval;
        if interval > 0 && self.tick % interval == 0 {
            self.pheromones
                .diffuse_all(self.config.pheromone.diffusion_rate);
        }

        self.replace_depleted_food();
        for colony in &mut self.colonies {
            colony.finalize_tick(dt, self.config.colony.rate_smoothing);
        }
        self.process_transitions(dt);
        self.update_brood(dt);
        self.evolve_traits();

        self.record_tick(started);
    }

    /// Runs every ant's per-tick systems and applies their trail deposits.
    fn pass_ants(&mut self, dt: f64) {
        self.killed_ids.clear();
        let config = &self.config;

        for ant in self.ants.iter_mut() {
            let Some(colony) = self.colonies.iter_mut().find(|c| c.id == ant.colony_id) else {
                continue;
            };
            let mut output = AntOutput::default();
            let mut ctx = AntContext {
                config,
                pheromones: &self.pheromones,
                obstacles: &self.obstacles,
                food_sources: &mut self.food_sources,
                colony,
                underground: &mut self.underground,
                width: self.width,
                height: self.height,
            };
            step_ant(ant, &mut ctx, &mut output, dt, &mut self.rng);

            for deposit in &output.pheromones {
                self.pheromones.apply(deposit);
                if deposit.kind == PheromoneType::Danger {
                    self.metrics.increment_counter("obstacle_contacts");
                }
            }
            if output.delivered > 0.0 {
                self.metrics.record_delivery();
            }
            if let Some(dig) = &output.dig {
                self.metrics.record_dig();
                tracing::debug!(
                    ant = %ant.id,
                    x = dig.tile.0,
                    y = dig.tile.1,
                    result = ?dig.result,
                    extra = dig.extra.len(),
                    "Tile excavated"
                );
            }
            if output.died {
                self.killed_ids.push(ant.id);
            }
        }
    }

    fn record_tick(&self, started: Instant) {
        let colony_food = self.colonies.iter().map(|c| c.food_store).sum::<f64>();
        self.metrics
            .record_tick(started.elapsed(), self.ants.len(), colony_food);
    }
}
