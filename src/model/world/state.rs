use crate::model::snapshot::{role_histogram, AntSnapshot, ColonySnapshot, StateCounts, WorldSummary};
use crate::model::world::World;
use formicary_data::{Layer, PheromoneType, TileType};

impl World {
    /// Per-ant views for renderers, in world order.
    pub fn ant_snapshots(&self) -> Vec<AntSnapshot> {
        let threshold = self.config.traits.role_threshold;
        self.ants
            .iter()
            .map(|a| AntSnapshot::from_ant(a, threshold))
            .collect()
    }

    pub fn colony_snapshots(&self) -> Vec<ColonySnapshot> {
        self.colonies
            .iter()
            .map(|c| ColonySnapshot::from_colony(c, &self.config.colony))
            .collect()
    }

    pub fn summary(&self) -> WorldSummary {
        let mut states = StateCounts::default();
        let mut underground_ants = 0;
        for ant in &self.ants {
            states.record(ant.state);
            if ant.layer == Layer::Underground {
                underground_ants += 1;
            }
        }

        WorldSummary {
            tick: self.tick,
            ants: self.ants.len(),
            surface_ants: self.ants.len() - underground_ants,
            underground_ants,
            states,
            roles: role_histogram(&self.ants, self.config.traits.role_threshold),
            colonies: self.colony_snapshots(),
            food_sources: self.food_sources.len(),
            food_remaining: self.food_sources.iter().map(|f| f.remaining).sum(),
            pheromone_totals: PheromoneType::ALL.map(|k| self.pheromones.total(k)),
            tunnels: self.underground.count(TileType::Tunnel),
            chambers: self.underground.count(TileType::Chamber),
            eggs: self.underground.eggs.len(),
            queen_reserve: self.underground.queen.food_reserve,
            deaths: self.metrics.deaths(),
            deliveries: self.metrics.deliveries(),
            digs: self.metrics.digs(),
            transitions: self.metrics.transitions(),
            config_fingerprint: self.config.fingerprint(),
        }
    }
}
