use crate::colony::ColonyLogic;
use crate::config::ColonyConfig;
use crate::traits::derive_role;
use formicary_data::{
    Ant, AntState, Colony, ColonyHealth, Layer, Position, Role, TraitProfile, Velocity,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of one ant, taken once per frame by renderers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AntSnapshot {
    pub id: Uuid,
    pub colony_id: Uuid,
    pub position: Position,
    pub velocity: Velocity,
    pub state: AntState,
    pub energy: f64,
    pub carried_food: f64,
    pub traits: TraitProfile,
    pub layer: Layer,
    pub role: Role,
}

impl AntSnapshot {
    pub fn from_ant(ant: &Ant, role_threshold: f64) -> Self {
        Self {
            id: ant.id,
            colony_id: ant.colony_id,
            position: ant.position,
            velocity: ant.velocity,
            state: ant.state,
            energy: ant.energy,
            carried_food: ant.carried_food,
            traits: ant.traits,
            layer: ant.layer,
            role: derive_role(&ant.traits, role_threshold),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColonySnapshot {
    pub id: Uuid,
    pub position: Position,
    pub members: usize,
    pub food_store: f64,
    pub gathering_rate: f64,
    pub consumption_rate: f64,
    pub health: ColonyHealth,
}

impl ColonySnapshot {
    pub fn from_colony(colony: &Colony, config: &ColonyConfig) -> Self {
        Self {
            id: colony.id,
            position: colony.position,
            members: colony.members.len(),
            food_store: colony.food_store,
            gathering_rate: colony.gathering_rate,
            consumption_rate: colony.consumption_rate,
            health: colony.health(config),
        }
    }
}

/// Ant counts per state, in `AntState` declaration order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub idle: usize,
    pub wandering: usize,
    pub foraging: usize,
    pub returning: usize,
    pub digging: usize,
}

impl StateCounts {
    pub fn record(&mut self, state: AntState) {
        match state {
            AntState::Idle => self.idle += 1,
            AntState::Wandering => self.wandering += 1,
            AntState::Foraging => self.foraging += 1,
            AntState::Returning => self.returning += 1,
            AntState::Digging => self.digging += 1,
        }
    }
}

/// Aggregated diagnostics of the whole world.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSummary {
    pub tick: u64,
    pub ants: usize,
    pub surface_ants: usize,
    pub underground_ants: usize,
    pub states: StateCounts,
    pub roles: Vec<(Role, usize)>,
    pub colonies: Vec<ColonySnapshot>,
    pub food_sources: usize,
    pub food_remaining: f64,
    pub pheromone_totals: [f64; 3],
    pub tunnels: usize,
    pub chambers: usize,
    pub eggs: usize,
    pub queen_reserve: f64,
    pub deaths: u64,
    pub deliveries: u64,
    pub digs: u64,
    pub transitions: u64,
    pub config_fingerprint: String,
}

/// Role histogram in `Role::ALL` order.
pub fn role_histogram<'a, I>(ants: I, role_threshold: f64) -> Vec<(Role, usize)>
where
    I: IntoIterator<Item = &'a Ant>,
{
    let mut counts = [0usize; Role::ALL.len()];
    for ant in ants {
        let role = derive_role(&ant.traits, role_threshold);
        if let Some(slot) = Role::ALL.iter().position(|r| *r == role) {
            counts[slot] += 1;
        }
    }
    Role::ALL.iter().copied().zip(counts).collect()
}
