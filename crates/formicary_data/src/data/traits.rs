use serde::{Deserialize, Serialize};

/// Bounded multipliers biasing an ant's behavior. Baseline is 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    pub gathering: f64,
    pub nursing: f64,
    pub digging: f64,
    pub building: f64,
    pub movement_speed: f64,
    pub carry_capacity: f64,
    pub energy_efficiency: f64,
    pub pheromone_sensitivity: f64,
    pub wandering_radius: f64,
}

impl TraitProfile {
    pub const BASELINE: f64 = 1.0;

    #[must_use]
    pub const fn baseline() -> Self {
        Self {
            gathering: Self::BASELINE,
            nursing: Self::BASELINE,
            digging: Self::BASELINE,
            building: Self::BASELINE,
            movement_speed: Self::BASELINE,
            carry_capacity: Self::BASELINE,
            energy_efficiency: Self::BASELINE,
            pheromone_sensitivity: Self::BASELINE,
            wandering_radius: Self::BASELINE,
        }
    }

    /// All values in declaration order.
    #[must_use]
    pub fn values(&self) -> [f64; 9] {
        [
            self.gathering,
            self.nursing,
            self.digging,
            self.building,
            self.movement_speed,
            self.carry_capacity,
            self.energy_efficiency,
            self.pheromone_sensitivity,
            self.wandering_radius,
        ]
    }
}

impl Default for TraitProfile {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Task affinities, the part of a profile reinforced by the current activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskAffinity {
    Gathering,
    Nursing,
    Digging,
    Building,
}

impl TaskAffinity {
    pub const ALL: [Self; 4] = [Self::Gathering, Self::Nursing, Self::Digging, Self::Building];
}

/// Diagnostic label derived from a trait profile. Never stored on an ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    FoodGatherer,
    Scout,
    Nurse,
    Digger,
    Builder,
    Generalist,
}

impl Role {
    pub const ALL: [Self; 6] = [
        Self::FoodGatherer,
        Self::Scout,
        Self::Nurse,
        Self::Digger,
        Self::Builder,
        Self::Generalist,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FoodGatherer => "Food Gatherer",
            Self::Scout => "Scout",
            Self::Nurse => "Nurse",
            Self::Digger => "Digger",
            Self::Builder => "Builder",
            Self::Generalist => "Generalist",
        }
    }
}
