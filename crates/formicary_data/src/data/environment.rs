use super::entity::Position;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Impassable circle on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Position,
    pub radius: f64,
}

/// Depletable circle of food on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    pub position: Position,
    pub radius: f64,
    /// Food left to harvest.
    pub remaining: f64,
    /// Amount the source was created with.
    pub capacity: f64,
}

impl FoodSource {
    #[must_use]
    pub fn new(position: Position, radius: f64, amount: f64) -> Self {
        Self {
            position,
            radius,
            remaining: amount,
            capacity: amount,
        }
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Food security classification of a colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColonyHealth {
    #[default]
    Healthy,
    Struggling,
    Critical,
    Dead,
}

/// A nest with its food store and members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: Uuid,
    pub position: Position,
    pub members: Vec<Uuid>,
    pub food_store: f64,
    /// Smoothed food gathered per second.
    pub gathering_rate: f64,
    /// Smoothed food consumed per second.
    pub consumption_rate: f64,
    /// Food delivered since the start of the current tick.
    #[serde(skip)]
    pub gathered_this_tick: f64,
    /// Food eaten since the start of the current tick.
    #[serde(skip)]
    pub consumed_this_tick: f64,
    /// Store value at the start of the current tick.
    #[serde(skip)]
    pub store_at_tick_start: f64,
    pub total_gathered: f64,
    pub total_consumed: f64,
}

/// Paired surface/underground coordinates joining the two layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub surface: Position,
    pub underground: Position,
    pub radius: f64,
}
