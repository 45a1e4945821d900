use super::traits::TraitProfile;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position in world units. Underground positions use the tile grid's own space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub const ZERO: Self = Self { vx: 0.0, vy: 0.0 };

    #[must_use]
    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }
}

/// Behavioral mode of an ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AntState {
    /// Standing still, resting or eating at home.
    #[default]
    Idle,
    /// Exploring without a goal.
    Wandering,
    /// Looking for food, following trails when present.
    Foraging,
    /// Heading home, usually carrying food.
    Returning,
    /// Excavating an underground tile.
    Digging,
}

/// Which of the two parallel spaces an ant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Surface,
    Underground,
}

/// An excavation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigJob {
    /// Target tile column.
    pub tile_x: u16,
    /// Target tile row.
    pub tile_y: u16,
    /// Seconds spent on this tile so far.
    pub elapsed: f64,
}

/// A single worker ant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub id: Uuid,
    pub colony_id: Uuid,
    pub position: Position,
    pub velocity: Velocity,
    /// Desired velocity; the actual velocity is blended toward it every tick.
    pub target_velocity: Velocity,
    pub state: AntState,
    pub time_in_state: f64,
    pub time_since_turn: f64,
    pub time_since_transition: f64,
    pub energy: f64,
    pub carried_food: f64,
    pub layer: Layer,
    pub traits: TraitProfile,
    #[serde(default)]
    pub dig: Option<DigJob>,
    /// Set when the ant started heading home because it was hungry.
    #[serde(default)]
    pub hunger_bailout: bool,
    /// Set when the current foraging trip was steered by a food trail.
    #[serde(default)]
    pub followed_trail: bool,
}

impl Ant {
    #[must_use]
    pub fn is_carrying(&self) -> bool {
        self.carried_food > 0.0
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.energy <= 0.0
    }
}
