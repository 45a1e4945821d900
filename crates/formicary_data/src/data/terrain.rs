use serde::{Deserialize, Serialize};

/// Chemical signal carried by the pheromone field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PheromoneType {
    /// Laid by ants carrying food home; leads to food.
    Food,
    /// Laid by outbound ants; leads home.
    Nest,
    /// Laid where ants collide with obstacles.
    Danger,
}

impl PheromoneType {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Food, Self::Nest, Self::Danger];

    /// Slot of this signal in per-type arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Food => 0,
            Self::Nest => 1,
            Self::Danger => 2,
        }
    }
}

/// Tile kind of the underground grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Solid earth.
    #[default]
    Dirt,
    /// Dug corridor.
    Tunnel,
    /// Wide dug room; eggs are laid here.
    Chamber,
    /// Opening to the surface.
    Entrance,
}

/// The colony's queen, living in the first chamber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Queen {
    pub tile_x: u16,
    pub tile_y: u16,
    pub food_reserve: f64,
    /// Seconds until she may lay again.
    pub laying_cooldown: f64,
    pub eggs_laid: u32,
}

/// An egg lying in a chamber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    pub tile_x: u16,
    pub tile_y: u16,
    /// Seconds since laying.
    pub age: f64,
}

impl Egg {
    /// Hatching is not modelled yet.
    #[must_use]
    pub fn is_ready_to_hatch(&self) -> bool {
        false
    }
}
