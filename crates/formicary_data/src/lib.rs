//! Plain data records shared by the Formicary engine and its front-ends.

pub mod data;

pub use data::entity::{Ant, AntState, DigJob, Layer, Position, Velocity};
pub use data::environment::{Colony, ColonyHealth, Entrance, FoodSource, Obstacle};
pub use data::terrain::{Egg, PheromoneType, Queen, TileType};
pub use data::traits::{Role, TaskAffinity, TraitProfile};
