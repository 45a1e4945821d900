pub use formicary_core::{ColonyLogic, TileLogic, TraitLogic};
pub mod colony {
    pub use formicary_core::colony::*;
}
pub mod config {
    pub use formicary_core::config::*;
}
pub mod geometry {
    pub use formicary_core::geometry::*;
}
pub mod lifecycle {
    pub use formicary_core::lifecycle::*;
}
pub mod metrics {
    pub use formicary_core::metrics::*;
}
pub mod pheromone {
    pub use formicary_core::pheromone::*;
}
pub mod snapshot {
    pub use formicary_core::snapshot::*;
}
pub mod systems {
    pub use formicary_core::systems::*;
}
pub mod traits {
    pub use formicary_core::traits::*;
}
pub mod underground {
    pub use formicary_core::underground::*;
}

pub mod state {
    pub use formicary_data::*;
}
pub mod world;
