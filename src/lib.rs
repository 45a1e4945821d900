//! Formicary: an ant colony simulation.
//!
//! The engine lives in `formicary_core` and `formicary_data`; this crate owns
//! the [`model::world::World`] orchestrator that ties colonies, ants, the
//! pheromone field and the underground nest together, plus the headless runner.

pub mod model;
