//! # Formicary Core
//!
//! The simulation engine for Formicary - an ant colony simulation.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The per-ant behavior state machine
//! - Steering, obstacle avoidance and pheromone-gradient sensing
//! - The pheromone field with decay and diffusion
//! - Bounded trait profiles and experience-driven evolution
//! - The underground tile world: digging, the queen and her eggs
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! Plain data lives in `formicary_data`; behavior is added here through
//! logic traits and free-function systems over borrowed world state. All
//! randomness is drawn from an injected `Rng`, so a seeded `ChaCha8Rng`
//! reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use formicary_core::pheromone::{PheromoneField, PheromoneType};
//!
//! let mut field = PheromoneField::new(200.0, 200.0, 10.0, 10.0, 0.01);
//! field.deposit(PheromoneType::Food, 100.0, 100.0, 5.0);
//! field.decay(PheromoneType::Food, 1.0, 0.05);
//! assert!((field.sample(PheromoneType::Food, 100.0, 100.0) - 4.75).abs() < 1e-4);
//! ```

/// Colony food accounting and health
pub mod colony;
/// Configuration management for simulation parameters
pub mod config;
/// Vector helpers and placement of obstacles and food
pub mod geometry;
/// Ant creation, metabolism and carrying
pub mod lifecycle;
/// Simulation counters and logging setup
pub mod metrics;
/// Pheromone field for chemical communication
pub mod pheromone;
/// Read-only views handed to renderers and reports
pub mod snapshot;
/// Per-ant systems (behavior, movement, foraging, digging, transit, evolution)
pub mod systems;
/// Trait profile updates and role derivation
pub mod traits;
/// Underground tile world with the queen and her brood
pub mod underground;

pub use colony::ColonyLogic;
pub use config::AppConfig;
pub use metrics::{init_logging, Metrics};
pub use pheromone::{PheromoneDeposit, PheromoneField};
pub use traits::{derive_role, TraitBounds, TraitLogic};
pub use underground::{TileLogic, UndergroundGrid};
