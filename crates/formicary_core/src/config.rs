//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every tuning constant the engine reads lives here,
//! so front-ends treat it as an opaque bundle handed over at construction.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults, sections and keys are optional)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1200.0
//! height = 800.0
//! initial_ants = 80
//! seed = 42
//!
//! [pheromone]
//! cell_size = 10.0
//! diffusion_interval = 5
//!
//! [traits]
//! evolution_interval = 60
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level simulation configuration.
///
/// Defines the surface dimensions, the initial population and the layout of
/// food sources and obstacles.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub initial_ants: usize,
    pub seed: Option<u64>,
    pub food_source_count: usize,
    pub food_source_amount: f64,
    pub food_source_radius: f64,
    /// Minimum distance between the colony and a newly placed food source.
    pub food_min_distance: f64,
    pub obstacle_count: usize,
    pub obstacle_min_radius: f64,
    pub obstacle_max_radius: f64,
    /// Ticks between periodic summary log lines.
    pub log_interval: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            initial_ants: 50,
            seed: None,
            food_source_count: 2,
            food_source_amount: 500.0,
            food_source_radius: 25.0,
            food_min_distance: 250.0,
            obstacle_count: 6,
            obstacle_min_radius: 15.0,
            obstacle_max_radius: 40.0,
            log_interval: 600,
        }
    }
}

/// Pheromone field resolution, decay, diffusion and sensing.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PheromoneConfig {
    pub cell_size: f64,
    pub max_strength: f32,
    pub epsilon: f32,
    /// Fraction lost per second, indexed by `PheromoneType::index()`.
    pub decay_rates: [f32; 3],
    pub diffusion_rate: f32,
    pub diffusion_interval: u64,
    /// Food trail laid per second by ants carrying food home.
    pub food_deposit_rate: f32,
    /// Nest trail laid per second by outbound ants.
    pub nest_deposit_rate: f32,
    /// Danger puff laid on each obstacle collision.
    pub danger_deposit_amount: f32,
    pub sample_distance: f64,
    pub noise_threshold: f32,
    pub follow_strength: f64,
    pub exploration_chance: f64,
    pub jitter: f64,
    pub danger_aversion: f32,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            max_strength: 10.0,
            epsilon: 0.01,
            decay_rates: [0.05, 0.03, 0.2],
            diffusion_rate: 0.1,
            diffusion_interval: 5,
            food_deposit_rate: 2.0,
            nest_deposit_rate: 1.0,
            danger_deposit_amount: 1.0,
            sample_distance: 20.0,
            noise_threshold: 0.05,
            follow_strength: 0.8,
            exploration_chance: 0.1,
            jitter: 0.2,
            danger_aversion: 0.5,
        }
    }
}

/// Steering and perception.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MovementConfig {
    pub base_speed: f64,
    /// Exponential rate at which velocity converges on the target velocity.
    pub turn_rate: f64,
    pub perception_radius: f64,
    /// Radius within which a food source is seen directly.
    pub food_sense_radius: f64,
    /// Seconds between random heading changes while wandering.
    pub wander_interval: f64,
    /// Distance from home beyond which wandering drifts back (scaled by the trait).
    pub wander_leash: f64,
    pub home_arrival_distance: f64,
    pub avoidance_dot_threshold: f64,
    pub underground_speed_factor: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 60.0,
            turn_rate: 5.0,
            perception_radius: 40.0,
            food_sense_radius: 60.0,
            wander_interval: 1.0,
            wander_leash: 400.0,
            home_arrival_distance: 20.0,
            avoidance_dot_threshold: 0.5,
            underground_speed_factor: 0.5,
        }
    }
}

/// Macro-state transition chances (per second) and guards.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BehaviorConfig {
    pub idle_to_wander_chance: f64,
    pub wander_to_forage_chance: f64,
    pub wander_to_return_chance: f64,
    pub forage_to_return_chance: f64,
    pub min_wander_duration: f64,
    pub min_forage_duration: f64,
    pub hunger_threshold: f64,
    pub hunger_bailout_multiplier: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            idle_to_wander_chance: 0.3,
            wander_to_forage_chance: 0.2,
            wander_to_return_chance: 0.02,
            forage_to_return_chance: 0.01,
            min_wander_duration: 2.0,
            min_forage_duration: 3.0,
            hunger_threshold: 30.0,
            hunger_bailout_multiplier: 5.0,
        }
    }
}

/// Energy budget of an individual ant.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub max_energy: f64,
    pub initial_energy: f64,
    /// Energy spent per second by a moving ant with baseline efficiency.
    pub base_consumption: f64,
    pub idle_factor: f64,
    pub moving_factor: f64,
    pub digging_factor: f64,
    pub base_carry_capacity: f64,
    /// Food eaten per second from the colony store.
    pub eat_rate: f64,
    pub energy_per_food: f64,
    /// Ants eat only below this fraction of `max_energy`.
    pub eat_below_fraction: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            initial_energy: 100.0,
            base_consumption: 0.5,
            idle_factor: 0.5,
            moving_factor: 1.0,
            digging_factor: 1.5,
            base_carry_capacity: 5.0,
            eat_rate: 1.0,
            energy_per_food: 10.0,
            eat_below_fraction: 0.8,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ColonyConfig {
    pub initial_food: f64,
    /// Weight of the newest sample in the smoothed rates.
    pub rate_smoothing: f64,
    pub safety_buffer_per_ant: f64,
    pub critical_ratio: f64,
    /// Ants spawn uniformly within this distance of the nest.
    pub spawn_radius: f64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            initial_food: 50.0,
            rate_smoothing: 0.1,
            safety_buffer_per_ant: 2.0,
            critical_ratio: 0.25,
            spawn_radius: 15.0,
        }
    }
}

/// Tile world, digging and the queen.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UndergroundConfig {
    pub width: u16,
    pub height: u16,
    pub tile_size: f64,
    pub dig_start_chance: f64,
    pub dig_duration: f64,
    pub chamber_chance: f64,
    pub extra_carve_chance: f64,
    /// Share of each underground delivery handed to the queen.
    pub queen_feed_fraction: f64,
    pub queen_initial_reserve: f64,
    pub egg_cooldown: f64,
    pub egg_food_threshold: f64,
    pub egg_food_cost: f64,
}

impl Default for UndergroundConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            tile_size: 16.0,
            dig_start_chance: 0.05,
            dig_duration: 3.0,
            chamber_chance: 0.1,
            extra_carve_chance: 0.3,
            queen_feed_fraction: 0.2,
            queen_initial_reserve: 10.0,
            egg_cooldown: 10.0,
            egg_food_threshold: 5.0,
            egg_food_cost: 2.0,
        }
    }
}

/// Movement between the surface and the nest. Chances are per second.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TransitConfig {
    pub entrance_radius: f64,
    pub transition_cooldown: f64,
    pub idle_enter_chance: f64,
    pub wander_enter_chance: f64,
    pub idle_exit_chance: f64,
    pub wander_exit_chance: f64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            entrance_radius: 25.0,
            transition_cooldown: 5.0,
            idle_enter_chance: 0.05,
            wander_enter_chance: 0.02,
            idle_exit_chance: 0.3,
            wander_exit_chance: 0.5,
        }
    }
}

/// Trait bounds and the experience-driven evolution cadence.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TraitConfig {
    pub min_value: f64,
    pub max_value: f64,
    pub reinforce_step: f64,
    pub decay_step: f64,
    pub nudge_step: f64,
    pub evolution_interval: u64,
    pub role_threshold: f64,
    /// Half-width of the uniform spread applied to newborn traits.
    pub initial_variation: f64,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            min_value: 0.5,
            max_value: 2.0,
            reinforce_step: 0.02,
            decay_step: 0.01,
            nudge_step: 0.01,
            evolution_interval: 60,
            role_threshold: 1.3,
            initial_variation: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub pheromone: PheromoneConfig,
    pub movement: MovementConfig,
    pub behavior: BehaviorConfig,
    pub metabolism: MetabolismConfig,
    pub colony: ColonyConfig,
    pub underground: UndergroundConfig,
    pub transit: TransitConfig,
    pub traits: TraitConfig,
}

fn is_chance(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - World and grid dimensions must be positive
    /// - Chances must lie in [0.0, 1.0]
    /// - Rates, durations and amounts must be non-negative
    /// - Trait bounds must bracket the 1.0 baseline
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.width > 0.0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0.0, "World height must be positive");
        anyhow::ensure!(
            self.world.initial_ants <= 10000,
            "Initial ant count too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.food_source_amount > 0.0,
            "Food source amount must be positive"
        );
        anyhow::ensure!(
            self.world.food_source_radius > 0.0,
            "Food source radius must be positive"
        );
        anyhow::ensure!(
            self.world.obstacle_min_radius > 0.0
                && self.world.obstacle_min_radius <= self.world.obstacle_max_radius,
            "Obstacle radius range must be positive and ordered"
        );

        // Pheromone validation
        anyhow::ensure!(
            self.pheromone.cell_size > 0.0,
            "Pheromone cell size must be positive"
        );
        anyhow::ensure!(
            self.pheromone.max_strength > 0.0,
            "Pheromone max strength must be positive"
        );
        anyhow::ensure!(
            self.pheromone.epsilon >= 0.0 && self.pheromone.epsilon < self.pheromone.max_strength,
            "Pheromone epsilon must be in [0.0, max_strength)"
        );
        anyhow::ensure!(
            self.pheromone
                .decay_rates
                .iter()
                .all(|r| (0.0..=1.0).contains(r)),
            "Pheromone decay rates must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.pheromone.diffusion_rate),
            "Diffusion rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.pheromone.diffusion_interval > 0,
            "Diffusion interval must be positive"
        );
        anyhow::ensure!(
            is_chance(self.pheromone.exploration_chance),
            "Exploration chance must be in [0.0, 1.0]"
        );

        // Movement validation
        anyhow::ensure!(
            self.movement.base_speed >= 0.0,
            "Base speed must be non-negative"
        );
        anyhow::ensure!(self.movement.turn_rate >= 0.0, "Turn rate must be non-negative");
        anyhow::ensure!(
            self.movement.wander_interval > 0.0,
            "Wander interval must be positive"
        );

        // Behavior validation
        for (name, chance) in [
            ("idle_to_wander_chance", self.behavior.idle_to_wander_chance),
            ("wander_to_forage_chance", self.behavior.wander_to_forage_chance),
            ("wander_to_return_chance", self.behavior.wander_to_return_chance),
            ("forage_to_return_chance", self.behavior.forage_to_return_chance),
            ("dig_start_chance", self.underground.dig_start_chance),
            ("chamber_chance", self.underground.chamber_chance),
            ("extra_carve_chance", self.underground.extra_carve_chance),
            ("queen_feed_fraction", self.underground.queen_feed_fraction),
            ("idle_enter_chance", self.transit.idle_enter_chance),
            ("wander_enter_chance", self.transit.wander_enter_chance),
            ("idle_exit_chance", self.transit.idle_exit_chance),
            ("wander_exit_chance", self.transit.wander_exit_chance),
        ] {
            anyhow::ensure!(is_chance(chance), "{name} must be in [0.0, 1.0]");
        }
        anyhow::ensure!(
            self.behavior.hunger_bailout_multiplier >= 1.0,
            "Hunger bail-out multiplier must be at least 1.0"
        );

        // Metabolism validation
        anyhow::ensure!(
            self.metabolism.max_energy > 0.0,
            "Max energy must be positive"
        );
        anyhow::ensure!(
            self.metabolism.initial_energy > 0.0
                && self.metabolism.initial_energy <= self.metabolism.max_energy,
            "Initial energy must be in (0.0, max_energy]"
        );
        anyhow::ensure!(
            self.metabolism.base_consumption >= 0.0,
            "Base consumption must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.base_carry_capacity > 0.0,
            "Carry capacity must be positive"
        );

        // Colony validation
        anyhow::ensure!(
            self.colony.initial_food >= 0.0,
            "Initial colony food must be non-negative"
        );
        anyhow::ensure!(
            self.colony.rate_smoothing > 0.0 && self.colony.rate_smoothing <= 1.0,
            "Rate smoothing must be in (0.0, 1.0]"
        );
        anyhow::ensure!(
            self.colony.safety_buffer_per_ant > 0.0,
            "Safety buffer per ant must be positive"
        );

        // Underground validation
        anyhow::ensure!(
            self.underground.width >= 16 && self.underground.height >= 12,
            "Underground grid too small (min 16x12)"
        );
        anyhow::ensure!(
            self.underground.tile_size > 0.0,
            "Tile size must be positive"
        );
        anyhow::ensure!(
            self.underground.dig_duration > 0.0,
            "Dig duration must be positive"
        );

        // Trait validation
        anyhow::ensure!(
            self.traits.min_value > 0.0
                && self.traits.min_value <= 1.0
                && self.traits.max_value >= 1.0,
            "Trait bounds must bracket the 1.0 baseline"
        );
        anyhow::ensure!(
            self.traits.evolution_interval > 0,
            "Evolution interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file, falling back to defaults when it is missing.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Hash of every tuning section, used to tag runs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.pheromone).as_bytes());
        hasher.update(format!("{:?}", self.movement).as_bytes());
        hasher.update(format!("{:?}", self.behavior).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.colony).as_bytes());
        hasher.update(format!("{:?}", self.underground).as_bytes());
        hasher.update(format!("{:?}", self.transit).as_bytes());
        hasher.update(format!("{:?}", self.traits).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = AppConfig {
            world: WorldConfig {
                width: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_transition_chance() {
        let config = AppConfig {
            behavior: BehaviorConfig {
                idle_to_wander_chance: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trait_bounds_must_bracket_baseline() {
        let config = AppConfig {
            traits: TraitConfig {
                min_value: 1.2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_diffusion_interval_rejected() {
        let config = AppConfig {
            pheromone: PheromoneConfig {
                diffusion_interval: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            initial_ants = 12
            seed = 7

            [pheromone]
            diffusion_interval = 3
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.world.initial_ants, 12);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.pheromone.diffusion_interval, 3);
        assert_eq!(config.world.width, WorldConfig::default().width);
        assert_eq!(config.traits.max_value, 2.0);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let result = AppConfig::from_toml("[transit]\nidle_exit_chance = 2.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("definitely/not/here/config.toml").expect("defaults");
        assert_eq!(config.world.initial_ants, WorldConfig::default().initial_ants);
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let mut config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
        config2.pheromone.diffusion_rate = 0.2;
        assert_ne!(config1.fingerprint(), config2.fingerprint());
    }
}
