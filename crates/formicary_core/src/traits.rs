//! Trait profile logic: bounded updates and role derivation.

use crate::config::TraitConfig;
pub use formicary_data::{Role, TaskAffinity, TraitProfile};
use rand::Rng;

/// Inclusive range every trait value is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitBounds {
    pub min: f64,
    pub max: f64,
}

impl TraitBounds {
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return TraitProfile::BASELINE.clamp(self.min, self.max);
        }
        value.clamp(self.min, self.max)
    }
}

impl Default for TraitBounds {
    fn default() -> Self {
        Self { min: 0.5, max: 2.0 }
    }
}

impl From<&TraitConfig> for TraitBounds {
    fn from(config: &TraitConfig) -> Self {
        Self {
            min: config.min_value,
            max: config.max_value,
        }
    }
}

pub trait TraitLogic {
    fn affinity(&self, task: TaskAffinity) -> f64;
    fn set_affinity(&mut self, task: TaskAffinity, value: f64, bounds: TraitBounds);
    fn reinforce(&mut self, task: TaskAffinity, step: f64, bounds: TraitBounds);
    fn relax_toward_baseline(&mut self, task: TaskAffinity, step: f64, bounds: TraitBounds);
    fn nudge_speed(&mut self, delta: f64, bounds: TraitBounds);
    fn nudge_carry(&mut self, delta: f64, bounds: TraitBounds);
    fn nudge_efficiency(&mut self, delta: f64, bounds: TraitBounds);
    fn nudge_sensitivity(&mut self, delta: f64, bounds: TraitBounds);
    fn nudge_wander_radius(&mut self, delta: f64, bounds: TraitBounds);
    fn clamp_all(&mut self, bounds: TraitBounds);
    fn is_within(&self, bounds: TraitBounds) -> bool;
}

impl TraitLogic for TraitProfile {
    fn affinity(&self, task: TaskAffinity) -> f64 {
        match task {
            TaskAffinity::Gathering => self.gathering,
            TaskAffinity::Nursing => self.nursing,
            TaskAffinity::Digging => self.digging,
            TaskAffinity::Building => self.building,
        }
    }

    fn set_affinity(&mut self, task: TaskAffinity, value: f64, bounds: TraitBounds) {
        let value = bounds.clamp(value);
        match task {
            TaskAffinity::Gathering => self.gathering = value,
            TaskAffinity::Nursing => self.nursing = value,
            TaskAffinity::Digging => self.digging = value,
            TaskAffinity::Building => self.building = value,
        }
    }

    fn reinforce(&mut self, task: TaskAffinity, step: f64, bounds: TraitBounds) {
        self.set_affinity(task, self.affinity(task) + step, bounds);
    }

    fn relax_toward_baseline(&mut self, task: TaskAffinity, step: f64, bounds: TraitBounds) {
        let current = self.affinity(task);
        let base = TraitProfile::BASELINE;
        let next = if current > base {
            (current - step).max(base)
        } else {
            (current + step).min(base)
        };
        self.set_affinity(task, next, bounds);
    }

    fn nudge_speed(&mut self, delta: f64, bounds: TraitBounds) {
        self.movement_speed = bounds.clamp(self.movement_speed + delta);
    }

    fn nudge_carry(&mut self, delta: f64, bounds: TraitBounds) {
        self.carry_capacity = bounds.clamp(self.carry_capacity + delta);
    }

    fn nudge_efficiency(&mut self, delta: f64, bounds: TraitBounds) {
        self.energy_efficiency = bounds.clamp(self.energy_efficiency + delta);
    }

    fn nudge_sensitivity(&mut self, delta: f64, bounds: TraitBounds) {
        self.pheromone_sensitivity = bounds.clamp(self.pheromone_sensitivity + delta);
    }

    fn nudge_wander_radius(&mut self, delta: f64, bounds: TraitBounds) {
        self.wandering_radius = bounds.clamp(self.wandering_radius + delta);
    }

    fn clamp_all(&mut self, bounds: TraitBounds) {
        for field in [
            &mut self.gathering,
            &mut self.nursing,
            &mut self.digging,
            &mut self.building,
            &mut self.movement_speed,
            &mut self.carry_capacity,
            &mut self.energy_efficiency,
            &mut self.pheromone_sensitivity,
            &mut self.wandering_radius,
        ] {
            *field = bounds.clamp(*field);
        }
    }

    fn is_within(&self, bounds: TraitBounds) -> bool {
        self.values()
            .iter()
            .all(|v| *v >= bounds.min && *v <= bounds.max)
    }
}

/// Baseline profile with a small uniform spread per trait.
pub fn random_profile_with_rng<R: Rng>(
    rng: &mut R,
    variation: f64,
    bounds: TraitBounds,
) -> TraitProfile {
    let mut profile = TraitProfile::baseline();
    if variation > 0.0 {
        for field in [
            &mut profile.gathering,
            &mut profile.nursing,
            &mut profile.digging,
            &mut profile.building,
            &mut profile.movement_speed,
            &mut profile.carry_capacity,
            &mut profile.energy_efficiency,
            &mut profile.pheromone_sensitivity,
            &mut profile.wandering_radius,
        ] {
            *field += rng.gen_range(-variation..=variation);
        }
    }
    profile.clamp_all(bounds);
    profile
}

/// Diagnostic role label. Recomputed on demand, never stored.
///
/// Task affinities count as high at `threshold`; the supporting multipliers
/// only need to be halfway between baseline and `threshold`.
pub fn derive_role(traits: &TraitProfile, threshold: f64) -> Role {
    let support = TraitProfile::BASELINE + (threshold - TraitProfile::BASELINE) * 0.5;

    if traits.gathering >= threshold
        && traits.movement_speed >= support
        && traits.pheromone_sensitivity >= support
        && traits.carry_capacity >= support
    {
        Role::FoodGatherer
    } else if traits.digging >= threshold && traits.digging >= traits.building {
        Role::Digger
    } else if traits.building >= threshold {
        Role::Builder
    } else if traits.nursing >= threshold {
        Role::Nurse
    } else if traits.wandering_radius >= threshold && traits.movement_speed >= support {
        Role::Scout
    } else {
        Role::Generalist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const BOUNDS: TraitBounds = TraitBounds { min: 0.5, max: 2.0 };

    #[test]
    fn test_reinforce_clamps_at_max() {
        let mut t = TraitProfile::baseline();
        for _ in 0..1000 {
            t.reinforce(TaskAffinity::Gathering, 0.05, BOUNDS);
        }
        assert_eq!(t.gathering, 2.0);
    }

    #[test]
    fn test_relax_does_not_overshoot_baseline() {
        let mut t = TraitProfile::baseline();
        t.set_affinity(TaskAffinity::Digging, 1.005, BOUNDS);
        t.relax_toward_baseline(TaskAffinity::Digging, 0.01, BOUNDS);
        assert_eq!(t.digging, 1.0);

        t.set_affinity(TaskAffinity::Nursing, 0.7, BOUNDS);
        t.relax_toward_baseline(TaskAffinity::Nursing, 0.1, BOUNDS);
        assert!((t.nursing - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_nudges_respect_bounds() {
        let mut t = TraitProfile::baseline();
        t.nudge_speed(5.0, BOUNDS);
        t.nudge_carry(-5.0, BOUNDS);
        t.nudge_efficiency(0.25, BOUNDS);
        t.nudge_sensitivity(f64::NAN, BOUNDS);
        t.nudge_wander_radius(-0.1, BOUNDS);
        assert_eq!(t.movement_speed, 2.0);
        assert_eq!(t.carry_capacity, 0.5);
        assert!((t.energy_efficiency - 1.25).abs() < 1e-12);
        assert_eq!(t.pheromone_sensitivity, 1.0);
        assert!((t.wandering_radius - 0.9).abs() < 1e-12);
        assert!(t.is_within(BOUNDS));
    }

    #[test]
    fn test_random_profile_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let t = random_profile_with_rng(&mut rng, 0.8, BOUNDS);
            assert!(t.is_within(BOUNDS));
        }
        let flat = random_profile_with_rng(&mut rng, 0.0, BOUNDS);
        assert_eq!(flat, TraitProfile::baseline());
    }

    #[test]
    fn test_derive_role_food_gatherer() {
        let t = TraitProfile {
            gathering: 1.5,
            movement_speed: 1.2,
            pheromone_sensitivity: 1.2,
            carry_capacity: 1.2,
            ..TraitProfile::baseline()
        };
        assert_eq!(derive_role(&t, 1.3), Role::FoodGatherer);
    }

    #[test]
    fn test_derive_role_needs_supporting_traits() {
        let t = TraitProfile {
            gathering: 1.9,
            ..TraitProfile::baseline()
        };
        assert_eq!(derive_role(&t, 1.3), Role::Generalist);
    }

    #[test]
    fn test_derive_role_other_labels() {
        let digger = TraitProfile {
            digging: 1.4,
            building: 1.35,
            ..TraitProfile::baseline()
        };
        assert_eq!(derive_role(&digger, 1.3), Role::Digger);

        let builder = TraitProfile {
            digging: 1.4,
            building: 1.6,
            ..TraitProfile::baseline()
        };
        assert_eq!(derive_role(&builder, 1.3), Role::Builder);

        let nurse = TraitProfile {
            nursing: 1.3,
            ..TraitProfile::baseline()
        };
        assert_eq!(derive_role(&nurse, 1.3), Role::Nurse);

        let scout = TraitProfile {
            wandering_radius: 1.5,
            movement_speed: 1.2,
            ..TraitProfile::baseline()
        };
        assert_eq!(derive_role(&scout, 1.3), Role::Scout);
        assert_eq!(
            derive_role(&TraitProfile::baseline(), 1.3),
            Role::Generalist
        );
    }
}
