//! Experience-driven drift of task affinities.

use crate::config::TraitConfig;
use crate::traits::{TraitBounds, TraitLogic};
use formicary_data::{Ant, AntState, TaskAffinity};

/// Affinities the ant's current activity exercises.
pub fn nominated_tasks(ant: &Ant) -> &'static [TaskAffinity] {
    match ant.state {
        AntState::Foraging => &[TaskAffinity::Gathering],
        AntState::Returning if ant.is_carrying() => &[TaskAffinity::Gathering],
        AntState::Idle => &[TaskAffinity::Nursing],
        AntState::Digging => &[TaskAffinity::Digging],
        AntState::Wandering | AntState::Returning => &[],
    }
}

/// One evolution step for a single ant: exercised affinities grow, the rest
/// relax toward baseline.
pub fn evolve_ant(ant: &mut Ant, config: &TraitConfig) {
    let bounds = TraitBounds::from(config);
    let nominated = nominated_tasks(ant);
    for task in TaskAffinity::ALL {
        if nominated.contains(&task) {
            ant.traits.reinforce(task, config.reinforce_step, bounds);
        } else {
            ant.traits.relax_toward_baseline(task, config.decay_step, bounds);
        }
    }
    if ant.state == AntState::Returning && ant.is_carrying() {
        ant.traits.nudge_carry(config.reinforce_step, bounds);
    }
    ant.traits.clamp_all(bounds);
}

/// Runs an evolution step over every ant.
pub fn run_evolution_cycle(ants: &mut [Ant], config: &TraitConfig) {
    for ant in ants.iter_mut() {
        evolve_ant(ant, config);
    }
    tracing::debug!(ants = ants.len(), "Trait evolution cycle");
}

#[inline]
pub fn is_evolution_tick(tick: u64, interval: u64) -> bool {
    interval > 0 && tick > 0 && tick % interval == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::lifecycle::create_ant_with_rng;
    use formicary_data::{Position, TraitProfile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn ant() -> Ant {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut a = create_ant_with_rng(
            Uuid::from_u128(1),
            Position::new(0.0, 0.0),
            &AppConfig::default(),
            &mut rng,
        );
        a.traits = TraitProfile::baseline();
        a
    }

    #[test]
    fn test_foraging_reinforces_gathering_only() {
        let config = TraitConfig::default();
        let mut a = ant();
        a.state = AntState::Foraging;
        a.traits.digging = 1.5;
        evolve_ant(&mut a, &config);
        assert!((a.traits.gathering - 1.02).abs() < 1e-12);
        assert!((a.traits.digging - 1.49).abs() < 1e-12);
        assert_eq!(a.traits.nursing, 1.0);
    }

    #[test]
    fn test_laden_return_reinforces_carry() {
        let config = TraitConfig::default();
        let mut a = ant();
        a.state = AntState::Returning;
        a.carried_food = 2.0;
        evolve_ant(&mut a, &config);
        assert!(a.traits.gathering > 1.0);
        assert!(a.traits.carry_capacity > 1.0);

        let mut empty = ant();
        empty.state = AntState::Returning;
        evolve_ant(&mut empty, &config);
        assert_eq!(empty.traits, TraitProfile::baseline());
    }

    #[test]
    fn test_many_cycles_stay_bounded() {
        let config = TraitConfig::default();
        let mut ants: Vec<Ant> = [AntState::Idle, AntState::Digging, AntState::Foraging]
            .into_iter()
            .map(|s| {
                let mut a = ant();
                a.state = s;
                a
            })
            .collect();
        for _ in 0..10_000 {
            run_evolution_cycle(&mut ants, &config);
        }
        let bounds = TraitBounds::from(&config);
        for a in &ants {
            assert!(a.traits.is_within(bounds));
        }
        assert_eq!(ants[0].traits.nursing, config.max_value);
        assert_eq!(ants[1].traits.digging, config.max_value);
    }

    #[test]
    fn test_evolution_cadence() {
        assert!(!is_evolution_tick(0, 60));
        assert!(!is_evolution_tick(59, 60));
        assert!(is_evolution_tick(120, 60));
        assert!(!is_evolution_tick(120, 0));
    }
}
