//! Stochastic macro-state transitions.

use crate::config::BehaviorConfig;
use formicary_data::{Ant, AntState};
use rand::Rng;

/// Probability that an event with a per-second `chance` fires within `dt` seconds.
#[inline]
pub fn transition_probability(chance_per_second: f64, dt: f64) -> f64 {
    if !(dt.is_finite() && dt > 0.0) || !chance_per_second.is_finite() {
        return 0.0;
    }
    let chance = chance_per_second.clamp(0.0, 1.0);
    (1.0 - (1.0 - chance).powf(dt)).clamp(0.0, 1.0)
}

#[inline]
pub fn roll<R: Rng>(rng: &mut R, chance_per_second: f64, dt: f64) -> bool {
    let p = transition_probability(chance_per_second, dt);
    p > 0.0 && rng.gen::<f64>() < p
}

/// Switches state and resets the per-state timers.
pub fn change_state(ant: &mut Ant, next: AntState) {
    if ant.state == next {
        return;
    }
    if ant.state == AntState::Digging {
        ant.dig = None;
    }
    if next == AntState::Foraging {
        ant.followed_trail = false;
    }
    ant.state = next;
    ant.time_in_state = 0.0;
    ant.time_since_turn = 0.0;
}

#[inline]
pub fn is_hungry(ant: &Ant, config: &BehaviorConfig) -> bool {
    ant.energy < config.hunger_threshold
}

/// Chance per second of giving up and heading home, raised when hungry.
fn return_chance(ant: &Ant, base: f64, config: &BehaviorConfig) -> f64 {
    if is_hungry(ant, config) {
        base * config.hunger_bailout_multiplier
    } else {
        base
    }
}

/// Runs the random transitions for one tick and returns the new state, if any.
///
/// Only Idle → Wandering, Wandering → Foraging | Returning and
/// Foraging → Returning happen here. Arrival home and digging are driven by
/// their own systems.
pub fn update_state<R: Rng>(
    ant: &mut Ant,
    config: &BehaviorConfig,
    dt: f64,
    rng: &mut R,
) -> Option<AntState> {
    let next = match ant.state {
        AntState::Idle => {
            roll(rng, config.idle_to_wander_chance, dt).then_some(AntState::Wandering)
        }
        AntState::Wandering => {
            if ant.time_in_state < config.min_wander_duration {
                None
            } else if roll(
                rng,
                config.wander_to_forage_chance * ant.traits.gathering,
                dt,
            ) {
                Some(AntState::Foraging)
            } else if roll(
                rng,
                return_chance(ant, config.wander_to_return_chance, config),
                dt,
            ) {
                Some(AntState::Returning)
            } else {
                None
            }
        }
        AntState::Foraging => {
            if ant.time_in_state < config.min_forage_duration {
                None
            } else {
                roll(
                    rng,
                    return_chance(ant, config.forage_to_return_chance, config),
                    dt,
                )
                .then_some(AntState::Returning)
            }
        }
        AntState::Returning | AntState::Digging => None,
    }?;

    if next == AntState::Returning && is_hungry(ant, config) {
        ant.hunger_bailout = true;
    }
    change_state(ant, next);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::lifecycle::create_ant_with_rng;
    use formicary_data::{DigJob, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn ant(rng: &mut ChaCha8Rng) -> Ant {
        create_ant_with_rng(
            Uuid::from_u128(1),
            Position::new(0.0, 0.0),
            &AppConfig::default(),
            rng,
        )
    }

    #[test]
    fn test_transition_probability_edges() {
        assert_eq!(transition_probability(0.5, 0.0), 0.0);
        assert_eq!(transition_probability(0.5, -1.0), 0.0);
        assert_eq!(transition_probability(1.0, 0.016), 1.0);
        assert_eq!(transition_probability(0.0, 10.0), 0.0);
        assert!((transition_probability(0.5, 1.0) - 0.5).abs() < 1e-12);
        assert!((transition_probability(0.5, 2.0) - 0.75).abs() < 1e-12);
        assert_eq!(transition_probability(7.0, 1.0), 1.0);
    }

    #[test]
    fn test_idle_only_goes_wandering() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = BehaviorConfig {
            idle_to_wander_chance: 0.9,
            ..BehaviorConfig::default()
        };
        for _ in 0..500 {
            let mut a = ant(&mut rng);
            a.energy = 1.0;
            if let Some(next) = update_state(&mut a, &config, 0.5, &mut rng) {
                assert_eq!(next, AntState::Wandering);
            }
        }
    }

    #[test]
    fn test_min_wander_duration_guard() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let config = BehaviorConfig {
            wander_to_forage_chance: 1.0,
            wander_to_return_chance: 1.0,
            min_wander_duration: 2.0,
            ..BehaviorConfig::default()
        };
        let mut a = ant(&mut rng);
        change_state(&mut a, AntState::Wandering);
        a.time_in_state = 1.9;
        assert_eq!(update_state(&mut a, &config, 0.1, &mut rng), None);
        a.time_in_state = 2.0;
        // Foraging is tried first and always fires at chance 1.
        assert_eq!(
            update_state(&mut a, &config, 0.1, &mut rng),
            Some(AntState::Foraging)
        );
        assert_eq!(a.time_in_state, 0.0);
    }

    #[test]
    fn test_hunger_raises_return_chance_and_flags_bailout() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = BehaviorConfig {
            forage_to_return_chance: 0.2,
            hunger_bailout_multiplier: 5.0,
            min_forage_duration: 0.0,
            ..BehaviorConfig::default()
        };
        let mut a = ant(&mut rng);
        change_state(&mut a, AntState::Foraging);
        a.energy = 1.0;
        assert_eq!(
            update_state(&mut a, &config, 1.0, &mut rng),
            Some(AntState::Returning)
        );
        assert!(a.hunger_bailout);
    }

    #[test]
    fn test_change_state_resets_timers_and_dig_job() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut a = ant(&mut rng);
        a.state = AntState::Digging;
        a.dig = Some(DigJob {
            tile_x: 1,
            tile_y: 1,
            elapsed: 0.5,
        });
        a.time_in_state = 3.0;
        a.time_since_turn = 2.0;
        change_state(&mut a, AntState::Idle);
        assert!(a.dig.is_none());
        assert_eq!(a.time_in_state, 0.0);
        assert_eq!(a.time_since_turn, 0.0);
    }

    #[test]
    fn test_returning_and_digging_are_not_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = BehaviorConfig {
            idle_to_wander_chance: 1.0,
            wander_to_forage_chance: 1.0,
            wander_to_return_chance: 1.0,
            forage_to_return_chance: 1.0,
            ..BehaviorConfig::default()
        };
        let mut a = ant(&mut rng);
        for state in [AntState::Returning, AntState::Digging] {
            a.state = state;
            assert_eq!(update_state(&mut a, &config, 10.0, &mut rng), None);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn probability_is_a_probability(chance in -1.0f64..2.0, dt in -1.0f64..10.0) {
            let p = transition_probability(chance, dt);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn longer_steps_are_never_less_likely(chance in 0.0f64..=1.0, dt in 0.001f64..5.0, extra in 0.0f64..5.0) {
            prop_assert!(transition_probability(chance, dt + extra) >= transition_probability(chance, dt));
        }
    }
}
