//! Colony food accounting and health classification.

use crate::config::ColonyConfig;
pub use formicary_data::{Colony, ColonyHealth, Position};
use uuid::Uuid;

pub fn create_colony(id: Uuid, position: Position, initial_food: f64) -> Colony {
    let food_store = initial_food.max(0.0);
    Colony {
        id,
        position,
        members: Vec::new(),
        food_store,
        gathering_rate: 0.0,
        consumption_rate: 0.0,
        gathered_this_tick: 0.0,
        consumed_this_tick: 0.0,
        store_at_tick_start: food_store,
        total_gathered: 0.0,
        total_consumed: 0.0,
    }
}

pub trait ColonyLogic {
    /// Snapshots the store and clears the per-tick accumulators.
    fn begin_tick(&mut self);
    /// Adds delivered food to the store.
    fn deposit_food(&mut self, amount: f64) -> f64;
    /// Removes up to `amount` from the store; returns what was actually taken.
    fn consume_food(&mut self, amount: f64) -> f64;
    /// Folds this tick's accumulators into the smoothed rates.
    fn finalize_tick(&mut self, dt: f64, smoothing: f64);
    fn health(&self, config: &ColonyConfig) -> ColonyHealth;
    fn remove_member(&mut self, id: &Uuid) -> bool;
}

impl ColonyLogic for Colony {
    fn begin_tick(&mut self) {
        self.store_at_tick_start = self.food_store;
        self.gathered_this_tick = 0.0;
        self.consumed_this_tick = 0.0;
    }

    fn deposit_food(&mut self, amount: f64) -> f64 {
        if !(amount.is_finite() && amount > 0.0) {
            return 0.0;
        }
        self.food_store += amount;
        self.gathered_this_tick += amount;
        self.total_gathered += amount;
        amount
    }

    fn consume_food(&mut self, amount: f64) -> f64 {
        if !(amount.is_finite() && amount > 0.0) {
            return 0.0;
        }
        let taken = amount.min(self.food_store);
        self.food_store = (self.food_store - taken).max(0.0);
        self.consumed_this_tick += taken;
        self.total_consumed += taken;
        taken
    }

    fn finalize_tick(&mut self, dt: f64, smoothing: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let alpha = smoothing.clamp(0.0, 1.0);
        let gathered = self.gathered_this_tick / dt;
        let consumed = self.consumed_this_tick / dt;
        self.gathering_rate = alpha * gathered + (1.0 - alpha) * self.gathering_rate;
        self.consumption_rate = alpha * consumed + (1.0 - alpha) * self.consumption_rate;
    }

    fn health(&self, config: &ColonyConfig) -> ColonyHealth {
        if self.members.is_empty() {
            return ColonyHealth::Dead;
        }
        let buffer = self.members.len() as f64 * config.safety_buffer_per_ant;
        let ratio = self.food_store / buffer.max(f64::EPSILON);
        if ratio < config.critical_ratio {
            ColonyHealth::Critical
        } else if ratio < 1.0 {
            ColonyHealth::Struggling
        } else {
            ColonyHealth::Healthy
        }
    }

    fn remove_member(&mut self, id: &Uuid) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != id);
        self.members.len() != before
    }
}
