//! Simulation counters and structured logging setup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Running totals for one simulation.
pub struct Metrics {
    tick_count: AtomicU64,
    ant_count: AtomicU64,
    deaths: AtomicU64,
    deliveries: AtomicU64,
    digs: AtomicU64,
    transitions: AtomicU64,
    eggs: AtomicU64,
    log_interval: u64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("tick_count", &self.tick_count())
            .field("ant_count", &self.ant_count())
            .field("deaths", &self.deaths())
            .field("deliveries", &self.deliveries())
            .field("digs", &self.digs())
            .field("transitions", &self.transitions())
            .field("eggs", &self.eggs())
            .finish()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::with_log_interval(600)
    }

    /// Collector that emits an `info!` summary every `log_interval` ticks (0 disables it).
    #[must_use]
    pub fn with_log_interval(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            ant_count: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            digs: AtomicU64::new(0),
            transitions: AtomicU64::new(0),
            eggs: AtomicU64::new(0),
            log_interval,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, ants: usize, colony_food: f64) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.ant_count.store(ants as u64, Ordering::Relaxed);

        if self.log_interval > 0 && tick % self.log_interval == 0 {
            tracing::info!(
                tick = tick,
                ants = ants,
                colony_food = colony_food,
                deaths = self.deaths(),
                deliveries = self.deliveries(),
                digs = self.digs(),
                eggs = self.eggs(),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_death(&self) {
        self.deaths.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self) {
        self.deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dig(&self) {
        self.digs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transition(&self) {
        self.transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_egg(&self) {
        self.eggs.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn ant_count(&self) -> u64 {
        self.ant_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn digs(&self) -> u64 {
        self.digs.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn transitions(&self) -> u64 {
        self.transitions.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn eggs(&self) -> u64 {
        self.eggs.load(Ordering::Relaxed)
    }
}

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.deaths(), 0);
    }

    #[test]
    fn test_record_tick() {
        let metrics = Metrics::with_log_interval(1);
        metrics.record_tick(Duration::from_millis(16), 100, 50.0);
        assert_eq!(metrics.tick_count(), 1);
        assert_eq!(metrics.ant_count(), 100);
    }

    #[test]
    fn test_event_counters() {
        let metrics = Metrics::new();
        metrics.record_death();
        metrics.record_dig();
        metrics.record_dig();
        metrics.record_transition();
        metrics.record_egg();
        metrics.record_delivery();
        assert_eq!(metrics.deaths(), 1);
        assert_eq!(metrics.digs(), 2);
        assert_eq!(metrics.transitions(), 1);
        assert_eq!(metrics.eggs(), 1);
        assert_eq!(metrics.deliveries(), 1);
    }

    #[test]
    fn test_named_counters() {
        let metrics = Metrics::new();
        metrics.increment_counter("food_replaced");
        metrics.increment_counter("food_replaced");
        assert_eq!(metrics.counter("food_replaced"), 2);
        assert_eq!(metrics.counter("missing"), 0);
    }
}
