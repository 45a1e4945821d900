//! Tile excavation by underground ants.

use super::behavior::{change_state, roll};
use crate::config::{TraitConfig, UndergroundConfig};
use crate::traits::{TraitBounds, TraitLogic};
use crate::underground::UndergroundGrid;
use formicary_data::{Ant, AntState, DigJob, Layer, TaskAffinity, TileType, TraitProfile, Velocity};
use rand::Rng;

/// A finished excavation.
#[derive(Debug, Clone, PartialEq)]
pub struct DigOutcome {
    pub tile: (u16, u16),
    pub result: TileType,
    /// Neighbouring dirt tiles opened up as a side effect.
    pub extra: Vec<(u16, u16)>,
}

/// Seconds needed to dig one tile.
#[inline]
pub fn dig_duration(traits: &TraitProfile, config: &UndergroundConfig) -> f64 {
    config.dig_duration / traits.digging.max(f64::EPSILON)
}

/// Lets an idle underground ant pick a dirt tile next to it and start digging.
pub fn try_start_digging<R: Rng>(
    ant: &mut Ant,
    grid: &UndergroundGrid,
    config: &UndergroundConfig,
    dt: f64,
    rng: &mut R,
) -> bool {
    if ant.layer != Layer::Underground || ant.state != AntState::Idle {
        return false;
    }
    let Some((tx, ty)) = grid.tile_at(ant.position) else {
        return false;
    };
    if !grid.is_passable(i32::from(tx), i32::from(ty)) {
        return false;
    }
    let candidates = grid.diggable_neighbors(tx, ty);
    if candidates.is_empty() {
        return false;
    }
    if !roll(rng, config.dig_start_chance * ant.traits.digging, dt) {
        return false;
    }

    let (tile_x, tile_y) = candidates[rng.gen_range(0..candidates.len())];
    change_state(ant, AntState::Digging);
    ant.dig = Some(DigJob {
        tile_x,
        tile_y,
        elapsed: 0.0,
    });
    ant.target_velocity = Velocity::ZERO;
    true
}

/// Works on the current dig job; completes it once the duration has elapsed.
pub fn advance_digging<R: Rng>(
    ant: &mut Ant,
    grid: &mut UndergroundGrid,
    config: &UndergroundConfig,
    traits: &TraitConfig,
    dt: f64,
    rng: &mut R,
) -> Option<DigOutcome> {
    if ant.state != AntState::Digging {
        return None;
    }
    let duration = dig_duration(&ant.traits, config);
    if ant.dig.is_none() {
        change_state(ant, AntState::Idle);
        return None;
    }
    let job = ant.dig.as_mut()?;
    job.elapsed += dt.max(0.0);
    if job.elapsed < duration {
        return None;
    }
    let (x, y) = (job.tile_x, job.tile_y);

    let result = if rng.gen::<f64>() < config.chamber_chance {
        TileType::Chamber
    } else {
        TileType::Tunnel
    };
    // Another ant may have opened the tile first.
    let dug = grid.excavate(x, y, result);

    let mut extra = Vec::new();
    if dug && rng.gen::<f64>() < config.extra_carve_chance * ant.traits.building {
        let count = rng.gen_range(1..=2);
        let mut neighbors = grid.diggable_neighbors(x, y);
        for _ in 0..count {
            if neighbors.is_empty() {
                break;
            }
            let (nx, ny) = neighbors.swap_remove(rng.gen_range(0..neighbors.len()));
            if grid.excavate(nx, ny, TileType::Tunnel) {
                extra.push((nx, ny));
            }
        }
    }

    if dug && (result == TileType::Chamber || !extra.is_empty()) {
        ant.traits
            .reinforce(TaskAffinity::Building, traits.nudge_step, TraitBounds::from(traits));
    }
    change_state(ant, AntState::Idle);

    dug.then_some(DigOutcome {
        tile: (x, y),
        result,
        extra,
    })
}
