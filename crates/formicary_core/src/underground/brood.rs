//! Queen feeding and egg laying.

use super::{TileType, UndergroundGrid};
use crate::config::UndergroundConfig;
use formicary_data::Egg;

/// Half-width of the 5×5 neighbourhood searched for a laying spot.
const LAYING_RADIUS: i32 = 2;

pub fn feed_queen(grid: &mut UndergroundGrid, amount: f64) -> f64 {
    if !(amount.is_finite() && amount > 0.0) {
        return 0.0;
    }
    grid.queen.food_reserve += amount;
    amount
}

/// First free chamber tile around the queen, scanning rows top to bottom.
pub fn find_laying_spot(grid: &UndergroundGrid) -> Option<(u16, u16)> {
    let qx = i32::from(grid.queen.tile_x);
    let qy = i32::from(grid.queen.tile_y);
    for dy in -LAYING_RADIUS..=LAYING_RADIUS {
        for dx in -LAYING_RADIUS..=LAYING_RADIUS {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (x, y) = (qx + dx, qy + dy);
            if grid.get(x, y) != Some(TileType::Chamber) {
                continue;
            }
            let (x, y) = (x as u16, y as u16);
            if !grid.egg_at(x, y) {
                return Some((x, y));
            }
        }
    }
    None
}

/// Advances the queen's cooldown and egg ages. Returns the egg laid this step, if any.
///
/// Laying needs an elapsed cooldown and enough reserve. The cooldown restarts
/// whenever she tries, even when the chamber is full.
pub fn update_brood(grid: &mut UndergroundGrid, config: &UndergroundConfig, dt: f64) -> Option<Egg> {
    if !(dt.is_finite() && dt > 0.0) {
        return None;
    }
    for egg in &mut grid.eggs {
        egg.age += dt;
    }

    let queen = &mut grid.queen;
    queen.laying_cooldown = (queen.laying_cooldown - dt).max(0.0);
    if queen.laying_cooldown > 0.0 || queen.food_reserve < config.egg_food_threshold {
        return None;
    }
    queen.laying_cooldown = config.egg_cooldown.max(0.0);

    let (tile_x, tile_y) = find_laying_spot(grid)?;
    let egg = Egg {
        tile_x,
        tile_y,
        age: 0.0,
    };
    grid.queen.food_reserve = (grid.queen.food_reserve - config.egg_food_cost).max(0.0);
    grid.queen.eggs_laid += 1;
    grid.eggs.push(egg);
    Some(egg)
}
