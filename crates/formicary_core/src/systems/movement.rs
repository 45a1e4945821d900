//! Steering, integration and per-layer constraints.

use crate::config::{MovementConfig, PheromoneConfig};
use crate::geometry::{distance, normalize, random_heading, speed};
use crate::pheromone::{PheromoneField, PheromoneType};
use crate::underground::UndergroundGrid;
use formicary_data::{Ant, Layer, Obstacle, Position, Velocity};
use rand::Rng;

/// Unit vectors of the eight compass directions, starting east, clockwise in screen space.
const COMPASS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (0.0, 1.0),
    (-std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2),
    (-1.0, 0.0),
    (-std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
    (0.0, -1.0),
    (std::f64::consts::FRAC_1_SQRT_2, -std::f64::consts::FRAC_1_SQRT_2),
];

/// Cruising speed of an ant on its current layer.
pub fn ant_speed(ant: &Ant, config: &MovementConfig) -> f64 {
    let base = config.base_speed * ant.traits.movement_speed;
    match ant.layer {
        Layer::Surface => base,
        Layer::Underground => base * config.underground_speed_factor,
    }
}

/// Blends the velocity toward the target velocity: `v += (t - v)(1 - e^(-rate·dt))`.
pub fn apply_inertia(ant: &mut Ant, turn_rate: f64, dt: f64) {
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }
    let k = 1.0 - (-turn_rate.max(0.0) * dt).exp();
    ant.velocity.vx += (ant.target_velocity.vx - ant.velocity.vx) * k;
    ant.velocity.vy += (ant.target_velocity.vy - ant.velocity.vy) * k;
}

/// Steers along the tangent of the nearest obstacle ahead. Returns whether it steered.
pub fn avoid_obstacles(ant: &mut Ant, obstacles: &[Obstacle], config: &MovementConfig) -> bool {
    let current_speed = speed(ant.velocity);
    let Some((hx, hy)) = normalize(ant.velocity.vx, ant.velocity.vy) else {
        return false;
    };

    let mut nearest: Option<(&Obstacle, f64)> = None;
    for o in obstacles {
        let gap = distance(ant.position, o.position) - o.radius;
        if gap > config.perception_radius {
            continue;
        }
        let Some((ox, oy)) = normalize(o.position.x - ant.position.x, o.position.y - ant.position.y)
        else {
            continue;
        };
        if hx * ox + hy * oy < config.avoidance_dot_threshold {
            continue;
        }
        if nearest.map_or(true, |(_, g)| gap < g) {
            nearest = Some((o, gap));
        }
    }

    let Some((o, _)) = nearest else {
        return false;
    };
    let Some((ax, ay)) = normalize(ant.position.x - o.position.x, ant.position.y - o.position.y)
    else {
        return false;
    };
    // Two tangents; keep the one closer to the current heading.
    let (t1x, t1y) = (-ay, ax);
    let (tx, ty) = if t1x * hx + t1y * hy >= 0.0 {
        (t1x, t1y)
    } else {
        (ay, -ax)
    };
    ant.velocity = Velocity::new(tx * current_speed, ty * current_speed);
    true
}

pub fn integrate(ant: &mut Ant, dt: f64) {
    ant.position.x += ant.velocity.vx * dt;
    ant.position.y += ant.velocity.vy * dt;
}

/// Pushes an ant out of any obstacle it ended up inside and cancels the inward
/// velocity. Returns the contact point for a danger puff.
pub fn resolve_penetration(ant: &mut Ant, obstacles: &[Obstacle]) -> Option<Position> {
    let mut contact = None;
    for o in obstacles {
        let d = distance(ant.position, o.position);
        if d >= o.radius {
            continue;
        }
        let (nx, ny) = normalize(ant.position.x - o.position.x, ant.position.y - o.position.y)
            .unwrap_or((1.0, 0.0));
        ant.position = Position::new(o.position.x + nx * o.radius, o.position.y + ny * o.radius);
        for v in [&mut ant.velocity, &mut ant.target_velocity] {
            let inward = v.vx * nx + v.vy * ny;
            if inward < 0.0 {
                v.vx -= inward * nx;
                v.vy -= inward * ny;
            }
        }
        contact = Some(ant.position);
    }
    contact
}

/// Clamps into the world rectangle and reflects the outward velocity component.
pub fn enforce_bounds(ant: &mut Ant, width: f64, height: f64) {
    if !ant.position.x.is_finite() || !ant.position.y.is_finite() {
        ant.position = Position::new(width * 0.5, height * 0.5);
        ant.velocity = Velocity::ZERO;
        return;
    }
    if ant.position.x < 0.0 {
        ant.position.x = 0.0;
        reflect_positive(&mut ant.velocity.vx, &mut ant.target_velocity.vx);
    } else if ant.position.x > width {
        ant.position.x = width;
        reflect_negative(&mut ant.velocity.vx, &mut ant.target_velocity.vx);
    }
    if ant.position.y < 0.0 {
        ant.position.y = 0.0;
        reflect_positive(&mut ant.velocity.vy, &mut ant.target_velocity.vy);
    } else if ant.position.y > height {
        ant.position.y = height;
        reflect_negative(&mut ant.velocity.vy, &mut ant.target_velocity.vy);
    }
}

fn reflect_positive(v: &mut f64, target: &mut f64) {
    *v = v.abs();
    *target = target.abs();
}

fn reflect_negative(v: &mut f64, target: &mut f64) {
    *v = -v.abs();
    *target = -target.abs();
}

/// Moves an underground ant, refusing steps into dirt. A refused step picks a
/// fresh random heading instead. Returns whether the ant moved.
pub fn integrate_underground<R: Rng>(
    ant: &mut Ant,
    grid: &UndergroundGrid,
    cruise_speed: f64,
    dt: f64,
    rng: &mut R,
) -> bool {
    let next = Position::new(
        ant.position.x + ant.velocity.vx * dt,
        ant.position.y + ant.velocity.vy * dt,
    );
    if grid.is_position_passable(next) {
        ant.position = next;
        return true;
    }
    ant.velocity = Velocity::ZERO;
    ant.target_velocity = random_heading(rng, cruise_speed);
    ant.time_since_turn = 0.0;
    false
}

/// Snaps an ant standing in dirt or off-grid onto the nearest passable tile.
pub fn confine_underground(ant: &mut Ant, grid: &UndergroundGrid) -> bool {
    if grid.is_position_passable(ant.position) {
        return false;
    }
    if let Some((tx, ty)) = grid.nearest_passable(ant.position) {
        ant.position = grid.tile_center(tx, ty);
    } else {
        ant.position = grid.entrance_position();
    }
    ant.velocity = Velocity::ZERO;
    true
}

/// Outcome of sampling the field around an ant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sensed {
    /// Unit heading toward the strongest signal.
    Gradient(f64, f64),
    /// The ant ignores the field this time and picks a fresh random heading.
    Explore,
    /// Nothing above the noise threshold.
    Faint,
}

impl Sensed {
    #[inline]
    pub fn direction(self) -> Option<(f64, f64)> {
        match self {
            Sensed::Gradient(x, y) => Some((x, y)),
            Sensed::Explore | Sensed::Faint => None,
        }
    }
}

/// Best compass heading by pheromone score, or why there is none.
pub fn sense_gradient<R: Rng>(
    field: &PheromoneField,
    kind: PheromoneType,
    position: Position,
    sensitivity: f64,
    config: &PheromoneConfig,
    rng: &mut R,
) -> Sensed {
    if rng.gen::<f64>() < config.exploration_chance {
        return Sensed::Explore;
    }

    let mut best: Option<((f64, f64), f32)> = None;
    for (dx, dy) in COMPASS {
        let x = position.x + dx * config.sample_distance;
        let y = position.y + dy * config.sample_distance;
        let mut score = field.sample(kind, x, y);
        if kind != PheromoneType::Danger {
            score -= config.danger_aversion * field.sample(PheromoneType::Danger, x, y);
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some(((dx, dy), score));
        }
    }

    let Some(((gx, gy), score)) = best else {
        return Sensed::Faint;
    };
    if score < config.noise_threshold {
        return Sensed::Faint;
    }
    let gain = config.follow_strength * sensitivity;
    let jx = if config.jitter > 0.0 {
        rng.gen_range(-config.jitter..=config.jitter)
    } else {
        0.0
    };
    let jy = if config.jitter > 0.0 {
        rng.gen_range(-config.jitter..=config.jitter)
    } else {
        0.0
    };
    normalize(gx * gain + jx, gy * gain + jy).map_or(Sensed::Faint, |(x, y)| Sensed::Gradient(x, y))
}
