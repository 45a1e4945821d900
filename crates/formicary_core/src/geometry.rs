//! Vector helpers and placement of static surface geometry.

use crate::config::WorldConfig;
use formicary_data::{FoodSource, Obstacle, Position, Velocity};
use rand::Rng;
use std::f64::consts::TAU;

const PLACEMENT_ATTEMPTS: usize = 64;

#[inline]
pub fn distance_sq(a: Position, b: Position) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

#[inline]
pub fn distance(a: Position, b: Position) -> f64 {
    distance_sq(a, b).sqrt()
}

#[inline]
pub fn speed(v: Velocity) -> f64 {
    (v.vx * v.vx + v.vy * v.vy).sqrt()
}

/// Unit vector of (x, y), or `None` for a (near) zero vector.
#[inline]
pub fn normalize(x: f64, y: f64) -> Option<(f64, f64)> {
    let len = (x * x + y * y).sqrt();
    if len > 1e-9 && len.is_finite() {
        Some((x / len, y / len))
    } else {
        None
    }
}

/// Velocity of length `speed` pointing from `from` to `to`; zero when they coincide.
pub fn seek(from: Position, to: Position, speed: f64) -> Velocity {
    normalize(to.x - from.x, to.y - from.y)
        .map_or(Velocity::ZERO, |(ux, uy)| Velocity::new(ux * speed, uy * speed))
}

#[inline]
pub fn heading(angle: f64, speed: f64) -> Velocity {
    Velocity::new(angle.cos() * speed, angle.sin() * speed)
}

pub fn random_heading<R: Rng>(rng: &mut R, speed: f64) -> Velocity {
    heading(rng.gen_range(0.0..TAU), speed)
}

/// Whether `p` lies strictly inside any obstacle.
pub fn inside_obstacle(p: Position, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|o| distance_sq(p, o.position) < o.radius * o.radius)
}

/// Random point inside the world, `margin` from the edges, clear of obstacles
/// and at least `min_distance` from `avoid`. Falls back to the last candidate
/// after a bounded number of attempts.
pub fn random_clear_position<R: Rng>(
    rng: &mut R,
    width: f64,
    height: f64,
    margin: f64,
    obstacles: &[Obstacle],
    avoid: Option<(Position, f64)>,
) -> Position {
    let margin_x = margin.min(width * 0.5 - f64::EPSILON).max(0.0);
    let margin_y = margin.min(height * 0.5 - f64::EPSILON).max(0.0);
    let mut candidate = Position::new(width * 0.5, height * 0.5);
    for _ in 0..PLACEMENT_ATTEMPTS {
        candidate = Position::new(
            rng.gen_range(margin_x..=(width - margin_x)),
            rng.gen_range(margin_y..=(height - margin_y)),
        );
        let far_enough = avoid.map_or(true, |(p, d)| distance(candidate, p) >= d);
        let clear = !obstacles
            .iter()
            .any(|o| distance(candidate, o.position) < o.radius + margin);
        if far_enough && clear {
            break;
        }
    }
    candidate
}

/// Scatters obstacles, keeping them away from the nest.
pub fn generate_obstacles<R: Rng>(
    rng: &mut R,
    config: &WorldConfig,
    nest: Position,
    nest_clearance: f64,
) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(config.obstacle_count);
    for _ in 0..config.obstacle_count {
        let radius = rng.gen_range(config.obstacle_min_radius..=config.obstacle_max_radius);
        let position = random_clear_position(
            rng,
            config.width,
            config.height,
            radius,
            &obstacles,
            Some((nest, nest_clearance + radius)),
        );
        obstacles.push(Obstacle { position, radius });
    }
    obstacles
}

/// A fresh, full food source away from the nest and obstacles.
pub fn spawn_food_source<R: Rng>(
    rng: &mut R,
    config: &WorldConfig,
    nest: Position,
    obstacles: &[Obstacle],
) -> FoodSource {
    let position = random_clear_position(
        rng,
        config.width,
        config.height,
        config.food_source_radius,
        obstacles,
        Some((nest, config.food_min_distance)),
    );
    FoodSource::new(
        position,
        config.food_source_radius,
        config.food_source_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_seek_and_normalize() {
        let v = seek(Position::new(0.0, 0.0), Position::new(3.0, 4.0), 10.0);
        assert!((v.vx - 6.0).abs() < 1e-9);
        assert!((v.vy - 8.0).abs() < 1e-9);
        assert_eq!(
            seek(Position::new(1.0, 1.0), Position::new(1.0, 1.0), 5.0),
            Velocity::ZERO
        );
        assert!(normalize(0.0, 0.0).is_none());
    }

    #[test]
    fn test_random_heading_has_requested_speed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let v = random_heading(&mut rng, 7.5);
            assert!((speed(v) - 7.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_obstacles_keep_clear_of_nest() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = WorldConfig::default();
        let nest = Position::new(config.width / 2.0, config.height / 2.0);
        let obstacles = generate_obstacles(&mut rng, &config, nest, 60.0);
        assert_eq!(obstacles.len(), config.obstacle_count);
        for o in &obstacles {
            assert!(distance(o.position, nest) >= 60.0 + o.radius);
            assert!(o.position.x >= 0.0 && o.position.x <= config.width);
        }
        assert!(!inside_obstacle(nest, &obstacles));
    }

    #[test]
    fn test_food_source_spawns_full_and_far() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = WorldConfig::default();
        let nest = Position::new(600.0, 400.0);
        let food = spawn_food_source(&mut rng, &config, nest, &[]);
        assert_eq!(food.remaining, config.food_source_amount);
        assert!(distance(food.position, nest) >= config.food_min_distance);
    }
}
