//! Underground tile world: the nest's tunnels, chambers, queen and brood.

pub mod brood;

use crate::config::UndergroundConfig;
pub use formicary_data::{Egg, Queen, TileType};
use formicary_data::Position;
use serde::{Deserialize, Serialize};

pub trait TileLogic {
    fn is_passable(&self) -> bool;
    fn is_diggable(&self) -> bool;
}

impl TileLogic for TileType {
    fn is_passable(&self) -> bool {
        matches!(
            self,
            TileType::Tunnel | TileType::Chamber | TileType::Entrance
        )
    }

    fn is_diggable(&self) -> bool {
        matches!(self, TileType::Dirt)
    }
}

const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UndergroundGrid {
    tiles: Vec<TileType>,
    pub width: u16,
    pub height: u16,
    pub tile_size: f64,
    pub entrance_tile: (u16, u16),
    pub queen: Queen,
    pub eggs: Vec<Egg>,
}

impl UndergroundGrid {
    /// All-dirt grid with the hand-authored starter nest carved out: entrance,
    /// vertical shaft, horizontal tunnel and the queen's chamber below it.
    pub fn seeded(width: u16, height: u16, tile_size: f64, queen_reserve: f64, egg_cooldown: f64) -> Self {
        let width = width.max(16);
        let height = height.max(12);
        let cx = width / 2;
        let mut grid = Self {
            tiles: vec![TileType::Dirt; width as usize * height as usize],
            width,
            height,
            tile_size,
            entrance_tile: (cx, 1),
            queen: Queen {
                tile_x: cx,
                tile_y: 8,
                food_reserve: queen_reserve.max(0.0),
                laying_cooldown: egg_cooldown.max(0.0),
                eggs_laid: 0,
            },
            eggs: Vec::new(),
        };

        let entrance = grid.index(cx, 1);
        grid.tiles[entrance] = TileType::Entrance;
        for y in 2..=6 {
            grid.carve(cx, y, TileType::Tunnel);
        }
        for x in cx - 6..=cx + 6 {
            grid.carve(x, 6, TileType::Tunnel);
        }
        for y in 7..=9 {
            for x in cx - 2..=cx + 2 {
                grid.carve(x, y, TileType::Chamber);
            }
        }
        grid
    }

    pub fn from_config(config: &UndergroundConfig) -> Self {
        Self::seeded(
            config.width,
            config.height,
            config.tile_size,
            config.queen_initial_reserve,
            config.egg_cooldown,
        )
    }

    #[inline(always)]
    pub fn index(&self, x: u16, y: u16) -> usize {
        (y as usize * self.width as usize) + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.index(x as u16, y as u16)])
        } else {
            None
        }
    }

    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|t| t.is_passable())
    }

    pub fn is_diggable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|t| t.is_diggable())
    }

    fn carve(&mut self, x: u16, y: u16, t: TileType) {
        let idx = self.index(x, y);
        if self.tiles[idx] != TileType::Entrance {
            self.tiles[idx] = t;
        }
    }

    /// Sets a tile; entrance tiles are never overwritten. Returns whether it changed.
    pub fn set_tile(&mut self, x: u16, y: u16, t: TileType) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        if self.tiles[idx] == TileType::Entrance || self.tiles[idx] == t {
            return false;
        }
        self.tiles[idx] = t;
        true
    }

    /// Excavates a dirt tile into `result`. Non-dirt tiles are left untouched.
    pub fn excavate(&mut self, x: u16, y: u16, result: TileType) -> bool {
        if !self.is_diggable(i32::from(x), i32::from(y)) || result == TileType::Dirt {
            return false;
        }
        self.set_tile(x, y, result)
    }

    pub fn count(&self, t: TileType) -> usize {
        self.tiles.iter().filter(|&&tile| tile == t).count()
    }

    /// Tile containing an underground position, if inside the grid.
    pub fn tile_at(&self, p: Position) -> Option<(u16, u16)> {
        if !p.x.is_finite() || !p.y.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let tx = (p.x / self.tile_size) as i32;
        let ty = (p.y / self.tile_size) as i32;
        self.in_bounds(tx, ty).then_some((tx as u16, ty as u16))
    }

    pub fn tile_center(&self, x: u16, y: u16) -> Position {
        Position::new(
            (f64::from(x) + 0.5) * self.tile_size,
            (f64::from(y) + 0.5) * self.tile_size,
        )
    }

    pub fn entrance_position(&self) -> Position {
        self.tile_center(self.entrance_tile.0, self.entrance_tile.1)
    }

    pub fn is_position_passable(&self, p: Position) -> bool {
        self.tile_at(p)
            .is_some_and(|(x, y)| self.is_passable(i32::from(x), i32::from(y)))
    }

    /// Dirt tiles 4-adjacent to (x, y).
    pub fn diggable_neighbors(&self, x: u16, y: u16) -> Vec<(u16, u16)> {
        NEIGHBORS_4
            .iter()
            .map(|(dx, dy)| (i32::from(x) + dx, i32::from(y) + dy))
            .filter(|&(nx, ny)| self.is_diggable(nx, ny))
            .map(|(nx, ny)| (nx as u16, ny as u16))
            .collect()
    }

    /// Nearest passable tile to `p`, searching rings of growing radius.
    pub fn nearest_passable(&self, p: Position) -> Option<(u16, u16)> {
        let cx = (p.x / self.tile_size).floor();
        let cy = (p.y / self.tile_size).floor();
        let cx = if cx.is_finite() { cx as i32 } else { 0 };
        let cy = if cy.is_finite() { cy as i32 } else { 0 };
        let cx = cx.clamp(0, self.width as i32 - 1);
        let cy = cy.clamp(0, self.height as i32 - 1);
        let max_r = self.width.max(self.height) as i32;

        for r in 0..=max_r {
            let mut best: Option<((u16, u16), f64)> = None;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs() != r && dy.abs() != r {
                        continue;
                    }
                    let (nx, ny) = (cx + dx, cy + dy);
                    if !self.is_passable(nx, ny) {
                        continue;
                    }
                    let center = self.tile_center(nx as u16, ny as u16);
                    let d = crate::geometry::distance_sq(center, p);
                    if best.map_or(true, |(_, bd)| d < bd) {
                        best = Some(((nx as u16, ny as u16), d));
                    }
                }
            }
            if let Some((tile, _)) = best {
                return Some(tile);
            }
        }
        None
    }

    pub fn egg_at(&self, x: u16, y: u16) -> bool {
        self.eggs.iter().any(|e| e.tile_x == x && e.tile_y == y)
    }

    pub fn width_units(&self) -> f64 {
        f64::from(self.width) * self.tile_size
    }

    pub fn height_units(&self) -> f64 {
        f64::from(self.height) * self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> UndergroundGrid {
        UndergroundGrid::seeded(60, 40, 16.0, 10.0, 10.0)
    }

    #[test]
    fn test_seed_layout() {
        let g = grid();
        let cx = 30;
        assert_eq!(g.get(cx, 1), Some(TileType::Entrance));
        for y in 2..=6 {
            assert_eq!(g.get(cx, y), Some(TileType::Tunnel));
        }
        assert_eq!(g.get(cx - 6, 6), Some(TileType::Tunnel));
        assert_eq!(g.get(cx + 6, 6), Some(TileType::Tunnel));
        assert_eq!(g.get(cx, 8), Some(TileType::Chamber));
        assert_eq!(g.count(TileType::Chamber), 15);
        assert_eq!(g.count(TileType::Entrance), 1);
        assert_eq!(g.get(0, 0), Some(TileType::Dirt));
        assert_eq!((g.queen.tile_x, g.queen.tile_y), (30, 8));
    }

    #[test]
    fn test_undersized_grid_still_has_entrance() {
        let g = UndergroundGrid::seeded(4, 4, 16.0, 10.0, 10.0);
        assert_eq!((g.width, g.height), (16, 12));
        assert_eq!(g.entrance_tile, (8, 1));
        assert_eq!(g.get(8, 1), Some(TileType::Entrance));
        assert_eq!(g.count(TileType::Entrance), 1);
        assert_eq!(g.get(8, 2), Some(TileType::Tunnel));
    }

    #[test]
    fn test_tile_kinds() {
        assert!(!TileType::Dirt.is_passable());
        assert!(TileType::Dirt.is_diggable());
        for t in [TileType::Tunnel, TileType::Chamber, TileType::Entrance] {
            assert!(t.is_passable());
            assert!(!t.is_diggable());
        }
    }

    #[test]
    fn test_passable_and_diggable() {
        let g = grid();
        assert!(g.is_passable(30, 1));
        assert!(g.is_passable(30, 3));
        assert!(!g.is_passable(0, 0));
        assert!(g.is_diggable(0, 0));
        assert!(!g.is_diggable(30, 3));
        assert!(!g.is_passable(-1, 3));
        assert!(!g.is_diggable(60, 3));
    }

    #[test]
    fn test_entrance_never_overwritten() {
        let mut g = grid();
        assert!(!g.set_tile(30, 1, TileType::Dirt));
        assert!(!g.excavate(30, 1, TileType::Tunnel));
        assert_eq!(g.get(30, 1), Some(TileType::Entrance));
    }

    #[test]
    fn test_excavate_only_dirt() {
        let mut g = grid();
        assert!(g.excavate(31, 3, TileType::Tunnel));
        assert_eq!(g.get(31, 3), Some(TileType::Tunnel));
        assert!(!g.excavate(31, 3, TileType::Chamber));
        assert!(!g.excavate(32, 3, TileType::Dirt));
    }

    #[test]
    fn test_diggable_neighbors_of_shaft() {
        let g = grid();
        let mut n = g.diggable_neighbors(30, 3);
        n.sort();
        assert_eq!(n, vec![(29, 3), (31, 3)]);
    }

    #[test]
    fn test_nearest_passable_snaps_into_tunnels() {
        let g = grid();
        let inside_dirt = g.tile_center(33, 3);
        let (tx, ty) = g.nearest_passable(inside_dirt).expect("grid has tunnels");
        assert!(g.is_passable(i32::from(tx), i32::from(ty)));
        // Shaft column and tunnel row are both three tiles away; ties keep the first hit.
        assert_eq!((tx, ty), (30, 3));
        // Already passable tiles map to themselves.
        assert_eq!(g.nearest_passable(g.tile_center(30, 4)), Some((30, 4)));
        // Far outside the grid still finds something.
        assert!(g.nearest_passable(Position::new(-500.0, 9000.0)).is_some());
    }

    #[test]
    fn test_tile_coordinates_round_trip() {
        let g = grid();
        let c = g.tile_center(12, 7);
        assert_eq!(g.tile_at(c), Some((12, 7)));
        assert_eq!(g.tile_at(Position::new(-1.0, 5.0)), None);
        assert!(g.is_position_passable(g.entrance_position()));
    }
}
