//! Pheromone field for indirect, trail-based communication between ants.
//!
//! One dense grid per [`PheromoneType`], all sharing the same dimensions. Every
//! cell stays in `[0, max_strength]` and anything below `epsilon` is stored as
//! exactly zero.

use crate::config::PheromoneConfig;
pub use formicary_data::PheromoneType;
use serde::{Deserialize, Serialize};

/// A request to deposit pheromone at a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneDeposit {
    pub x: f64,
    pub y: f64,
    pub kind: PheromoneType,
    pub amount: f32,
}

/// Grid-based pheromone map over the surface.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PheromoneField {
    grids: [Vec<f32>; PheromoneType::COUNT],
    #[serde(skip)]
    back_buffer: Vec<f32>,
    width: usize,
    height: usize,
    cell_size: f64,
    max_strength: f32,
    epsilon: f32,
}

impl PheromoneField {
    /// Creates an empty field covering `world_width × world_height` world units.
    pub fn new(
        world_width: f64,
        world_height: f64,
        cell_size: f64,
        max_strength: f32,
        epsilon: f32,
    ) -> Self {
        let width = ((world_width / cell_size).ceil() as usize).max(1);
        let height = ((world_height / cell_size).ceil() as usize).max(1);
        let len = width * height;
        Self {
            grids: [vec![0.0; len], vec![0.0; len], vec![0.0; len]],
            back_buffer: vec![0.0; len],
            width,
            height,
            cell_size,
            max_strength,
            epsilon,
        }
    }

    pub fn from_config(config: &PheromoneConfig, world_width: f64, world_height: f64) -> Self {
        Self::new(
            world_width,
            world_height,
            config.cell_size,
            config.max_strength,
            config.epsilon,
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn max_strength(&self) -> f32 {
        self.max_strength
    }

    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Dense row-major grid for one signal, for heatmap overlays.
    #[inline]
    pub fn grid(&self, kind: PheromoneType) -> &[f32] {
        &self.grids[kind.index()]
    }

    #[inline(always)]
    fn index(&self, cx: usize, cy: usize) -> usize {
        cy * self.width + cx
    }

    /// Cell holding the world point, or `None` outside the grid.
    pub fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let cx = (x / self.cell_size) as usize;
        let cy = (y / self.cell_size) as usize;
        if cx >= self.width || cy >= self.height {
            return None;
        }
        Some(self.index(cx, cy))
    }

    #[inline]
    fn snap(&self, value: f32) -> f32 {
        let v = value.clamp(0.0, self.max_strength);
        if v < self.epsilon {
            0.0
        } else {
            v
        }
    }

    /// Adds `amount` to the cell under (x, y), saturating at `max_strength`.
    pub fn deposit(&mut self, kind: PheromoneType, x: f64, y: f64, amount: f32) {
        if !(amount.is_finite() && amount > 0.0) {
            return;
        }
        if let Some(idx) = self.cell_index(x, y) {
            let current = self.grids[kind.index()][idx];
            self.grids[kind.index()][idx] = self.snap(current + amount);
        }
    }

    pub fn apply(&mut self, deposit: &PheromoneDeposit) {
        self.deposit(deposit.kind, deposit.x, deposit.y, deposit.amount);
    }

    /// Nearest-cell lookup; zero outside the grid.
    pub fn sample(&self, kind: PheromoneType, x: f64, y: f64) -> f32 {
        self.cell_index(x, y)
            .map_or(0.0, |idx| self.grids[kind.index()][idx])
    }

    /// Value of a cell by grid coordinates; zero outside the grid.
    pub fn get_cell(&self, kind: PheromoneType, cx: usize, cy: usize) -> f32 {
        if cx >= self.width || cy >= self.height {
            return 0.0;
        }
        self.grids[kind.index()][self.index(cx, cy)]
    }

    /// Multiplies every cell by `(1 - rate)^dt` and snaps tiny values to zero.
    pub fn decay(&mut self, kind: PheromoneType, dt: f64, rate: f32) {
        if !(dt.is_finite() && dt > 0.0) || rate <= 0.0 {
            return;
        }
        let factor = (1.0 - f64::from(rate).min(1.0)).powf(dt) as f32;
        let eps = self.epsilon;
        for cell in &mut self.grids[kind.index()] {
            *cell *= factor;
            if *cell < eps {
                *cell = 0.0;
            }
        }
    }

    /// Decays every signal with its own rate.
    pub fn decay_all(&mut self, dt: f64, rates: &[f32; PheromoneType::COUNT]) {
        for kind in PheromoneType::ALL {
            self.decay(kind, dt, rates[kind.index()]);
        }
    }

    /// One smoothing pass: each cell moves `rate` of the way toward the mean of
    /// itself and its existing 4-neighbours. Computed into a back buffer so no
    /// cell reads a value written in the same pass.
    pub fn diffuse(&mut self, kind: PheromoneType, rate: f32) {
        if rate <= 0.0 {
            return;
        }
        let rate = rate.min(1.0);
        let len = self.width * self.height;
        self.back_buffer.resize(len, 0.0);

        let params = DiffusionParams {
            width: self.width,
            height: self.height,
            rate,
            max_strength: self.max_strength,
            epsilon: self.epsilon,
        };
        let src = &self.grids[kind.index()];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.back_buffer
                .par_chunks_mut(params.width)
                .enumerate()
                .for_each(|(y, row)| diffuse_row(src, y, row, &params));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (y, row) in self.back_buffer.chunks_mut(params.width).enumerate() {
                diffuse_row(src, y, row, &params);
            }
        }

        std::mem::swap(&mut self.grids[kind.index()], &mut self.back_buffer);
    }

    pub fn diffuse_all(&mut self, rate: f32) {
        for kind in PheromoneType::ALL {
            self.diffuse(kind, rate);
        }
    }

    /// Sum of all cells of one signal.
    pub fn total(&self, kind: PheromoneType) -> f64 {
        self.grids[kind.index()].iter().map(|&v| f64::from(v)).sum()
    }

    pub fn max_value(&self, kind: PheromoneType) -> f32 {
        self.grids[kind.index()]
            .iter()
            .copied()
            .fold(0.0, f32::max)
    }

    pub fn clear(&mut self) {
        for grid in &mut self.grids {
            grid.fill(0.0);
        }
    }
}

struct DiffusionParams {
    width: usize,
    height: usize,
    rate: f32,
    max_strength: f32,
    epsilon: f32,
}

fn diffuse_row(src: &[f32], y: usize, row: &mut [f32], p: &DiffusionParams) {
    let w = p.width;
    for (x, out) in row.iter_mut().enumerate() {
        let idx = y * w + x;
        let current = src[idx];
        let mut sum = current;
        let mut count = 1.0f32;
        if x > 0 {
            sum += src[idx - 1];
            count += 1.0;
        }
        if x + 1 < w {
            sum += src[idx + 1];
            count += 1.0;
        }
        if y > 0 {
            sum += src[idx - w];
            count += 1.0;
        }
        if y + 1 < p.height {
            sum += src[idx + w];
            count += 1.0;
        }
        let next = current * (1.0 - p.rate) + p.rate * (sum / count);
        let next = next.clamp(0.0, p.max_strength);
        *out = if next < p.epsilon { 0.0 } else { next };
    }
}
