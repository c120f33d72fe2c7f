use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use std::sync::Arc;

use crate::occupancy_grid::{OccupancyGrid, ScalarGrid};

/// 2D fractal noise for procedural occupancy grids.
/// Values are roughly in [-1, 1]; solid where the sample reaches the threshold.
pub struct NoiseField {
    fbm: Fbm<Perlin>,
    frequency: f32,
}

impl NoiseField {
    pub fn new(seed: u32, octaves: usize, frequency: f32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(octaves)
            .set_frequency(frequency as f64)
            .set_lacunarity(2.0)
            .set_persistence(0.5);

        Self { fbm, frequency }
    }

    /// Sample the field at a world-space (x, z) position.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.fbm.get([x as f64, z as f64]) as f32
    }

    /// Sample a `width` x `height` lattice with `spacing` world units between samples.
    pub fn to_scalar_grid(&self, width: usize, height: usize, spacing: f32) -> ScalarGrid {
        ScalarGrid::from_fn(width, height, |x, y| {
            self.sample(x as f32 * spacing, y as f32 * spacing)
        })
    }

    /// Square occupancy grid, solid where the noise is at or above `threshold`.
    pub fn to_occupancy(&self, size: usize, spacing: f32, threshold: f32) -> OccupancyGrid {
        OccupancyGrid::from_scalar(&self.to_scalar_grid(size, size, spacing), threshold)
    }

    pub fn get_frequency(&self) -> f32 {
        self.frequency
    }
}

/// Thread-safe shared noise field for parallel grid generation
pub type SharedNoiseField = Arc<NoiseField>;
