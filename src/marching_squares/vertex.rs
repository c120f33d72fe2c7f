use rayon::prelude::*;

use super::types::*;

/// One grid corner: occupancy plus the three positions cells build polygons from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corner {
    pub occupied: bool,
    pub position: Point3,
    /// Midpoint toward the +x neighbour.
    pub edge_x: Point3,
    /// Midpoint toward the +y neighbour (world +z).
    pub edge_y: Point3,
}

impl Corner {
    #[must_use]
    pub fn new(x: usize, y: usize, occupied: bool, cell_size: f32, offset: Point3) -> Self {
        let position = Point3::new(
            (x as f32 + 0.5) * cell_size + offset.x,
            offset.y,
            (y as f32 + 0.5) * cell_size + offset.z,
        );
        let half = cell_size * 0.5;

        Self {
            occupied,
            position,
            edge_x: position + Point3::new(half, 0.0, 0.0),
            edge_y: position + Point3::new(0.0, 0.0, half),
        }
    }
}

/// Sample every corner of a `resolution` x `resolution` grid, row-major
/// (`y * resolution + x`). `occupied(x, y)` supplies the flags.
pub fn sample_corners<F>(
    resolution: usize,
    cell_size: f32,
    offset: Point3,
    occupied: F,
) -> Vec<Corner>
where
    F: Fn(usize, usize) -> bool + Sync,
{
    let mut corners = vec![Corner::default(); resolution * resolution];
    if resolution == 0 {
        return corners;
    }

    corners
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, corner) in row.iter_mut().enumerate() {
                *corner = Corner::new(x, y, occupied(x, y), cell_size, offset);
            }
        });

    corners
}
