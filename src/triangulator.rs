//! Occupancy grid to triangle mesh.
//!
//! Samples every grid corner once, then scans the `(R-1) x (R-1)` cells in
//! row-major order (y outer, x inner), emitting each cell's polygons into
//! one shared `MeshData`. The parallel variant scans rows on the rayon pool
//! into private buffers and concatenates them in row order, so both paths
//! produce identical output.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{TriangulationError, TriangulationResult};
use crate::marching_squares::{
    case_triangle_count, case_vertex_count, generate_cell, sample_corners, CellContext, Corner,
    MeshData, Point3, MAX_CELL_VERTICES,
};
use crate::occupancy_grid::OccupancyGrid;

/// Default world size of one cell.
const DEFAULT_CELL_SIZE: f32 = 1.0;
/// Cell rows at which `triangulate_with_config` switches to the parallel scan.
const DEFAULT_PARALLEL_MIN_ROWS: usize = 64;

/// Parameters for a triangulation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangulatorConfig {
    /// World size of one cell.
    pub cell_size: f32,
    /// Added to every emitted vertex.
    pub offset: Point3,
    /// Grids with at least this many cell rows are scanned in parallel.
    pub parallel_min_rows: usize,
}

impl TriangulatorConfig {
    pub fn new(cell_size: f32, offset: Point3) -> Self {
        Self {
            cell_size,
            offset,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Point3) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_parallel_min_rows(mut self, rows: usize) -> Self {
        self.parallel_min_rows = rows;
        self
    }
}

impl Default for TriangulatorConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            offset: Point3::ZERO,
            parallel_min_rows: DEFAULT_PARALLEL_MIN_ROWS,
        }
    }
}

/// Corner samples for one grid, ready to be scanned.
pub struct Triangulator {
    corners: Vec<Corner>,
    resolution: usize,
}

impl Triangulator {
    /// Validate the inputs and sample every corner.
    ///
    /// Fails before allocating when the grid is not square, a parameter
    /// is not finite, or the grid is too large for `u32` indices.
    pub fn new(grid: &OccupancyGrid, cell_size: f32, offset: Point3) -> TriangulationResult<Self> {
        check_inputs(grid, cell_size, offset)?;

        let resolution = grid.width();
        let corners = sample_corners(resolution, cell_size, offset, |x, y| grid.get(x, y));
        Ok(Self {
            corners,
            resolution,
        })
    }

    pub fn with_config(grid: &OccupancyGrid, config: &TriangulatorConfig) -> TriangulationResult<Self> {
        Self::new(grid, config.cell_size, config.offset)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    fn cells_per_side(&self) -> usize {
        self.resolution.saturating_sub(1)
    }

    /// Exact output sizes, so the buffers are allocated once.
    fn row_capacity(&self, cell_y: usize) -> (usize, usize) {
        let mut vertices = 0;
        let mut triangles = 0;
        for cell_x in 0..self.cells_per_side() {
            let case = CellContext::from_corners(&self.corners, self.resolution, cell_x, cell_y)
                .case_index();
            vertices += case_vertex_count(case);
            triangles += case_triangle_count(case);
        }
        (vertices, triangles * 3)
    }

    fn triangulate_row(&self, cell_y: usize, mesh: &mut MeshData) {
        for cell_x in 0..self.cells_per_side() {
            let ctx = CellContext::from_corners(&self.corners, self.resolution, cell_x, cell_y);
            generate_cell(&ctx, mesh);
        }
    }

    /// Single pass over all cells on the calling thread.
    pub fn triangulate(&self) -> MeshData {
        let cells = self.cells_per_side();
        let (vertices, indices) = (0..cells)
            .map(|y| self.row_capacity(y))
            .fold((0, 0), |acc, row| (acc.0 + row.0, acc.1 + row.1));

        let mut mesh = MeshData::with_capacity(vertices, indices);
        for cell_y in 0..cells {
            self.triangulate_row(cell_y, &mut mesh);
        }

        debug!(
            resolution = self.resolution,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "triangulated occupancy grid"
        );
        mesh
    }

    /// Rows scanned on the rayon pool, merged in row order.
    pub fn triangulate_parallel(&self) -> MeshData {
        let rows: Vec<MeshData> = (0..self.cells_per_side())
            .into_par_iter()
            .map(|cell_y| {
                let (vertices, indices) = self.row_capacity(cell_y);
                let mut row = MeshData::with_capacity(vertices, indices);
                self.triangulate_row(cell_y, &mut row);
                row
            })
            .collect();

        let mesh = merge_rows(&rows);
        debug!(
            resolution = self.resolution,
            rows = rows.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "triangulated occupancy grid in parallel"
        );
        mesh
    }
}

/// Concatenate row buffers, re-basing each row's indices by the vertices before it.
fn merge_rows(rows: &[MeshData]) -> MeshData {
    let vertices = rows.iter().map(MeshData::vertex_count).sum();
    let indices = rows.iter().map(|r| r.triangle_indices.len()).sum();

    let mut mesh = MeshData::with_capacity(vertices, indices);
    for row in rows {
        mesh.append(row);
    }
    mesh
}

fn check_inputs(grid: &OccupancyGrid, cell_size: f32, offset: Point3) -> TriangulationResult<()> {
    if !grid.is_square() {
        warn!(
            width = grid.width(),
            height = grid.height(),
            "rejecting non-square occupancy grid"
        );
        return Err(TriangulationError::DimensionMismatch {
            width: grid.width(),
            height: grid.height(),
        });
    }

    check_vertex_budget(grid.width())?;

    if !cell_size.is_finite() {
        warn!(cell_size, "rejecting non-finite cell size");
        return Err(TriangulationError::NonFiniteParameter {
            name: "cell_size",
            value: cell_size,
        });
    }

    for (name, value) in [
        ("offset.x", offset.x),
        ("offset.y", offset.y),
        ("offset.z", offset.z),
    ] {
        if !value.is_finite() {
            warn!(name, value, "rejecting non-finite offset");
            return Err(TriangulationError::NonFiniteParameter { name, value });
        }
    }
    Ok(())
}

/// Reject resolutions whose worst case (every cell a saddle) overflows `u32` indices.
fn check_vertex_budget(resolution: usize) -> TriangulationResult<()> {
    let cells = resolution.saturating_sub(1);
    let worst = cells
        .checked_mul(cells)
        .and_then(|n| n.checked_mul(MAX_CELL_VERTICES));
    match worst {
        Some(n) if n <= MeshData::MAX_VERTICES => Ok(()),
        _ => {
            warn!(resolution, "rejecting grid beyond the u32 index range");
            Err(TriangulationError::MeshTooLarge {
                resolution,
                max_vertices: worst.unwrap_or(usize::MAX),
            })
        }
    }
}

/// Triangulate a square occupancy grid.
///
/// Grids smaller than 2x2 have no cells and yield an empty mesh.
pub fn triangulate(grid: &OccupancyGrid, cell_size: f32, offset: Point3) -> TriangulationResult<MeshData> {
    let triangulator = Triangulator::new(grid, cell_size, offset)?;
    if triangulator.resolution() < 2 {
        debug!(resolution = triangulator.resolution(), "grid has no cells");
        return Ok(MeshData::default());
    }
    Ok(triangulator.triangulate())
}

/// Same result as `triangulate`, with cell rows scanned in parallel.
pub fn triangulate_parallel(
    grid: &OccupancyGrid,
    cell_size: f32,
    offset: Point3,
) -> TriangulationResult<MeshData> {
    let triangulator = Triangulator::new(grid, cell_size, offset)?;
    if triangulator.resolution() < 2 {
        debug!(resolution = triangulator.resolution(), "grid has no cells");
        return Ok(MeshData::default());
    }
    Ok(triangulator.triangulate_parallel())
}

/// Triangulate with `config`, going parallel for large grids.
pub fn triangulate_with_config(
    grid: &OccupancyGrid,
    config: &TriangulatorConfig,
) -> TriangulationResult<MeshData> {
    let rows = grid.height().saturating_sub(1);
    if rows >= config.parallel_min_rows.max(1) {
        triangulate_parallel(grid, config.cell_size, config.offset)
    } else {
        triangulate(grid, config.cell_size, config.offset)
    }
}
