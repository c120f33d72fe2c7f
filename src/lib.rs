//! Marching-squares triangulation of binary occupancy grids.
//!
//! Each 2x2 block of grid corners is classified into one of 16 cases and
//! emitted as a triangle, quad, pentagon, or pair of triangles into a flat
//! vertex/index buffer. Vertices are never welded across polygons.
//!
//! ```
//! use occupancy_mesh::{triangulate, OccupancyGrid, Point3};
//!
//! let grid = OccupancyGrid::filled(3, 3, true);
//! let mesh = triangulate(&grid, 1.0, Point3::ZERO).unwrap();
//! assert_eq!(mesh.triangle_count(), 8);
//! ```

pub mod debug_log;
mod error;
pub mod marching_squares;
mod mesh_worker;
mod noise_field;
mod occupancy_grid;
mod resize;
mod triangulator;

pub use error::{GridError, GridResult, TriangulationError, TriangulationResult};
pub use marching_squares::{MeshData, Point3};
pub use mesh_worker::{MeshRequest, MeshResponse, MeshWorkerPool};
pub use noise_field::{NoiseField, SharedNoiseField};
pub use occupancy_grid::{OccupancyGrid, ScalarGrid};
pub use resize::{flatten, resize, resize_nearest, FlattenOrder, ResizeMode};
pub use triangulator::{
    triangulate, triangulate_parallel, triangulate_with_config, Triangulator, TriangulatorConfig,
};
