//! Error types for triangulation and grid utilities.

use thiserror::Error;

/// Errors returned by the triangulator before any output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// The occupancy grid is not square.
    #[error("Occupancy grid must be square, got {width}x{height}")]
    DimensionMismatch {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },

    /// Cell size or offset contains NaN or infinity.
    #[error("Parameter {name} must be finite, got {value}")]
    NonFiniteParameter {
        /// Which parameter was rejected.
        name: &'static str,
        /// The offending value.
        value: f32,
    },

    /// The grid could emit more vertices than `u32` indices can address.
    #[error("Grid of resolution {resolution} may emit {max_vertices} vertices, above the u32 index limit")]
    MeshTooLarge {
        /// Grid side length.
        resolution: usize,
        /// Worst-case vertex count for the grid.
        max_vertices: usize,
    },
}

/// Result type for triangulation.
pub type TriangulationResult<T> = std::result::Result<T, TriangulationError>;

/// Errors from building grids and from the resize/flatten helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Flat cell buffer length does not match `width * height`.
    #[error("Expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Nested rows of unequal length.
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// Resize target has a zero dimension.
    #[error("Resize target must be non-empty, got {width}x{height}")]
    EmptyTarget {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Resize source has a zero dimension.
    #[error("Resize source is empty")]
    EmptySource,
}

/// Result type for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;
