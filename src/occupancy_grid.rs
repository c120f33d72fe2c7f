//! Occupancy and scalar grids.
//!
//! Both store cells row-major: cell `(x, y)` lives at `y * width + x`.

use crate::error::{GridError, GridResult};
use crate::resize::resize_nearest;

/// Boolean solid/empty field. May be non-square; the triangulator rejects that.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> GridResult<Self> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build from nested rows, `rows[y][x]`.
    pub fn from_rows(rows: &[Vec<bool>]) -> GridResult<Self> {
        let height = rows.len();
        let width = check_rows(rows)?;
        let cells = rows.iter().flatten().copied().collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Solid wherever `value >= threshold`.
    pub fn from_scalar(field: &ScalarGrid, threshold: f32) -> Self {
        Self {
            width: field.width,
            height: field.height,
            cells: field.values.iter().map(|&v| v >= threshold).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Occupancy at `(x, y)`; out-of-range reads are empty.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// The grid turned half a revolution: `(x, y)` moves to `(w-1-x, h-1-y)`.
    pub fn rotated_180(&self) -> Self {
        let mut cells = self.cells.clone();
        cells.reverse();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Nearest-neighbour resample to a new resolution.
    pub fn resized(&self, width: usize, height: usize) -> GridResult<Self> {
        let cells = resize_nearest(&self.cells, (self.width, self.height), (width, height))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

/// Scalar field, the input to `resize` and `OccupancyGrid::from_scalar`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ScalarGrid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) values: Vec<f32>,
}

impl ScalarGrid {
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> GridResult<Self> {
        let expected = width * height;
        if values.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)`. Panics when out of range, like slice indexing.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of range");
        self.values[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of range");
        self.values[y * self.width + x] = value;
    }
}

/// Width shared by all rows, or the first row that disagrees.
pub(crate) fn check_rows<T>(rows: &[Vec<T>]) -> GridResult<usize> {
    let expected = rows.first().map_or(0, Vec::len);
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != expected {
            return Err(GridError::RaggedRows {
                row,
                expected,
                actual: cells.len(),
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_cell_count() {
        assert!(OccupancyGrid::new(2, 2, vec![true; 4]).is_ok());
        assert_eq!(
            OccupancyGrid::new(2, 3, vec![true; 4]),
            Err(GridError::CellCountMismatch {
                expected: 6,
                actual: 4
            })
        );
    }

    #[test]
    fn test_from_rows_indexing() {
        let grid = OccupancyGrid::from_rows(&[
            vec![true, false, false],
            vec![false, false, true],
        ])
        .unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(!grid.is_square());
        assert!(grid.get(0, 0));
        assert!(grid.get(2, 1));
        assert!(!grid.get(1, 0));
        assert!(!grid.get(7, 7), "Out of range reads are empty");
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = OccupancyGrid::from_rows(&[vec![true, true], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_scalar_threshold() {
        let field = ScalarGrid::from_fn(3, 3, |x, y| (x + y) as f32);
        let grid = OccupancyGrid::from_scalar(&field, 2.0);
        assert_eq!(grid.count_occupied(), 6);
        assert!(!grid.get(0, 1));
        assert!(grid.get(1, 1));
    }

    #[test]
    fn test_rotated_180() {
        let mut grid = OccupancyGrid::filled(3, 3, false);
        grid.set(0, 0, true);
        grid.set(1, 0, true);

        let rotated = grid.rotated_180();
        assert!(rotated.get(2, 2));
        assert!(rotated.get(1, 2));
        assert_eq!(rotated.count_occupied(), 2);
        assert_eq!(rotated.rotated_180(), grid);
    }

    #[test]
    fn test_resized_nearest() {
        let grid = OccupancyGrid::from_fn(2, 2, |x, _| x == 1);
        let big = grid.resized(4, 4).unwrap();
        assert_eq!(big.width(), 4);
        assert_eq!(big.count_occupied(), 4, "Only the last column maps to x = 1");
        assert!(big.get(3, 0));
    }

    #[test]
    fn test_scalar_grid_access() {
        let mut field = ScalarGrid::filled(2, 2, 0.0);
        field.set(1, 0, 3.5);
        assert_eq!(field.get(1, 0), 3.5);
        assert_eq!(field.values(), &[0.0, 3.5, 0.0, 0.0]);
        assert!(ScalarGrid::new(2, 2, vec![0.0; 3]).is_err());
    }
}
