//! Grid resampling and flattening helpers.
//!
//! Independent of the triangulator: callers apply these before building an
//! `OccupancyGrid` when they need a different resolution.

use crate::error::{GridError, GridResult};
use crate::occupancy_grid::{check_rows, ScalarGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Closest source sample.
    #[default]
    Nearest,
    /// Blend of the four surrounding source samples.
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlattenOrder {
    /// `rows[y][x]` lands at `y * width + x`.
    #[default]
    RowMajor,
    /// `rows[y][x]` lands at `x * height + y`.
    ColumnMajor,
}

/// Map target index `i` (of `target` samples) into `[0, 1]`.
#[inline]
fn normalized(i: usize, target: usize) -> f32 {
    if target <= 1 {
        0.0
    } else {
        i as f32 / (target - 1) as f32
    }
}

/// Continuous source coordinate for target index `i`.
#[inline]
fn source_coord(i: usize, target: usize, source: usize) -> f32 {
    normalized(i, target) * (source - 1) as f32
}

#[inline]
fn source_index(i: usize, target: usize, source: usize) -> usize {
    (source_coord(i, target, source).floor() as usize).min(source - 1)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn check_sizes(source: (usize, usize), target: (usize, usize)) -> GridResult<()> {
    if target.0 == 0 || target.1 == 0 {
        return Err(GridError::EmptyTarget {
            width: target.0,
            height: target.1,
        });
    }
    if source.0 == 0 || source.1 == 0 {
        return Err(GridError::EmptySource);
    }
    Ok(())
}

/// Resample a scalar field to `target` = (width, height).
pub fn resize(source: &ScalarGrid, target: (usize, usize), mode: ResizeMode) -> GridResult<ScalarGrid> {
    let (sw, sh) = (source.width, source.height);
    if (sw, sh) == target {
        return Ok(source.clone());
    }

    match mode {
        ResizeMode::Nearest => {
            let values = resize_nearest(&source.values, (sw, sh), target)?;
            ScalarGrid::new(target.0, target.1, values)
        }
        ResizeMode::Bilinear => {
            check_sizes((sw, sh), target)?;
            let (tw, th) = target;
            let mut values = Vec::with_capacity(tw * th);
            for y in 0..th {
                let fy = source_coord(y, th, sh);
                let y0 = source_index(y, th, sh);
                let y1 = (y0 + 1).min(sh - 1);
                let ty = fy - y0 as f32;
                for x in 0..tw {
                    let fx = source_coord(x, tw, sw);
                    let x0 = source_index(x, tw, sw);
                    let x1 = (x0 + 1).min(sw - 1);
                    let tx = fx - x0 as f32;

                    let bottom = lerp(source.get(x0, y0), source.get(x1, y0), tx);
                    let top = lerp(source.get(x0, y1), source.get(x1, y1), tx);
                    values.push(lerp(bottom, top, ty));
                }
            }
            ScalarGrid::new(tw, th, values)
        }
    }
}

/// Nearest-neighbour resample of any row-major cell buffer.
pub fn resize_nearest<T: Clone>(
    cells: &[T],
    source: (usize, usize),
    target: (usize, usize),
) -> GridResult<Vec<T>> {
    let expected = source.0 * source.1;
    if cells.len() != expected {
        return Err(GridError::CellCountMismatch {
            expected,
            actual: cells.len(),
        });
    }
    if source == target {
        return Ok(cells.to_vec());
    }
    check_sizes(source, target)?;

    let (sw, sh) = source;
    let (tw, th) = target;
    let mut out = Vec::with_capacity(tw * th);
    for y in 0..th {
        let sy = source_index(y, th, sh);
        for x in 0..tw {
            let sx = source_index(x, tw, sw);
            out.push(cells[sy * sw + sx].clone());
        }
    }
    Ok(out)
}

/// Linearise nested rows (`rows[y][x]`) into one buffer.
pub fn flatten<T: Clone>(rows: &[Vec<T>], order: FlattenOrder) -> GridResult<Vec<T>> {
    let width = check_rows(rows)?;
    let height = rows.len();

    let flat = match order {
        FlattenOrder::RowMajor => rows.iter().flatten().cloned().collect(),
        FlattenOrder::ColumnMajor => {
            let mut out = Vec::with_capacity(width * height);
            for x in 0..width {
                for row in rows {
                    out.push(row[x].clone());
                }
            }
            out
        }
    };
    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> ScalarGrid {
        // 0 1 / 2 3
        ScalarGrid::from_fn(2, 2, |x, y| (x + 2 * y) as f32)
    }

    #[test]
    fn test_same_size_is_identity() {
        let src = ramp();
        assert_eq!(resize(&src, (2, 2), ResizeMode::Bilinear).unwrap(), src);
        assert_eq!(resize(&src, (2, 2), ResizeMode::Nearest).unwrap(), src);
    }

    #[test]
    fn test_nearest_upscale() {
        let out = resize(&ramp(), (3, 3), ResizeMode::Nearest).unwrap();
        // floor(n * 1) is 0 until n reaches 1
        assert_eq!(out.values(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 2.0, 2.0, 3.0]);
    }

    #[test]
    fn test_bilinear_upscale() {
        let out = resize(&ramp(), (3, 3), ResizeMode::Bilinear).unwrap();
        assert_eq!(out.get(0, 0), 0.0);
        assert_eq!(out.get(2, 2), 3.0);
        assert!((out.get(1, 1) - 1.5).abs() < 1e-6);
        assert!((out.get(1, 0) - 0.5).abs() < 1e-6);
        assert!((out.get(0, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bilinear_downscale_keeps_corners() {
        let src = ScalarGrid::from_fn(5, 5, |x, y| (x * y) as f32);
        let out = resize(&src, (2, 2), ResizeMode::Bilinear).unwrap();
        assert_eq!(out.values(), &[0.0, 0.0, 0.0, 16.0]);
    }

    #[test]
    fn test_single_sample_target() {
        let out = resize(&ramp(), (1, 1), ResizeMode::Bilinear).unwrap();
        assert_eq!(out.values(), &[0.0]);
    }

    #[test]
    fn test_resize_rejects_empty() {
        assert_eq!(
            resize(&ramp(), (0, 3), ResizeMode::Nearest),
            Err(GridError::EmptyTarget {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            resize(&ScalarGrid::default(), (2, 2), ResizeMode::Bilinear),
            Err(GridError::EmptySource)
        );
    }

    #[test]
    fn test_resize_nearest_generic() {
        let labels = vec!['a', 'b', 'c', 'd'];
        let out = resize_nearest(&labels, (2, 2), (1, 1)).unwrap();
        assert_eq!(out, vec!['a']);
        assert!(resize_nearest(&labels, (3, 2), (1, 1)).is_err());
    }

    #[test]
    fn test_flatten_orders() {
        let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(
            flatten(&rows, FlattenOrder::RowMajor).unwrap(),
            vec![1, 2, 3, 4, 5, 6]
        );
        assert_eq!(
            flatten(&rows, FlattenOrder::ColumnMajor).unwrap(),
            vec![1, 4, 2, 5, 3, 6]
        );
        assert!(flatten(&[vec![1], vec![]], FlattenOrder::RowMajor).is_err());
        assert!(flatten::<u8>(&[], FlattenOrder::ColumnMajor).unwrap().is_empty());
    }
}
