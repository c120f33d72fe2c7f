use super::types::*;
use super::vertex::Corner;

/// Pack four occupancy flags into a case index in `0..16`.
///
/// A and B share a row, A and C share a column. The bit weights are the
/// contract `CASE_TABLE` is written against.
#[must_use]
#[inline]
pub fn classify(a: bool, b: bool, c: bool, d: bool) -> u8 {
    let mut case = 0;
    if a {
        case |= CORNER_A_BIT;
    }
    if b {
        case |= CORNER_B_BIT;
    }
    if c {
        case |= CORNER_C_BIT;
    }
    if d {
        case |= CORNER_D_BIT;
    }
    case
}

/// Transient view over the four corners of one cell.
#[derive(Clone, Copy, Debug)]
pub struct CellContext<'a> {
    pub a: &'a Corner,
    pub b: &'a Corner,
    pub c: &'a Corner,
    pub d: &'a Corner,
}

// ================================
// ===== CellContext Impl  ========
// ================================

impl<'a> CellContext<'a> {
    /// Borrow cell `(cell_x, cell_y)` from a row-major corner array.
    pub fn from_corners(
        corners: &'a [Corner],
        resolution: usize,
        cell_x: usize,
        cell_y: usize,
    ) -> Self {
        let [a, b, c, d] = corner_indices(resolution, cell_x, cell_y);
        Self {
            a: &corners[a],
            b: &corners[b],
            c: &corners[c],
            d: &corners[d],
        }
    }

    #[must_use]
    pub fn case_index(&self) -> u8 {
        classify(
            self.a.occupied,
            self.b.occupied,
            self.c.occupied,
            self.d.occupied,
        )
    }
}

/// Row-major indices of corners A, B, C, D for a cell.
#[must_use]
pub fn corner_indices(resolution: usize, cell_x: usize, cell_y: usize) -> [usize; 4] {
    [
        cell_y * resolution + cell_x,           // A
        cell_y * resolution + cell_x + 1,       // B
        (cell_y + 1) * resolution + cell_x,     // C
        (cell_y + 1) * resolution + cell_x + 1, // D
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching_squares::vertex::sample_corners;

    #[test]
    fn test_classify_bit_weights() {
        assert_eq!(classify(false, false, false, false), 0);
        assert_eq!(classify(true, false, false, false), 1);
        assert_eq!(classify(false, true, false, false), 2);
        assert_eq!(classify(false, false, true, false), 4);
        assert_eq!(classify(false, false, false, true), 8);
        assert_eq!(classify(true, true, true, true), 15);
        assert_eq!(classify(false, true, true, false), 6);
    }

    #[test]
    fn test_classify_covers_all_cases() {
        for case in 0u8..16 {
            let got = classify(case & 1 != 0, case & 2 != 0, case & 4 != 0, case & 8 != 0);
            assert_eq!(got, case);
        }
    }

    #[test]
    fn test_corner_indices() {
        assert_eq!(corner_indices(4, 1, 2), [9, 10, 13, 14]);
    }

    #[test]
    fn test_context_reads_neighbours() {
        // Only (x=2, y=1) solid on a 3x3 grid: it is D of cell (1, 0).
        let corners = sample_corners(3, 1.0, Point3::ZERO, |x, y| x == 2 && y == 1);
        let ctx = CellContext::from_corners(&corners, 3, 1, 0);
        assert_eq!(ctx.case_index(), 8);
        assert_eq!(ctx.a.position, Point3::new(1.5, 0.0, 0.5));

        let ctx = CellContext::from_corners(&corners, 3, 0, 0);
        assert_eq!(ctx.case_index(), 0);
    }
}
