use std::ops::{Add, Sub};

// =====================
// ===== Constants =====
// =====================

/// Number of corner configurations for a 2x2 cell.
pub const CASE_COUNT: usize = 16;
/// Bit weight of corner A (current corner).
pub const CORNER_A_BIT: u8 = 1;
/// Bit weight of corner B (x + 1).
pub const CORNER_B_BIT: u8 = 2;
/// Bit weight of corner C (y + 1).
pub const CORNER_C_BIT: u8 = 4;
/// Bit weight of corner D (x + 1, y + 1).
pub const CORNER_D_BIT: u8 = 8;
/// Most vertices a single cell can emit (the saddle cases).
pub const MAX_CELL_VERTICES: usize = 6;

// =====================
// ===== Types  ========
// =====================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Point3 = Point3::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(p: [f32; 3]) -> Self {
        Point3::new(p[0], p[1], p[2])
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

/// Output of a triangulation pass: un-welded vertices and a triangle list.
///
/// `triangle_indices.len()` is always a multiple of 3 and every index is
/// below `vertices.len()`. Buffers only ever grow.
///
/// Indices are `u32`, so a mesh holds at most [`MeshData::MAX_VERTICES`]
/// vertices. The triangulator rejects grids that could exceed it; callers
/// building meshes by hand with `append` must stay under it themselves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Point3>,
    pub triangle_indices: Vec<u32>,
}

impl MeshData {
    /// Largest vertex count whose indices all fit in `u32`.
    pub const MAX_VERTICES: usize = u32::MAX as usize;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangle_indices: Vec::with_capacity(indices),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangle_indices.is_empty()
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Append another mesh, re-basing its indices past our vertices.
    pub fn append(&mut self, other: &MeshData) {
        debug_assert!(
            self.vertices.len() + other.vertices.len() <= Self::MAX_VERTICES,
            "mesh exceeds u32 index range"
        );
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangle_indices
            .extend(other.triangle_indices.iter().map(|&i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::splat(0.5);
        assert_eq!(a + b, Point3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Point3::new(0.5, 1.5, 2.5));
        assert_eq!(<[f32; 3]>::from(a), [1.0, 2.0, 3.0]);
        assert_eq!(Point3::from([1.0, 2.0, 3.0]), a);
        assert!(!Point3::new(f32::NAN, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut first = MeshData {
            vertices: vec![Point3::ZERO; 3],
            triangle_indices: vec![0, 1, 2],
        };
        let second = MeshData {
            vertices: vec![Point3::splat(1.0); 4],
            triangle_indices: vec![0, 1, 2, 0, 2, 3],
        };

        first.append(&second);

        assert_eq!(first.vertex_count(), 7);
        assert_eq!(first.triangle_count(), 3);
        assert_eq!(first.triangle_indices, vec![0, 1, 2, 3, 4, 5, 3, 5, 6]);
        let tris: Vec<[u32; 3]> = first.triangles().collect();
        assert_eq!(tris[2], [3, 5, 6]);
    }
}
