use std::collections::HashMap;

use super::types::{MeshData, Point3};

/// Area below which a triangle counts as degenerate.
const DEGENERATE_AREA_EPSILON: f32 = 1e-10;

/// Result of checking a mesh against the `MeshData` invariants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Positions in `triangle_indices` holding an index past the vertex buffer.
    pub out_of_bounds: Vec<usize>,
    /// Triangle numbers with (near) zero area.
    pub degenerate_triangles: Vec<usize>,
    /// Trailing indices that do not form a whole triangle.
    pub dangling_indices: usize,
    pub is_valid: bool,
}

/// Canonical edge key using bit-exact float hashing.
/// Edges are ordered so (A,B) == (B,A).
#[derive(Hash, Eq, PartialEq)]
struct EdgeKey([u32; 6]);

fn vertex_to_bits(v: Point3) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

fn make_edge_key(a: Point3, b: Point3) -> EdgeKey {
    let ba = vertex_to_bits(a);
    let bb = vertex_to_bits(b);
    if ba < bb {
        EdgeKey([ba[0], ba[1], ba[2], bb[0], bb[1], bb[2]])
    } else {
        EdgeKey([bb[0], bb[1], bb[2], ba[0], ba[1], ba[2]])
    }
}

fn triangle_area(a: Point3, b: Point3, c: Point3) -> f32 {
    let ab = b - a;
    let ac = c - a;
    let cx = ab.y * ac.z - ab.z * ac.y;
    let cy = ab.z * ac.x - ab.x * ac.z;
    let cz = ab.x * ac.y - ab.y * ac.x;
    0.5 * (cx * cx + cy * cy + cz * cz).sqrt()
}

/// Check index bounds, index count, and triangle area.
pub fn validate_mesh(mesh: &MeshData) -> ValidationResult {
    let vertex_count = mesh.vertices.len();

    let out_of_bounds: Vec<usize> = mesh
        .triangle_indices
        .iter()
        .enumerate()
        .filter(|&(_, &i)| i as usize >= vertex_count)
        .map(|(pos, _)| pos)
        .collect();

    let mut degenerate_triangles = Vec::new();
    if out_of_bounds.is_empty() {
        for (tri, [i0, i1, i2]) in mesh.triangles().enumerate() {
            let area = triangle_area(
                mesh.vertices[i0 as usize],
                mesh.vertices[i1 as usize],
                mesh.vertices[i2 as usize],
            );
            if !(area > DEGENERATE_AREA_EPSILON) {
                degenerate_triangles.push(tri);
            }
        }
    }

    let dangling_indices = mesh.triangle_indices.len() % 3;
    let is_valid =
        out_of_bounds.is_empty() && degenerate_triangles.is_empty() && dangling_indices == 0;

    ValidationResult {
        out_of_bounds,
        degenerate_triangles,
        dangling_indices,
        is_valid,
    }
}

/// Edges used by exactly one triangle.
///
/// Positions are compared bit-exactly, so coincident un-welded vertices
/// still close an edge. Triangles with out-of-range indices are skipped.
pub fn open_edges(mesh: &MeshData) -> Vec<(Point3, Point3)> {
    let mut edge_counts: HashMap<EdgeKey, (Point3, Point3, u32)> = HashMap::new();
    let vertex_count = mesh.vertices.len();

    for tri in mesh.triangles() {
        if tri.iter().any(|&i| i as usize >= vertex_count) {
            continue;
        }
        let v0 = mesh.vertices[tri[0] as usize];
        let v1 = mesh.vertices[tri[1] as usize];
        let v2 = mesh.vertices[tri[2] as usize];

        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            edge_counts
                .entry(make_edge_key(a, b))
                .and_modify(|e| e.2 += 1)
                .or_insert((a, b, 1));
        }
    }

    edge_counts
        .into_values()
        .filter(|(_, _, count)| *count == 1)
        .map(|(a, b, _)| (a, b))
        .collect()
}
