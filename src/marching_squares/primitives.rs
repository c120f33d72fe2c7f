use super::types::{MeshData, Point3};

/// Triangle: indices (n, n+1, n+2).
pub fn add_triangle(mesh: &mut MeshData, v0: Point3, v1: Point3, v2: Point3) {
    add_fan(mesh, &[v0, v1, v2]);
}

/// Quad split along the 0-2 diagonal.
pub fn add_quad(mesh: &mut MeshData, v0: Point3, v1: Point3, v2: Point3, v3: Point3) {
    add_fan(mesh, &[v0, v1, v2, v3]);
}

/// Pentagon as a three-triangle fan from `v0`.
pub fn add_pentagon(
    mesh: &mut MeshData,
    v0: Point3,
    v1: Point3,
    v2: Point3,
    v3: Point3,
    v4: Point3,
) {
    add_fan(mesh, &[v0, v1, v2, v3, v4]);
}

/// Append a convex polygon as a triangle fan from its first vertex.
/// Every call emits fresh vertices; nothing is welded.
pub fn add_fan(mesh: &mut MeshData, polygon: &[Point3]) {
    debug_assert!(polygon.len() >= 3, "fan needs at least 3 vertices");
    debug_assert!(
        mesh.vertices.len() + polygon.len() <= MeshData::MAX_VERTICES,
        "mesh exceeds u32 index range"
    );

    let start = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(polygon);
    for i in 1..polygon.len().saturating_sub(1) as u32 {
        mesh.triangle_indices
            .extend_from_slice(&[start, start + i, start + i + 1]);
    }
}
