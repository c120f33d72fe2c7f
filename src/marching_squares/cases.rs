use super::cell_context::CellContext;
use super::primitives::add_fan;
use super::types::*;
use super::vertex::Corner;

/// Which corner of the cell a polygon vertex is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCorner {
    A,
    B,
    C,
    D,
}

/// Which of the corner's three positions a polygon vertex uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerPoint {
    /// The corner itself.
    Position,
    /// Midpoint toward +x.
    EdgeX,
    /// Midpoint toward +y.
    EdgeY,
}

/// One polygon vertex, named by role rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRole(pub CellCorner, pub CornerPoint);

impl VertexRole {
    #[must_use]
    pub fn resolve(self, ctx: &CellContext) -> Point3 {
        let corner: &Corner = match self.0 {
            CellCorner::A => ctx.a,
            CellCorner::B => ctx.b,
            CellCorner::C => ctx.c,
            CellCorner::D => ctx.d,
        };
        match self.1 {
            CornerPoint::Position => corner.position,
            CornerPoint::EdgeX => corner.edge_x,
            CornerPoint::EdgeY => corner.edge_y,
        }
    }
}

const AP: VertexRole = VertexRole(CellCorner::A, CornerPoint::Position);
const AX: VertexRole = VertexRole(CellCorner::A, CornerPoint::EdgeX);
const AY: VertexRole = VertexRole(CellCorner::A, CornerPoint::EdgeY);
const BP: VertexRole = VertexRole(CellCorner::B, CornerPoint::Position);
const BY: VertexRole = VertexRole(CellCorner::B, CornerPoint::EdgeY);
const CP: VertexRole = VertexRole(CellCorner::C, CornerPoint::Position);
const CX: VertexRole = VertexRole(CellCorner::C, CornerPoint::EdgeX);
const DP: VertexRole = VertexRole(CellCorner::D, CornerPoint::Position);

/// A polygon in winding order; fanned from its first vertex on emission.
pub type Polygon = &'static [VertexRole];

/// Polygons emitted for each case index.
///
/// Saddles (6 and 9) always keep the two occupied corners apart as
/// disjoint triangles. Consumers depend on this exact topology.
pub const CASE_TABLE: [&[Polygon]; CASE_COUNT] = [
    // 0: none
    &[],
    // 1: a
    &[&[AP, AY, AX]],
    // 2: b
    &[&[BP, AX, BY]],
    // 3: a, b
    &[&[AP, AY, BY, BP]],
    // 4: c
    &[&[CP, CX, AY]],
    // 5: a, c
    &[&[AP, CP, CX, AX]],
    // 6: b, c
    &[&[BP, AX, BY], &[CP, CX, AY]],
    // 7: a, b, c
    &[&[AP, CP, CX, BY, BP]],
    // 8: d
    &[&[DP, BY, CX]],
    // 9: a, d
    &[&[AP, AY, AX], &[DP, BY, CX]],
    // 10: b, d
    &[&[AX, CX, DP, BP]],
    // 11: a, b, d
    &[&[BP, AP, AY, CX, DP]],
    // 12: c, d
    &[&[AY, CP, DP, BY]],
    // 13: a, c, d
    &[&[CP, DP, BY, AX, AP]],
    // 14: b, c, d
    &[&[DP, BP, AX, AY, CP]],
    // 15: all
    &[&[AP, CP, DP, BP]],
];

/// Number of triangles a case emits.
#[must_use]
pub fn case_triangle_count(case: u8) -> usize {
    CASE_TABLE[usize::from(case & 0x0f)]
        .iter()
        .map(|polygon| polygon.len() - 2)
        .sum()
}

/// Number of vertices a case emits.
#[must_use]
pub fn case_vertex_count(case: u8) -> usize {
    CASE_TABLE[usize::from(case & 0x0f)]
        .iter()
        .map(|polygon| polygon.len())
        .sum()
}

/// Emit the geometry for one cell into `mesh`.
pub fn generate_cell(ctx: &CellContext, mesh: &mut MeshData) {
    let polygons = CASE_TABLE[usize::from(ctx.case_index())];

    let mut points = [Point3::ZERO; 5];
    for polygon in polygons {
        for (slot, role) in points.iter_mut().zip(polygon.iter()) {
            *slot = role.resolve(ctx);
        }
        add_fan(mesh, &points[..polygon.len()]);
    }
}
