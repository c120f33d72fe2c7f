//! File-backed debug log for mesh investigation.
//!
//! Writes are no-ops until `init_debug_log()` opens a file.
//! The log file is recreated on each `init_debug_log()` call.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::marching_squares::{MeshData, Point3};

lazy_static::lazy_static! {
    static ref DEBUG_LOG: Mutex<Option<File>> = Mutex::new(None);
}

/// Log a debug message to the debug log file
pub fn debug_log(msg: &str) {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
    }
}

/// Initialize the debug log file (overwrites any existing log)
pub fn init_debug_log(path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "=== OCCUPANCY MESH DEBUG LOG ===")?;
    writeln!(file, "Timestamp: {:?}", std::time::SystemTime::now())?;
    writeln!(file)?;

    if let Ok(mut guard) = DEBUG_LOG.lock() {
        *guard = Some(file);
    }
    Ok(())
}

/// Stop logging and close the file.
pub fn close_debug_log() {
    if let Ok(mut guard) = DEBUG_LOG.lock() {
        *guard = None;
    }
}

/// Summary of a triangulated mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Positions held by more than one vertex (no welding means many).
    pub duplicate_positions: usize,
    pub min: Point3,
    pub max: Point3,
}

/// Compute counts and bounds for a mesh. Bounds are zero for an empty mesh.
pub fn compute_mesh_stats(mesh: &MeshData, epsilon: f32) -> MeshStats {
    let mut min = Point3::splat(f32::MAX);
    let mut max = Point3::splat(f32::MIN);
    for v in &mesh.vertices {
        min = Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
        max = Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
    }

    if mesh.vertices.is_empty() {
        min = Point3::ZERO;
        max = Point3::ZERO;
    }

    MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        duplicate_positions: count_duplicate_positions(&mesh.vertices, epsilon),
        min,
        max,
    }
}

/// Count vertices that appear at identical positions (within epsilon)
/// Returns the number of duplicate position groups found
///
/// Buckets are `i64`, so coordinates up to about `9e18 * epsilon` stay distinct.
pub fn count_duplicate_positions(vertices: &[Point3], epsilon: f32) -> usize {
    // Quantize positions to grid cells for fast lookup
    let scale = f64::from(1.0 / epsilon);
    let mut position_counts: HashMap<(i64, i64, i64), usize> = HashMap::new();

    for v in vertices {
        let key = (
            (f64::from(v.x) * scale).round() as i64,
            (f64::from(v.y) * scale).round() as i64,
            (f64::from(v.z) * scale).round() as i64,
        );
        *position_counts.entry(key).or_insert(0) += 1;
    }

    position_counts.values().filter(|&&count| count > 1).count()
}

/// Write a one-line summary of `mesh` to the debug log.
pub fn log_mesh_stats(label: &str, mesh: &MeshData) {
    let stats = compute_mesh_stats(mesh, 1e-4);
    debug_log(&format!(
        "[{}] {} verts, {} tris, {} shared positions, bounds ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
        label,
        stats.vertex_count,
        stats.triangle_count,
        stats.duplicate_positions,
        stats.min.x,
        stats.min.y,
        stats.min.z,
        stats.max.x,
        stats.max.y,
        stats.max.z,
    ));
}
