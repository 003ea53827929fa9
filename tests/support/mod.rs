//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use hashbrown::HashSet;
use nalgebra::Point3;
use octasphere::{TriMesh, float_types::Real};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a mesh's vertices.
pub fn bounding_box(mesh: &TriMesh) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for p in &mesh.vertices {
        for k in 0..3 {
            bb[k] = bb[k].min(p[k]);
            bb[k + 3] = bb[k + 3].max(p[k]);
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Largest deviation of any vertex's distance to `center` from `radius`.
pub fn max_radial_error(mesh: &TriMesh, center: Point3<Real>, radius: Real) -> Real {
    mesh.vertices
        .iter()
        .map(|v| ((v - center).norm() - radius).abs())
        .fold(0.0, Real::max)
}

/// Undirected edges of a mesh, each as `(low, high)` vertex indices.
pub fn edge_set(mesh: &TriMesh) -> HashSet<(usize, usize)> {
    let mut edges = HashSet::new();
    for t in &mesh.triangles {
        for k in 0..3 {
            let (a, b) = (t[k], t[(k + 1) % 3]);
            edges.insert((a.min(b), a.max(b)));
        }
    }
    edges
}
