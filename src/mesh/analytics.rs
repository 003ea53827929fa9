//! Per-triangle area and centroid for `TriMesh`

use crate::float_types::Real;
use crate::mesh::TriMesh;
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Area and centroid of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleStats {
    /// Triangle area
    pub area: Real,
    /// Mean of the three corners
    pub centroid: Point3<Real>,
}

/// Half the norm of `(v1 − v0) × (v2 − v0)`.
#[inline]
pub fn triangle_area([v0, v1, v2]: &[Point3<Real>; 3]) -> Real {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    0.5 * edge1.cross(&edge2).norm()
}

#[inline]
pub fn triangle_centroid([v0, v1, v2]: &[Point3<Real>; 3]) -> Point3<Real> {
    Point3::from((v0.coords + v1.coords + v2.coords) / 3.0)
}

impl TriMesh {
    /// Area of every triangle, in triangle order.
    pub fn triangle_areas(&self) -> Vec<Real> {
        self.map_triangles(|corners| triangle_area(&corners))
    }

    /// Centroid of every triangle, in triangle order.
    pub fn triangle_centroids(&self) -> Vec<Point3<Real>> {
        self.map_triangles(|corners| triangle_centroid(&corners))
    }

    /// Area and centroid of every triangle, in triangle order.
    pub fn triangle_stats(&self) -> Vec<TriangleStats> {
        self.map_triangles(|corners| TriangleStats {
            area: triangle_area(&corners),
            centroid: triangle_centroid(&corners),
        })
    }

    /// Sum of all triangle areas.
    pub fn total_area(&self) -> Real {
        self.triangle_areas().iter().sum()
    }

    fn map_triangles<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn([Point3<Real>; 3]) -> T + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        let out: Vec<T> = self
            .triangles
            .par_iter()
            .map(|tri| f(tri.map(|i| self.vertices[i])))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let out: Vec<T> = self
            .triangles
            .iter()
            .map(|tri| f(tri.map(|i| self.vertices[i])))
            .collect();

        out
    }
}
