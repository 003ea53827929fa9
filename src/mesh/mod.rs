//! `TriMesh` struct: a shared vertex list plus index triangles

use crate::errors::{MeshError, MeshResult};
use crate::float_types::Real;
use nalgebra::Point3;

pub mod analytics;
pub mod subdivide;
pub mod vertex;

/// An indexed triangle mesh.
///
/// Every triangle is three indices into `vertices`; index order is the
/// winding written out by the exporters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex positions, in insertion order
    pub vertices: Vec<Point3<Real>>,

    /// Triangles as indices into `vertices`
    pub triangles: Vec<[usize; 3]>,
}

impl TriMesh {
    pub const fn new() -> Self {
        TriMesh {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Build a mesh from parts, rejecting any triangle that points past the
    /// end of `vertices`.
    pub fn from_parts(
        vertices: Vec<Point3<Real>>,
        triangles: Vec<[usize; 3]>,
    ) -> MeshResult<Self> {
        let mesh = TriMesh { vertices, triangles };
        mesh.validate_indices()?;
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Checks that every triangle index is in `[0, vertex_count)`.
    pub fn validate_indices(&self) -> MeshResult<()> {
        let len = self.vertices.len();
        match self.triangles.iter().flatten().find(|&&index| index >= len) {
            Some(&index) => Err(MeshError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// Positions of the three corners of triangle `t`.
    ///
    /// Panics if `t` or one of its indices is out of range; meshes built by
    /// this crate or checked with [`TriMesh::validate_indices`] never are.
    pub fn triangle_positions(&self, t: usize) -> [Point3<Real>; 3] {
        self.triangles[t].map(|i| self.vertices[i])
    }

    /// Iterator over triangle corner positions, in triangle order.
    pub fn triangle_iter(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.triangles
            .iter()
            .map(move |tri| tri.map(|i| self.vertices[i]))
    }
}
