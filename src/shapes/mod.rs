//! Shape generators producing [`TriMesh`](crate::mesh::TriMesh)es

pub mod sphere;

pub use sphere::{Sphere, SphereParams};
