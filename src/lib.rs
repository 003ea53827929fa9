//! Sphere meshes built by subdividing an **octahedron**, with export to the
//! legacy VTK unstructured-grid text format.
//!
//! Each of the octahedron's eight faces is swept into a `resolution × resolution`
//! triangle grid, coincident grid points are welded into shared vertices, and
//! every vertex is pushed out to the sphere surface. A mesh at resolution `n`
//! has exactly `8·n²` triangles.
//!
//! ```
//! use nalgebra::Point3;
//! use octasphere::Sphere;
//!
//! let sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 0.5, 4)?;
//! assert_eq!(sphere.triangle_count(), 128);
//! for v in sphere.vertices() {
//!     assert!(((v - sphere.center()).norm() - 0.5).abs() < 1e-5);
//! }
//! # Ok::<(), octasphere::errors::MeshError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to subdivide faces and compute analytics concurrently

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod shapes;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{MeshError, MeshResult};
pub use mesh::TriMesh;
pub use mesh::vertex::{VertexKey, VertexMap, WeldPolicy};
pub use shapes::{Sphere, SphereParams};
