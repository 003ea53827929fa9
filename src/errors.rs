//! Construction errors

use crate::float_types::Real;
use nalgebra::Point3;

/// Everything that can go wrong while building a mesh.
///
/// Building is a pure in-memory computation, so the only failures are
/// rejected inputs. File errors live in [`crate::io::IoError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// (InvalidResolution) The subdivision count must be at least 1
    #[error("(InvalidResolution) resolution must be at least 1, got {0}")]
    InvalidResolution(i64),
    /// (InvalidRadius) The radius is zero, negative, NaN or infinite
    #[error("(InvalidRadius) radius must be finite and positive, got {0}")]
    InvalidRadius(Real),
    /// (InvalidCenter) A center coordinate is NaN or infinite
    #[error("(InvalidCenter) center has a NaN or infinite coordinate: {0}")]
    InvalidCenter(Point3<Real>),
    /// (IndexOutOfRange) A face references a vertex that does not exist
    #[error("(IndexOutOfRange) vertex index {index} is out of range (vertices.len = {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result alias for mesh construction.
pub type MeshResult<T> = Result<T, MeshError>;
