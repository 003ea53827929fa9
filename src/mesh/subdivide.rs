//! Grid subdivision of a single triangular face.
//!
//! A face `(A, B, C)` is swept row by row from the `A` corner towards edge
//! `BC`. Row `r` of `n` holds `r + 1` grid points
//!
//! ```text
//! P(r, c) = A + (r / n)·(B − A) + (c / n)·(C − B),   0 ≤ c ≤ r
//! ```
//!
//! so row `n` runs from `B` (`c = 0`) to `C` (`c = n`). Every grid cell left of
//! the diagonal is a quad split into two triangles; the diagonal cell is a
//! single triangle. A face at resolution `n` therefore yields `n²` triangles.

use crate::errors::{MeshError, MeshResult};
use crate::float_types::Real;
use crate::mesh::vertex::VertexMap;
use nalgebra::Point3;
use tracing::trace;

/// Validate a resolution and return it as a loop bound.
///
/// Resolutions whose `n²` triangle grid could not be allocated are rejected
/// along with those below 1.
pub(crate) fn checked_resolution(resolution: i64) -> MeshResult<usize> {
    let invalid = || MeshError::InvalidResolution(resolution);
    if resolution < 1 {
        return Err(invalid());
    }
    let n = usize::try_from(resolution).map_err(|_| invalid())?;
    match n.checked_mul(n) {
        Some(cells) if fits_in_memory::<[usize; 3]>(cells) => Ok(n),
        _ => Err(invalid()),
    }
}

/// Whether `count` values of `T` fit in a single allocation.
pub(crate) fn fits_in_memory<T>(count: usize) -> bool {
    count
        .checked_mul(size_of::<T>())
        .is_some_and(|bytes| bytes <= isize::MAX as usize)
}

/// Point of the face parametrization at `(row_frac, col_frac)`.
///
/// This is a flat sweep, not a spherical one: the result lies on the plane of
/// `a`, `b`, `c`.
#[inline]
pub fn interpolate(
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
    row_frac: Real,
    col_frac: Real,
) -> Point3<Real> {
    a + (b - a) * row_frac + (c - b) * col_frac
}

/// Subdivide `face` into a `resolution × resolution` triangle grid.
///
/// Grid points are resolved through `map`, so points already present in
/// `vertices` (from earlier faces or the seeded corners) are reused and new
/// ones are appended. Returns the face's triangles, `resolution²` of them,
/// indexing into the grown `vertices`.
///
/// # Errors
/// - [`MeshError::InvalidResolution`] if `resolution < 1`
/// - [`MeshError::IndexOutOfRange`] if a face index is not in `vertices`
pub fn subdivide_face(
    face: [usize; 3],
    resolution: i64,
    map: &mut VertexMap,
    vertices: &mut Vec<Point3<Real>>,
) -> MeshResult<Vec<[usize; 3]>> {
    let n = checked_resolution(resolution)?;

    let len = vertices.len();
    if let Some(&index) = face.iter().find(|&&index| index >= len) {
        return Err(MeshError::IndexOutOfRange { index, len });
    }
    let [a, b, c] = face.map(|i| vertices[i]);

    let step = 1.0 / n as Real;
    let mut triangles = Vec::with_capacity(n * n);

    for row in 0..n {
        let row_frac = row as Real * step;
        let next_row_frac = (row + 1) as Real * step;

        for column in 0..=row {
            let col_frac = column as Real * step;
            let next_col_frac = (column + 1) as Real * step;

            let v0 = interpolate(&a, &b, &c, row_frac, col_frac);
            let v1 = interpolate(&a, &b, &c, next_row_frac, col_frac);
            let v2 = interpolate(&a, &b, &c, next_row_frac, next_col_frac);

            let i0 = map.resolve(v0, vertices);
            let i1 = map.resolve(v1, vertices);
            let i2 = map.resolve(v2, vertices);

            triangles.push([i0, i1, i2]);

            // the diagonal cell has no fourth corner inside the face
            if column != row {
                let v3 = interpolate(&a, &b, &c, row_frac, next_col_frac);
                let i3 = map.resolve(v3, vertices);
                triangles.push([i0, i2, i3]);
            }
        }
    }

    trace!(
        ?face,
        triangles = triangles.len(),
        vertices = vertices.len(),
        "subdivided face"
    );

    Ok(triangles)
}
