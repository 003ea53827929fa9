//! Octahedral sphere: an octahedron whose eight faces are grid-subdivided and
//! pushed out onto the sphere surface.

use crate::errors::{MeshError, MeshResult};
use crate::float_types::{PI, Real};
use crate::mesh::TriMesh;
use crate::mesh::subdivide::{checked_resolution, fits_in_memory, subdivide_face};
use crate::mesh::vertex::{VertexKey, VertexMap, WeldPolicy};
use nalgebra::Point3;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Unit octahedron corners, in vertex-index order.
pub const OCTAHEDRON_CORNERS: [[Real; 3]; 6] = [
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
];

/// Octahedron faces over [`OCTAHEDRON_CORNERS`]. Four faces fan around the
/// `+y` pole (corner 0), four around the `-y` pole (corner 5).
pub const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [0, 3, 1],
    [0, 4, 3],
    [0, 2, 4],
    [5, 1, 2],
    [5, 3, 1],
    [5, 4, 3],
    [5, 2, 4],
];

/// Construction parameters for a [`Sphere`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub center: Point3<Real>,
    pub radius: Real,
    /// Grid subdivisions per octahedron edge, at least 1
    pub resolution: i64,
    pub weld: WeldPolicy,
}

impl Default for SphereParams {
    fn default() -> Self {
        SphereParams {
            center: Point3::origin(),
            radius: 0.5,
            resolution: 3,
            weld: WeldPolicy::Exact,
        }
    }
}

impl SphereParams {
    /// Check every parameter, returning the resolution as a loop bound.
    ///
    /// A resolution whose mesh would not fit in memory is rejected as
    /// [`MeshError::InvalidResolution`].
    pub fn validate(&self) -> MeshResult<usize> {
        let n = checked_resolution(self.resolution)?;
        if grid_sizes(n).is_none() {
            return Err(MeshError::InvalidResolution(self.resolution));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MeshError::InvalidRadius(self.radius));
        }
        if !self.center.coords.iter().all(|c| c.is_finite()) {
            return Err(MeshError::InvalidCenter(self.center));
        }
        Ok(n)
    }
}

/// Scale `point` so its distance from the origin is `radius`.
///
/// The origin itself has no direction and maps to NaN coordinates; no grid
/// point of an octahedron face is ever at the origin.
#[inline]
pub fn project_to_radius(point: Point3<Real>, radius: Real) -> Point3<Real> {
    let length = point.coords.norm();
    Point3::from(point.coords / length * radius)
}

/// A sphere mesh, built once from its parameters and read-only afterwards.
///
/// ```
/// use nalgebra::Point3;
/// use octasphere::Sphere;
///
/// let sphere = Sphere::new(Point3::origin(), 0.5, 3)?;
/// assert_eq!(sphere.triangle_count(), 72);
/// # Ok::<(), octasphere::errors::MeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3<Real>,
    radius: Real,
    resolution: usize,
    weld: WeldPolicy,
    mesh: TriMesh,
}

impl Sphere {
    /// Sphere welded with [`WeldPolicy::Exact`].
    pub fn new(center: Point3<Real>, radius: Real, resolution: i64) -> MeshResult<Self> {
        Self::with_policy(center, radius, resolution, WeldPolicy::Exact)
    }

    pub fn with_policy(
        center: Point3<Real>,
        radius: Real,
        resolution: i64,
        weld: WeldPolicy,
    ) -> MeshResult<Self> {
        Self::from_params(&SphereParams {
            center,
            radius,
            resolution,
            weld,
        })
    }

    /// Build the mesh, subdividing the eight faces one after another.
    ///
    /// # Errors
    /// Rejects a resolution below 1, a radius that is not finite and positive,
    /// and a center with a non-finite coordinate. Nothing is built on error.
    pub fn from_params(params: &SphereParams) -> MeshResult<Self> {
        let n = params.validate()?;
        let (triangle_count, capacity) = sizes_for(params, n)?;
        debug!(
            radius = params.radius,
            resolution = n,
            weld = ?params.weld,
            "building octahedral sphere"
        );

        let mut vertices = Vec::with_capacity(capacity);
        let mut map = VertexMap::with_capacity(params.weld, capacity);
        for corner in OCTAHEDRON_CORNERS {
            map.seed(project_to_radius(Point3::from(corner), params.radius), &mut vertices);
        }

        let mut triangles = Vec::with_capacity(triangle_count);
        for face in OCTAHEDRON_FACES {
            triangles.extend(subdivide_face(face, params.resolution, &mut map, &mut vertices)?);
        }

        Ok(Self::finish(params, n, vertices, triangles))
    }

    /// Build the mesh with the eight faces subdivided concurrently.
    ///
    /// Each face is subdivided against its own map, then the faces are merged
    /// in order through one shared map. The result is identical, index for
    /// index, to [`Sphere::from_params`].
    #[cfg(feature = "parallel")]
    pub fn from_params_parallel(params: &SphereParams) -> MeshResult<Self> {
        let n = params.validate()?;
        let (triangle_count, capacity) = sizes_for(params, n)?;
        debug!(
            radius = params.radius,
            resolution = n,
            weld = ?params.weld,
            "building octahedral sphere in parallel"
        );

        let corners: Vec<Point3<Real>> = OCTAHEDRON_CORNERS
            .iter()
            .map(|&corner| project_to_radius(Point3::from(corner), params.radius))
            .collect();

        let seeded = |weld: WeldPolicy, capacity: usize| {
            let mut vertices = Vec::with_capacity(capacity);
            let mut map = VertexMap::with_capacity(weld, capacity);
            for &corner in &corners {
                map.seed(corner, &mut vertices);
            }
            (map, vertices)
        };

        let per_face: Vec<(Vec<Point3<Real>>, Vec<[usize; 3]>)> = OCTAHEDRON_FACES
            .par_iter()
            .map(|&face| {
                let (mut map, mut vertices) =
                    seeded(params.weld, corners.len() + capacity / 8);
                let triangles = subdivide_face(face, params.resolution, &mut map, &mut vertices)?;
                Ok::<_, MeshError>((vertices, triangles))
            })
            .collect::<MeshResult<_>>()?;

        let (mut map, mut vertices) = seeded(params.weld, capacity);
        let mut triangles = Vec::with_capacity(triangle_count);
        for (local_vertices, local_triangles) in per_face {
            let remap: Vec<usize> = local_vertices
                .iter()
                .enumerate()
                .map(|(i, &p)| {
                    if i < corners.len() {
                        i
                    } else {
                        map.resolve(p, &mut vertices)
                    }
                })
                .collect();
            triangles.extend(local_triangles.iter().map(|tri| tri.map(|i| remap[i])));
        }

        Ok(Self::finish(params, n, vertices, triangles))
    }

    /// Project every vertex onto the sphere, then move it to the center.
    fn finish(
        params: &SphereParams,
        n: usize,
        mut vertices: Vec<Point3<Real>>,
        triangles: Vec<[usize; 3]>,
    ) -> Self {
        for v in &mut vertices {
            *v = project_to_radius(*v, params.radius) + params.center.coords;
        }

        debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "sphere mesh built"
        );

        Sphere {
            center: params.center,
            radius: params.radius,
            resolution: n,
            weld: params.weld,
            mesh: TriMesh { vertices, triangles },
        }
    }

    pub const fn center(&self) -> Point3<Real> {
        self.center
    }

    pub const fn radius(&self) -> Real {
        self.radius
    }

    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    pub const fn weld_policy(&self) -> WeldPolicy {
        self.weld
    }

    pub const fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> TriMesh {
        self.mesh
    }

    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.mesh.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.mesh.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Area of the exact sphere, `4πr²`
    pub fn surface_area(&self) -> Real {
        4.0 * PI * self.radius * self.radius
    }

    /// Relative gap between the mesh area and [`Sphere::surface_area`].
    pub fn surface_area_error(&self) -> Real {
        let exact = self.surface_area();
        (self.mesh.total_area() - exact).abs() / exact
    }
}

/// Triangle count `8n²` and vertex capacity (every face's full grid of
/// `(n+1)(n+2)/2` points, nothing shared), or `None` if either overflows or
/// could not be allocated.
fn grid_sizes(n: usize) -> Option<(usize, usize)> {
    let triangles = n.checked_mul(n)?.checked_mul(8)?;
    let capacity = n
        .checked_add(1)?
        .checked_mul(n.checked_add(2)?)?
        .checked_mul(4)?;
    // hash table buckets run to just over twice the requested capacity
    let fits = fits_in_memory::<[usize; 3]>(triangles)
        && fits_in_memory::<Point3<Real>>(capacity)
        && capacity
            .checked_mul(4)
            .is_some_and(fits_in_memory::<(VertexKey, usize)>);
    fits.then_some((triangles, capacity))
}

fn sizes_for(params: &SphereParams, n: usize) -> MeshResult<(usize, usize)> {
    grid_sizes(n).ok_or(MeshError::InvalidResolution(params.resolution))
}
