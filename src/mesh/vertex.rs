//! Vertex identity: the key a point is welded by, and the point → index map
//! that collapses coincident points into one vertex.

use crate::float_types::{Real, tolerance};
use hashbrown::HashMap;
use nalgebra::Point3;

/// Hashable identity of a point under a [`WeldPolicy`].
///
/// Equality and hashing are both derived from the same integer triple, so two
/// keys that compare equal always hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKey {
    /// Coordinate bit patterns, with `-0.0` folded onto `+0.0`
    Exact([u64; 3]),
    /// Coordinates rounded to a grid of the policy's pitch
    Snapped([i64; 3]),
}

/// How points are compared when deciding whether they are the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeldPolicy {
    /// Same vertex iff every coordinate is value-equal.
    ///
    /// Floating-point drift between two computations of the same geometric
    /// point leaves both copies in the vertex list.
    #[default]
    Exact,
    /// Same vertex iff the points snap to the same cell of a grid with pitch
    /// `tolerance`. Points closer than `tolerance` on opposite sides of a cell
    /// boundary stay distinct.
    Snapped { tolerance: Real },
}

impl WeldPolicy {
    /// Snapping policy using the crate-wide [`tolerance`].
    pub fn snapped() -> Self {
        WeldPolicy::Snapped { tolerance: tolerance() }
    }

    /// Key for `point` under this policy.
    #[allow(clippy::unnecessary_cast)]
    pub fn key(&self, point: &Point3<Real>) -> VertexKey {
        match *self {
            WeldPolicy::Exact => {
                // +0.0 and -0.0 compare equal, so they must share bits
                let bits = |v: Real| if v == 0.0 { (0.0 as Real).to_bits() as u64 } else { v.to_bits() as u64 };
                VertexKey::Exact([bits(point.x), bits(point.y), bits(point.z)])
            },
            WeldPolicy::Snapped { tolerance } => {
                let inv = 1.0 / tolerance.max(Real::EPSILON);
                let snap = |v: Real| (v * inv).round() as i64;
                VertexKey::Snapped([snap(point.x), snap(point.y), snap(point.z)])
            },
        }
    }

    /// Whether `a` and `b` are the same vertex under this policy.
    pub fn same_vertex(&self, a: &Point3<Real>, b: &Point3<Real>) -> bool {
        self.key(a) == self.key(b)
    }
}

/// Point → vertex index map, scoped to a single mesh build.
///
/// The map does not own the vertex list; callers pass it in so the same list
/// can be shared across several face subdivisions.
#[derive(Debug, Clone, Default)]
pub struct VertexMap {
    policy: WeldPolicy,
    indices: HashMap<VertexKey, usize>,
}

impl VertexMap {
    pub fn new(policy: WeldPolicy) -> Self {
        VertexMap {
            policy,
            indices: HashMap::new(),
        }
    }

    pub fn with_capacity(policy: WeldPolicy, capacity: usize) -> Self {
        VertexMap {
            policy,
            indices: HashMap::with_capacity(capacity),
        }
    }

    pub const fn policy(&self) -> WeldPolicy {
        self.policy
    }

    /// Number of distinct keys registered
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index of the vertex `point` welds to, if any
    pub fn get(&self, point: &Point3<Real>) -> Option<usize> {
        self.indices.get(&self.policy.key(point)).copied()
    }

    /// Append `point` unconditionally and register it, replacing any earlier
    /// registration of the same key.
    pub fn seed(&mut self, point: Point3<Real>, vertices: &mut Vec<Point3<Real>>) -> usize {
        let index = vertices.len();
        vertices.push(point);
        self.indices.insert(self.policy.key(&point), index);
        index
    }

    /// Index of the vertex `point` welds to, appending it to `vertices` first
    /// when it is new.
    pub fn resolve(&mut self, point: Point3<Real>, vertices: &mut Vec<Point3<Real>>) -> usize {
        let key = self.policy.key(&point);
        *self.indices.entry(key).or_insert_with(|| {
            vertices.push(point);
            vertices.len() - 1
        })
    }
}
