mod support;

use approx::assert_relative_eq;
use nalgebra::Point3;
use octasphere::float_types::{PI, Real};
use octasphere::{MeshError, Sphere, SphereParams, WeldPolicy};
use support::{approx_eq, bounding_box, edge_set, max_radial_error};

#[test]
fn triangle_count_is_eight_r_squared() {
    for r in 1..=12 {
        let sphere = Sphere::new(Point3::origin(), 0.5, r).unwrap();
        assert_eq!(sphere.triangle_count(), 8 * (r * r) as usize, "resolution {r}");
    }
}

#[test]
fn every_index_is_in_bounds() {
    for r in [1, 2, 3, 5, 7] {
        let sphere = Sphere::new(Point3::new(-1.0, 0.25, 9.0), 3.0, r).unwrap();
        assert!(sphere.mesh().validate_indices().is_ok());
        let n = sphere.vertex_count();
        assert!(sphere.triangles().iter().flatten().all(|&i| i < n));
    }
}

#[test]
fn reference_scenario_seventy_two_triangles_on_half_unit_sphere() {
    let sphere = Sphere::from_params(&SphereParams::default()).unwrap();
    assert_eq!(sphere.triangle_count(), 72);
    let err = max_radial_error(sphere.mesh(), Point3::origin(), 0.5);
    println!("max radial error at r=3: {err}");
    assert!(err < 1e-5);
}

#[test]
fn vertices_lie_on_offset_sphere() {
    let center = Point3::new(1.0, 2.0, 3.0);
    let sphere = Sphere::new(center, 2.0, 6).unwrap();
    assert!(max_radial_error(sphere.mesh(), center, 2.0) < 1e-5);

    let bb = bounding_box(sphere.mesh());
    let expected = [-1.0, 0.0, 1.0, 3.0, 4.0, 5.0];
    for (got, want) in bb.iter().zip(expected) {
        assert!(approx_eq(*got, want, 1e-5), "bounding box {bb:?}");
    }
}

#[test]
fn resolution_one_is_the_octahedron() {
    let sphere = Sphere::new(Point3::origin(), 0.5, 1).unwrap();
    let expected = [
        Point3::new(0.0, 0.5, 0.0),
        Point3::new(0.5, 0.0, 0.0),
        Point3::new(0.0, 0.0, 0.5),
        Point3::new(0.0, 0.0, -0.5),
        Point3::new(-0.5, 0.0, 0.0),
        Point3::new(0.0, -0.5, 0.0),
    ];
    assert_eq!(sphere.vertex_count(), 6);
    assert_eq!(sphere.triangle_count(), 8);
    for (v, e) in sphere.vertices().iter().zip(&expected) {
        assert_relative_eq!(v.x, e.x);
        assert_relative_eq!(v.y, e.y);
        assert_relative_eq!(v.z, e.z);
    }
}

#[test]
fn building_twice_is_identical() {
    let params = SphereParams {
        center: Point3::new(0.1, -0.2, 0.3),
        radius: 1.7,
        resolution: 5,
        weld: WeldPolicy::Exact,
    };
    let a = Sphere::from_params(&params).unwrap();
    let b = Sphere::from_params(&params).unwrap();
    assert_eq!(a.mesh(), b.mesh());
}

#[test]
fn shared_edges_weld_on_drift_free_resolutions() {
    for (r, expected) in [(2, 18), (4, 66)] {
        let sphere = Sphere::new(Point3::origin(), 0.5, r).unwrap();
        assert_eq!(sphere.vertex_count(), expected, "resolution {r}");

        // closed surface: V - E + F = 2
        let edges = edge_set(sphere.mesh()).len();
        let euler = sphere.vertex_count() as i64 - edges as i64 + sphere.triangle_count() as i64;
        assert_eq!(euler, 2);
    }
}

#[test]
fn snapped_policy_at_resolution_three_stays_on_sphere() {
    let sphere = Sphere::with_policy(Point3::origin(), 0.5, 3, WeldPolicy::snapped()).unwrap();
    assert_eq!(sphere.vertex_count(), 38);
    assert_eq!(sphere.triangle_count(), 72);
    assert!(max_radial_error(sphere.mesh(), Point3::origin(), 0.5) < 1e-5);
}

#[test]
fn snapped_policy_gives_closed_vertex_count() {
    for r in 1..=7 {
        let snapped = Sphere::with_policy(Point3::origin(), 0.5, r, WeldPolicy::snapped()).unwrap();
        assert_eq!(snapped.vertex_count(), (4 * r * r + 2) as usize, "resolution {r}");
    }
}

// At r = 49 interpolation rounding leaves 200 seam points that differ from
// the neighbouring face's copy of the same point.
#[cfg(feature = "f64")]
#[test]
fn exact_policy_keeps_drift_duplicates_that_snapping_welds() {
    let r = 49;
    let exact = Sphere::new(Point3::origin(), 0.5, r).unwrap();
    let snapped = Sphere::with_policy(Point3::origin(), 0.5, r, WeldPolicy::snapped()).unwrap();
    println!("r = {r}: exact {} vertices, snapped {}", exact.vertex_count(), snapped.vertex_count());

    assert_eq!(exact.vertex_count(), 9806);
    assert_eq!(snapped.vertex_count(), (4 * r * r + 2) as usize);
    assert_eq!(exact.triangle_count(), snapped.triangle_count());

    // only the snapped mesh is a closed surface: V - E + F = 2
    let euler = |sphere: &Sphere| {
        sphere.vertex_count() as i64 - edge_set(sphere.mesh()).len() as i64
            + sphere.triangle_count() as i64
    };
    assert_eq!(euler(&snapped), 2);
    assert_ne!(euler(&exact), 2);
}

#[test]
fn mesh_area_approaches_sphere_area() {
    let radius = 0.5;
    let exact = 4.0 * PI * radius * radius;
    let mut previous = Real::MAX;
    for r in [2, 4, 8, 16] {
        let sphere = Sphere::new(Point3::origin(), radius, r).unwrap();
        let error = sphere.surface_area_error();
        println!("resolution {r}: area {} vs {exact}", sphere.mesh().total_area());
        assert!(sphere.mesh().total_area() < exact);
        assert!(error < previous);
        previous = error;
    }
    assert!(previous < 0.01);
}

#[test]
fn no_triangle_is_degenerate() {
    let sphere = Sphere::new(Point3::origin(), 0.5, 6).unwrap();
    assert!(sphere.mesh().triangle_areas().iter().all(|&a| a > 0.0));
}

#[test]
fn rejects_non_positive_resolution() {
    for r in [0, -1, i64::MIN] {
        assert_eq!(
            Sphere::new(Point3::origin(), 0.5, r).unwrap_err(),
            MeshError::InvalidResolution(r)
        );
    }
}

#[test]
fn rejects_invalid_radius_and_center() {
    assert!(matches!(
        Sphere::new(Point3::origin(), 0.0, 3),
        Err(MeshError::InvalidRadius(_))
    ));
    assert!(matches!(
        Sphere::new(Point3::new(Real::INFINITY, 0.0, 0.0), 1.0, 3),
        Err(MeshError::InvalidCenter(_))
    ));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_build_matches_sequential() {
    for weld in [WeldPolicy::Exact, WeldPolicy::snapped()] {
        for r in [1, 2, 3, 7] {
            let params = SphereParams {
                center: Point3::new(0.5, 0.5, -0.5),
                radius: 1.25,
                resolution: r,
                weld,
            };
            let sequential = Sphere::from_params(&params).unwrap();
            let parallel = Sphere::from_params_parallel(&params).unwrap();
            assert_eq!(sequential.mesh(), parallel.mesh(), "resolution {r}, {weld:?}");
        }
    }
}
