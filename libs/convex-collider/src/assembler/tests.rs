//! # Assembler Tests
//!
//! Topology, closed-form counts and shape of assembled meshes.

use super::*;
use glam::DVec3;

const TOLERANCE: f64 = 1e-9;

fn unit_cube() -> ShapeParameters {
    let mut params = ShapeParameters::box_shape(DVec3::ONE, 0.1);
    params.set_all_corner_details(2);
    params.top_segments = 2;
    params.bottom_segments = 2;
    params.xy_detail = 0;
    params.yz_detail = 0;
    params.xz_detail = 0;
    params
}

fn assert_sound(mesh: &Mesh) {
    assert!(mesh.validate(), "invalid indices");
    assert!(mesh.is_closed_manifold(), "surface is not closed");
    assert!(mesh.signed_volume() > 0.0, "faces wind inward");
    assert!(mesh.is_convex(TOLERANCE), "surface is not convex");
}

#[test]
fn test_unit_cube_counts() {
    let params = unit_cube();
    let predicted = MeshCounts::predict(&params);
    assert_eq!(
        predicted,
        MeshCounts {
            vertices: 56,
            triangles: 108
        }
    );

    let mesh = assemble(&params).unwrap();
    assert_eq!(mesh.vertex_count(), 56);
    assert_eq!(mesh.triangle_count(), 108);
    assert_sound(&mesh);
    assert_eq!(mesh.degenerate_triangle_count(1e-12), 0);
}

#[test]
fn test_minimal_detail_counts() {
    let mut params = unit_cube();
    params.set_detail_levels([0; 9]);
    let mesh = assemble(&params).unwrap();
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.triangle_count(), 28);
    assert_sound(&mesh);
}

#[test]
fn test_prediction_matches_assembly() {
    let cases: [[u32; 9]; 8] = [
        [2, 2, 2, 2, 2, 2, 1, 1, 1],
        [0, 1, 2, 3, 1, 0, 0, 0, 0],
        [3, 0, 0, 3, 0, 3, 2, 0, 1],
        [1, 1, 1, 1, 4, 1, 0, 3, 0],
        [5, 4, 3, 2, 0, 0, 2, 2, 2],
        [0, 0, 0, 0, 3, 3, 1, 1, 0],
        [2, 2, 2, 2, 1, 1, 0, 0, 4],
        [1, 0, 1, 0, 2, 2, 3, 1, 0],
    ];

    for levels in cases {
        for smoothness in [0.0, 1.0] {
            let mut params = unit_cube();
            params.set_detail_levels(levels);
            params.detail_smoothness = smoothness;

            let mesh = assemble(&params).unwrap();
            let predicted = MeshCounts::predict(&params);
            assert_eq!(mesh.vertex_count(), predicted.vertices, "vertices for {levels:?}");
            assert_eq!(mesh.triangle_count(), predicted.triangles, "triangles for {levels:?}");
            assert_sound(&mesh);
            assert_eq!(mesh.degenerate_triangle_count(1e-12), 0, "degenerate for {levels:?}");
        }
    }
}

#[test]
fn test_euler_characteristic() {
    let mesh = assemble(&ShapeParameters::default()).unwrap();
    let edges = mesh.triangle_count() * 3 / 2;
    assert_eq!(
        mesh.vertex_count() as i64 - edges as i64 + mesh.triangle_count() as i64,
        2
    );
}

#[test]
fn test_bounding_box_matches_box_layout() {
    let size = DVec3::new(2.0, 1.0, 3.0);
    let offset = DVec3::new(0.5, -1.0, 0.0);
    let mut params = ShapeParameters::default();
    params.set_box_with_offset(offset, size);
    params.set_all_corner_radii(DVec3::splat(0.2));

    let mesh = assemble(&params).unwrap();
    let (min, max) = mesh.bounding_box();
    assert!(min.abs_diff_eq(offset - size * 0.5, TOLERANCE), "min {min}");
    assert!(max.abs_diff_eq(offset + size * 0.5, TOLERANCE), "max {max}");
}

#[test]
fn test_vertices_stay_inside_box() {
    let mesh = assemble(&unit_cube()).unwrap();
    for v in mesh.vertices() {
        assert!(v.abs().max_element() <= 0.5 + TOLERANCE, "{v} escapes the cube");
    }
}

#[test]
fn test_cap_interior_vertex_is_centered() {
    let mut params = unit_cube();
    params.xy_detail = 1;
    params.yz_detail = 1;
    let mesh = assemble(&params).unwrap();
    for y in [-0.5, 0.5] {
        let center = DVec3::new(0.0, y, 0.0);
        assert!(
            mesh.vertices().iter().any(|v| v.abs_diff_eq(center, 1e-12)),
            "no cap vertex at {center}"
        );
    }
}

#[test]
fn test_rounding_progress() {
    assert_eq!(rounding_progress(0, 3, 1.9), 0.0);
    assert_eq!(rounding_progress(0, 0, 1.9), 0.0);
    let progress: Vec<f64> = (0..4).map(|k| rounding_progress(k, 4, 1.9)).collect();
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert!(progress[3] < 1.0);
    // Exponent 1 spaces rings evenly
    approx::assert_relative_eq!(rounding_progress(1, 4, 1.0), 0.25);
}

#[test]
fn test_stitch_rejects_mismatched_rings() {
    let mut mesh = Mesh::new();
    let err = stitch(&mut mesh, &[0, 1, 2, 0], &[3, 4, 3]).unwrap_err();
    assert!(matches!(
        err,
        ColliderError::StripLengthMismatch { expected: 4, found: 3 }
    ));
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_assembly_is_deterministic() {
    let params = ShapeParameters::default();
    assert_eq!(assemble(&params).unwrap(), assemble(&params).unwrap());
}

#[test]
fn test_sloped_shape_stays_closed() {
    let mut params = ShapeParameters::default();
    params.set_corner_position(
        crate::corner::CornerSlot::TopFrontRight,
        DVec3::new(0.6, 0.8, 0.5),
    );
    params.detail_smoothness = 0.5;
    let mesh = assemble(&params).unwrap();
    assert!(mesh.validate());
    assert!(mesh.is_closed_manifold());
    assert_eq!(mesh.triangle_count(), MeshCounts::predict(&params).triangles);
}
