//! End-to-end generation scenarios.

use approx::assert_relative_eq;
use convex_collider::{
    generate, Axis, ColliderError, CornerSlot, DetailReduction, FinishStatus, Hook, HookKind,
    MeshCounts, MirrorSide, ShapeParameters,
};
use glam::{DQuat, DVec3};

const POLYGON_LIMIT: usize = 255;

fn cube(size: DVec3, radius: f64, levels: [u32; 9]) -> ShapeParameters {
    let mut params = ShapeParameters::box_shape(size, radius);
    params.set_detail_levels(levels);
    params
}

fn unit_cube() -> ShapeParameters {
    cube(DVec3::ONE, 0.1, [2, 2, 2, 2, 2, 2, 0, 0, 0])
}

/// Triangle count written out from the detail values alone.
fn expected_triangles(params: &ShapeParameters) -> usize {
    let corners: usize = params.corner_details.iter().map(|&d| d as usize + 1).sum();
    let arc_edges: usize = params.corner_details.iter().map(|&d| d as usize).sum();
    let (xy, yz) = (params.xy_detail as usize, params.yz_detail as usize);
    let ring = corners + 2 * xy + 2 * yz;
    let full_rings = params.bottom_segments.max(1) as usize
        + params.xz_detail as usize
        + params.top_segments.max(1) as usize;

    let side_wall = 2 * ring * (full_rings - 1);
    let pole_bands = 2 * (2 * ring - arc_edges);
    let caps = 4 * (xy + 1) * (yz + 1);
    side_wall + pole_bands + caps
}

#[test]
fn triangle_count_follows_detail_values() {
    let shapes = [
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [2, 3, 1, 4, 2, 1, 0, 2, 1],
        [3, 3, 3, 3, 3, 2, 2, 0, 0],
        [1, 2, 1, 2, 2, 1, 1, 1, 1],
        [4, 1, 1, 1, 1, 4, 0, 0, 3],
    ];
    for levels in shapes {
        let params = cube(DVec3::new(1.0, 2.0, 0.5), 0.15, levels);
        let generated = generate(&params, false).unwrap();
        assert_eq!(generated.attempts, 0, "{levels:?} should fit the budget");
        assert_eq!(generated.mesh.triangle_count(), expected_triangles(&params));
        assert!(generated.mesh.is_closed_manifold());
    }
}

#[test]
fn unit_cube_scenario() {
    let generated = generate(&unit_cube(), false).unwrap();
    let mesh = &generated.mesh;

    assert_eq!(mesh.vertex_count(), 56);
    assert_eq!(mesh.triangle_count(), 108);
    assert_eq!(MeshCounts::predict(&unit_cube()).triangles, 108);
    for v in mesh.vertices() {
        assert!(v.abs().max_element() <= 0.5 + 1e-12, "{v} leaves the cube");
    }
    assert!(mesh.is_convex(1e-9));
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn generation_is_idempotent() {
    let mut params = cube(DVec3::new(1.5, 1.0, 0.75), 0.2, [3, 2, 3, 2, 2, 1, 1, 1, 2]);
    params.detail_smoothness = 0.35;
    params.add_hook(Hook::new("pinch", HookKind::Expand, DVec3::new(0.2, 0.0, 0.0), DQuat::IDENTITY, 0.8, -0.2, 1.5));

    let first = generate(&params, false).unwrap();
    let second = generate(&params, false).unwrap();
    assert_eq!(first.mesh.vertices(), second.mesh.vertices());
    assert_eq!(first.mesh.triangles(), second.mesh.triangles());
}

#[test]
fn box_layout_sets_bounding_box() {
    let size = DVec3::new(3.0, 0.5, 1.25);
    let offset = DVec3::new(-1.0, 2.0, 0.25);
    let mut params = ShapeParameters::default();
    params.set_box_with_offset(offset, size);

    let generated = generate(&params, false).unwrap();
    let (min, max) = generated.mesh.bounding_box();
    assert!(min.abs_diff_eq(offset - size * 0.5, 1e-9), "min {min}");
    assert!(max.abs_diff_eq(offset + size * 0.5, 1e-9), "max {max}");
}

#[test]
fn dense_cube_reduction() {
    let mut params = unit_cube();
    params.set_all_corner_details(50);
    params.detail_reduction = DetailReduction::LargestFirst;

    // Ten steps cannot remove 200 units of corner detail
    let err = generate(&params, false).unwrap_err();
    assert!(matches!(err, ColliderError::DetailTimeout { attempts: 10, .. }));
    assert_eq!(err.status(), FinishStatus::DetailTimeout);

    params.max_reduction_attempts = 500;
    let generated = generate(&params, false).unwrap();
    assert!(generated.mesh.triangle_count() <= POLYGON_LIMIT);
    assert!(generated.attempts <= 500);
}

#[test]
fn reduction_steps_lower_detail() {
    let mut params = unit_cube();
    params.set_all_corner_details(50);

    let mut current = params;
    for step in 1..=40 {
        let next = current.reduced(DetailReduction::LargestFirst).unwrap();
        assert!(next.max_detail() <= current.max_detail());
        assert_eq!(next.total_detail() + 1, current.total_detail());
        // Four tied corners: every fourth step lowers the maximum
        if step % 4 == 0 {
            assert_eq!(next.max_detail(), 50 - step / 4);
        }
        current = next;
    }
}

#[test]
fn pull_hook_scenario() {
    let plain = generate(&unit_cube(), false).unwrap();
    let mut params = unit_cube();
    params.add_hook(Hook::new("pull", HookKind::Pull, DVec3::ZERO, DQuat::IDENTITY, 1.0, 0.5, 1.0));
    let pulled = generate(&params, false).unwrap();

    for (before, after) in plain.mesh.vertices().iter().zip(pulled.mesh.vertices()) {
        assert!(before.length() < 1.0);
        assert!(after.length() > before.length());
        let expected = before.length() + 0.5 * (1.0 - before.length());
        assert_relative_eq!(after.length(), expected, epsilon = 1e-12);
    }

    params.hooks[0].strength = -0.5;
    let pushed = generate(&params, false).unwrap();
    for (before, after) in plain.mesh.vertices().iter().zip(pushed.mesh.vertices()) {
        assert!(after.length() < before.length());
    }
}

#[test]
fn pull_hook_leaves_distant_vertices() {
    let mut params = cube(DVec3::new(4.0, 1.0, 1.0), 0.1, [2, 2, 2, 2, 2, 2, 0, 0, 0]);
    let plain = generate(&params, false).unwrap();
    params.add_hook(Hook::new("pull", HookKind::Pull, DVec3::ZERO, DQuat::IDENTITY, 1.0, 0.5, 1.0));
    let pulled = generate(&params, false).unwrap();

    let mut outside = 0;
    for (before, after) in plain.mesh.vertices().iter().zip(pulled.mesh.vertices()) {
        if before.length() >= 1.0 {
            assert_eq!(before, after);
            outside += 1;
        } else {
            assert!(after.length() > before.length());
        }
    }
    assert!(outside > 0);
}

#[test]
fn flip_twice_restores_shape() {
    let mut params = ShapeParameters::default();
    params.set_corner_position(CornerSlot::TopFrontRight, DVec3::new(0.7, 0.6, 0.4));
    params.set_corner_radii(CornerSlot::BottomBackLeft, DVec3::new(0.05, 0.2, 0.1));
    params.set_corner_detail(convex_collider::LateralCorner::FrontLeft, 4);
    params.top_segments = 3;
    params.add_hook(Hook::new("knob", HookKind::Twist, DVec3::new(0.3, 0.1, -0.2), DQuat::IDENTITY, 0.4, 1.0, 1.0));

    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let mut flipped = params.clone();
        flipped.flip(axis);
        assert_ne!(flipped.corners, params.corners);
        flipped.flip(axis);
        assert_eq!(flipped.corners, params.corners);
        assert_eq!(flipped.detail_levels(), params.detail_levels());
        assert!(flipped.hooks[0].position.abs_diff_eq(params.hooks[0].position, 1e-12));
    }
}

#[test]
fn mirror_is_idempotent_on_geometry() {
    let mut params = ShapeParameters::default();
    params.set_corner_position(CornerSlot::TopFrontRight, DVec3::new(0.7, 0.6, 0.4));
    params.set_corner_radius(CornerSlot::BottomFrontRight, 0.25);

    params.mirror(MirrorSide::POSITIVE_X);
    let once = params.corners;
    assert_eq!(
        params.corner(CornerSlot::TopFrontLeft).position,
        DVec3::new(-0.7, 0.6, 0.4)
    );
    assert_eq!(params.corner(CornerSlot::BottomFrontLeft).radii, DVec3::splat(0.25));

    params.mirror(MirrorSide::POSITIVE_X);
    assert_eq!(params.corners, once);
    params.mirror(MirrorSide::NEGATIVE_X);
    assert_eq!(params.corners, once);

    let generated = generate(&params, false).unwrap();
    let (min, max) = generated.mesh.bounding_box();
    assert_relative_eq!(min.x, -max.x, epsilon = 1e-9);
}

#[test]
fn smoothness_extremes() {
    let mut params = cube(DVec3::ONE, 0.1, [2, 2, 2, 2, 1, 1, 0, 0, 3]);
    let has_height = |mesh: &convex_collider::Mesh, y: f64| {
        mesh.vertices().iter().any(|v| (v.y - y).abs() < 1e-12)
    };

    params.detail_smoothness = 0.0;
    let linear = generate(&params, false).unwrap().mesh;
    params.detail_smoothness = 1.0;
    let eased = generate(&params, false).unwrap().mesh;

    // First middle ring at t = 1/4 between the equators at -0.4 and 0.4
    assert!(has_height(&linear, -0.2));
    assert!(has_height(&eased, -0.3));
    assert!(!has_height(&eased, -0.2));
    assert_eq!(linear.triangles(), eased.triangles());
    assert!(linear.is_convex(1e-9) && eased.is_convex(1e-9));
}
