//! # Convex Hull (QuickHull Algorithm)
//!
//! Computes the 3D convex hull of a point cloud. Used by the `ConvexHull`
//! polygon test to count the triangles the physics cooker will produce.
//!
//! ## Algorithm
//!
//! 1. Find an initial tetrahedron from extremal points
//! 2. Assign each remaining point to the outside set of the face it's farthest from
//! 3. For each face with a non-empty outside set:
//!    a. Find the farthest point in that outside set
//!    b. Find all faces visible from that point
//!    c. Extract horizon edges (boundary of visible region)
//!    d. Create new faces from horizon edges to the farthest point
//!    e. Redistribute outside sets from deleted faces to new faces
//!
//! Face orientation is checked against the centroid of the initial
//! tetrahedron, which stays inside the hull as it grows.

use crate::error::{ColliderError, ColliderResult};
use crate::mesh::Mesh;
use glam::DVec3;
use std::collections::HashMap;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Computes the convex hull of `points`.
///
/// Points closer than `tolerance` are merged, and points within `tolerance`
/// of a face plane count as on the hull. Fails on fewer than four distinct
/// points or a flat point set.
pub fn convex_hull(points: &[DVec3], tolerance: f64) -> ColliderResult<Mesh> {
    let unique = deduplicate_points(points, tolerance);
    if unique.len() < 4 {
        return Err(ColliderError::degenerate_hull(format!(
            "convex hull requires at least 4 distinct points, got {}",
            unique.len()
        )));
    }

    let mut hull = QuickHull::new(&unique, tolerance);
    hull.build()?;
    Ok(hull.to_mesh())
}

// =============================================================================
// FACE STRUCTURE
// =============================================================================

/// A face with its outside set.
#[derive(Debug, Clone)]
struct Face {
    /// Point indices, counter-clockwise seen from outside
    vertices: [usize; 3],
    /// Unit outward normal
    normal: DVec3,
    /// Plane offset: `normal · p = offset`
    offset: f64,
    /// Points outside this face
    outside: Vec<usize>,
    active: bool,
}

impl Face {
    /// Creates a face, reversing the winding if the normal faces `interior`.
    fn new(points: &[DVec3], vertices: [usize; 3], interior: DVec3) -> Self {
        let [a, b, c] = vertices.map(|i| points[i]);
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        let mut vertices = vertices;
        if normal.dot(interior - a) > 0.0 {
            vertices.swap(1, 2);
            normal = -normal;
        }
        Self {
            vertices,
            normal,
            offset: normal.dot(a),
            outside: Vec::new(),
            active: true,
        }
    }

    /// Signed distance; positive outside.
    #[inline]
    fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

// =============================================================================
// QUICKHULL
// =============================================================================

struct QuickHull<'a> {
    points: &'a [DVec3],
    tolerance: f64,
    faces: Vec<Face>,
    interior: DVec3,
}

impl<'a> QuickHull<'a> {
    fn new(points: &'a [DVec3], tolerance: f64) -> Self {
        Self {
            points,
            tolerance,
            faces: Vec::new(),
            interior: DVec3::ZERO,
        }
    }

    fn build(&mut self) -> ColliderResult<()> {
        let seed = self.find_initial_tetrahedron()?;
        self.interior = seed.iter().map(|&i| self.points[i]).sum::<DVec3>() / 4.0;

        let [p0, p1, p2, p3] = seed;
        for vertices in [[p0, p1, p2], [p0, p2, p3], [p0, p3, p1], [p1, p3, p2]] {
            self.faces.push(Face::new(self.points, vertices, self.interior));
        }

        for point in 0..self.points.len() {
            if !seed.contains(&point) {
                self.assign_point(point);
            }
        }

        // Every pass adds one point to the hull, so this terminates
        while let Some(face) = self
            .faces
            .iter()
            .position(|f| f.active && !f.outside.is_empty())
        {
            self.process_face(face);
        }
        Ok(())
    }

    /// Assigns `point` to the active face it lies farthest outside of.
    fn assign_point(&mut self, point: usize) {
        let position = self.points[point];
        let mut best: Option<(usize, f64)> = None;
        for (index, face) in self.faces.iter().enumerate() {
            if !face.active {
                continue;
            }
            let distance = face.distance(position);
            if distance > self.tolerance && best.map_or(true, |(_, d)| distance > d) {
                best = Some((index, distance));
            }
        }
        if let Some((index, _)) = best {
            self.faces[index].outside.push(point);
        }
    }

    fn process_face(&mut self, start: usize) {
        let apex = {
            let face = &self.faces[start];
            face.outside
                .iter()
                .copied()
                .fold((face.outside[0], f64::MIN), |(best, best_d), point| {
                    let d = face.distance(self.points[point]);
                    if d > best_d {
                        (point, d)
                    } else {
                        (best, best_d)
                    }
                })
                .0
        };
        let apex_position = self.points[apex];

        // Flood the visible region from the starting face
        let mut visible = vec![start];
        let mut seen = vec![false; self.faces.len()];
        seen[start] = true;
        let mut cursor = 0;
        while cursor < visible.len() {
            let current = visible[cursor];
            cursor += 1;
            for other in 0..self.faces.len() {
                if seen[other] || !self.faces[other].active {
                    continue;
                }
                if !self.share_edge(current, other) {
                    continue;
                }
                if self.faces[other].distance(apex_position) > self.tolerance {
                    seen[other] = true;
                    visible.push(other);
                }
            }
        }

        let horizon = self.horizon_edges(&visible);

        let mut orphans = Vec::new();
        for &index in &visible {
            let face = &mut self.faces[index];
            face.active = false;
            orphans.extend(face.outside.drain(..).filter(|&p| p != apex));
        }

        for (a, b) in horizon {
            self.faces
                .push(Face::new(self.points, [a, b, apex], self.interior));
        }

        for point in orphans {
            self.assign_point(point);
        }
    }

    fn share_edge(&self, a: usize, b: usize) -> bool {
        let shared = self.faces[a]
            .vertices
            .iter()
            .filter(|v| self.faces[b].vertices.contains(v))
            .count();
        shared >= 2
    }

    /// Directed edges of the visible region whose twin is not visible.
    fn horizon_edges(&self, visible: &[usize]) -> Vec<(usize, usize)> {
        let mut count: HashMap<(usize, usize), usize> = HashMap::new();
        for &index in visible {
            for (a, b) in self.faces[index].edges() {
                *count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        visible
            .iter()
            .flat_map(|&index| self.faces[index].edges())
            .filter(|&(a, b)| count[&(a.min(b), a.max(b))] == 1)
            .collect()
    }

    fn find_initial_tetrahedron(&self) -> ColliderResult<[usize; 4]> {
        let points = self.points;

        // Widest pair of extremes over the three axes
        let mut extremes = (0, 0);
        let mut widest = -1.0;
        for axis in 0..3 {
            let (mut lo, mut hi) = (0, 0);
            for (i, p) in points.iter().enumerate() {
                if p[axis] < points[lo][axis] {
                    lo = i;
                }
                if p[axis] > points[hi][axis] {
                    hi = i;
                }
            }
            let width = points[hi][axis] - points[lo][axis];
            if width > widest {
                widest = width;
                extremes = (lo, hi);
            }
        }
        let (p0, p1) = extremes;
        if widest <= self.tolerance {
            return Err(ColliderError::degenerate_hull("all points coincide"));
        }

        let (a, b) = (points[p0], points[p1]);
        let line = (b - a).normalize();
        let (p2, line_distance) = farthest(points, |p| (p - a).cross(line).length());
        if line_distance <= self.tolerance {
            return Err(ColliderError::degenerate_hull("points are collinear"));
        }

        let normal = (b - a).cross(points[p2] - a).normalize();
        let (p3, plane_distance) = farthest(points, |p| normal.dot(p - a).abs());
        if plane_distance <= self.tolerance {
            return Err(ColliderError::degenerate_hull("points are coplanar"));
        }

        Ok([p0, p1, p2, p3])
    }

    /// Active faces as a mesh over the hull's own vertices.
    fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        let mut remap: HashMap<usize, u32> = HashMap::new();
        for face in self.faces.iter().filter(|f| f.active) {
            let [a, b, c] = face.vertices.map(|point| {
                *remap
                    .entry(point)
                    .or_insert_with(|| mesh.add_vertex(self.points[point]))
            });
            mesh.add_triangle(a, b, c);
        }
        mesh
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Index and value of the point maximizing `measure`.
fn farthest(points: &[DVec3], measure: impl Fn(DVec3) -> f64) -> (usize, f64) {
    points
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |(best, best_value), (i, &p)| {
            let value = measure(p);
            if value > best_value {
                (i, value)
            } else {
                (best, best_value)
            }
        })
}

fn deduplicate_points(points: &[DVec3], tolerance: f64) -> Vec<DVec3> {
    let mut seen: HashMap<(i64, i64, i64), usize> = HashMap::new();
    let mut unique = Vec::new();
    for point in points {
        let key = (*point / tolerance).round();
        let key = (key.x as i64, key.y as i64, key.z as i64);
        seen.entry(key).or_insert_with(|| {
            unique.push(*point);
            unique.len() - 1
        });
    }
    unique
}

// =============================================================================
// TESTS
// =============================================================================
