//! # Caps
//!
//! Closes a collapsed pole ring with a quad grid blended from its four sides.

use crate::corner::{Half, LateralCorner};
use crate::error::{ColliderError, ColliderResult};
use crate::mesh::Mesh;
use crate::strip::{smooth_step, StripLedger};
use glam::DVec3;

/// Adds the cap over `ring`, a pole ring already emitted into `mesh`.
///
/// Grid rows follow side 0 (front) and side 2 (back), columns follow side 1
/// and side 3. Boundary cells reuse the ring's own vertices; interior cells
/// average a front-back and a left-right interpolation.
pub(crate) fn add_cap(
    mesh: &mut Mesh,
    ring: &[u32],
    ledger: &StripLedger,
    half: Half,
    smoothness: f64,
) -> ColliderResult<()> {
    let sides = LateralCorner::ALL.map(|lateral| {
        ledger
            .side(lateral)
            .into_iter()
            .map(|i| ring[i])
            .collect::<Vec<u32>>()
    });
    for (side, indices) in sides.iter().enumerate() {
        if indices.len() < 2 {
            return Err(ColliderError::EmptySide { side });
        }
    }
    for pair in [(0, 2), (1, 3)] {
        if sides[pair.0].len() != sides[pair.1].len() {
            return Err(ColliderError::StripLengthMismatch {
                expected: sides[pair.0].len(),
                found: sides[pair.1].len(),
            });
        }
    }

    let [front, right, back, left] = &sides;
    let (rows, columns) = (front.len(), right.len());
    let position = |index: u32| mesh.vertex(index);

    let mut interior = Vec::with_capacity((rows - 2) * (columns - 2));
    for i in 1..rows - 1 {
        let ti = i as f64 / (rows - 1) as f64;
        for j in 1..columns - 1 {
            let tj = j as f64 / (columns - 1) as f64;
            let across = blend(position(front[i]), position(back[rows - 1 - i]), tj, smoothness);
            let along = blend(position(left[columns - 1 - j]), position(right[j]), ti, smoothness);
            interior.push(across.lerp(along, 0.5));
        }
    }

    let mut grid = vec![vec![0u32; columns]; rows];
    for i in 0..rows {
        for j in 0..columns {
            grid[i][j] = if j == 0 {
                front[i]
            } else if i == rows - 1 {
                right[j]
            } else if j == columns - 1 {
                back[rows - 1 - i]
            } else if i == 0 {
                left[columns - 1 - j]
            } else {
                mesh.add_vertex(interior[(i - 1) * (columns - 2) + (j - 1)])
            };
        }
    }

    for i in 0..rows - 1 {
        for j in 0..columns - 1 {
            let (a, b) = (grid[i][j], grid[i + 1][j]);
            let (c, d) = (grid[i + 1][j + 1], grid[i][j + 1]);
            match half {
                Half::Bottom => {
                    mesh.add_triangle(a, b, d);
                    mesh.add_triangle(b, c, d);
                }
                Half::Top => {
                    mesh.add_triangle(a, d, b);
                    mesh.add_triangle(b, d, c);
                }
            }
        }
    }

    log::trace!("{:?} cap: {}x{} grid", half, rows, columns);
    Ok(())
}

/// Interpolation with X/Z linear and Y eased by `smoothness`.
fn blend(from: DVec3, to: DVec3, t: f64, smoothness: f64) -> DVec3 {
    let linear = from.lerp(to, t);
    DVec3::new(
        linear.x,
        from.y + (to.y - from.y) * smooth_step(t, smoothness),
        linear.z,
    )
}
