//! # Cross-Section Builder
//!
//! Builds closed rings ("strips") of vertices around the shape.
//!
//! ## Ring construction
//!
//! For each lateral corner, in ring order:
//! 1. Find the rounding center: the apex lifted toward the cap by
//!    `radius.y * progress`, then pulled inward by the corner offset
//! 2. Scale the horizontal radii by `sqrt(1 - progress²)`
//! 3. Place `detail + 1` vertices on the quarter arc, or a single bisecting
//!    vertex (scaled by √2) for a sharp corner
//! 4. Insert the lateral extras toward the next corner
//!
//! The ring is closed by repeating its first vertex.

mod ledger;


pub use ledger::StripLedger;

use crate::corner::{Corner, CornerSlot, Half, LateralCorner};
use crate::error::{ColliderError, ColliderResult};
use crate::params::ShapeParameters;
use glam::{BVec3, DVec3};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

/// Eased parameter `t^(2-2t)`; fixes 0, ½ and 1.
#[inline]
pub fn ease(t: f64) -> f64 {
    t.powf(2.0 - 2.0 * t)
}

/// Blend of linear and eased `t`: 0 is linear, 1 is fully eased.
#[inline]
pub fn smooth_step(t: f64, smoothness: f64) -> f64 {
    t + (ease(t) - t) * smoothness
}

/// One closed ring of vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexStrip {
    vertices: Vec<DVec3>,
    ledger: StripLedger,
}

impl VertexStrip {
    /// Builds the ring of `half` at `progress` along the vertical rounding arc.
    ///
    /// Progress 0 is the equator of the rounding, 1 the cap plane where every
    /// arc shrinks to a point. A `flat` ring sits on the cap plane but keeps
    /// the horizontal scale of `progress`.
    pub fn build(params: &ShapeParameters, half: Half, progress: f64, flat: bool) -> Self {
        let ledger = StripLedger::from_params(params);
        let progress = progress.clamp(0.0, 1.0);
        let lift = if flat { 1.0 } else { progress };
        let scale = (1.0 - progress * progress).sqrt();

        let arcs = LateralCorner::ALL.map(|lateral| {
            corner_arc(
                params.corner(CornerSlot::new(half, lateral)),
                lateral,
                params.corner_details[lateral.index()],
                lift,
                scale,
            )
        });

        let mut vertices = Vec::with_capacity(ledger.closed_len());
        for lateral in LateralCorner::ALL {
            let arc = &arcs[lateral.index()];
            let next = &arcs[(lateral.index() + 1) % 4];
            vertices.extend_from_slice(arc);

            let count = ledger.lateral_count(lateral);
            let (from, to) = (arc[arc.len() - 1], next[0]);
            let eased = eased_axes(lateral);
            vertices.extend((1..=count).map(|k| {
                let t = k as f64 / (count + 1) as f64;
                lateral_vertex(from, to, t, eased, params.detail_smoothness)
            }));
        }
        vertices.push(vertices[0]);

        log::trace!(
            "{:?} strip at progress {:.3}{}: {} vertices",
            half,
            progress,
            if flat { " (flat)" } else { "" },
            vertices.len()
        );

        Self { vertices, ledger }
    }

    /// Ring between `lower` and `upper` at parameter `t`.
    ///
    /// X and Z follow `t` linearly; Y follows [`smooth_step`] so the
    /// silhouette eases into the rounded regions.
    pub fn interpolate(
        lower: &VertexStrip,
        upper: &VertexStrip,
        t: f64,
        smoothness: f64,
    ) -> ColliderResult<Self> {
        if lower.vertices.len() != upper.vertices.len() || lower.ledger != upper.ledger {
            return Err(ColliderError::StripLengthMismatch {
                expected: lower.vertices.len(),
                found: upper.vertices.len(),
            });
        }

        let y_t = smooth_step(t, smoothness);
        let vertices = lower
            .vertices
            .iter()
            .zip(&upper.vertices)
            .map(|(a, b)| {
                let horizontal = a.lerp(*b, t);
                DVec3::new(horizontal.x, a.y + (b.y - a.y) * y_t, horizontal.z)
            })
            .collect();

        Ok(Self {
            vertices,
            ledger: lower.ledger,
        })
    }

    /// All ring vertices, closing duplicate included.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Ring vertices without the closing duplicate.
    #[inline]
    pub fn unique(&self) -> &[DVec3] {
        &self.vertices[..self.ledger.unique_len()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn ledger(&self) -> &StripLedger {
        &self.ledger
    }

    /// Positions of the cap side starting at `lateral`.
    pub fn side(&self, lateral: LateralCorner) -> Vec<DVec3> {
        self.ledger
            .side(lateral)
            .into_iter()
            .map(|i| self.vertices[i])
            .collect()
    }
}

/// Arc vertices of one corner.
fn corner_arc(
    corner: &Corner,
    lateral: LateralCorner,
    detail: u32,
    lift: f64,
    scale: f64,
) -> Vec<DVec3> {
    let vertical = corner.slot.half().vertical_sign();
    let center =
        corner.position + DVec3::Y * (corner.radii.y * vertical * lift) - corner.offset();
    let radii = corner.radii;
    let point = |angle: f64, scale: f64| {
        center + DVec3::new(radii.x * scale * angle.cos(), 0.0, radii.z * scale * angle.sin())
    };

    let start = lateral.start_angle();
    if detail == 0 {
        return vec![point(start + FRAC_PI_4, scale * SQRT_2)];
    }
    (0..=detail)
        .map(|k| point(start + FRAC_PI_2 * k as f64 / detail as f64, scale))
        .collect()
}

/// Axes eased along the lateral run after `lateral`. The axis the edge runs
/// along stays linear.
fn eased_axes(lateral: LateralCorner) -> BVec3 {
    match lateral {
        // Front and back edges run along X
        LateralCorner::FrontRight | LateralCorner::BackLeft => BVec3::new(false, true, true),
        // Side edges run along Z
        LateralCorner::FrontLeft | LateralCorner::BackRight => BVec3::new(true, true, false),
    }
}

fn lateral_vertex(from: DVec3, to: DVec3, t: f64, eased: BVec3, smoothness: f64) -> DVec3 {
    let linear = from.lerp(to, t);
    let curved = DVec3::select(eased, from.lerp(to, ease(t)), linear);
    linear.lerp(curved, smoothness)
}
