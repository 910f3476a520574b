//! # Vertical Assembler
//!
//! Stacks rings from the bottom cap to the top cap, stitches neighbouring
//! rings into bands and closes both ends.
//!
//! ## Ring stack (bottom to top)
//!
//! ```text
//! bottom pole     progress 1, every arc collapsed to one vertex
//! bottom rounding max(bottom_segments, 1) rings, clustered by the exponent
//! middle          xz_detail rings interpolated between the two equators
//! top rounding    max(top_segments, 1) rings
//! top pole        progress 1, collapsed
//! ```
//!
//! Both poles are capped. Bands touching a pole fan out from the collapsed
//! arc vertices.

mod cap;

#[cfg(test)]
mod tests;

use crate::corner::{Half, LateralCorner};
use crate::error::{ColliderError, ColliderResult};
use crate::mesh::Mesh;
use crate::params::ShapeParameters;
use crate::strip::{StripLedger, VertexStrip};

/// Vertex and triangle totals of an assembled mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: usize,
    pub triangles: usize,
}

impl MeshCounts {
    /// Exact counts [`assemble`] produces for `params`, without building.
    ///
    /// With `R` unique ring vertices, `D` arc edges, `F` full rings and the
    /// plane details `xy`, `yz`:
    ///
    /// ```text
    /// triangles = 2R(F - 1) + 2(2R - D) + 4(xy + 1)(yz + 1)
    /// vertices  = R·F + 2(4 + 2xy + 2yz) + 2·xy·yz
    /// ```
    pub fn predict(params: &ShapeParameters) -> Self {
        let ledger = StripLedger::from_params(params);
        let ring = ledger.unique_len();
        let arc_edges = ledger.arc_edges();
        let xy = params.xy_detail as usize;
        let yz = params.yz_detail as usize;
        let full_rings = full_ring_count(params);

        let side_walls = 2 * ring * (full_rings - 1);
        let pole_bands = 2 * (2 * ring - arc_edges);
        let caps = 4 * (xy + 1) * (yz + 1);

        let pole_ring = 4 + 2 * xy + 2 * yz;
        Self {
            vertices: ring * full_rings + 2 * pole_ring + 2 * xy * yz,
            triangles: side_walls + pole_bands + caps,
        }
    }
}

/// Rings that keep every arc vertex, i.e. all but the two poles.
fn full_ring_count(params: &ShapeParameters) -> usize {
    params.bottom_segments.max(1) as usize
        + params.xz_detail as usize
        + params.top_segments.max(1) as usize
}

/// Progress of rounding ring `k` of `segments`, clustered by `exponent`.
///
/// Ring 0 is the equator; progress approaches 1 toward the cap.
pub fn rounding_progress(k: u32, segments: u32, exponent: f64) -> f64 {
    if segments == 0 {
        return 0.0;
    }
    1.0 - (1.0 - k as f64 / segments as f64).powf(exponent)
}

/// A ring of the stack, ready to be emitted.
struct Ring {
    strip: VertexStrip,
    collapsed: bool,
}

/// Rounding rings of one half, ordered equator first.
fn rounding_rings(params: &ShapeParameters, half: Half) -> Vec<Ring> {
    let (segments, exponent) = match half {
        Half::Bottom => (params.bottom_segments, params.bottom_strip_distribution),
        Half::Top => (params.top_segments, params.top_strip_distribution),
    };

    if segments == 0 {
        return vec![Ring {
            strip: VertexStrip::build(params, half, 0.0, true),
            collapsed: false,
        }];
    }

    (0..segments)
        .map(|k| Ring {
            strip: VertexStrip::build(params, half, rounding_progress(k, segments, exponent), false),
            collapsed: false,
        })
        .collect()
}

/// Every ring from bottom pole to top pole.
fn ring_stack(params: &ShapeParameters) -> ColliderResult<Vec<Ring>> {
    let mut bottom = rounding_rings(params, Half::Bottom);
    bottom.reverse();
    let top = rounding_rings(params, Half::Top);

    let (Some(lower), Some(upper)) = (bottom.last(), top.first()) else {
        return Err(ColliderError::invalid_parameter("no equator ring"));
    };
    let steps = params.xz_detail;
    let middle = (1..=steps)
        .map(|k| {
            let t = k as f64 / (steps + 1) as f64;
            VertexStrip::interpolate(&lower.strip, &upper.strip, t, params.detail_smoothness)
                .map(|strip| Ring {
                    strip,
                    collapsed: false,
                })
        })
        .collect::<ColliderResult<Vec<_>>>()?;

    let mut rings = Vec::with_capacity(bottom.len() + middle.len() + top.len() + 2);
    rings.push(Ring {
        strip: VertexStrip::build(params, Half::Bottom, 1.0, false),
        collapsed: true,
    });
    rings.extend(bottom);
    rings.extend(middle);
    rings.extend(top);
    rings.push(Ring {
        strip: VertexStrip::build(params, Half::Top, 1.0, false),
        collapsed: true,
    });
    Ok(rings)
}

/// Adds the ring's vertices and returns the mesh index of every ring
/// position, closing position included.
fn emit_ring(mesh: &mut Mesh, ring: &Ring) -> Vec<u32> {
    let ledger = ring.strip.ledger();
    let vertices = ring.strip.vertices();
    let mut indices = Vec::with_capacity(ledger.closed_len());

    if ring.collapsed {
        for lateral in LateralCorner::ALL {
            let arc = ledger.corner_range(lateral);
            let apex = mesh.add_vertex(vertices[arc.start]);
            indices.extend(std::iter::repeat(apex).take(arc.len()));
            indices.extend(
                ledger
                    .lateral_range(lateral)
                    .map(|i| mesh.add_vertex(vertices[i])),
            );
        }
    } else {
        indices.extend(ring.strip.unique().iter().map(|v| mesh.add_vertex(*v)));
    }

    indices.push(indices[0]);
    indices
}

/// Connects two rings with a band of quads, dropping the halves that
/// degenerate where a ring is collapsed.
fn stitch(mesh: &mut Mesh, lower: &[u32], upper: &[u32]) -> ColliderResult<()> {
    if lower.len() != upper.len() {
        return Err(ColliderError::StripLengthMismatch {
            expected: lower.len(),
            found: upper.len(),
        });
    }

    for j in 0..lower.len() - 1 {
        let (l0, l1, u0, u1) = (lower[j], lower[j + 1], upper[j], upper[j + 1]);
        if l0 != l1 {
            mesh.add_triangle(l0, u0, l1);
        }
        if u0 != u1 {
            mesh.add_triangle(l1, u0, u1);
        }
    }
    Ok(())
}

/// Builds the undeformed mesh for `params`.
pub fn assemble(params: &ShapeParameters) -> ColliderResult<Mesh> {
    let rings = ring_stack(params)?;
    let predicted = MeshCounts::predict(params);
    let mut mesh = Mesh::with_capacity(predicted.vertices, predicted.triangles);

    let mut emitted: Vec<Vec<u32>> = Vec::with_capacity(rings.len());
    for ring in &rings {
        let indices = emit_ring(&mut mesh, ring);
        if let Some(previous) = emitted.last() {
            stitch(&mut mesh, previous, &indices)?;
        }
        emitted.push(indices);
    }

    let ends = [(Half::Bottom, 0), (Half::Top, rings.len() - 1)];
    for (half, index) in ends {
        cap::add_cap(
            &mut mesh,
            &emitted[index],
            rings[index].strip.ledger(),
            half,
            params.detail_smoothness,
        )?;
    }

    log::debug!(
        "assembled {} rings: {} vertices, {} triangles",
        rings.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
