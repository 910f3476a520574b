//! # Triangulator & Budget Enforcer
//!
//! Drives a generation run through its stages and keeps the result under
//! the physics engine's polygon ceiling.
//!
//! ## Stages
//!
//! ```text
//! Building ──▶ CountCheck ──▶ Success
//!    ▲              │
//!    │              ▼
//!    └──────── ReduceDetail ──▶ FailTriCount | DetailTimeout
//! ```
//!
//! `Building` runs the cross-section builder, the vertical assembler and the
//! hook deformer. Under [`PolygonTestMode::BestGuess`] the count is predicted
//! first and an over-budget shape goes straight to `ReduceDetail` without
//! being built.
//!
//! ## Example
//!
//! ```rust
//! use convex_collider::{ColliderGenerator, ShapeParameters};
//!
//! let params = ShapeParameters::default();
//! let generated = ColliderGenerator::default().generate(&params, false).unwrap();
//! assert!(generated.mesh.triangle_count() <= 255);
//! ```


use crate::assembler::{assemble, MeshCounts};
use crate::deform::apply_hooks;
use crate::error::{ColliderError, ColliderResult};
use crate::hull::convex_hull;
use crate::mesh::Mesh;
use crate::params::ShapeParameters;
use crate::reduction::DetailReduction;
use config::constants::GeneratorConfig;
use serde::{Deserialize, Serialize};

/// How the polygon count is measured against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PolygonTestMode {
    /// Predict the count from the detail values before building
    #[default]
    BestGuess,
    /// Count the triangles of the built mesh
    MeshTriangles,
    /// Count the triangles of the convex hull of the deformed vertices
    ConvexHull,
}

/// Outcome of a generation run as reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishStatus {
    Success,
    Fail,
    FailTriCount,
    DetailTimeout,
}

impl FinishStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        self == FinishStatus::Success
    }

    /// Host-facing description of a failure; `None` on success.
    pub fn message(self, polygon_limit: usize) -> Option<String> {
        match self {
            FinishStatus::Success => None,
            FinishStatus::Fail => Some("Collider generation failed.".to_string()),
            FinishStatus::FailTriCount => Some(format!(
                "Generated collision mesh has greater than {polygon_limit} polygons and cannot be created."
            )),
            FinishStatus::DetailTimeout => Some(
                "Detail reduction attempts exceeded. Collision mesh could not be created."
                    .to_string(),
            ),
        }
    }
}

/// A successful generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub mesh: Mesh,
    /// Parameters the mesh was built from, after sanitizing and reduction
    pub params: ShapeParameters,
    /// Reduction steps taken
    pub attempts: u32,
    /// Count measured by the polygon test
    pub polygon_count: usize,
}

/// Generation stage.
#[derive(Debug)]
enum Stage {
    Building,
    CountCheck(Mesh),
    ReduceDetail { count: usize },
}

/// Collider generator holding the engine limits.
#[derive(Debug, Clone, Default)]
pub struct ColliderGenerator {
    config: GeneratorConfig,
}

impl ColliderGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the collider for `params` without touching them.
    ///
    /// Detail reduction works on a copy; the reduced parameters come back in
    /// [`Generated::params`]. A bypassed polygon test (the argument or the
    /// parameters' own flag) accepts any count.
    ///
    /// # Errors
    ///
    /// - [`ColliderError::PolygonBudget`] when over budget and no reduction
    ///   is possible
    /// - [`ColliderError::DetailTimeout`] when reduction runs out of attempts
    /// - Any construction error from building the mesh
    pub fn generate(&self, params: &ShapeParameters, bypass: bool) -> ColliderResult<Generated> {
        let mut current = params.sanitized();
        current.check()?;

        let bypass = bypass || current.bypass_polygon_test;
        let limit = self.config.polygon_limit;
        let mut attempts = 0u32;
        let mut stage = Stage::Building;

        loop {
            stage = match stage {
                Stage::Building => {
                    let predicted = MeshCounts::predict(&current).triangles;
                    if !bypass
                        && current.polygon_test == PolygonTestMode::BestGuess
                        && predicted > limit
                    {
                        log::debug!("predicted {predicted} triangles, over the limit of {limit}");
                        Stage::ReduceDetail { count: predicted }
                    } else {
                        Stage::CountCheck(self.build(&current)?)
                    }
                }
                Stage::CountCheck(mesh) => {
                    let count = self.polygon_count(&current, &mesh)?;
                    if bypass || count <= limit {
                        log::debug!(
                            "generated {} triangles after {} reduction attempts",
                            mesh.triangle_count(),
                            attempts
                        );
                        return Ok(Generated {
                            mesh,
                            params: current,
                            attempts,
                            polygon_count: count,
                        });
                    }
                    Stage::ReduceDetail { count }
                }
                Stage::ReduceDetail { count } => {
                    if current.detail_reduction == DetailReduction::None {
                        return Err(ColliderError::PolygonBudget { count, limit });
                    }
                    if attempts >= current.max_reduction_attempts {
                        return Err(ColliderError::DetailTimeout {
                            attempts,
                            count,
                            limit,
                        });
                    }
                    let Some(next) = current.reduced(current.detail_reduction) else {
                        return Err(ColliderError::PolygonBudget { count, limit });
                    };
                    attempts += 1;
                    log::debug!(
                        "reduction attempt {attempts}: {count} triangles, max detail {} -> {}",
                        current.max_detail(),
                        next.max_detail()
                    );
                    current = next;
                    Stage::Building
                }
            };
        }
    }

    /// Builds and deforms the mesh for `params`.
    fn build(&self, params: &ShapeParameters) -> ColliderResult<Mesh> {
        let mut mesh = assemble(params)?;
        apply_hooks(mesh.vertices_mut(), &params.hooks);
        Ok(mesh)
    }

    fn polygon_count(&self, params: &ShapeParameters, mesh: &Mesh) -> ColliderResult<usize> {
        match params.polygon_test {
            PolygonTestMode::BestGuess | PolygonTestMode::MeshTriangles => {
                Ok(mesh.triangle_count())
            }
            PolygonTestMode::ConvexHull => {
                Ok(convex_hull(mesh.vertices(), self.config.tolerance)?.triangle_count())
            }
        }
    }
}

/// Generates with the default engine limits.
pub fn generate(params: &ShapeParameters, bypass: bool) -> ColliderResult<Generated> {
    ColliderGenerator::default().generate(params, bypass)
}

/// Host entry point: generates, writes reduced parameters back on success
/// and reports a status instead of an error.
///
/// On any status but [`FinishStatus::Success`] the returned mesh is empty
/// and `params` is left as it was.
pub fn generate_in_place(params: &mut ShapeParameters, bypass: bool) -> (Mesh, FinishStatus) {
    match generate(params, bypass) {
        Ok(generated) => {
            *params = generated.params;
            (generated.mesh, FinishStatus::Success)
        }
        Err(err) => {
            log::debug!("generation failed: {err}");
            (Mesh::new(), err.status())
        }
    }
}
