//! # Collider Errors
//!
//! Error types for collider generation and parameter editing.

use crate::generator::FinishStatus;
use glam::DVec3;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type ColliderResult<T> = Result<T, ColliderError>;

/// Errors that can occur while editing parameters or generating a collider.
#[derive(Debug, Error)]
pub enum ColliderError {
    /// Two strips that must be stitched or interpolated differ in length
    #[error("Strip length mismatch: expected {expected} vertices, found {found}")]
    StripLengthMismatch { expected: usize, found: usize },

    /// A cap side holds fewer than two vertices
    #[error("Cap side {side} is empty")]
    EmptySide { side: usize },

    /// Shape parameters that no mesh can be built from
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A position that does not identify a single corner octant
    #[error("Corner lookup failed: {position} has a zero component")]
    AmbiguousCorner { position: DVec3 },

    /// A mirror or flip direction that is not a signed unit axis
    #[error("Invalid mirror direction: {direction}")]
    InvalidMirrorDirection { direction: DVec3 },

    /// Hook index out of range
    #[error("Hook {index} not found ({len} hooks)")]
    HookNotFound { index: usize, len: usize },

    /// Collider instance index out of range
    #[error("Collider instance {index} not found ({len} instances)")]
    InstanceNotFound { index: usize, len: usize },

    /// Convex hull could not be formed
    #[error("Degenerate hull: {message}")]
    DegenerateHull { message: String },

    /// Polygon budget exceeded with no way to reduce detail
    #[error("Too many polygons: {count} (max: {limit})")]
    PolygonBudget { count: usize, limit: usize },

    /// Detail reduction ran out of attempts
    #[error("Detail reduction gave up after {attempts} attempts: {count} polygons (max: {limit})")]
    DetailTimeout {
        attempts: u32,
        count: usize,
        limit: usize,
    },

    /// Preset (de)serialization failed
    #[error("Preset error: {0}")]
    Preset(#[from] serde_json::Error),
}

impl ColliderError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a degenerate hull error.
    pub fn degenerate_hull(message: impl Into<String>) -> Self {
        Self::DegenerateHull {
            message: message.into(),
        }
    }

    /// Maps the error onto the status reported to hosts.
    pub fn status(&self) -> FinishStatus {
        match self {
            Self::PolygonBudget { .. } => FinishStatus::FailTriCount,
            Self::DetailTimeout { .. } => FinishStatus::DetailTimeout,
            _ => FinishStatus::Fail,
        }
    }
}
