//! Centralized configuration values shared by the collider generator.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION
// =============================================================================

/// Numerical tolerance used by geometry kernels.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Distance below which a hook is considered to sit on a mirror plane.
///
/// # Examples
/// ```
/// use config::constants::MIRROR_PLANE_TOLERANCE;
/// let hook_x = 0.0005_f64;
/// assert!(hook_x.abs() < MIRROR_PLANE_TOLERANCE);
/// ```
pub const MIRROR_PLANE_TOLERANCE: f64 = 0.001;

// =============================================================================
// POLYGON BUDGET
// =============================================================================

/// Maximum triangle count the physics engine accepts for a convex mesh.
///
/// # Examples
/// ```
/// use config::constants::POLYGON_LIMIT;
/// assert_eq!(POLYGON_LIMIT, 255);
/// ```
pub const POLYGON_LIMIT: usize = 255;

/// Smallest polygon limit that can still describe a closed solid.
///
/// # Examples
/// ```
/// use config::constants::MIN_POLYGON_LIMIT;
/// assert_eq!(MIN_POLYGON_LIMIT, 4);
/// ```
pub const MIN_POLYGON_LIMIT: usize = 4;

/// Default number of automatic detail reduction attempts.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_REDUCTION_ATTEMPTS;
/// assert!(DEFAULT_REDUCTION_ATTEMPTS > 0);
/// ```
pub const DEFAULT_REDUCTION_ATTEMPTS: u32 = 10;

// =============================================================================
// SHAPE DEFAULTS
// =============================================================================

/// Default radius on every axis of a freshly reset corner.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_CORNER_RADIUS;
/// assert!(DEFAULT_CORNER_RADIUS > 0.0);
/// ```
pub const DEFAULT_CORNER_RADIUS: f64 = 0.1;

/// Default arc subdivision of each vertical corner column.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_CORNER_DETAIL;
/// assert_eq!(DEFAULT_CORNER_DETAIL, 2);
/// ```
pub const DEFAULT_CORNER_DETAIL: u32 = 2;

/// Default number of rounding rings between the equator and each cap.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SEGMENTS;
/// assert_eq!(DEFAULT_SEGMENTS, 2);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 2;

/// Default lateral subdivision per coordinate plane.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_PLANE_DETAIL;
/// assert_eq!(DEFAULT_PLANE_DETAIL, 1);
/// ```
pub const DEFAULT_PLANE_DETAIL: u32 = 1;

/// Default exponent clustering the bottom rounding rings.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_BOTTOM_STRIP_DISTRIBUTION;
/// assert!(DEFAULT_BOTTOM_STRIP_DISTRIBUTION > 1.0);
/// ```
pub const DEFAULT_BOTTOM_STRIP_DISTRIBUTION: f64 = 1.9;

/// Default exponent clustering the top rounding rings.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TOP_STRIP_DISTRIBUTION;
/// assert!(DEFAULT_TOP_STRIP_DISTRIBUTION > 1.0);
/// ```
pub const DEFAULT_TOP_STRIP_DISTRIBUTION: f64 = 1.1;

/// Smallest accepted strip distribution exponent.
pub const MIN_STRIP_DISTRIBUTION: f64 = 0.01;

// =============================================================================
// HOOK LIMITS
// =============================================================================

/// Smallest magnitude a hook strength may have.
///
/// # Examples
/// ```
/// use config::constants::MIN_HOOK_STRENGTH;
/// let strength = -0.001_f64;
/// let clamped = strength.signum() * strength.abs().max(MIN_HOOK_STRENGTH);
/// assert_eq!(clamped, -MIN_HOOK_STRENGTH);
/// ```
pub const MIN_HOOK_STRENGTH: f64 = 0.01;

/// Smallest accepted hook falloff exponent.
///
/// # Examples
/// ```
/// use config::constants::MIN_HOOK_FALLOFF;
/// assert!(0.0_f64.max(MIN_HOOK_FALLOFF) > 0.0);
/// ```
pub const MIN_HOOK_FALLOFF: f64 = 0.01;

/// Default radius of influence for new hooks.
pub const DEFAULT_HOOK_RADIUS: f64 = 0.5;

// =============================================================================
// GENERATOR SNAPSHOT
// =============================================================================

/// Immutable snapshot of the settings a generator run reads.
///
/// # Examples
/// ```
/// use config::constants::GeneratorConfig;
/// let config = GeneratorConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Triangle ceiling imposed by the physics engine.
    pub polygon_limit: usize,
    /// Numeric tolerance propagated into geometry kernels.
    pub tolerance: f64,
}

impl GeneratorConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// polygon limit and tolerance.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeneratorConfig;
    /// let cfg = GeneratorConfig::new(128, 1.0e-6).expect("valid config");
    /// assert_eq!(cfg.polygon_limit, 128);
    /// ```
    pub fn new(polygon_limit: usize, tolerance: f64) -> Result<Self, ConfigError> {
        if !(MIN_POLYGON_LIMIT..=u16::MAX as usize).contains(&polygon_limit) {
            return Err(ConfigError::InvalidPolygonLimit(polygon_limit));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            polygon_limit,
            tolerance,
        })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            polygon_limit: POLYGON_LIMIT,
            tolerance: EPSILON_TOLERANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the polygon limit cannot describe a closed solid.
    InvalidPolygonLimit(usize),
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPolygonLimit(value) => {
                write!(
                    f,
                    "polygon_limit must be within {MIN_POLYGON_LIMIT}..={}: {value}",
                    u16::MAX
                )
            }
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
