//! # Config Crate
//!
//! Centralized configuration constants for the convex collider generator.
//! The polygon ceiling, default detail values and numeric tolerances live
//! here so the generator never hardcodes them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GeneratorConfig, POLYGON_LIMIT};
//!
//! let config = GeneratorConfig::default();
//! assert_eq!(config.polygon_limit, POLYGON_LIMIT);
//!
//! // A stricter physics backend can lower the ceiling.
//! let strict = GeneratorConfig::new(64, 1.0e-9).unwrap();
//! assert!(strict.polygon_limit < POLYGON_LIMIT);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Engine Compatible**: The polygon ceiling matches the convex mesh cooker
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
