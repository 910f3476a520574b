//! # Convex Collider
//!
//! Procedural convex collision meshes for rounded boxes. A shape is
//! described by eight corners with per-axis rounding radii, a handful of
//! detail counts and optional deformation hooks; the generator turns it into
//! a closed triangle mesh that fits the physics engine's polygon ceiling.
//!
//! ## Architecture
//!
//! ```text
//! ShapeParameters → strip (rings) → assembler (side wall + caps)
//!                 → deform (hooks) → generator (budget, reduction) → Mesh
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use convex_collider::{generate_in_place, FinishStatus, ShapeParameters};
//! use glam::DVec3;
//!
//! let mut params = ShapeParameters::box_shape(DVec3::new(2.0, 1.0, 1.0), 0.2);
//! let (mesh, status) = generate_in_place(&mut params, false);
//! assert_eq!(status, FinishStatus::Success);
//! assert!(mesh.is_closed_manifold());
//! ```

pub mod assembler;
pub mod corner;
pub mod deform;
pub mod error;
pub mod generator;
pub mod group;
pub mod hook;
pub mod hull;
pub mod mesh;
pub mod params;
pub mod preset;
pub mod reduction;
pub mod strip;
pub mod symmetry;

pub use assembler::{assemble, MeshCounts};
pub use corner::{Corner, CornerSlot, Half, LateralCorner};
pub use error::{ColliderError, ColliderResult};
pub use generator::{
    generate, generate_in_place, ColliderGenerator, FinishStatus, Generated, PolygonTestMode,
};
pub use group::{ColliderGroup, ColliderInstance};
pub use hook::{Hook, HookKind};
pub use mesh::Mesh;
pub use params::{CornerPositionMode, ShapeParameters};
pub use preset::{GroupPreset, ShapePreset};
pub use reduction::DetailReduction;
pub use symmetry::{Axis, MirrorSide};
