//! # Shape Parameters
//!
//! The compact description a collider is generated from: eight corners,
//! detail counts, hooks and the polygon budget policy.
//!
//! Mirroring and flipping live in [`crate::symmetry`], detail reduction in
//! [`crate::reduction`].

use crate::corner::{Corner, CornerSlot, LateralCorner};
use crate::error::{ColliderError, ColliderResult};
use crate::generator::PolygonTestMode;
use crate::hook::{Hook, HookKind};
use crate::reduction::DetailReduction;
use config::constants::{
    DEFAULT_BOTTOM_STRIP_DISTRIBUTION, DEFAULT_CORNER_DETAIL, DEFAULT_PLANE_DETAIL,
    DEFAULT_REDUCTION_ATTEMPTS, DEFAULT_SEGMENTS, DEFAULT_TOP_STRIP_DISTRIBUTION,
    MIN_STRIP_DISTRIBUTION,
};
use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// How corner positions follow the box layout fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CornerPositionMode {
    /// Corners sit on a box described by `box_size` around `box_offset`
    #[default]
    BoxCenter,
    /// Corners sit on a box described by its six side planes
    BoxSides,
    /// Corners are placed one by one
    Individual,
}

/// Everything a generation run reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParameters {
    /// The eight corners in [`CornerSlot`] storage order
    pub corners: [Corner; 8],
    /// Arc subdivision per lateral corner column
    pub corner_details: [u32; 4],
    /// Rounding rings between the top equator and the top cap
    pub top_segments: u32,
    /// Rounding rings between the bottom equator and the bottom cap
    pub bottom_segments: u32,
    /// Extra vertices on edges parallel to the X-Y plane
    pub xy_detail: u32,
    /// Extra vertices on edges parallel to the Y-Z plane
    pub yz_detail: u32,
    /// Extra rings between the two equators
    pub xz_detail: u32,
    /// 0 keeps extra vertices on straight lines, 1 fully eases them
    pub detail_smoothness: f64,
    pub bottom_strip_distribution: f64,
    pub top_strip_distribution: f64,
    pub hooks: Vec<Hook>,
    pub polygon_test: PolygonTestMode,
    pub bypass_polygon_test: bool,
    pub detail_reduction: DetailReduction,
    pub max_reduction_attempts: u32,
    pub position_mode: CornerPositionMode,
    pub box_size: DVec3,
    pub box_offset: DVec3,
    /// Side planes on +x, +y, +z for [`CornerPositionMode::BoxSides`]
    pub box_sides_positive: DVec3,
    /// Side planes on -x, -y, -z for [`CornerPositionMode::BoxSides`]
    pub box_sides_negative: DVec3,
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            corners: CornerSlot::ALL.map(Corner::unit),
            corner_details: [DEFAULT_CORNER_DETAIL; 4],
            top_segments: DEFAULT_SEGMENTS,
            bottom_segments: DEFAULT_SEGMENTS,
            xy_detail: DEFAULT_PLANE_DETAIL,
            yz_detail: DEFAULT_PLANE_DETAIL,
            xz_detail: DEFAULT_PLANE_DETAIL,
            detail_smoothness: 0.0,
            bottom_strip_distribution: DEFAULT_BOTTOM_STRIP_DISTRIBUTION,
            top_strip_distribution: DEFAULT_TOP_STRIP_DISTRIBUTION,
            hooks: Vec::new(),
            polygon_test: PolygonTestMode::default(),
            bypass_polygon_test: false,
            detail_reduction: DetailReduction::default(),
            max_reduction_attempts: DEFAULT_REDUCTION_ATTEMPTS,
            position_mode: CornerPositionMode::default(),
            box_size: DVec3::ONE,
            box_offset: DVec3::ZERO,
            box_sides_positive: DVec3::splat(0.5),
            box_sides_negative: DVec3::splat(-0.5),
        }
    }
}

impl ShapeParameters {
    /// Box of `size` centered at the origin with a uniform corner radius.
    pub fn box_shape(size: DVec3, radius: f64) -> Self {
        let mut params = Self::default();
        params.set_box(size);
        params.set_all_corner_radii(DVec3::splat(radius));
        params
    }

    // =========================================================================
    // Corners
    // =========================================================================

    #[inline]
    pub fn corner(&self, slot: CornerSlot) -> &Corner {
        &self.corners[slot.index()]
    }

    #[inline]
    pub fn corner_mut(&mut self, slot: CornerSlot) -> &mut Corner {
        &mut self.corners[slot.index()]
    }

    /// Corner whose octant matches the signs of `position`.
    pub fn corner_at(&self, position: DVec3) -> ColliderResult<&Corner> {
        CornerSlot::from_position(position).map(|slot| self.corner(slot))
    }

    pub fn set_corner_position(&mut self, slot: CornerSlot, position: DVec3) {
        self.corner_mut(slot).position = position;
    }

    /// Sets the same radius on every axis of one corner.
    pub fn set_corner_radius(&mut self, slot: CornerSlot, radius: f64) {
        self.corner_mut(slot).radii = DVec3::splat(radius);
    }

    pub fn set_corner_radii(&mut self, slot: CornerSlot, radii: DVec3) {
        self.corner_mut(slot).radii = radii;
    }

    pub fn set_all_corner_radii(&mut self, radii: DVec3) {
        for corner in &mut self.corners {
            corner.radii = radii;
        }
    }

    pub fn set_corner_radius_offsets(&mut self, slot: CornerSlot, offsets: DVec3) {
        self.corner_mut(slot).radius_offsets = offsets;
    }

    pub fn set_all_corner_radius_offsets(&mut self, offsets: DVec3) {
        for corner in &mut self.corners {
            corner.radius_offsets = offsets;
        }
    }

    pub fn set_corner_detail(&mut self, lateral: LateralCorner, detail: u32) {
        self.corner_details[lateral.index()] = detail;
    }

    pub fn set_all_corner_details(&mut self, detail: u32) {
        self.corner_details = [detail; 4];
    }

    /// Mean of the eight corner positions.
    pub fn average_corner_position(&self) -> DVec3 {
        self.corners.iter().map(|c| c.position).sum::<DVec3>() / 8.0
    }

    // =========================================================================
    // Box layout
    // =========================================================================

    /// Resizes the layout box around the origin and moves the corners onto it.
    pub fn set_box(&mut self, size: DVec3) {
        self.set_box_with_offset(DVec3::ZERO, size);
    }

    /// Resizes and moves the layout box and moves the corners onto it.
    pub fn set_box_with_offset(&mut self, offset: DVec3, size: DVec3) {
        self.box_offset = offset;
        self.box_size = size;
        self.box_sides_positive = offset + size * 0.5;
        self.box_sides_negative = offset - size * 0.5;
        for corner in &mut self.corners {
            corner.position = corner.normalized_location() * size * 0.5 + offset;
        }
    }

    /// Moves the corners onto the layout box according to `position_mode`.
    pub fn set_corner_positions_from_box(&mut self) {
        match self.position_mode {
            CornerPositionMode::BoxCenter => {
                for corner in &mut self.corners {
                    corner.position =
                        corner.normalized_location() * self.box_size * 0.5 + self.box_offset;
                }
            }
            CornerPositionMode::BoxSides => {
                for corner in &mut self.corners {
                    let sign = corner.normalized_location();
                    corner.position = DVec3::select(
                        sign.cmpgt(DVec3::ZERO),
                        self.box_sides_positive,
                        self.box_sides_negative,
                    );
                }
            }
            CornerPositionMode::Individual => {}
        }
    }

    /// Back to a unit box with default radii.
    pub fn reset_corners(&mut self) {
        self.box_size = DVec3::ONE;
        self.box_offset = DVec3::ZERO;
        self.box_sides_positive = DVec3::splat(0.5);
        self.box_sides_negative = DVec3::splat(-0.5);
        self.corners = CornerSlot::ALL.map(Corner::unit);
    }

    /// Back to the default detail counts with full smoothing.
    pub fn reset_detail(&mut self) {
        self.bottom_strip_distribution = DEFAULT_BOTTOM_STRIP_DISTRIBUTION;
        self.top_strip_distribution = DEFAULT_TOP_STRIP_DISTRIBUTION;
        self.corner_details = [DEFAULT_CORNER_DETAIL; 4];
        self.top_segments = DEFAULT_SEGMENTS;
        self.bottom_segments = DEFAULT_SEGMENTS;
        self.xy_detail = DEFAULT_PLANE_DETAIL;
        self.yz_detail = DEFAULT_PLANE_DETAIL;
        self.xz_detail = DEFAULT_PLANE_DETAIL;
        self.detail_smoothness = 1.0;
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    pub fn add_hook(&mut self, hook: Hook) -> &mut Hook {
        self.hooks.push(hook);
        let last = self.hooks.len() - 1;
        &mut self.hooks[last]
    }

    /// Adds a hook named after its position in the list.
    pub fn add_hook_with(
        &mut self,
        kind: HookKind,
        position: DVec3,
        rotation: DQuat,
        radius: f64,
        strength: f64,
        falloff: f64,
    ) -> &mut Hook {
        let name = format!("Hook {}", self.hooks.len());
        self.add_hook(Hook::new(name, kind, position, rotation, radius, strength, falloff))
    }

    pub fn remove_hook(&mut self, index: usize) -> ColliderResult<Hook> {
        if index >= self.hooks.len() {
            return Err(ColliderError::HookNotFound {
                index,
                len: self.hooks.len(),
            });
        }
        Ok(self.hooks.remove(index))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Clamps every value into its valid range.
    pub fn sanitize(&mut self) {
        for corner in &mut self.corners {
            corner.sanitize();
        }
        self.detail_smoothness = if self.detail_smoothness.is_nan() {
            0.0
        } else {
            self.detail_smoothness.clamp(0.0, 1.0)
        };
        self.bottom_strip_distribution = self.bottom_strip_distribution.max(MIN_STRIP_DISTRIBUTION);
        self.top_strip_distribution = self.top_strip_distribution.max(MIN_STRIP_DISTRIBUTION);
        for hook in &mut self.hooks {
            hook.sanitize();
        }
    }

    /// Sanitized copy.
    pub fn sanitized(&self) -> Self {
        let mut params = self.clone();
        params.sanitize();
        params
    }

    /// Rejects values no mesh can be built from.
    pub fn check(&self) -> ColliderResult<()> {
        for corner in &self.corners {
            if !(corner.position.is_finite()
                && corner.radii.is_finite()
                && corner.radius_offsets.is_finite())
            {
                return Err(ColliderError::invalid_parameter(format!(
                    "corner {:?} has a non-finite component",
                    corner.slot
                )));
            }
        }
        for (slot, corner) in CornerSlot::ALL.iter().zip(&self.corners) {
            if corner.slot != *slot {
                return Err(ColliderError::invalid_parameter(format!(
                    "corner {:?} stored in slot {:?}",
                    corner.slot, slot
                )));
            }
        }
        if !self.bottom_strip_distribution.is_finite() || !self.top_strip_distribution.is_finite()
        {
            return Err(ColliderError::invalid_parameter(
                "strip distribution must be finite",
            ));
        }
        if let Some(hook) = self.hooks.iter().find(|h| {
            !(h.position.is_finite()
                && h.rotation.is_finite()
                && h.radius.is_finite()
                && h.strength.is_finite()
                && h.falloff.is_finite())
        }) {
            return Err(ColliderError::invalid_parameter(format!(
                "hook '{}' has a non-finite component",
                hook.name
            )));
        }
        Ok(())
    }
}
