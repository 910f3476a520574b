//! # Corners
//!
//! The eight fixed corners of the conceptual box and the rounding data
//! attached to each of them.
//!
//! Identity is carried by [`CornerSlot`], assigned when the corner is created.
//! Positions are free to move anywhere, even across the origin, without the
//! corner changing which octant it stands for.

use crate::error::{ColliderError, ColliderResult};
use config::constants::DEFAULT_CORNER_RADIUS;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Vertical half of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Half {
    Bottom,
    Top,
}

impl Half {
    /// Both halves, bottom first.
    pub const ALL: [Half; 2] = [Half::Bottom, Half::Top];

    /// -1 for the bottom half, +1 for the top half.
    #[inline]
    pub fn vertical_sign(self) -> f64 {
        match self {
            Half::Bottom => -1.0,
            Half::Top => 1.0,
        }
    }

    /// The four corners of this half in lateral order.
    pub fn slots(self) -> [CornerSlot; 4] {
        LateralCorner::ALL.map(|lateral| CornerSlot::new(self, lateral))
    }
}

/// One of the four vertical corner columns, in ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LateralCorner {
    FrontRight,
    FrontLeft,
    BackLeft,
    BackRight,
}

impl LateralCorner {
    /// Ring order: front-right, front-left, back-left, back-right.
    pub const ALL: [LateralCorner; 4] = [
        LateralCorner::FrontRight,
        LateralCorner::FrontLeft,
        LateralCorner::BackLeft,
        LateralCorner::BackRight,
    ];

    /// Position in ring order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Angle at which this corner's quarter arc starts.
    #[inline]
    pub fn start_angle(self) -> f64 {
        FRAC_PI_2 * self.index() as f64
    }

    /// Horizontal sign vector; y is zero.
    pub fn horizontal_sign(self) -> DVec3 {
        match self {
            LateralCorner::FrontRight => DVec3::new(1.0, 0.0, 1.0),
            LateralCorner::FrontLeft => DVec3::new(-1.0, 0.0, 1.0),
            LateralCorner::BackLeft => DVec3::new(-1.0, 0.0, -1.0),
            LateralCorner::BackRight => DVec3::new(1.0, 0.0, -1.0),
        }
    }
}

/// Fixed identity of one of the eight corners.
///
/// Discriminants give the canonical storage order: the bottom four corners in
/// lateral order, then the top four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerSlot {
    BottomFrontRight,
    BottomFrontLeft,
    BottomBackLeft,
    BottomBackRight,
    TopFrontRight,
    TopFrontLeft,
    TopBackLeft,
    TopBackRight,
}

impl CornerSlot {
    /// All slots in storage order.
    pub const ALL: [CornerSlot; 8] = [
        CornerSlot::BottomFrontRight,
        CornerSlot::BottomFrontLeft,
        CornerSlot::BottomBackLeft,
        CornerSlot::BottomBackRight,
        CornerSlot::TopFrontRight,
        CornerSlot::TopFrontLeft,
        CornerSlot::TopBackLeft,
        CornerSlot::TopBackRight,
    ];

    /// Slot for a half and a lateral column.
    pub fn new(half: Half, lateral: LateralCorner) -> Self {
        let offset = match half {
            Half::Bottom => 0,
            Half::Top => 4,
        };
        Self::ALL[offset + lateral.index()]
    }

    /// Index into the eight-corner storage.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn half(self) -> Half {
        if self.index() < 4 {
            Half::Bottom
        } else {
            Half::Top
        }
    }

    pub fn lateral(self) -> LateralCorner {
        LateralCorner::ALL[self.index() % 4]
    }

    /// Octant sign vector (±1, ±1, ±1).
    pub fn sign(self) -> DVec3 {
        let horizontal = self.lateral().horizontal_sign();
        DVec3::new(horizontal.x, self.half().vertical_sign(), horizontal.z)
    }

    /// Slot whose octant matches the signs of `position`.
    ///
    /// Fails when any component is zero, since such a point sits between
    /// octants.
    pub fn from_position(position: DVec3) -> ColliderResult<Self> {
        if position.x == 0.0 || position.y == 0.0 || position.z == 0.0 || !position.is_finite() {
            return Err(ColliderError::AmbiguousCorner { position });
        }

        let half = if position.y > 0.0 { Half::Top } else { Half::Bottom };
        let lateral = match (position.x > 0.0, position.z > 0.0) {
            (true, true) => LateralCorner::FrontRight,
            (false, true) => LateralCorner::FrontLeft,
            (false, false) => LateralCorner::BackLeft,
            (true, false) => LateralCorner::BackRight,
        };
        Ok(Self::new(half, lateral))
    }
}

/// A single rounded corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Fixed identity; never re-derived from `position`
    pub slot: CornerSlot,
    /// Nominal apex before rounding
    pub position: DVec3,
    /// Per-axis rounding radii
    pub radii: DVec3,
    /// Per-axis pull of the rounding center toward the box interior
    pub radius_offsets: DVec3,
}

impl Corner {
    /// Corner at `position` with default radii.
    pub fn new(slot: CornerSlot, position: DVec3) -> Self {
        Self {
            slot,
            position,
            radii: DVec3::splat(DEFAULT_CORNER_RADIUS),
            radius_offsets: DVec3::ONE,
        }
    }

    /// Corner of a unit box centered at the origin.
    pub fn unit(slot: CornerSlot) -> Self {
        Self::new(slot, slot.sign() * 0.5)
    }

    #[inline]
    pub fn normalized_location(&self) -> DVec3 {
        self.slot.sign()
    }

    /// Displacement from the apex to the rounding center.
    pub fn offset(&self) -> DVec3 {
        self.radii * self.normalized_location() * self.radius_offsets
    }

    /// Point on the rounding surface in direction `dir`.
    pub fn edge_position(&self, dir: DVec3) -> DVec3 {
        self.position - self.offset() + self.radii * dir.normalize_or_zero()
    }

    pub fn reset_radii(&mut self) {
        self.radii = DVec3::splat(DEFAULT_CORNER_RADIUS);
        self.radius_offsets = DVec3::ONE;
    }

    /// Sets radii, clamping each axis to `[0, max]`.
    pub fn set_radii_clamped(&mut self, radii: DVec3, max: f64) {
        self.radii = radii.clamp(DVec3::ZERO, DVec3::splat(max.max(0.0)));
    }

    /// Sets radius offsets, clamping each axis to `[0, max]`.
    pub fn set_radius_offsets_clamped(&mut self, offsets: DVec3, max: f64) {
        self.radius_offsets = offsets.clamp(DVec3::ZERO, DVec3::splat(max.max(0.0)));
    }

    /// Clamps radii and offsets to be non-negative.
    pub fn sanitize(&mut self) {
        self.radii = self.radii.max(DVec3::ZERO);
        self.radius_offsets = self.radius_offsets.max(DVec3::ZERO);
    }
}
