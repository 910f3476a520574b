//! # Mirror and Flip
//!
//! Symmetry edits on [`ShapeParameters`].
//!
//! - **Mirror** copies one side of the shape onto the other. Hooks on the
//!   source side gain mirrored twins; hooks on the destination side are dropped.
//! - **Flip** swaps the two sides of an axis. Applying it twice restores the
//!   original shape.

use crate::corner::{CornerSlot, Half, LateralCorner};
use crate::error::{ColliderError, ColliderResult};
use crate::hook::{Hook, HookKind};
use crate::params::ShapeParameters;
use config::constants::MIRROR_PLANE_TOLERANCE;
use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axis of a signed unit direction such as `(0, -1, 0)`.
    pub fn from_direction(direction: DVec3) -> ColliderResult<Self> {
        MirrorSide::from_direction(direction).map(MirrorSide::axis)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Component-wise factors reflecting a vector across this axis' plane.
    pub fn reflection(self) -> DVec3 {
        let mut factors = DVec3::ONE;
        factors[self.index()] = -1.0;
        factors
    }
}

/// The side of the shape a mirror copies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MirrorSide {
    pub axis: Axis,
    pub positive: bool,
}

impl MirrorSide {
    pub const POSITIVE_X: Self = Self::new(Axis::X, true);
    pub const NEGATIVE_X: Self = Self::new(Axis::X, false);
    pub const POSITIVE_Y: Self = Self::new(Axis::Y, true);
    pub const NEGATIVE_Y: Self = Self::new(Axis::Y, false);
    pub const POSITIVE_Z: Self = Self::new(Axis::Z, true);
    pub const NEGATIVE_Z: Self = Self::new(Axis::Z, false);

    pub const fn new(axis: Axis, positive: bool) -> Self {
        Self { axis, positive }
    }

    /// Side named by a vector with exactly one component rounding to ±1 and
    /// the others rounding to 0.
    pub fn from_direction(direction: DVec3) -> ColliderResult<Self> {
        let rounded = direction.round();
        let invalid = || ColliderError::InvalidMirrorDirection { direction };
        if !rounded.is_finite() || rounded.abs().cmpgt(DVec3::ONE).any() {
            return Err(invalid());
        }
        if rounded.abs().element_sum() != 1.0 {
            return Err(invalid());
        }

        let axis = [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .find(|axis| rounded[axis.index()] != 0.0)
            .ok_or_else(invalid)?;
        Ok(Self::new(axis, rounded[axis.index()] > 0.0))
    }

    #[inline]
    pub fn axis(self) -> Axis {
        self.axis
    }

    /// True when `value` lies on the source side of this mirror.
    fn is_source(self, value: f64) -> bool {
        (value > 0.0) == self.positive
    }
}

impl CornerSlot {
    /// Slot on the other side of `axis`.
    pub fn reflected(self, axis: Axis) -> CornerSlot {
        let half = self.half();
        let lateral = self.lateral();
        match axis {
            Axis::Y => CornerSlot::new(
                match half {
                    Half::Bottom => Half::Top,
                    Half::Top => Half::Bottom,
                },
                lateral,
            ),
            Axis::X | Axis::Z => CornerSlot::new(half, lateral.reflected(axis)),
        }
    }
}

impl LateralCorner {
    /// Column on the other side of `axis`; Y leaves columns unchanged.
    pub fn reflected(self, axis: Axis) -> LateralCorner {
        use LateralCorner::*;
        match (axis, self) {
            (Axis::Y, lateral) => lateral,
            (Axis::X, FrontRight) => FrontLeft,
            (Axis::X, FrontLeft) => FrontRight,
            (Axis::X, BackLeft) => BackRight,
            (Axis::X, BackRight) => BackLeft,
            (Axis::Z, FrontRight) => BackRight,
            (Axis::Z, BackRight) => FrontRight,
            (Axis::Z, FrontLeft) => BackLeft,
            (Axis::Z, BackLeft) => FrontLeft,
        }
    }
}

/// Rotation whose forward (+Z) axis is `forward` and whose up (+Y) axis is as
/// close to `up` as possible.
pub(crate) fn look_rotation(forward: DVec3, up: DVec3) -> DQuat {
    let forward = forward.normalize_or_zero();
    if forward == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    let mut right = up.cross(forward);
    if right.length_squared() < 1.0e-12 {
        right = forward.any_orthonormal_vector();
    }
    let right = right.normalize();
    let up = forward.cross(right);
    DQuat::from_mat3(&DMat3::from_cols(right, up, forward))
}

impl Hook {
    /// Copy of this hook reflected across the plane of `axis`.
    ///
    /// A reflection reverses handedness, so twist hooks also reverse their
    /// axis to keep twisting the mirrored geometry the mirrored way.
    pub fn reflected(&self, axis: Axis) -> Hook {
        let factors = axis.reflection();
        let mut forward = self.forward() * factors;
        if self.kind == HookKind::Twist {
            forward = -forward;
        }
        let mut hook = self.clone();
        hook.position = self.position * factors;
        hook.rotation = look_rotation(forward, self.up() * factors);
        hook
    }
}

impl ShapeParameters {
    /// Copies the `side` half of the shape onto the opposite half.
    pub fn mirror(&mut self, side: MirrorSide) {
        let axis = side.axis();
        let i = axis.index();
        let factors = axis.reflection();

        // Layout box becomes symmetric about the mirror plane
        if side.positive {
            self.box_size[i] += self.box_offset[i] * 2.0;
            self.box_sides_negative[i] = -self.box_sides_positive[i];
        } else {
            self.box_size[i] -= self.box_offset[i] * 2.0;
            self.box_sides_positive[i] = -self.box_sides_negative[i];
        }
        self.box_offset[i] = 0.0;

        for slot in CornerSlot::ALL {
            if !side.is_source(slot.sign()[i]) {
                continue;
            }
            let source = *self.corner(slot);
            let target = self.corner_mut(slot.reflected(axis));
            target.position = source.position * factors;
            target.radii = source.radii;
            target.radius_offsets = source.radius_offsets;
        }

        match axis {
            Axis::Y => {
                if side.positive {
                    self.bottom_segments = self.top_segments;
                    self.bottom_strip_distribution = self.top_strip_distribution;
                } else {
                    self.top_segments = self.bottom_segments;
                    self.top_strip_distribution = self.bottom_strip_distribution;
                }
            }
            Axis::X | Axis::Z => {
                for lateral in LateralCorner::ALL {
                    if side.is_source(lateral.horizontal_sign()[i]) {
                        self.corner_details[lateral.reflected(axis).index()] =
                            self.corner_details[lateral.index()];
                    }
                }
            }
        }

        // Drop hooks on the destination side, then twin the off-plane ones
        self.hooks.retain(|hook| {
            let value = hook.position[i];
            value.abs() <= MIRROR_PLANE_TOLERANCE || side.is_source(value)
        });
        let twins: Vec<Hook> = self
            .hooks
            .iter()
            .filter(|hook| hook.position[i].abs() > MIRROR_PLANE_TOLERANCE)
            .map(|hook| {
                let mut twin = hook.reflected(axis);
                if !twin.name.ends_with("Mirrored") {
                    twin.name.push_str(" Mirrored");
                }
                twin
            })
            .collect();
        log::debug!("mirrored shape across {:?}, added {} hook(s)", axis, twins.len());
        self.hooks.extend(twins);
    }

    /// Swaps the two sides of `axis`.
    pub fn flip(&mut self, axis: Axis) {
        let i = axis.index();
        let factors = axis.reflection();

        self.box_offset[i] = -self.box_offset[i];
        let negative = self.box_sides_negative[i];
        self.box_sides_negative[i] = -self.box_sides_positive[i];
        self.box_sides_positive[i] = -negative;

        let previous = self.corners;
        for slot in CornerSlot::ALL {
            let source = previous[slot.reflected(axis).index()];
            let target = self.corner_mut(slot);
            target.position = source.position * factors;
            target.radii = source.radii;
            target.radius_offsets = source.radius_offsets;
        }

        match axis {
            Axis::Y => {
                std::mem::swap(&mut self.top_segments, &mut self.bottom_segments);
                std::mem::swap(
                    &mut self.top_strip_distribution,
                    &mut self.bottom_strip_distribution,
                );
            }
            Axis::X | Axis::Z => {
                let previous = self.corner_details;
                for lateral in LateralCorner::ALL {
                    self.corner_details[lateral.index()] =
                        previous[lateral.reflected(axis).index()];
                }
            }
        }

        for hook in &mut self.hooks {
            *hook = hook.reflected(axis);
        }
    }
}
