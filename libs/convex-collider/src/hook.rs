//! # Deformation Hooks
//!
//! A hook is a spherical region of influence that pulls, twists or expands
//! the vertices inside it. The displacement math lives in [`crate::deform`].

use config::constants::{DEFAULT_HOOK_RADIUS, MIN_HOOK_FALLOFF, MIN_HOOK_STRENGTH};
use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// How a hook displaces the vertices it influences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HookKind {
    /// Push away from (positive) or pull toward (negative) the hook position
    #[default]
    Pull,
    /// Rotate about the hook's forward axis
    Twist,
    /// Push away from or toward the hook's forward axis
    Expand,
}

/// A localized deformation influence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub name: String,
    pub enabled: bool,
    pub kind: HookKind,
    /// Local position of the influence center
    pub position: DVec3,
    /// Local rotation; the forward axis is `rotation * +Z`
    pub rotation: DQuat,
    /// Radius of the sphere of influence
    pub radius: f64,
    /// Signed displacement scale
    pub strength: f64,
    /// Exponent shaping the weight curve
    pub falloff: f64,
}

impl Default for Hook {
    fn default() -> Self {
        Self {
            name: "Hook".to_string(),
            enabled: true,
            kind: HookKind::Pull,
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            radius: DEFAULT_HOOK_RADIUS,
            strength: 1.0,
            falloff: 1.0,
        }
    }
}

impl Hook {
    /// Creates an enabled hook with the given properties.
    pub fn new(
        name: impl Into<String>,
        kind: HookKind,
        position: DVec3,
        rotation: DQuat,
        radius: f64,
        strength: f64,
        falloff: f64,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            kind,
            position,
            rotation,
            radius,
            strength,
            falloff,
        }
    }

    /// Restores the default shape of the hook, keeping name, kind and state.
    pub fn reset(&mut self) {
        let defaults = Self::default();
        self.position = defaults.position;
        self.rotation = defaults.rotation;
        self.radius = defaults.radius;
        self.strength = defaults.strength;
        self.falloff = defaults.falloff;
    }

    /// Forward axis in local space.
    #[inline]
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// Up axis in local space.
    #[inline]
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// Sets the rotation from Euler angles in degrees, applied Z, then X,
    /// then Y.
    pub fn set_rotation_euler_degrees(&mut self, euler: DVec3) {
        self.rotation = DQuat::from_euler(
            EulerRot::YXZ,
            euler.y.to_radians(),
            euler.x.to_radians(),
            euler.z.to_radians(),
        );
    }

    /// Euler angles in degrees matching [`Hook::set_rotation_euler_degrees`].
    pub fn rotation_euler_degrees(&self) -> DVec3 {
        let (y, x, z) = self.rotation.to_euler(EulerRot::YXZ);
        DVec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    /// Weight in `[0, 1]` for a point `distance` away from the hook.
    ///
    /// One at the center, zero at and beyond the radius.
    pub fn weight(&self, distance: f64) -> f64 {
        if self.radius <= 0.0 || distance >= self.radius {
            return 0.0;
        }
        (1.0 - distance / self.radius).powf(self.falloff)
    }

    /// Clamps radius, strength magnitude and falloff into their valid ranges.
    pub fn sanitize(&mut self) {
        self.radius = self.radius.max(0.0);
        self.falloff = self.falloff.max(MIN_HOOK_FALLOFF);
        if self.strength.abs() < MIN_HOOK_STRENGTH {
            self.strength = if self.strength < 0.0 {
                -MIN_HOOK_STRENGTH
            } else {
                MIN_HOOK_STRENGTH
            };
        }
        self.rotation = self.rotation.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_hook() {
        let hook = Hook::default();
        assert_eq!(hook.name, "Hook");
        assert!(hook.enabled);
        assert_eq!(hook.kind, HookKind::Pull);
        assert_eq!(hook.radius, 0.5);
        assert_eq!(hook.forward(), DVec3::Z);
    }

    #[test]
    fn test_weight_curve() {
        let mut hook = Hook::default();
        hook.radius = 2.0;
        assert_eq!(hook.weight(0.0), 1.0);
        assert_relative_eq!(hook.weight(1.0), 0.5);
        assert_eq!(hook.weight(2.0), 0.0);
        assert_eq!(hook.weight(5.0), 0.0);

        hook.falloff = 2.0;
        assert_relative_eq!(hook.weight(1.0), 0.25);
    }

    #[test]
    fn test_zero_radius_has_no_influence() {
        let mut hook = Hook::default();
        hook.radius = 0.0;
        assert_eq!(hook.weight(0.0), 0.0);
    }

    #[test]
    fn test_sanitize_keeps_strength_sign() {
        let mut hook = Hook::new("h", HookKind::Twist, DVec3::ZERO, DQuat::IDENTITY, -1.0, -0.001, 0.0);
        hook.sanitize();
        assert_eq!(hook.radius, 0.0);
        assert_eq!(hook.strength, -MIN_HOOK_STRENGTH);
        assert_eq!(hook.falloff, MIN_HOOK_FALLOFF);

        hook.strength = 0.0;
        hook.sanitize();
        assert_eq!(hook.strength, MIN_HOOK_STRENGTH);

        hook.strength = -3.0;
        hook.sanitize();
        assert_eq!(hook.strength, -3.0);
    }

    #[test]
    fn test_euler_rotation_round_trip() {
        let mut hook = Hook::default();
        hook.set_rotation_euler_degrees(DVec3::new(0.0, 90.0, 0.0));
        let forward = hook.forward();
        assert_relative_eq!(forward.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-12);

        let euler = DVec3::new(20.0, 30.0, 40.0);
        hook.set_rotation_euler_degrees(euler);
        let back = hook.rotation_euler_degrees();
        assert_relative_eq!(back.x, euler.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, euler.y, epsilon = 1e-9);
        assert_relative_eq!(back.z, euler.z, epsilon = 1e-9);
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut hook = Hook::new("grip", HookKind::Expand, DVec3::ONE, DQuat::IDENTITY, 3.0, 2.0, 4.0);
        hook.reset();
        assert_eq!(hook.name, "grip");
        assert_eq!(hook.kind, HookKind::Expand);
        assert_eq!(hook.radius, DEFAULT_HOOK_RADIUS);
        assert_eq!(hook.position, DVec3::ZERO);
    }
}
