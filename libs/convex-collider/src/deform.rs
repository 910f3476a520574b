//! # Hook Deformer
//!
//! Displaces mesh vertices inside each enabled hook's sphere of influence.
//! Hooks run in list order; each one reads the positions left by the hooks
//! before it.

use crate::hook::{Hook, HookKind};
use config::constants::EPSILON_TOLERANCE;
use glam::{DQuat, DVec3};

/// Applies every enabled hook to `vertices`, in order.
///
/// Returns the number of vertex displacements performed.
pub fn apply_hooks(vertices: &mut [DVec3], hooks: &[Hook]) -> usize {
    let mut moved = 0;
    for hook in hooks.iter().filter(|hook| hook.enabled) {
        let count = apply_hook(vertices, hook);
        log::trace!("hook '{}' ({:?}) moved {} vertices", hook.name, hook.kind, count);
        moved += count;
    }
    moved
}

/// Applies a single hook, ignoring its enabled flag.
pub fn apply_hook(vertices: &mut [DVec3], hook: &Hook) -> usize {
    let forward = hook.forward().normalize_or_zero();
    let mut moved = 0;

    for vertex in vertices.iter_mut() {
        let offset = *vertex - hook.position;
        let weight = hook.weight(offset.length());
        if weight <= 0.0 {
            continue;
        }

        let amount = hook.strength * weight;
        let displaced = match hook.kind {
            HookKind::Pull => push_along(*vertex, offset, amount),
            HookKind::Twist => twist(hook.position, offset, forward, amount),
            HookKind::Expand => {
                let radial = offset - forward * offset.dot(forward);
                push_along(*vertex, radial, amount)
            }
        };

        if let Some(position) = displaced {
            *vertex = position;
            moved += 1;
        }
    }
    moved
}

/// Moves `vertex` by `amount` along `direction`. A negative amount never
/// carries the vertex past the origin of `direction`.
fn push_along(vertex: DVec3, direction: DVec3, amount: f64) -> Option<DVec3> {
    let length = direction.length();
    if length <= EPSILON_TOLERANCE {
        return None;
    }
    let amount = amount.max(-length);
    Some(vertex + direction / length * amount)
}

fn twist(center: DVec3, offset: DVec3, axis: DVec3, angle: f64) -> Option<DVec3> {
    if axis == DVec3::ZERO {
        return None;
    }
    Some(center + DQuat::from_axis_angle(axis, angle) * offset)
}
