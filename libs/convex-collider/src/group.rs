//! # Collider Groups
//!
//! A host object usually carries several convex colliders. A
//! [`ColliderGroup`] owns them as named [`ColliderInstance`]s and generates
//! them one by one, all at once, in parallel or staggered across frames.
//!
//! ## Example
//!
//! ```rust
//! use convex_collider::{ColliderGroup, FinishStatus, ShapeParameters};
//!
//! let mut group = ColliderGroup::new("crate");
//! let index = group.add_collider(ShapeParameters::default());
//! assert_eq!(group.generate(index).unwrap(), FinishStatus::Success);
//! assert!(group.instance(index).unwrap().mesh.is_some());
//! ```

use crate::error::{ColliderError, ColliderResult};
use crate::generator::{ColliderGenerator, FinishStatus};
use crate::mesh::Mesh;
use crate::params::ShapeParameters;
use crate::preset::{GroupPreset, ShapePreset};
use rayon::prelude::*;

/// One named collider and its last generated mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderInstance {
    pub name: String,
    pub params: ShapeParameters,
    /// Mesh of the last successful generation
    pub mesh: Option<Mesh>,
    /// Status of the last generation, if any ran
    pub status: Option<FinishStatus>,
}

impl ColliderInstance {
    pub fn new(name: impl Into<String>, params: ShapeParameters) -> Self {
        Self {
            name: name.into(),
            params,
            mesh: None,
            status: None,
        }
    }

    /// Generates this instance, keeping reduced parameters on success.
    ///
    /// Failures clear the mesh and are logged with the host-facing message.
    pub fn generate(&mut self, generator: &ColliderGenerator) -> FinishStatus {
        let status = match generator.generate(&self.params, false) {
            Ok(generated) => {
                log::debug!(
                    "collider '{}': {} triangles",
                    self.name,
                    generated.mesh.triangle_count()
                );
                self.params = generated.params;
                self.mesh = Some(generated.mesh);
                FinishStatus::Success
            }
            Err(err) => {
                log::warn!("collider '{}' failed to generate: {}", self.name, err);
                let status = err.status();
                if let Some(message) = status.message(generator.config().polygon_limit) {
                    log::error!("{message}");
                }
                self.mesh = None;
                status
            }
        };
        self.status = Some(status);
        status
    }
}

/// A named collection of colliders sharing one generator.
#[derive(Debug, Clone, Default)]
pub struct ColliderGroup {
    pub name: String,
    instances: Vec<ColliderInstance>,
    generator: ColliderGenerator,
}

impl ColliderGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_generator(name, ColliderGenerator::default())
    }

    pub fn with_generator(name: impl Into<String>, generator: ColliderGenerator) -> Self {
        Self {
            name: name.into(),
            instances: Vec::new(),
            generator,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn instances(&self) -> &[ColliderInstance] {
        &self.instances
    }

    #[inline]
    pub fn generator(&self) -> &ColliderGenerator {
        &self.generator
    }

    pub fn instance(&self, index: usize) -> ColliderResult<&ColliderInstance> {
        let len = self.instances.len();
        self.instances
            .get(index)
            .ok_or(ColliderError::InstanceNotFound { index, len })
    }

    pub fn instance_mut(&mut self, index: usize) -> ColliderResult<&mut ColliderInstance> {
        let len = self.instances.len();
        self.instances
            .get_mut(index)
            .ok_or(ColliderError::InstanceNotFound { index, len })
    }

    /// Adds a collider named after its position and returns its index.
    pub fn add_collider(&mut self, params: ShapeParameters) -> usize {
        let name = format!("Collider {}", self.instances.len() + 1);
        self.instances.push(ColliderInstance::new(name, params));
        self.instances.len() - 1
    }

    /// Appends a copy of the collider at `index`, without its mesh.
    pub fn duplicate(&mut self, index: usize) -> ColliderResult<usize> {
        let source = self.instance(index)?;
        let copy = ColliderInstance::new(format!("{} Copy", source.name), source.params.clone());
        self.instances.push(copy);
        Ok(self.instances.len() - 1)
    }

    pub fn delete(&mut self, index: usize) -> ColliderResult<ColliderInstance> {
        self.instance(index)?;
        Ok(self.instances.remove(index))
    }

    /// Generates the collider at `index`.
    pub fn generate(&mut self, index: usize) -> ColliderResult<FinishStatus> {
        let generator = self.generator.clone();
        Ok(self.instance_mut(index)?.generate(&generator))
    }

    /// Generates every collider in order.
    pub fn generate_all(&mut self) -> Vec<FinishStatus> {
        let generator = &self.generator;
        self.instances
            .iter_mut()
            .map(|instance| instance.generate(generator))
            .collect()
    }

    /// Generates every collider on the rayon pool. Each instance owns its
    /// parameters, so the results match [`ColliderGroup::generate_all`].
    pub fn generate_all_parallel(&mut self) -> Vec<FinishStatus> {
        let generator = &self.generator;
        self.instances
            .par_iter_mut()
            .map(|instance| instance.generate(generator))
            .collect()
    }

    /// Iterator generating one collider per step, for hosts that spread the
    /// work over frames.
    pub fn staggered(&mut self) -> Staggered<'_> {
        Staggered {
            group: self,
            next: 0,
        }
    }

    /// Successful meshes with their collider names.
    pub fn meshes(&self) -> impl Iterator<Item = (&str, &Mesh)> {
        self.instances
            .iter()
            .filter_map(|instance| Some((instance.name.as_str(), instance.mesh.as_ref()?)))
    }

    /// Triangles across all generated meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes().map(|(_, mesh)| mesh.triangle_count()).sum()
    }

    pub fn to_preset(&self) -> GroupPreset {
        GroupPreset {
            name: self.name.clone(),
            colliders: self
                .instances
                .iter()
                .map(|instance| ShapePreset::new(instance.name.clone(), instance.params.clone()))
                .collect(),
        }
    }

    /// Rebuilds a group from a preset; meshes still have to be generated.
    pub fn from_preset(preset: GroupPreset) -> Self {
        let mut group = Self::new(preset.name);
        group.instances = preset
            .colliders
            .into_iter()
            .map(|shape| ColliderInstance::new(shape.name, shape.params.sanitized()))
            .collect();
        group
    }
}

/// One-collider-per-step generation over a [`ColliderGroup`].
#[derive(Debug)]
pub struct Staggered<'a> {
    group: &'a mut ColliderGroup,
    next: usize,
}

impl Iterator for Staggered<'_> {
    /// Index of the generated collider and its status
    type Item = (usize, FinishStatus);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let status = self.group.generate(index).ok()?;
        self.next += 1;
        Some((index, status))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.group.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
