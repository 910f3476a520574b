//! # Presets
//!
//! JSON presets for single shapes and whole collider groups. Meshes are
//! never stored; they are regenerated from the parameters after loading.

use crate::error::ColliderResult;
use crate::params::ShapeParameters;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A named set of shape parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePreset {
    pub name: String,
    #[serde(default)]
    pub params: ShapeParameters,
}

/// A named list of shape presets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupPreset {
    pub name: String,
    #[serde(default)]
    pub colliders: Vec<ShapePreset>,
}

impl ShapePreset {
    pub fn new(name: impl Into<String>, params: ShapeParameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn to_json(&self) -> ColliderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a preset; the parameters come back sanitized.
    pub fn from_json(json: &str) -> ColliderResult<Self> {
        let mut preset: Self = serde_json::from_str(json)?;
        preset.params.sanitize();
        Ok(preset)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> ColliderResult<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    pub fn read_from<R: Read>(reader: R) -> ColliderResult<Self> {
        let mut preset: Self = serde_json::from_reader(reader)?;
        preset.params.sanitize();
        Ok(preset)
    }
}

impl GroupPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colliders: Vec::new(),
        }
    }

    pub fn to_json(&self) -> ColliderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a group preset; every shape comes back sanitized.
    pub fn from_json(json: &str) -> ColliderResult<Self> {
        let mut preset: Self = serde_json::from_str(json)?;
        preset.sanitize();
        Ok(preset)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> ColliderResult<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    pub fn read_from<R: Read>(reader: R) -> ColliderResult<Self> {
        let mut preset: Self = serde_json::from_reader(reader)?;
        preset.sanitize();
        Ok(preset)
    }

    fn sanitize(&mut self) {
        for collider in &mut self.colliders {
            collider.params.sanitize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::{Hook, HookKind};
    use crate::reduction::DetailReduction;
    use glam::{DQuat, DVec3};

    fn sample() -> ShapeParameters {
        let mut params = ShapeParameters::box_shape(DVec3::new(2.0, 1.0, 0.5), 0.2);
        params.set_detail_levels([3, 1, 0, 2, 4, 1, 0, 2, 1]);
        params.detail_reduction = DetailReduction::All;
        params.add_hook(Hook::new(
            "dent",
            HookKind::Expand,
            DVec3::new(0.1, 0.2, 0.3),
            DQuat::IDENTITY,
            0.4,
            -0.3,
            2.0,
        ));
        params
    }

    #[test]
    fn test_shape_preset_json() {
        let preset = ShapePreset::new("crate", sample());
        let json = preset.to_json().unwrap();
        assert!(json.contains("\"name\": \"crate\""));
        assert!(json.contains("\"Expand\""));
        assert_eq!(ShapePreset::from_json(&json).unwrap(), preset);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let preset = ShapePreset::from_json(r#"{ "name": "bare", "params": { "xz_detail": 4 } }"#).unwrap();
        assert_eq!(preset.params.xz_detail, 4);
        assert_eq!(preset.params.corner_details, ShapeParameters::default().corner_details);

        let preset = ShapePreset::from_json(r#"{ "name": "empty" }"#).unwrap();
        assert_eq!(preset.params, ShapeParameters::default());
    }

    #[test]
    fn test_loaded_params_are_sanitized() {
        let preset = ShapePreset::from_json(
            r#"{ "name": "wild", "params": { "detail_smoothness": 3.5, "top_strip_distribution": -1.0 } }"#,
        )
        .unwrap();
        assert_eq!(preset.params.detail_smoothness, 1.0);
        assert!(preset.params.top_strip_distribution > 0.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = ShapePreset::from_json("{ \"name\": ").unwrap_err();
        assert!(matches!(err, crate::error::ColliderError::Preset(_)));
    }

    #[test]
    fn test_group_preset_through_writer_and_reader() {
        let mut group = GroupPreset::new("props");
        group.colliders.push(ShapePreset::new("a", sample()));
        group.colliders.push(ShapePreset::new("b", ShapeParameters::default()));

        let mut buffer = Vec::new();
        group.write_to(&mut buffer).unwrap();
        let loaded = GroupPreset::read_from(buffer.as_slice()).unwrap();
        assert_eq!(loaded, group);
        assert_eq!(GroupPreset::from_json(&group.to_json().unwrap()).unwrap(), group);
    }
}
