//! Tests for the generator configuration snapshot.

use super::*;

/// Ensures the default snapshot reads the engine ceiling.
///
/// # Examples
/// ```
/// use config::constants::GeneratorConfig;
/// let cfg = GeneratorConfig::default();
/// assert_eq!(cfg.polygon_limit, 255);
/// ```
#[test]
fn default_config_is_valid() {
    let cfg = GeneratorConfig::default();
    assert_eq!(cfg.polygon_limit, POLYGON_LIMIT);
    assert!(cfg.tolerance > 0.0);
    assert_eq!(GeneratorConfig::new(cfg.polygon_limit, cfg.tolerance), Ok(cfg));
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GeneratorConfig::new(3, 1.0e-9).unwrap_err(),
        ConfigError::InvalidPolygonLimit(3)
    );
    assert_eq!(
        GeneratorConfig::new(70_000, 1.0e-9).unwrap_err(),
        ConfigError::InvalidPolygonLimit(70_000)
    );
    assert_eq!(
        GeneratorConfig::new(255, 0.0).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert!(GeneratorConfig::new(255, f64::NAN).is_err());
}

#[test]
fn error_messages_name_the_field() {
    let message = ConfigError::InvalidPolygonLimit(2).to_string();
    assert!(message.contains("polygon_limit"));
    let message = ConfigError::InvalidTolerance(-1.0).to_string();
    assert!(message.contains("tolerance"));
}
