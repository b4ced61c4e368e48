//! Render configuration.

use lux_math::AIR_REFRACTION_INDEX;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Specular term used by the BRDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecularModel {
    /// Reflected light direction against the view direction.
    Phong,
    /// Half vector against the normal.
    #[default]
    BlinnPhong,
}

/// Render configuration.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Independent jittered passes averaged into the image
    pub samples_per_pixel: u32,
    /// Light position samples per light per shading point
    pub samples_per_shadow: u32,
    /// Lens sub-passes per sample; 1 disables depth of field
    pub depth_complexity: u32,
    /// Lens disk radius times 100
    pub dispersion: f64,
    pub specular_model: SpecularModel,
    /// Refraction index of the medium the camera sits in
    pub ambient_refraction_index: f64,
    /// Maximum number of reflection/refraction bounces
    pub max_depth: u32,
    /// Worker cap; defaults to 4x the available parallelism
    pub max_workers: Option<usize>,
    /// Base seed for reproducible renders
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            samples_per_shadow: 1,
            depth_complexity: 1,
            dispersion: 5.0,
            specular_model: SpecularModel::BlinnPhong,
            ambient_refraction_index: AIR_REFRACTION_INDEX,
            max_depth: 8,
            max_workers: None,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check that the configuration can drive a render.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be >= 1".to_string(),
            ));
        }
        if self.samples_per_shadow == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_shadow must be >= 1".to_string(),
            ));
        }
        if self.depth_complexity == 0 {
            return Err(RenderError::InvalidConfig(
                "depth_complexity must be >= 1".to_string(),
            ));
        }
        if !(self.dispersion >= 0.0 && self.dispersion.is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "dispersion must be finite and >= 0, got {}",
                self.dispersion
            )));
        }
        if !(self.ambient_refraction_index > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "ambient_refraction_index must be positive, got {}",
                self.ambient_refraction_index
            )));
        }
        if self.max_workers == Some(0) {
            return Err(RenderError::InvalidConfig(
                "max_workers must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Radius of the lens disk sampled for depth of field.
    pub fn lens_radius(&self) -> f64 {
        self.dispersion / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.samples_per_pixel, 1);
        assert_eq!(config.specular_model, SpecularModel::BlinnPhong);
        assert_eq!(config.ambient_refraction_index, AIR_REFRACTION_INDEX);
        assert!((config.lens_radius() - 0.05).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_json() {
        let config: RenderConfig = serde_json::from_str(
            r#"{ "samples_per_pixel": 4, "specular_model": "phong", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.specular_model, SpecularModel::Phong);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.samples_per_shadow, 1);
        assert_eq!(config.max_depth, 8);

        let empty: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RenderConfig::default());
    }

    #[test]
    fn test_unknown_specular_model_is_rejected() {
        let parsed: Result<RenderConfig, _> =
            serde_json::from_str(r#"{ "specular_model": "cook_torrance" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = RenderConfig {
            depth_complexity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RenderConfig {
            max_workers: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
