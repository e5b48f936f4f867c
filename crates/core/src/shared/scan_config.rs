use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DILATE_ITERATIONS, ERODE_ITERATIONS, MASK_BLUR_KERNEL, MAX_MORPH_KERNEL, MORPH_KERNEL,
    SKIN_YCRCB_LOWER, SKIN_YCRCB_UPPER,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Tunable constants of the skin detector.
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub ycrcb_lower: [u8; 3],
    pub ycrcb_upper: [u8; 3],
    pub blur_kernel: usize,
    pub morph_kernel: usize,
    pub erode_iterations: usize,
    pub dilate_iterations: usize,
    /// Regions with a smaller contour area are ignored. 0 disables the filter.
    pub min_region_area: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ycrcb_lower: SKIN_YCRCB_LOWER,
            ycrcb_upper: SKIN_YCRCB_UPPER,
            blur_kernel: MASK_BLUR_KERNEL,
            morph_kernel: MORPH_KERNEL,
            erode_iterations: ERODE_ITERATIONS,
            dilate_iterations: DILATE_ITERATIONS,
            min_region_area: 0.0,
        }
    }
}

impl ScanConfig {
    /// Reads a JSON config file and validates it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScanConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (channel, name) in ["Y", "Cr", "Cb"].iter().enumerate() {
            if self.ycrcb_lower[channel] > self.ycrcb_upper[channel] {
                return Err(ConfigError::Invalid(format!(
                    "{name} lower bound {} exceeds upper bound {}",
                    self.ycrcb_lower[channel], self.ycrcb_upper[channel]
                )));
            }
        }
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "Blur kernel must be a positive odd integer, got {}",
                self.blur_kernel
            )));
        }
        if self.morph_kernel == 0 || self.morph_kernel % 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "Morphology kernel must be a positive odd integer, got {}",
                self.morph_kernel
            )));
        }
        if self.morph_kernel > MAX_MORPH_KERNEL {
            return Err(ConfigError::Invalid(format!(
                "Morphology kernel must be at most {MAX_MORPH_KERNEL}, got {}",
                self.morph_kernel
            )));
        }
        if self.min_region_area.is_nan() || self.min_region_area < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Minimum region area must be non-negative, got {}",
                self.min_region_area
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_matches_constants() {
        let config = ScanConfig::default();
        assert_eq!(config.ycrcb_lower, [0, 133, 77]);
        assert_eq!(config.ycrcb_upper, [255, 173, 127]);
        assert_eq!(config.blur_kernel, 3);
        assert_eq!(config.erode_iterations, 1);
        assert_eq!(config.dilate_iterations, 1);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case::inverted_cr(ScanConfig { ycrcb_lower: [0, 180, 77], ..ScanConfig::default() })]
    #[case::even_blur(ScanConfig { blur_kernel: 4, ..ScanConfig::default() })]
    #[case::zero_blur(ScanConfig { blur_kernel: 0, ..ScanConfig::default() })]
    #[case::even_morph(ScanConfig { morph_kernel: 2, ..ScanConfig::default() })]
    #[case::huge_morph(ScanConfig { morph_kernel: 513, ..ScanConfig::default() })]
    #[case::negative_area(ScanConfig { min_region_area: -1.0, ..ScanConfig::default() })]
    #[case::nan_area(ScanConfig { min_region_area: f64::NAN, ..ScanConfig::default() })]
    fn test_validate_rejects(#[case] config: ScanConfig) {
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let json = r#"{ "min_region_area": 250.0, "ycrcb_lower": [0, 135, 80] }"#;
        fs::write(&path, json).unwrap();

        let config = ScanConfig::load(&path).unwrap();
        assert_eq!(config.min_region_area, 250.0);
        assert_eq!(config.ycrcb_lower, [0, 135, 80]);
        assert_eq!(config.ycrcb_upper, SKIN_YCRCB_UPPER);
        assert_eq!(config.blur_kernel, MASK_BLUR_KERNEL);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScanConfig::load(Path::new("/nonexistent/scan.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ScanConfig::load(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_load_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        fs::write(&path, r#"{ "blur_kernel": 2 }"#).unwrap();
        assert!(matches!(
            ScanConfig::load(&path).unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }

    #[test]
    fn test_serialize_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let config = ScanConfig {
            min_region_area: 42.0,
            ..ScanConfig::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(ScanConfig::load(&path).unwrap(), config);
    }
}
