//! Pipeline configuration.
//!
//! All empirically tuned constants live here rather than as literals in
//! the stage code: the segmentation threshold, minimum contour area,
//! Gabor bank parameters and decision bands were calibrated for one
//! acquisition setup (dark backdrop, diffuse illumination) and a
//! different setup will want different values.

use std::f32::consts::PI;

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors raised by [`PipelineConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Polar resolution must be positive in both dimensions.
    ZeroResolution {
        /// Which dimension is zero (`num_radial` or `num_angular`).
        what: &'static str,
    },
    /// Gabor kernel support must be odd and at least 3.
    InvalidKernelSize {
        /// Provided kernel size.
        size: usize,
    },
    /// Encoder needs at least one orientation and finite positive
    /// scale/frequency parameters.
    InvalidFilterBank {
        /// Human-readable description of the offending parameter.
        reason: &'static str,
    },
    /// Minimum contour area must be positive and finite.
    InvalidMinArea {
        /// Provided value.
        value: f64,
    },
    /// Decision bands must satisfy `0 < match < uncertain < 1`.
    InvalidBands {
        /// Lower band boundary (match threshold).
        match_threshold: f64,
        /// Upper band boundary (uncertain threshold).
        uncertain_threshold: f64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroResolution { what } => {
                write!(f, "polar resolution {what} must be positive")
            }
            Self::InvalidKernelSize { size } => {
                write!(f, "gabor kernel size must be odd and >= 3, got {size}")
            }
            Self::InvalidFilterBank { reason } => {
                write!(f, "invalid filter bank: {reason}")
            }
            Self::InvalidMinArea { value } => {
                write!(f, "minimum contour area must be positive, got {value}")
            }
            Self::InvalidBands {
                match_threshold,
                uncertain_threshold,
            } => write!(
                f,
                "decision bands must satisfy 0 < match < uncertain < 1, got ({match_threshold}, {uncertain_threshold})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ── Stage configs ──────────────────────────────────────────────────────────

/// Iris segmentation parameters.
///
/// Assumes acquisition against a dark backdrop: the iris is the bright
/// region, the background is near-black. This is a documented
/// precondition, not a general-purpose segmenter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Global intensity threshold separating iris from background.
    /// Pixels strictly above it are foreground.
    pub binarize_threshold: u8,
    /// Contours below this area (px^2) are excluded from the
    /// circularity-weighted primary scorer.
    pub min_contour_area: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            binarize_threshold: 30,
            min_contour_area: 100.0,
        }
    }
}

/// Polar resampling resolution.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PolarConfig {
    /// Number of radial sampling rows (center outward).
    pub num_radial: usize,
    /// Number of angular sampling columns over a full turn.
    pub num_angular: usize,
}

impl Default for PolarConfig {
    fn default() -> Self {
        Self {
            num_radial: 64,
            num_angular: 360,
        }
    }
}

/// Gabor filter-bank parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Square kernel support in pixels (odd).
    pub kernel_size: usize,
    /// Gaussian envelope sigma.
    pub sigma: f32,
    /// Sinusoid wavelength (pixels per cycle).
    pub wavelength: f32,
    /// Spatial aspect ratio of the envelope (gamma).
    pub aspect_ratio: f32,
    /// Phase offset of the sinusoid (psi), radians.
    pub phase: f32,
    /// Filter orientations in radians, one code plane per entry.
    pub orientations: Vec<f32>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            kernel_size: 21,
            sigma: 5.0,
            wavelength: 10.0,
            aspect_ratio: 0.5,
            phase: 0.0,
            orientations: vec![0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0],
        }
    }
}

/// Decision-band boundaries on the normalized Hamming distance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Distances strictly below this are a match.
    pub match_threshold: f64,
    /// Distances in `[match_threshold, uncertain_threshold)` are
    /// uncertain; at or above, a no-match.
    pub uncertain_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.32,
            uncertain_threshold: 0.40,
        }
    }
}

/// Full pipeline configuration, one section per stage.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Iris segmentation.
    pub locator: LocatorConfig,
    /// Polar resampling.
    pub polar: PolarConfig,
    /// Gabor encoding.
    pub encoder: EncoderConfig,
    /// Distance classification.
    pub matcher: MatcherConfig,
}

impl PipelineConfig {
    /// Check cross-field consistency. The pipeline runs this before any
    /// stage; stage functions themselves assume a validated config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polar.num_radial == 0 {
            return Err(ConfigError::ZeroResolution { what: "num_radial" });
        }
        if self.polar.num_angular == 0 {
            return Err(ConfigError::ZeroResolution {
                what: "num_angular",
            });
        }
        let k = self.encoder.kernel_size;
        if k < 3 || k % 2 == 0 {
            return Err(ConfigError::InvalidKernelSize { size: k });
        }
        if self.encoder.orientations.is_empty() {
            return Err(ConfigError::InvalidFilterBank {
                reason: "orientations must not be empty",
            });
        }
        if !(self.encoder.sigma.is_finite() && self.encoder.sigma > 0.0) {
            return Err(ConfigError::InvalidFilterBank {
                reason: "sigma must be finite and positive",
            });
        }
        if !(self.encoder.wavelength.is_finite() && self.encoder.wavelength > 0.0) {
            return Err(ConfigError::InvalidFilterBank {
                reason: "wavelength must be finite and positive",
            });
        }
        if !(self.locator.min_contour_area.is_finite() && self.locator.min_contour_area > 0.0) {
            return Err(ConfigError::InvalidMinArea {
                value: self.locator.min_contour_area,
            });
        }
        let (lo, hi) = (
            self.matcher.match_threshold,
            self.matcher.uncertain_threshold,
        );
        if !(lo.is_finite() && hi.is_finite() && 0.0 < lo && lo < hi && hi < 1.0) {
            return Err(ConfigError::InvalidBands {
                match_threshold: lo,
                uncertain_threshold: hi,
            });
        }
        Ok(())
    }
}
