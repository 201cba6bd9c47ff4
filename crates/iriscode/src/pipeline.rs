//! Pipeline orchestration: locate → unwrap → encode per side, then
//! match. Stateless; each comparison owns all of its buffers.

use image::DynamicImage;

use crate::config::{ConfigError, PipelineConfig};
use crate::debug::{annotate, DebugArtifacts, SideArtifacts};
use crate::encode::FeatureEncoder;
use crate::locator::{binarize, locate_in_mask, SegmentationError};
use crate::matcher::match_codes;
use crate::polar::unwrap;
use crate::{IrisCode, MatchResult};

// ── Error type ─────────────────────────────────────────────────────────────

/// Which input image a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// First image.
    A,
    /// Second image.
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "image A"),
            Self::B => write!(f, "image B"),
        }
    }
}

/// Errors that abort a comparison.
///
/// A comparison is all-or-nothing: if either side fails to segment, no
/// partial or best-guess [`MatchResult`] is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareError {
    /// The supplied configuration is inconsistent.
    Config(ConfigError),
    /// Segmentation failed on one side.
    Segmentation {
        /// Which input failed.
        side: Side,
        /// Underlying segmentation failure.
        source: SegmentationError,
    },
}

impl std::fmt::Display for CompareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Segmentation { side, source } => {
                write!(f, "segmentation failed on {side}: {source}")
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Segmentation { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for CompareError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Matcher ────────────────────────────────────────────────────────────────

/// Primary comparison interface.
///
/// Wraps a [`PipelineConfig`] and a prebuilt Gabor bank. Create once,
/// compare many pairs; the matcher holds no per-comparison state and is
/// safe to share across threads.
pub struct IrisMatcher {
    config: PipelineConfig,
    encoder: FeatureEncoder,
}

impl IrisMatcher {
    /// Create a matcher with the default calibration constants.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create with full config control.
    pub fn with_config(config: PipelineConfig) -> Self {
        let encoder = FeatureEncoder::new(config.encoder.clone());
        Self { config, encoder }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace the configuration (rebuilds the kernel bank).
    pub fn set_config(&mut self, config: PipelineConfig) {
        self.encoder = FeatureEncoder::new(config.encoder.clone());
        self.config = config;
    }

    /// Compare two eye images.
    ///
    /// Runs the full pipeline on each side and scores the two codes.
    /// Fails fast if the configuration is invalid or either side cannot
    /// be segmented; no degraded result is ever produced.
    pub fn compare(
        &self,
        image_a: &DynamicImage,
        image_b: &DynamicImage,
    ) -> Result<MatchResult, CompareError> {
        self.config.validate()?;
        let code_a = self.encode_side(image_a, Side::A, None)?;
        let code_b = self.encode_side(image_b, Side::B, None)?;
        Ok(self.score(&code_a, &code_b))
    }

    /// Compare two eye images, collecting diagnostic artifacts.
    ///
    /// Artifacts for stages reached before a failure are still returned
    /// alongside the error.
    pub fn compare_with_debug(
        &self,
        image_a: &DynamicImage,
        image_b: &DynamicImage,
    ) -> (Result<MatchResult, CompareError>, DebugArtifacts) {
        let mut artifacts = DebugArtifacts::default();
        if let Err(e) = self.config.validate() {
            return (Err(e.into()), artifacts);
        }
        let result = (|| {
            let code_a = self.encode_side(image_a, Side::A, Some(&mut artifacts.a))?;
            let code_b = self.encode_side(image_b, Side::B, Some(&mut artifacts.b))?;
            Ok(self.score(&code_a, &code_b))
        })();
        (result, artifacts)
    }

    /// Encode one image into an iris code.
    pub fn encode_image(&self, image: &DynamicImage, side: Side) -> Result<IrisCode, CompareError> {
        self.config.validate()?;
        self.encode_side(image, side, None)
    }

    fn encode_side(
        &self,
        image: &DynamicImage,
        side: Side,
        mut debug: Option<&mut SideArtifacts>,
    ) -> Result<IrisCode, CompareError> {
        let gray = image.to_luma8();

        let mask = binarize(&gray, self.config.locator.binarize_threshold);
        if let Some(d) = debug.as_deref_mut() {
            d.mask = Some(mask.clone());
        }

        let location = locate_in_mask(&mask, &self.config.locator)
            .map_err(|source| CompareError::Segmentation { side, source })?;
        if let Some(d) = debug.as_deref_mut() {
            d.overlay = Some(annotate(&gray, &location));
        }

        let polar = unwrap(&gray, &location, &self.config.polar);
        tracing::info!(
            ?side,
            num_radial = polar.num_radial(),
            num_angular = polar.num_angular(),
            "polar normalization done"
        );
        if let Some(d) = debug.as_deref_mut() {
            d.polar = Some(polar.as_gray().clone());
        }

        let code = self.encoder.encode(&polar);
        tracing::info!(?side, code_bits = code.len(), "iris code extracted");
        Ok(code)
    }

    fn score(&self, code_a: &IrisCode, code_b: &IrisCode) -> MatchResult {
        let result = match_codes(code_a, code_b, &self.config.matcher);
        tracing::info!(
            differing_bits = result.differing_bits,
            normalized_distance = result.normalized_distance,
            decision = %result.decision,
            "codes compared"
        );
        result
    }
}

impl Default for IrisMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two eye images with an explicit configuration.
///
/// One-shot form of [`IrisMatcher::compare`] for callers that do not
/// reuse the kernel bank.
pub fn compare_irises(
    image_a: &DynamicImage,
    image_b: &DynamicImage,
    config: &PipelineConfig,
) -> Result<MatchResult, CompareError> {
    IrisMatcher::with_config(config.clone()).compare(image_a, image_b)
}
