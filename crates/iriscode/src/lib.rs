//! iriscode — iris biometric matching pipeline.
//!
//! Given two images of an eye acquired against a dark background, decides
//! whether they show the same iris. The pipeline stages are:
//!
//! 1. **Locate** – segment the iris as the largest, most circular bright
//!    region and fit its minimal enclosing circle.
//! 2. **Unwrap** – resample the circular region into a fixed-size polar
//!    grid, removing scale and position dependence.
//! 3. **Encode** – filter the polar grid with an oriented Gabor bank and
//!    binarize each response against its own mean, producing a
//!    fixed-length iris code.
//! 4. **Match** – normalized Hamming distance between two codes, mapped
//!    onto calibrated decision bands.
//!
//! # Public API
//! - [`IrisMatcher`] and [`compare_irises`] as primary entry points
//! - [`PipelineConfig`] for tuning the calibration constants
//! - per-stage functions ([`locate`], [`unwrap`], [`FeatureEncoder`],
//!   [`match_codes`]) for callers that need individual stages
//!
//! Every stage is a pure function of its inputs: running the pipeline on
//! the same pair of images twice yields bit-identical codes and the same
//! result.

mod config;
mod debug;
mod encode;
mod locator;
mod matcher;
mod pipeline;
mod polar;
#[cfg(test)]
mod test_utils;

pub use config::{
    ConfigError, EncoderConfig, LocatorConfig, MatcherConfig, PipelineConfig, PolarConfig,
};
pub use debug::{DebugArtifacts, SideArtifacts};
pub use encode::FeatureEncoder;
pub use locator::{binarize, locate, locate_in_mask, SegmentationError};
pub use matcher::match_codes;
pub use pipeline::{compare_irises, CompareError, IrisMatcher, Side};
pub use polar::{unwrap, PolarImage};

/// Circular iris region in source-image pixel coordinates.
///
/// Produced by [`locate`], consumed by [`unwrap`]. The center may fall
/// outside the image bounds; polar sampling defines out-of-bounds pixels
/// as zero. Coordinates are truncated to whole pixels after the
/// enclosing-circle fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IrisLocation {
    /// Center (x, y) in image pixel coordinates.
    pub center: [i32; 2],
    /// Enclosing-circle radius in pixels, always >= 1.
    pub radius: i32,
}

/// Fixed-length binary iris signature.
///
/// Bit layout: for each filter orientation in bank order, the binarized
/// response map flattened row-major (radial-major, angular-minor). Length
/// is `num_radial * num_angular * num_orientations`, a pure function of
/// the encoder configuration, never of image content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrisCode {
    bits: Vec<u8>,
}

impl IrisCode {
    /// Build a code from raw bit values; any non-zero value becomes 1.
    pub fn from_bits(bits: Vec<u8>) -> Self {
        let bits = bits.into_iter().map(|b| u8::from(b != 0)).collect();
        Self { bits }
    }

    /// Bit values, each 0 or 1.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the code holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// Categorical outcome of comparing two iris codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDecision {
    /// Distance below the match threshold: same subject.
    Match,
    /// Distance inside the gray zone: manual verification needed.
    Uncertain,
    /// Distance at or above the upper bound: different subjects.
    NoMatch,
}

impl std::fmt::Display for MatchDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Uncertain => write!(f, "uncertain"),
            Self::NoMatch => write!(f, "no-match"),
        }
    }
}

/// Outcome of comparing two iris codes. Derived, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchResult {
    /// Number of differing bit positions over the compared prefix.
    pub differing_bits: usize,
    /// `differing_bits / min(len_a, len_b)`, in [0, 1].
    pub normalized_distance: f64,
    /// Decision band the distance falls into.
    pub decision: MatchDecision,
    /// `(1 - normalized_distance) * 100`, reported for every band.
    pub confidence: f64,
}
