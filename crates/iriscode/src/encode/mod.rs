//! Iris-code extraction from a polar image.
//!
//! Each orientation of the Gabor bank is correlated over the full polar
//! grid; each response map is binarized against its own mean (a per-map
//! adaptive threshold, recomputed on every call) and flattened row-major.
//! The four bit planes are concatenated in bank order.

mod gabor;

use crate::config::EncoderConfig;
use crate::polar::PolarImage;
use crate::IrisCode;

use gabor::{build_bank, GaborKernel};

/// Encodes polar images into fixed-length binary iris codes.
///
/// The kernel bank is built once at construction and never mutated, so
/// one encoder can serve any number of concurrent encodings. Encoding is
/// a pure function of the polar image and the configuration: identical
/// inputs always yield bit-identical codes.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    config: EncoderConfig,
    bank: Vec<GaborKernel>,
}

impl FeatureEncoder {
    /// Build the encoder and its kernel bank from a configuration.
    pub fn new(config: EncoderConfig) -> Self {
        let bank = build_bank(&config);
        Self { config, bank }
    }

    /// Access the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Code length produced for the given polar shape.
    pub fn code_len(&self, num_radial: usize, num_angular: usize) -> usize {
        num_radial * num_angular * self.bank.len()
    }

    /// Encode a polar image into an iris code.
    pub fn encode(&self, polar: &PolarImage) -> IrisCode {
        let rows = polar.num_radial();
        let cols = polar.num_angular();
        let mut bits = Vec::with_capacity(self.code_len(rows, cols));

        for kernel in &self.bank {
            let response = correlate(polar.as_raw(), rows, cols, kernel);
            binarize_response(&response, &mut bits);
        }
        IrisCode { bits }
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

/// Reflect-101 border index: `gfedcb | abcdefgh | gfedcba`.
#[inline]
fn reflect101(i: i64, n: i64) -> i64 {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut i = i % period;
    if i < 0 {
        i += period;
    }
    if i >= n {
        period - i
    } else {
        i
    }
}

/// Dense 2D correlation of a `u8` grid with a square kernel,
/// reflect-101 border handling, f32 response of the same shape.
fn correlate(src: &[u8], rows: usize, cols: usize, kernel: &GaborKernel) -> Vec<f32> {
    let half = (kernel.size / 2) as i64;
    let (rows_i, cols_i) = (rows as i64, cols as i64);
    let mut out = vec![0.0f32; rows * cols];

    for row in 0..rows_i {
        for col in 0..cols_i {
            let mut acc = 0.0f32;
            let mut w = 0usize;
            for ky in -half..=half {
                let sy = reflect101(row + ky, rows_i) as usize;
                let base = sy * cols;
                for kx in -half..=half {
                    let sx = reflect101(col + kx, cols_i) as usize;
                    acc += f32::from(src[base + sx]) * kernel.weights[w];
                    w += 1;
                }
            }
            out[(row * cols_i + col) as usize] = acc;
        }
    }
    out
}

/// Binarize one response map against its own mean and append the bits.
///
/// The threshold is derived from this map alone: each orientation
/// channel calibrates to its own response distribution, and nothing is
/// memoized across calls.
fn binarize_response(response: &[f32], bits: &mut Vec<u8>) {
    // f64 accumulation keeps the mean exact for constant maps, so a
    // flat response binarizes to all zeros instead of rounding noise.
    let mean = if response.is_empty() {
        0.0
    } else {
        response.iter().map(|&v| f64::from(v)).sum::<f64>() / response.len() as f64
    };
    bits.extend(response.iter().map(|&v| u8::from(f64::from(v) > mean)));
}
