//! Oriented Gabor band-pass kernels.

use crate::config::EncoderConfig;

/// Square real-valued kernel with odd support.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GaborKernel {
    /// Support side length (odd).
    pub size: usize,
    /// Row-major weights, `size * size` entries.
    pub weights: Vec<f32>,
}

/// Build one oriented Gabor kernel.
///
/// Gaussian envelope times an oriented cosine carrier:
/// `exp(-(x'^2 + gamma^2 y'^2) / (2 sigma^2)) * cos(2 pi x' / lambda + psi)`
/// with `x', y'` the coordinates rotated by `theta`.
pub(crate) fn gabor_kernel(config: &EncoderConfig, theta: f32) -> GaborKernel {
    let size = config.kernel_size;
    let half = (size / 2) as i32;
    let sigma2 = 2.0 * config.sigma * config.sigma;
    let gamma2 = config.aspect_ratio * config.aspect_ratio;
    let freq = 2.0 * std::f32::consts::PI / config.wavelength;
    let (sin_t, cos_t) = theta.sin_cos();

    let mut weights = Vec::with_capacity(size * size);
    for y in -half..=half {
        for x in -half..=half {
            let xf = x as f32;
            let yf = y as f32;
            let xr = xf * cos_t + yf * sin_t;
            let yr = -xf * sin_t + yf * cos_t;
            let envelope = (-(xr * xr + gamma2 * yr * yr) / sigma2).exp();
            let carrier = (freq * xr + config.phase).cos();
            weights.push(envelope * carrier);
        }
    }
    GaborKernel { size, weights }
}

/// Build the full orientation bank. Immutable after construction, so a
/// single bank is safely shared across concurrent encodings.
pub(crate) fn build_bank(config: &EncoderConfig) -> Vec<GaborKernel> {
    config
        .orientations
        .iter()
        .map(|&theta| gabor_kernel(config, theta))
        .collect()
}
