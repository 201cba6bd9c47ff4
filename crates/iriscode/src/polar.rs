//! Polar normalization of the located iris region.

use std::f64::consts::PI;

use image::GrayImage;

use crate::config::PolarConfig;
use crate::IrisLocation;

/// Fixed-shape polar resampling of the iris region.
///
/// Rows index radius (innermost row first), columns index angle over one
/// full turn. The shape is `num_radial x num_angular` for a given
/// configuration, independent of the source image resolution or iris
/// size; this is what removes scale and translation dependence before
/// encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarImage {
    image: GrayImage,
}

impl PolarImage {
    /// Number of radial rows.
    pub fn num_radial(&self) -> usize {
        self.image.height() as usize
    }

    /// Number of angular columns.
    pub fn num_angular(&self) -> usize {
        self.image.width() as usize
    }

    /// Grid as a grayscale image (row = radial index, column = angle).
    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    /// Consume into the underlying grayscale image.
    pub fn into_gray(self) -> GrayImage {
        self.image
    }

    /// Raw row-major intensities.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Resample the circular iris region into a polar grid.
///
/// Radial sampling is linear from the center outward:
/// `r = radius * r_idx / num_radial` for `r_idx` in `[0, num_radial)`.
/// The inclusive-exclusive convention means the outermost row samples at
/// `radius * (num_radial - 1) / num_radial`, never the boundary radius
/// itself. Angles step `2*pi / num_angular`. Source pixels are read at
/// truncated integer coordinates with no interpolation; coordinates
/// outside the image map to 0.
pub fn unwrap(gray: &GrayImage, location: &IrisLocation, config: &PolarConfig) -> PolarImage {
    let (width, height) = gray.dimensions();
    let mut out = GrayImage::new(config.num_angular as u32, config.num_radial as u32);

    let cx = f64::from(location.center[0]);
    let cy = f64::from(location.center[1]);

    for r_idx in 0..config.num_radial {
        let r = (i64::from(location.radius) * r_idx as i64) / config.num_radial as i64;
        let r = r as f64;
        for theta_idx in 0..config.num_angular {
            let angle = 2.0 * PI * theta_idx as f64 / config.num_angular as f64;
            let x = (cx + r * angle.cos()) as i64;
            let y = (cy + r * angle.sin()) as i64;
            let value = if x >= 0 && x < i64::from(width) && y >= 0 && y < i64::from(height) {
                gray.get_pixel(x as u32, y as u32)[0]
            } else {
                0
            };
            out.put_pixel(theta_idx as u32, r_idx as u32, image::Luma([value]));
        }
    }

    PolarImage { image: out }
}
