//! Iris segmentation: threshold, contour scoring, enclosing-circle fit.
//!
//! The iris is assumed to be the bright region of an image captured
//! against a dark backdrop. Candidate regions are the closed outer
//! boundaries of thresholded connected components; the winner is chosen
//! by a two-tier strategy:
//!
//! - **primary**: among contours with area above a minimum, maximize
//!   `area * circularity`. Favoring shapes that are both large and
//!   round rejects small specular highlights as well as large
//!   irregular shadows;
//! - **fallback**: when nothing passes the area filter, take the single
//!   largest contour, unweighted. Degraded but non-fatal.
//!
//! The boundary is deliberately fit with a coarse enclosing circle; no
//! sub-pixel ellipse refinement.

mod enclosing_circle;

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;

use crate::config::LocatorConfig;
use crate::IrisLocation;

use enclosing_circle::min_enclosing_circle;

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors that can occur during iris segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    /// The thresholded image contains no bright contour at all.
    NoContours {
        /// Source image width.
        width: u32,
        /// Source image height.
        height: u32,
    },
}

impl std::fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoContours { width, height } => {
                write!(f, "no bright contour found in {width}x{height} image")
            }
        }
    }
}

impl std::error::Error for SegmentationError {}

// ── Binarization ───────────────────────────────────────────────────────────

/// Global-threshold binarization: pixels strictly above `threshold`
/// become 255, the rest 0.
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut mask = GrayImage::new(gray.width(), gray.height());
    for (dst, src) in mask.iter_mut().zip(gray.iter()) {
        *dst = if *src > threshold { 255 } else { 0 };
    }
    mask
}

// ── Contour scoring ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct ContourStats {
    area: f64,
    perimeter: f64,
    circularity: f64,
}

/// Polygon area (shoelace) and closed perimeter of a boundary chain.
fn contour_stats(points: &[Point<i32>]) -> ContourStats {
    let n = points.len();
    if n < 2 {
        return ContourStats {
            area: 0.0,
            perimeter: 0.0,
            circularity: 0.0,
        };
    }
    let mut twice_area = 0.0f64;
    let mut perimeter = 0.0f64;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        twice_area += f64::from(p.x) * f64::from(q.y) - f64::from(q.x) * f64::from(p.y);
        let dx = f64::from(q.x - p.x);
        let dy = f64::from(q.y - p.y);
        perimeter += (dx * dx + dy * dy).sqrt();
    }
    let area = twice_area.abs() / 2.0;
    let circularity = if perimeter > 0.0 {
        4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
    } else {
        0.0
    };
    ContourStats {
        area,
        perimeter,
        circularity,
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    stats: ContourStats,
}

/// Primary tier: circularity-weighted score over contours that pass the
/// area filter.
fn select_primary(candidates: &[Candidate], min_area: f64) -> Option<usize> {
    candidates
        .iter()
        .filter(|c| c.stats.area >= min_area && c.stats.perimeter > 0.0)
        .max_by(|a, b| {
            let sa = a.stats.area * a.stats.circularity;
            let sb = b.stats.area * b.stats.circularity;
            sa.partial_cmp(&sb).unwrap()
        })
        .map(|c| c.index)
}

/// Fallback tier: single largest contour, no circularity weighting.
fn select_fallback(candidates: &[Candidate]) -> Option<usize> {
    candidates
        .iter()
        .max_by(|a, b| a.stats.area.partial_cmp(&b.stats.area).unwrap())
        .map(|c| c.index)
}

// ── Location ───────────────────────────────────────────────────────────────

/// Locate the iris in a grayscale image.
///
/// Binarizes at `config.binarize_threshold` and delegates to
/// [`locate_in_mask`]. Fails only when the mask holds no contour at all.
pub fn locate(
    gray: &GrayImage,
    config: &LocatorConfig,
) -> Result<IrisLocation, SegmentationError> {
    let mask = binarize(gray, config.binarize_threshold);
    locate_in_mask(&mask, config)
}

/// Locate the iris in an already-binarized mask (non-zero = foreground).
///
/// Exposed separately so debug collection can keep the intermediate mask.
pub fn locate_in_mask(
    mask: &GrayImage,
    config: &LocatorConfig,
) -> Result<IrisLocation, SegmentationError> {
    let contours: Vec<Contour<i32>> = find_contours(mask);
    let candidates: Vec<Candidate> = contours
        .iter()
        .enumerate()
        .filter(|(_, c)| c.border_type == BorderType::Outer)
        .map(|(index, c)| Candidate {
            index,
            stats: contour_stats(&c.points),
        })
        .collect();

    if candidates.is_empty() {
        return Err(SegmentationError::NoContours {
            width: mask.width(),
            height: mask.height(),
        });
    }

    let chosen = match select_primary(&candidates, config.min_contour_area) {
        Some(idx) => idx,
        None => {
            tracing::warn!(
                n_contours = candidates.len(),
                min_area = config.min_contour_area,
                "no contour passed the area filter, falling back to largest"
            );
            // candidates is non-empty here, so the fallback always yields
            let Some(idx) = select_fallback(&candidates) else {
                return Err(SegmentationError::NoContours {
                    width: mask.width(),
                    height: mask.height(),
                });
            };
            idx
        }
    };

    let points: Vec<[f64; 2]> = contours[chosen]
        .points
        .iter()
        .map(|p| [f64::from(p.x), f64::from(p.y)])
        .collect();
    let circle = min_enclosing_circle(&points);

    let location = IrisLocation {
        center: [circle.cx as i32, circle.cy as i32],
        radius: (circle.r as i32).max(1),
    };
    tracing::info!(
        cx = location.center[0],
        cy = location.center[1],
        radius = location.radius,
        n_contours = candidates.len(),
        "iris located"
    );
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{draw_disk_image, rect_image};

    #[test]
    fn binarize_is_strictly_above_threshold() {
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, image::Luma([30]));
        img.put_pixel(1, 0, image::Luma([31]));
        img.put_pixel(2, 0, image::Luma([0]));
        let mask = binarize(&img, 30);
        assert_eq!(mask.as_raw(), &vec![0, 255, 0]);
    }

    #[test]
    fn recovers_disk_center_and_radius() {
        let img = draw_disk_image(128, 128, [60.0, 55.0], 40.0, 200, 0);
        let loc = locate(&img, &LocatorConfig::default()).unwrap();
        assert!((loc.center[0] - 60).abs() <= 2, "cx = {}", loc.center[0]);
        assert!((loc.center[1] - 55).abs() <= 2, "cy = {}", loc.center[1]);
        let err = (f64::from(loc.radius) - 40.0).abs() / 40.0;
        assert!(err <= 0.05, "radius = {}", loc.radius);
    }

    #[test]
    fn all_black_image_fails_with_no_contours() {
        let img = GrayImage::new(64, 64);
        let err = locate(&img, &LocatorConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SegmentationError::NoContours {
                width: 64,
                height: 64
            }
        );
    }

    #[test]
    fn circularity_prefers_disk_over_larger_rectangle() {
        // The thin rectangle has slightly more area but far lower
        // circularity, so the area*circularity score keeps the disk.
        let mut img = draw_disk_image(200, 300, [60.0, 100.0], 30.0, 200, 0);
        rect_image(&mut img, 120, 20, 12, 250, 200);
        let loc = locate(&img, &LocatorConfig::default()).unwrap();
        assert!((loc.center[0] - 60).abs() <= 2);
        assert!((loc.center[1] - 100).abs() <= 2);
    }

    #[test]
    fn fallback_selects_largest_small_contour() {
        // Two bright dots, both below the 100 px^2 area filter.
        let mut img = draw_disk_image(64, 64, [20.0, 20.0], 4.0, 200, 0);
        let dot = draw_disk_image(64, 64, [45.0, 45.0], 2.0, 200, 0);
        for (dst, src) in img.iter_mut().zip(dot.iter()) {
            *dst = (*dst).max(*src);
        }
        let loc = locate(&img, &LocatorConfig::default()).unwrap();
        assert!((loc.center[0] - 20).abs() <= 2);
        assert!((loc.center[1] - 20).abs() <= 2);
        assert!(loc.radius >= 1);
    }

    #[test]
    fn disk_circularity_is_near_one() {
        let img = draw_disk_image(128, 128, [64.0, 64.0], 40.0, 200, 0);
        let mask = binarize(&img, 30);
        let contours: Vec<Contour<i32>> = find_contours(&mask);
        let outer = contours
            .iter()
            .find(|c| c.border_type == BorderType::Outer)
            .unwrap();
        let stats = contour_stats(&outer.points);
        // Pixel-chain perimeter overestimates the smooth boundary, so the
        // discrete circularity of a disk sits below 1.
        assert!(stats.circularity > 0.7 && stats.circularity <= 1.1);
        assert!(stats.area > 4000.0);
    }
}
