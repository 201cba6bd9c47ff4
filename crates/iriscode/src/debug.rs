//! Diagnostic artifact collection.
//!
//! Debug output is a side channel: it never influences the matching
//! contract. Artifacts are collected in memory and left to the caller
//! (typically the CLI) to persist.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};

use crate::IrisLocation;

/// Intermediate images collected for one side of a comparison.
///
/// Stages that were never reached (for example after a segmentation
/// failure) leave their artifact unset.
#[derive(Debug, Clone, Default)]
pub struct SideArtifacts {
    /// Binarized segmentation mask.
    pub mask: Option<GrayImage>,
    /// Source image with the detected circle and center drawn in.
    pub overlay: Option<RgbImage>,
    /// Polar-unwrapped iris region.
    pub polar: Option<GrayImage>,
}

/// Diagnostic artifacts for both sides of a comparison.
#[derive(Debug, Clone, Default)]
pub struct DebugArtifacts {
    /// First image's artifacts.
    pub a: SideArtifacts,
    /// Second image's artifacts.
    pub b: SideArtifacts,
}

const CIRCLE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CENTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Render the detection overlay: source image in RGB with the enclosing
/// circle and a center cross drawn on top.
pub(crate) fn annotate(gray: &GrayImage, location: &IrisLocation) -> RgbImage {
    let mut canvas = RgbImage::new(gray.width(), gray.height());
    for (dst, src) in canvas.pixels_mut().zip(gray.pixels()) {
        let v = src[0];
        *dst = Rgb([v, v, v]);
    }
    draw_hollow_circle_mut(
        &mut canvas,
        (location.center[0], location.center[1]),
        location.radius,
        CIRCLE_COLOR,
    );
    draw_cross_mut(
        &mut canvas,
        CENTER_COLOR,
        location.center[0],
        location.center[1],
    );
    canvas
}
