//! Shared synthetic-image helpers for unit tests.

use image::{GrayImage, Luma};

/// Render a solid disk of intensity `fg` on a `bg` background.
pub(crate) fn draw_disk_image(
    w: u32,
    h: u32,
    center: [f32; 2],
    radius: f32,
    fg: u8,
    bg: u8,
) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            let pix = if (dx * dx + dy * dy).sqrt() <= radius {
                fg
            } else {
                bg
            };
            img.put_pixel(x, y, Luma([pix]));
        }
    }
    img
}

/// Render a bright disk carrying deterministic high-frequency texture,
/// standing in for iris structure. Interior intensities stay above the
/// default segmentation threshold.
pub(crate) fn textured_disk_image(w: u32, h: u32, center: [f32; 2], radius: f32) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - center[0];
            let dy = y as f32 - center[1];
            if (dx * dx + dy * dy).sqrt() <= radius {
                let v = 40 + ((x * 7 + y * 13 + x * y) % 180) as u8;
                img.put_pixel(x, y, Luma([v]));
            }
        }
    }
    img
}

/// Paint a filled axis-aligned rectangle onto an existing image.
pub(crate) fn rect_image(img: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32, value: u8) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, Luma([value]));
        }
    }
}
