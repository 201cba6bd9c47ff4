//! Minimal end-to-end comparison of two iris images.
//!
//! Usage: `cargo run --example basic_compare -- iris1.jpg iris2.jpg`

use iriscode::IrisMatcher;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path_a = args.next().ok_or("usage: basic_compare <imageA> <imageB>")?;
    let path_b = args.next().ok_or("usage: basic_compare <imageA> <imageB>")?;

    let image_a = image::open(&path_a)?;
    let image_b = image::open(&path_b)?;

    let matcher = IrisMatcher::new();
    let result = matcher.compare(&image_a, &image_b)?;

    println!(
        "{}: distance {:.4}, confidence {:.1}%",
        result.decision, result.normalized_distance, result.confidence
    );
    Ok(())
}
