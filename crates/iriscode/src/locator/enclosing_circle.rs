//! Minimal enclosing circle of a point set (Welzl, randomized
//! incremental form).
//!
//! The shuffle uses a fixed-seed RNG so the fit is bit-deterministic
//! for a given input; the pipeline's repeatability guarantee depends on
//! it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const SHUFFLE_SEED: u64 = 0x7a1e_55ed;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    fn contains(&self, p: [f64; 2]) -> bool {
        let dx = p[0] - self.cx;
        let dy = p[1] - self.cy;
        (dx * dx + dy * dy).sqrt() <= self.r + 1e-7
    }
}

/// Circle with the segment `ab` as diameter.
fn circle_from_two(a: [f64; 2], b: [f64; 2]) -> Circle {
    let cx = (a[0] + b[0]) / 2.0;
    let cy = (a[1] + b[1]) / 2.0;
    let dx = a[0] - cx;
    let dy = a[1] - cy;
    Circle {
        cx,
        cy,
        r: (dx * dx + dy * dy).sqrt(),
    }
}

/// Circumcircle of three points; `None` when they are (near) collinear.
fn circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<Circle> {
    let d = 2.0 * (a[0] * (b[1] - c[1]) + b[0] * (c[1] - a[1]) + c[0] * (a[1] - b[1]));
    if d.abs() < 1e-12 {
        return None;
    }
    let a2 = a[0] * a[0] + a[1] * a[1];
    let b2 = b[0] * b[0] + b[1] * b[1];
    let c2 = c[0] * c[0] + c[1] * c[1];
    let cx = (a2 * (b[1] - c[1]) + b2 * (c[1] - a[1]) + c2 * (a[1] - b[1])) / d;
    let cy = (a2 * (c[0] - b[0]) + b2 * (a[0] - c[0]) + c2 * (b[0] - a[0])) / d;
    let dx = a[0] - cx;
    let dy = a[1] - cy;
    Some(Circle {
        cx,
        cy,
        r: (dx * dx + dy * dy).sqrt(),
    })
}

/// Smallest circle through three possibly collinear points.
fn circle_from_three(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Circle {
    if let Some(circle) = circumcircle(a, b, c) {
        return circle;
    }
    // Collinear: widest pair as diameter.
    let ab = circle_from_two(a, b);
    let ac = circle_from_two(a, c);
    let bc = circle_from_two(b, c);
    let mut best = ab;
    if ac.r > best.r {
        best = ac;
    }
    if bc.r > best.r {
        best = bc;
    }
    best
}

/// Smallest circle enclosing `pts` with `p` and `q` on its boundary.
fn with_two_on_boundary(pts: &[[f64; 2]], p: [f64; 2], q: [f64; 2]) -> Circle {
    let mut circle = circle_from_two(p, q);
    for &s in pts {
        if !circle.contains(s) {
            circle = circle_from_three(s, p, q);
        }
    }
    circle
}

/// Smallest circle enclosing `pts` with `p` on its boundary.
fn with_one_on_boundary(pts: &[[f64; 2]], p: [f64; 2]) -> Circle {
    let mut circle = circle_from_two(pts[0], p);
    for j in 1..pts.len() {
        if !circle.contains(pts[j]) {
            circle = with_two_on_boundary(&pts[..j], pts[j], p);
        }
    }
    circle
}

/// Minimal enclosing circle of a point set.
///
/// Expected linear time after the seeded shuffle. An empty input yields
/// a degenerate zero circle at the origin.
pub(crate) fn min_enclosing_circle(points: &[[f64; 2]]) -> Circle {
    match points {
        [] => {
            return Circle {
                cx: 0.0,
                cy: 0.0,
                r: 0.0,
            }
        }
        [p] => {
            return Circle {
                cx: p[0],
                cy: p[1],
                r: 0.0,
            }
        }
        _ => {}
    }

    let mut pts = points.to_vec();
    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    pts.shuffle(&mut rng);

    let mut circle = circle_from_two(pts[0], pts[1]);
    for i in 2..pts.len() {
        if !circle.contains(pts[i]) {
            circle = with_one_on_boundary(&pts[..i], pts[i]);
        }
    }
    circle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn two_points_give_diameter_circle() {
        let c = min_enclosing_circle(&[[0.0, 0.0], [4.0, 0.0]]);
        assert_abs_diff_eq!(c.cx, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.cy, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.r, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn unit_square_circumcircle() {
        let c = min_enclosing_circle(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        assert_abs_diff_eq!(c.cx, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.cy, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.r, std::f64::consts::SQRT_2 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_points_use_widest_pair() {
        let c = min_enclosing_circle(&[[0.0, 0.0], [1.0, 0.0], [5.0, 0.0]]);
        assert_abs_diff_eq!(c.cx, 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.r, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn all_input_points_are_contained() {
        let pts: Vec<[f64; 2]> = (0..360)
            .map(|deg| {
                let t = f64::from(deg).to_radians();
                [30.0 + 12.0 * t.cos(), 40.0 + 12.0 * t.sin()]
            })
            .collect();
        let c = min_enclosing_circle(&pts);
        for p in &pts {
            assert!(c.contains(*p));
        }
        assert_abs_diff_eq!(c.r, 12.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.cx, 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.cy, 40.0, epsilon = 1e-6);
    }

    #[test]
    fn shuffle_is_deterministic() {
        let pts: Vec<[f64; 2]> = (0..100)
            .map(|i| [f64::from(i % 17), f64::from(i % 13)])
            .collect();
        assert_eq!(min_enclosing_circle(&pts), min_enclosing_circle(&pts));
    }
}
