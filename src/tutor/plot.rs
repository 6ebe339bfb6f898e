//! Dense sampling of the quadratic for the collaborator plotting layer.
//! Nothing is drawn here; the front end receives plain (x, y) pairs.

use serde::Serialize;

pub const X_MIN: f64 = -10.0;
pub const X_MAX: f64 = 10.0;
pub const SAMPLES: usize = 401;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    pub x_min: f64,
    pub x_max: f64,
    pub points: Vec<(f64, f64)>,
}

pub fn sample_quadratic(a: i64, b: i64, c: i64) -> Curve {
    let (a, b, c) = (a as f64, b as f64, c as f64);
    let step = (X_MAX - X_MIN) / (SAMPLES - 1) as f64;
    let points = (0..SAMPLES)
        .map(|i| {
            let x = X_MIN + step * i as f64;
            (x, a * x * x + b * x + c)
        })
        .collect();
    Curve {
        x_min: X_MIN,
        x_max: X_MAX,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_cover_the_fixed_domain() {
        let curve = sample_quadratic(1, 0, 0);
        assert_eq!(curve.points.len(), SAMPLES);
        let (x0, y0) = curve.points[0];
        let (xn, yn) = curve.points[SAMPLES - 1];
        assert!((x0 - X_MIN).abs() < 1e-12);
        assert!((xn - X_MAX).abs() < 1e-9);
        assert!((y0 - 100.0).abs() < 1e-9);
        assert!((yn - 100.0).abs() < 1e-9);
    }

    #[test]
    fn vertex_is_sampled_exactly_for_integer_grid() {
        // Step is 0.05, so x = 1 lands on the grid: f(1) = 1 - 2 + 1 = 0.
        let curve = sample_quadratic(1, -2, 1);
        let hit = curve
            .points
            .iter()
            .find(|(x, _)| (x - 1.0).abs() < 1e-9)
            .expect("x = 1 on grid");
        assert!(hit.1.abs() < 1e-9);
    }
}
