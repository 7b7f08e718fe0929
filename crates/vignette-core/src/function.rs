//! Curves and functions used for motion paths and easing.

use glam::DVec2;

use crate::errors::FunctionError;

/// A cubic Bezier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicBezier {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Point on the curve for `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }
}

/// A flight path between two points on the ground.
///
/// The shape is a unit Bezier from `(0, 0)` to `(1, 0)` with caller-supplied
/// inner control points. It is stretched along the start-to-finish line and
/// its Y dimension is scaled by `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryBezier {
    start: DVec2,
    finish: DVec2,
    height: f64,
    shape: CubicBezier,
}

impl TrajectoryBezier {
    pub fn new(start: DVec2, finish: DVec2, shape_p1: DVec2, shape_p2: DVec2, height: f64) -> Self {
        Self {
            start,
            finish,
            height,
            shape: CubicBezier::new(DVec2::ZERO, shape_p1, shape_p2, DVec2::X),
        }
    }

    /// Point on the trajectory for `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let unit = self.shape.point_at(t);
        let delta = self.finish - self.start;
        DVec2::new(
            self.start.x + delta.x * unit.x,
            self.start.y + delta.y * unit.x + self.height * unit.y,
        )
    }
}

/// A piecewise linear function through a list of knots.
///
/// Between knots the function interpolates linearly. Beyond the first and
/// last knot it continues along the first and last segments. A single knot
/// gives a constant function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiecewiseLinearFunction {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PiecewiseLinearFunction {
    /// Build from knot coordinates. X values must be strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, FunctionError> {
        if xs.len() != ys.len() {
            return Err(FunctionError::KnotMismatch { xs: xs.len(), ys: ys.len() });
        }
        if xs.is_empty() {
            return Err(FunctionError::NoKnots);
        }
        if let Some(index) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(FunctionError::UnsortedKnots { index: index + 1 });
        }
        Ok(Self { xs, ys })
    }

    pub fn knot_count(&self) -> usize {
        self.xs.len()
    }

    /// Solve for Y at `x`.
    pub fn y_at(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 {
            return self.ys[0];
        }
        // index of the segment whose right knot is the first knot >= x, clamped to the end segments
        let upper = self.xs.partition_point(|&kx| kx < x).clamp(1, n - 1);
        let (x0, x1) = (self.xs[upper - 1], self.xs[upper]);
        let (y0, y1) = (self.ys[upper - 1], self.ys[upper]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_bezier_endpoints_and_midpoint() {
        let curve = CubicBezier::new(
            DVec2::ZERO,
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        );
        assert!(close(curve.point_at(0.0), DVec2::ZERO));
        assert!(close(curve.point_at(1.0), DVec2::new(1.0, 0.0)));
        assert!(close(curve.point_at(0.5), DVec2::new(0.5, 0.75)));
    }

    #[test]
    fn test_trajectory_fits_start_and_finish() {
        let start = DVec2::new(10.0, 20.0);
        let finish = DVec2::new(110.0, 40.0);
        let path = TrajectoryBezier::new(start, finish, DVec2::new(0.0, 1.0), DVec2::new(1.0, 1.0), 100.0);
        assert!(close(path.point_at(0.0), start));
        assert!(close(path.point_at(1.0), finish));
        // unit midpoint is (0.5, 0.75): halfway along, raised by 75
        assert!(close(path.point_at(0.5), DVec2::new(60.0, 30.0 + 75.0)));
    }

    #[test]
    fn test_piecewise_interpolation_and_rays() {
        let f = PiecewiseLinearFunction::new(vec![0.0, 10.0, 20.0], vec![0.0, 10.0, 0.0]).unwrap();
        assert!((f.y_at(5.0) - 5.0).abs() < 1e-9);
        assert!((f.y_at(10.0) - 10.0).abs() < 1e-9);
        assert!((f.y_at(15.0) - 5.0).abs() < 1e-9);
        assert!((f.y_at(-5.0) + 5.0).abs() < 1e-9);
        assert!((f.y_at(30.0) + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_piecewise_single_knot_is_constant() {
        let f = PiecewiseLinearFunction::new(vec![3.0], vec![7.0]).unwrap();
        assert_eq!(f.y_at(-100.0), 7.0);
        assert_eq!(f.y_at(100.0), 7.0);
    }

    #[test]
    fn test_piecewise_rejects_bad_knots() {
        assert_eq!(
            PiecewiseLinearFunction::new(vec![0.0, 1.0], vec![0.0]),
            Err(FunctionError::KnotMismatch { xs: 2, ys: 1 })
        );
        assert_eq!(PiecewiseLinearFunction::new(vec![], vec![]), Err(FunctionError::NoKnots));
        assert_eq!(
            PiecewiseLinearFunction::new(vec![0.0, 2.0, 2.0], vec![0.0, 1.0, 2.0]),
            Err(FunctionError::UnsortedKnots { index: 2 })
        );
    }
}
