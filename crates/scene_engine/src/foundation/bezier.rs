//! Bezier paths used by procedural transform modifiers

use super::math::{utils::lerp_vec3, Vec3};

/// Bezier curve over `N` control points, evaluated with De Casteljau's algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve<const N: usize> {
    points: [Vec3; N],
}

impl<const N: usize> BezierCurve<N> {
    /// Create a curve from its control points
    pub const fn new(points: [Vec3; N]) -> Self {
        Self { points }
    }

    /// Control points in order
    pub const fn points(&self) -> &[Vec3; N] {
        &self.points
    }

    /// Point on the curve at parameter `t` (0 = first point, 1 = last point)
    pub fn evaluate(&self, t: f32) -> Vec3 {
        if N == 0 {
            return Vec3::zeros();
        }

        let mut points = self.points;
        for level in (1..N).rev() {
            for i in 0..level {
                points[i] = lerp_vec3(&points[i], &points[i + 1], t);
            }
        }
        points[0]
    }
}

/// Sequence of curves sharing the parameter range `[0, 1]`
///
/// Each curve gets an equal slice of the range. Parameters past the end
/// clamp to the last curve's end point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BezierList<const N: usize> {
    curves: Vec<BezierCurve<N>>,
}

impl<const N: usize> BezierList<N> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self { curves: Vec::new() }
    }

    /// Create a list from existing curves
    pub fn from_curves(curves: Vec<BezierCurve<N>>) -> Self {
        Self { curves }
    }

    /// Append a curve (fluent)
    pub fn add_curve(&mut self, curve: BezierCurve<N>) -> &mut Self {
        self.curves.push(curve);
        self
    }

    /// Number of curves in the list
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the list has no curves
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Point on the path at parameter `t`; the origin for an empty list
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let Some(last) = self.curves.last() else {
            return Vec3::zeros();
        };

        let scaled = t.max(0.0) * self.curves.len() as f32;
        let index = scaled.floor() as usize;
        if index >= self.curves.len() {
            return last.evaluate(1.0);
        }

        self.curves[index].evaluate(scaled - index as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quadratic() -> BezierCurve<3> {
        BezierCurve::new([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn test_curve_endpoints() {
        let curve = quadratic();
        assert_relative_eq!(curve.evaluate(0.0), Vec3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(curve.evaluate(1.0), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_quadratic_midpoint() {
        // 0.25 * P0 + 0.5 * P1 + 0.25 * P2
        assert_relative_eq!(quadratic().evaluate(0.5), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_linear_curve_is_lerp() {
        let curve = BezierCurve::new([Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 8.0)]);
        assert_relative_eq!(curve.evaluate(0.25), Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_empty_list_is_origin() {
        let list = BezierList::<3>::new();
        assert_relative_eq!(list.evaluate(0.3), Vec3::zeros());
    }

    #[test]
    fn test_list_splits_range_between_curves() {
        let first = BezierCurve::new([Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
        let second = BezierCurve::new([Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 4.0, 0.0)]);
        let mut list = BezierList::new();
        list.add_curve(first).add_curve(second);

        assert_relative_eq!(list.evaluate(0.25), Vec3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(list.evaluate(0.75), Vec3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(list.evaluate(1.0), Vec3::new(1.0, 4.0, 0.0));
        assert_relative_eq!(list.evaluate(7.0), Vec3::new(1.0, 4.0, 0.0));
    }
}
