use super::Point2;

/// Rotates a point around the origin by `degrees` (counter-clockwise).
#[must_use]
pub fn rotate_2d(point: &Point2, degrees: f64) -> Point2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Point2::new(
        point.x * cos - point.y * sin,
        point.x * sin + point.y * cos,
    )
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p: &Point2, q: &Point2) -> f64 {
    nalgebra::distance(p, q)
}

/// The point halfway between `p` and `q`.
#[must_use]
pub fn midpoint(p: &Point2, q: &Point2) -> Point2 {
    nalgebra::center(p, q)
}

/// Arithmetic mean of a set of points, or `None` if the set is empty.
#[must_use]
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Point2> {
    let mut count = 0_u32;
    let mut sum = nalgebra::Vector2::zeros();
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(Point2::from(sum / f64::from(count)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate_2d(&Point2::new(1.0, 0.0), 90.0);
        assert!(p.x.abs() < TOLERANCE, "x={}", p.x);
        assert!((p.y - 1.0).abs() < TOLERANCE, "y={}", p.y);
    }

    #[test]
    fn rotate_negative_angle_is_clockwise() {
        let p = rotate_2d(&Point2::new(0.0, 2.0), -90.0);
        assert!((p.x - 2.0).abs() < TOLERANCE);
        assert!(p.y.abs() < TOLERANCE);
    }

    #[test]
    fn distance_3_4_5() {
        let d = distance(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn midpoint_basic() {
        let m = midpoint(&Point2::new(-2.0, 1.0), &Point2::new(4.0, 3.0));
        assert!((m.x - 1.0).abs() < TOLERANCE);
        assert!((m.y - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let c = centroid(&pts).unwrap();
        assert!((c.x - 1.0).abs() < TOLERANCE);
        assert!((c.y - 1.0).abs() < TOLERANCE);
        assert!(centroid(std::iter::empty()).is_none());
    }
}
