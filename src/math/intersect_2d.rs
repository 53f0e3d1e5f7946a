use super::{Point2, Vector2, TOLERANCE};

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns the single intersection point of segments `a0→a1` and `b0→b1`, or
/// `None` if they do not meet. Parallel segments only intersect when they are
/// collinear and touch in exactly one point (end to end); overlapping
/// collinear segments yield `None`.
///
/// Coordinates must be finite. The parallel test compares the raw cross
/// product of the two directions against [`TOLERANCE`], so segments shorter
/// than about `1e-5` count as parallel and their crossings are not found.
#[must_use]
pub fn segment_intersection(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(&da, &db);
    if cross.abs() < TOLERANCE {
        return collinear_touch(a0, a1, b0, b1);
    }

    let d = b0 - a0;
    let t = cross_2d(&d, &db) / cross;
    let u = cross_2d(&d, &da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        Some(a0 + da * t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Touch point of two parallel segments that share a single endpoint on a
/// common line.
fn collinear_touch(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    let da = a1 - a0;
    let len_sq = da.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    // Not on the same line.
    if cross_2d(&da, &(b0 - a0)).abs() > TOLERANCE * len_sq.sqrt() {
        return None;
    }

    let tb0 = (b0 - a0).dot(&da) / len_sq;
    let tb1 = (b1 - a0).dot(&da) / len_sq;
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);
    if (hi - lo).abs() < TOLERANCE {
        Some(a0 + da * lo)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_segment_crossing() {
        let pt = segment_intersection(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
            .unwrap();
        assert!((pt.x - 1.0).abs() < TOLERANCE);
        assert!((pt.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_no_crossing() {
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0)).is_none()
        );
    }

    #[test]
    fn lines_cross_outside_segments() {
        // The supporting lines meet at (3, 0), beyond the first segment.
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(3.0, -1.0), &p(3.0, 1.0)).is_none()
        );
    }

    #[test]
    fn t_junction_touches_endpoint() {
        let pt = segment_intersection(&p(0.0, 0.0), &p(4.0, 0.0), &p(2.0, 0.0), &p(2.0, 3.0))
            .unwrap();
        assert!((pt.x - 2.0).abs() < TOLERANCE);
        assert!(pt.y.abs() < TOLERANCE);
    }

    #[test]
    fn collinear_overlap_yields_none() {
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)).is_none()
        );
    }

    #[test]
    fn collinear_end_to_end_touch() {
        let pt = segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(2.0, 0.0), &p(5.0, 0.0))
            .unwrap();
        assert!((pt.x - 2.0).abs() < TOLERANCE);
        assert!(pt.y.abs() < TOLERANCE);
    }

    #[test]
    fn tiny_segments_count_as_parallel() {
        // A real crossing at (0, 0), but the cross product is 4e-12.
        let s = 1e-6;
        assert!(segment_intersection(&p(-s, 0.0), &p(s, 0.0), &p(0.0, -s), &p(0.0, s)).is_none());
        let s = 1e-3;
        assert!(segment_intersection(&p(-s, 0.0), &p(s, 0.0), &p(0.0, -s), &p(0.0, s)).is_some());
    }

    #[test]
    fn parallel_offset_yields_none() {
        assert!(
            segment_intersection(&p(0.0, 0.0), &p(2.0, 0.0), &p(2.0, 1.0), &p(5.0, 1.0)).is_none()
        );
    }
}
