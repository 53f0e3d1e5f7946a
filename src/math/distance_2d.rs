use super::Point2;

/// Parameter `t` of the projection of `point` onto the line through
/// `start` and `end`, clamped to `[0, 1]`.
///
/// A degenerate (zero-length) segment yields `0.0`.
#[must_use]
pub fn segment_parameter(start: &Point2, end: &Point2, point: &Point2) -> f64 {
    let d = end - start;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        return 0.0;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = (point - start).dot(&d) / len_sq;
    t.clamp(0.0, 1.0)
}

/// Returns the point on the segment from `start` to `end` closest to `point`.
///
/// When the projection falls outside the segment the matching endpoint is
/// returned exactly, so callers may compare the result against the endpoints.
#[must_use]
pub fn closest_point_on_segment(start: &Point2, end: &Point2, point: &Point2) -> Point2 {
    let t = segment_parameter(start, end, point);
    if t <= 0.0 {
        return *start;
    }
    if t >= 1.0 {
        return *end;
    }
    start + (end - start) * t
}
