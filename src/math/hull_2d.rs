use super::Point2;

/// Orientation of the triple `p`, `q`, `r`.
///
/// Positive if clockwise, negative if counter-clockwise, zero if collinear.
#[must_use]
pub fn orientation(p: &Point2, q: &Point2, r: &Point2) -> f64 {
    (q.y - p.y) * (r.x - p.x) - (q.x - p.x) * (r.y - p.y)
}

/// Upper and lower convex hull chains of a point set (Graham scan by x).
///
/// Points are sorted by `x`, then `y`. Both chains run from the leftmost to
/// the rightmost point; collinear points are dropped.
#[must_use]
pub fn hull_chains(points: &[Point2]) -> (Vec<Point2>, Vec<Point2>) {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut upper: Vec<Point2> = Vec::with_capacity(sorted.len());
    let mut lower: Vec<Point2> = Vec::with_capacity(sorted.len());
    for p in sorted {
        while upper.len() > 1 && turn(&upper, &p) <= 0.0 {
            upper.pop();
        }
        while lower.len() > 1 && turn(&lower, &p) >= 0.0 {
            lower.pop();
        }
        upper.push(p);
        lower.push(p);
    }
    (upper, lower)
}

/// Orientation of the last two chain points followed by `p`.
fn turn(chain: &[Point2], p: &Point2) -> f64 {
    let n = chain.len();
    orientation(&chain[n - 2], &chain[n - 1], p)
}

/// Antipodal pairs of a point set found with rotating calipers.
///
/// Each pair is touched by two parallel supporting lines of the convex hull.
#[must_use]
pub fn antipodal_pairs(points: &[Point2]) -> Vec<(Point2, Point2)> {
    let (upper, lower) = hull_chains(points);
    let mut pairs = Vec::new();
    if upper.is_empty() || lower.is_empty() {
        return pairs;
    }

    let mut i = 0;
    let mut j = lower.len() - 1;
    while i < upper.len() - 1 || j > 0 {
        pairs.push((upper[i], lower[j]));

        // All the way through one side of the hull: advance the other side.
        if i == upper.len() - 1 {
            j -= 1;
        } else if j == 0 {
            i += 1;
        } else if (upper[i + 1].y - upper[i].y) * (lower[j].x - lower[j - 1].x)
            > (lower[j].y - lower[j - 1].y) * (upper[i + 1].x - upper[i].x)
        {
            // Compare slopes of the next hull edges without dividing.
            i += 1;
        } else {
            j -= 1;
        }
    }
    pairs
}

/// Returns the two points of the set that are farthest apart.
///
/// Uses rotating calipers over the convex hull and keeps the pair with the
/// largest squared distance; on ties the first pair found wins. A set holding
/// a single distinct point returns that point twice, an empty set `None`.
#[must_use]
pub fn convex_hull_diameter(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = *points.first()?;

    let mut best = (first, first);
    let mut best_dist_sq = f64::NEG_INFINITY;
    for (p, q) in antipodal_pairs(points) {
        let d = (p - q).norm_squared();
        if d > best_dist_sq {
            best_dist_sq = d;
            best = (p, q);
        }
    }
    Some(best)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use spade::{DelaunayTriangulation, Triangulation};

    use super::*;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point2> {
        (0..n)
            .map(|_| p(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
            .collect()
    }

    fn brute_force_diameter(points: &[Point2]) -> f64 {
        let mut best = 0.0_f64;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                best = best.max(nalgebra::distance(a, b));
            }
        }
        best
    }

    #[test]
    fn orientation_signs() {
        // (0,0) → (1,0) → (1,1) turns left (counter-clockwise).
        assert!(orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)) < 0.0);
        assert!(orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0)) > 0.0);
        assert!(orientation(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0)).abs() < TOLERANCE);
    }

    #[test]
    fn chains_of_square_with_center() {
        let pts = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(0.0, 2.0), p(2.0, 2.0)];
        let (upper, lower) = hull_chains(&pts);
        // Ties on x sort by y, so (2, 2) is the rightmost point.
        assert_eq!(upper, vec![p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0)]);
        assert_eq!(lower, vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)]);
    }

    #[test]
    fn diameter_of_two_points() {
        let (a, b) = convex_hull_diameter(&[p(1.0, 1.0), p(4.0, 5.0)]).unwrap();
        assert!((nalgebra::distance(&a, &b) - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn diameter_of_single_and_empty_sets() {
        let (a, b) = convex_hull_diameter(&[p(3.0, -2.0), p(3.0, -2.0)]).unwrap();
        assert_eq!(a, b);
        assert!(convex_hull_diameter(&[]).is_none());
    }

    #[test]
    fn diameter_of_collinear_points() {
        let pts = vec![p(0.0, 0.0), p(1.0, 1.0), p(-3.0, -3.0), p(2.0, 2.0)];
        let (a, b) = convex_hull_diameter(&pts).unwrap();
        assert!((nalgebra::distance(&a, &b) - 5.0 * 2.0_f64.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn diameter_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for n in [3, 5, 10, 40, 200] {
            for _ in 0..20 {
                let pts = random_points(&mut rng, n);
                let (a, b) = convex_hull_diameter(&pts).unwrap();
                let expected = brute_force_diameter(&pts);
                assert!(
                    (nalgebra::distance(&a, &b) - expected).abs() < 1e-9,
                    "n={n}: calipers {} vs brute force {expected}",
                    nalgebra::distance(&a, &b)
                );
            }
        }
    }

    #[test]
    fn hull_chains_match_delaunay_hull() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let pts = random_points(&mut rng, 60);
            let (upper, lower) = hull_chains(&pts);
            let mut ours: Vec<(f64, f64)> =
                upper.iter().chain(&lower).map(|q| (q.x, q.y)).collect();
            ours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
            ours.dedup();

            let vertices: Vec<spade::Point2<f64>> =
                pts.iter().map(|q| spade::Point2::new(q.x, q.y)).collect();
            let triangulation =
                DelaunayTriangulation::<spade::Point2<f64>>::bulk_load(vertices).unwrap();
            let mut theirs: Vec<(f64, f64)> = triangulation
                .convex_hull()
                .map(|edge| {
                    let pos = edge.from().position();
                    (pos.x, pos.y)
                })
                .collect();
            theirs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

            assert_eq!(ours, theirs);
        }
    }
}
