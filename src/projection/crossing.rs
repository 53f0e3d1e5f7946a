use std::collections::BTreeMap;

use crate::math::intersect_2d::segment_intersection;
use crate::math::Point2;

use super::Segment;

/// A point where a segment meets another one.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub point: Point2,
    /// Key of the other segment.
    pub other: String,
}

/// Crossings of every segment, keyed by segment key.
pub type CrossingPoints = BTreeMap<String, Vec<Crossing>>;

/// Intersects every unordered pair of segments.
///
/// Each crossing is recorded under both segment keys.
#[must_use]
pub fn find_crossings(segments: &BTreeMap<String, Segment>) -> CrossingPoints {
    let mut crossings = CrossingPoints::new();
    let entries: Vec<(&String, &Segment)> = segments.iter().collect();
    for (i, (key1, seg1)) in entries.iter().enumerate() {
        for (key2, seg2) in &entries[i + 1..] {
            let Some(point) = segment_intersection(&seg1.start, &seg1.end, &seg2.start, &seg2.end)
            else {
                continue;
            };
            crossings.entry((*key1).clone()).or_default().push(Crossing {
                point,
                other: (*key2).clone(),
            });
            crossings.entry((*key2).clone()).or_default().push(Crossing {
                point,
                other: (*key1).clone(),
            });
        }
    }
    crossings
}
