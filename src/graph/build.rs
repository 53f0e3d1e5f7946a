use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::projection::{CrossingPoints, Segment};

use super::{CondensePoints, NodeId, ProjectionGraph};

/// Cutoff of the clean-up pass run right after construction. It only merges
/// points that differ by floating-point noise.
const DUPLICATE_CUTOFF: f64 = 1e-11;

/// Builds the planar graph of a set of projected segments.
///
/// Every segment is split at its crossing points; consecutive points along
/// the segment are joined by edges labelled with the segment's key.
#[derive(Debug)]
pub struct BuildGraph<'a> {
    segments: &'a BTreeMap<String, Segment>,
    crossings: &'a CrossingPoints,
}

impl<'a> BuildGraph<'a> {
    /// Creates a new graph-building operation.
    #[must_use]
    pub fn new(segments: &'a BTreeMap<String, Segment>, crossings: &'a CrossingPoints) -> Self {
        Self {
            segments,
            crossings,
        }
    }

    /// Executes the construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the clean-up condensation fails.
    pub fn execute(&self) -> Result<ProjectionGraph> {
        let mut graph = ProjectionGraph::new();

        for (key, segment) in self.segments {
            let mut points = vec![segment.start, segment.end];
            if let Some(crossings) = self.crossings.get(key) {
                points.extend(crossings.iter().map(|c| c.point));
            }

            // Order along the segment direction.
            let dir = segment.end - segment.start;
            points.sort_by(|p, q| {
                (p - segment.start)
                    .dot(&dir)
                    .total_cmp(&(q - segment.start).dot(&dir))
            });

            let ids: Vec<NodeId> = points.into_iter().map(|p| graph.add_node(p)).collect();
            for pair in ids.windows(2) {
                graph.add_edge(pair[0], pair[1], key.as_str());
            }
        }

        let merged = CondensePoints::new(DUPLICATE_CUTOFF).execute(&mut graph)?;
        debug!(
            segments = self.segments.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            merged,
            "built projection graph"
        );
        Ok(graph)
    }
}
