use slotmap::SecondaryMap;
use tracing::debug;

use crate::error::Result;
use crate::math::distance_2d::closest_point_on_segment;
use crate::math::vector_2d::{distance, midpoint};
use crate::math::Point2;

use super::{same_point, NodeId, ProjectionGraph};

/// Merges graph nodes that lie closer together than a cutoff.
///
/// Scans node pairs in position order (see
/// [`ProjectionGraph::ordered_nodes`]) and replaces the first pair found
/// within `cutoff` by its midpoint, until no such pair is left. A cutoff of
/// zero or less leaves the graph untouched.
#[derive(Debug, Clone, Copy)]
pub struct CondensePoints {
    cutoff: f64,
}

impl CondensePoints {
    /// Creates a new `CondensePoints` operation.
    #[must_use]
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    /// Executes the condensation, returning the number of merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph loses a node while merging.
    pub fn execute(&self, graph: &mut ProjectionGraph) -> Result<usize> {
        if self.cutoff.is_nan() || self.cutoff <= 0.0 {
            return Ok(0);
        }
        let mut merges = 0;
        while let Some((a, b)) = self.find_close_pair(graph) {
            graph.merge_nodes(a, b)?;
            merges += 1;
        }
        if merges > 0 {
            debug!(cutoff = self.cutoff, merges, nodes = graph.node_count(), "condensed points");
        }
        Ok(merges)
    }

    fn find_close_pair(&self, graph: &ProjectionGraph) -> Option<(NodeId, NodeId)> {
        let order = graph.ordered_nodes();
        for (i, &a) in order.iter().enumerate() {
            let pa = graph.position(a);
            for &b in &order[i + 1..] {
                if distance(&pa, &graph.position(b)) < self.cutoff {
                    return Some((a, b));
                }
            }
        }
        None
    }
}

/// A node lying close to the interior of an edge it does not belong to.
#[derive(Debug, Clone, Copy)]
struct PointOnLine {
    source: NodeId,
    target: NodeId,
    node: NodeId,
    nearest: Point2,
}

/// Merges nodes with nearby points and nearby edges.
///
/// First runs [`CondensePoints`]. Then, while some node lies within `cutoff`
/// of the interior of an edge it is not part of, the node and its closest
/// point on the edge are merged into their midpoint: the edge is split there
/// and the node's edges move to the new point. Point condensation runs again
/// after every such merge.
#[derive(Debug, Clone, Copy)]
pub struct Condense {
    cutoff: f64,
}

impl Condense {
    /// Creates a new `Condense` operation.
    #[must_use]
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    /// Executes the condensation, returning the number of merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph loses a node while merging.
    pub fn execute(&self, graph: &mut ProjectionGraph) -> Result<usize> {
        if self.cutoff.is_nan() || self.cutoff <= 0.0 {
            return Ok(0);
        }
        let points = CondensePoints::new(self.cutoff);
        let mut merges = points.execute(graph)?;
        while let Some(hit) = self.find_point_on_line(graph) {
            Self::merge_with_line(graph, hit);
            merges += 1 + points.execute(graph)?;
        }
        debug!(cutoff = self.cutoff, merges, nodes = graph.node_count(), "condensed graph");
        Ok(merges)
    }

    fn find_point_on_line(&self, graph: &ProjectionGraph) -> Option<PointOnLine> {
        let order = graph.ordered_nodes();
        let mut rank = SecondaryMap::with_capacity(order.len());
        for (i, &id) in order.iter().enumerate() {
            rank.insert(id, i);
        }

        let mut edges: Vec<(NodeId, NodeId)> = graph
            .edges()
            .map(|e| if rank[e.a] < rank[e.b] { (e.a, e.b) } else { (e.b, e.a) })
            .collect();
        edges.sort_by_key(|&(s, t)| (rank[s], rank[t]));

        for (source, target) in edges {
            let (ps, pt) = (graph.position(source), graph.position(target));
            for &node in &order {
                if node == source || node == target {
                    continue;
                }
                let pn = graph.position(node);
                let nearest = closest_point_on_segment(&ps, &pt, &pn);
                if same_point(&nearest, &ps) || same_point(&nearest, &pt) {
                    continue;
                }
                if distance(&nearest, &pn) < self.cutoff {
                    return Some(PointOnLine {
                        source,
                        target,
                        node,
                        nearest,
                    });
                }
            }
        }
        None
    }

    fn merge_with_line(graph: &mut ProjectionGraph, hit: PointOnLine) {
        let PointOnLine {
            source,
            target,
            node,
            nearest,
        } = hit;
        let Some(label) = graph.remove_edge(source, target) else {
            return;
        };
        let merged = graph.add_node(midpoint(&graph.position(node), &nearest));
        graph.add_edge(source, merged, label.as_str());
        graph.add_edge(target, merged, label);

        if merged != node {
            let moved: Vec<(NodeId, String)> = graph
                .neighbors(node)
                .map(|(n, l)| (n, l.to_owned()))
                .collect();
            for (neighbor, label) in moved {
                graph.add_edge(merged, neighbor, label);
            }
            graph.remove_node(node);
        }
    }
}
