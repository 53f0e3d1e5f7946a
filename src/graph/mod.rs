mod build;
mod condense;
mod cycles;
mod descriptors;

pub use build::BuildGraph;
pub use condense::{Condense, CondensePoints};
pub use descriptors::Arm;

use std::collections::BTreeMap;
use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::GraphError;
use crate::math::vector_2d::midpoint;
use crate::math::Point2;

/// Grid spacing used to quantize coordinates into node identities.
pub const POINT_RESOLUTION: f64 = 1e-9;

slotmap::new_key_type! {
    /// Unique identifier for a node in the projection graph.
    pub struct NodeId;
}

/// Tolerance-aware identity of a 2D point.
///
/// Two points map to the same key when their coordinates round to the same
/// cell of a [`POINT_RESOLUTION`] grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(i64, i64);

impl PointKey {
    /// Quantizes a point.
    ///
    /// Coordinates must be finite. Cells are stored as `i64`, so coordinates
    /// beyond about `9.2e9` in magnitude saturate and share a key.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn of(point: &Point2) -> Self {
        Self(
            (point.x / POINT_RESOLUTION).round() as i64,
            (point.y / POINT_RESOLUTION).round() as i64,
        )
    }
}

/// Returns `true` if `p` and `q` are the same graph point.
#[must_use]
pub fn same_point(p: &Point2, q: &Point2) -> bool {
    PointKey::of(p) == PointKey::of(q)
}

/// Data associated with a graph node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The 2D position of the node.
    pub point: Point2,
    /// Adjacent nodes and the element key labelling each edge.
    neighbors: BTreeMap<NodeId, String>,
}

/// An undirected edge, reported once per node pair.
#[derive(Debug, Clone, Copy)]
pub struct GraphEdge<'a> {
    pub a: NodeId,
    pub b: NodeId,
    pub start: Point2,
    pub end: Point2,
    /// Key of the element this edge was cut from.
    pub label: &'a str,
}

impl GraphEdge<'_> {
    /// Euclidean length of the edge.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }
}

/// Planar graph of a projection.
///
/// Nodes are 2D points (segment endpoints and crossing points), edges carry
/// the key of the element they belong to. The graph is simple: adding an
/// existing edge overwrites its label and self-loops are never stored.
#[derive(Debug, Clone, Default)]
pub struct ProjectionGraph {
    nodes: SlotMap<NodeId, NodeData>,
    index: HashMap<PointKey, NodeId>,
}

impl ProjectionGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Returns the node at `point`, inserting it if no node occupies that
    /// position yet.
    pub fn add_node(&mut self, point: Point2) -> NodeId {
        let key = PointKey::of(&point);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.nodes.insert(NodeData {
            point,
            neighbors: BTreeMap::new(),
        });
        self.index.insert(key, id);
        id
    }

    /// Looks up the node at `point`.
    #[must_use]
    pub fn find_node(&self, point: &Point2) -> Option<NodeId> {
        self.index.get(&PointKey::of(point)).copied()
    }

    /// Returns the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node was removed.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, GraphError> {
        self.nodes.get(id).ok_or(GraphError::NodeNotFound)
    }

    /// Position of a node known to be in the graph.
    pub(crate) fn position(&self, id: NodeId) -> Point2 {
        self.nodes[id].point
    }

    /// Removes a node together with all its edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<NodeData> {
        let data = self.nodes.remove(id)?;
        for neighbor in data.neighbors.keys() {
            if let Some(n) = self.nodes.get_mut(*neighbor) {
                n.neighbors.remove(&id);
            }
        }
        self.index.remove(&PointKey::of(&data.point));
        Some(data)
    }

    /// Connects two nodes with an edge labelled `label`.
    ///
    /// Self-loops are ignored; an existing edge gets the new label.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, label: impl Into<String>) {
        if a == b || !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return;
        }
        let label = label.into();
        self.nodes[a].neighbors.insert(b, label.clone());
        self.nodes[b].neighbors.insert(a, label);
    }

    /// Removes the edge between `a` and `b`, returning its label.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Option<String> {
        let label = self.nodes.get_mut(a)?.neighbors.remove(&b)?;
        if let Some(n) = self.nodes.get_mut(b) {
            n.neighbors.remove(&a);
        }
        Some(label)
    }

    /// Returns `true` if `a` and `b` are adjacent.
    #[must_use]
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes
            .get(a)
            .is_some_and(|n| n.neighbors.contains_key(&b))
    }

    /// Label of the edge between `a` and `b`.
    #[must_use]
    pub fn edge_label(&self, a: NodeId, b: NodeId) -> Option<&str> {
        self.nodes.get(a)?.neighbors.get(&b).map(String::as_str)
    }

    /// Neighbors of a node with the labels of the connecting edges.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|n| n.neighbors.iter().map(|(k, l)| (*k, l.as_str())))
    }

    /// Number of edges incident to a node (0 for unknown nodes).
    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes.get(id).map_or(0, |n| n.neighbors.len())
    }

    /// All nodes with their positions, in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Point2)> + '_ {
        self.nodes.iter().map(|(id, n)| (id, n.point))
    }

    /// Node ids sorted by position, `x` first, then `y`.
    ///
    /// This is the traversal order of every scan that has to pick one of
    /// several candidates, which makes condensation deterministic.
    #[must_use]
    pub fn ordered_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().collect();
        ids.sort_by(|&a, &b| {
            let (pa, pb) = (self.nodes[a].point, self.nodes[b].point);
            pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
        });
        ids
    }

    /// All edges, each reported once.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge<'_>> {
        self.nodes.iter().flat_map(move |(a, data)| {
            data.neighbors
                .iter()
                .filter(move |(b, _)| a < **b)
                .map(move |(&b, label)| GraphEdge {
                    a,
                    b,
                    start: data.point,
                    end: self.nodes[b].point,
                    label,
                })
        })
    }

    /// Replaces two nodes by a single node at their midpoint.
    ///
    /// All edges of either node are reattached to the new node; the edge
    /// between them (if any) disappears. If the midpoint coincides with an
    /// existing node, that node absorbs the edges instead.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either node is missing.
    pub fn merge_nodes(&mut self, a: NodeId, b: NodeId) -> Result<NodeId, GraphError> {
        let pa = self.node(a)?.point;
        let pb = self.node(b)?.point;
        if a == b {
            return Ok(a);
        }
        let mid = midpoint(&pa, &pb);
        let mid_key = PointKey::of(&mid);

        let reattach: Vec<(NodeId, String)> = [a, b]
            .iter()
            .flat_map(|&id| self.nodes[id].neighbors.clone())
            .filter(|(n, _)| *n != a && *n != b)
            .collect();

        for id in [a, b] {
            if PointKey::of(&self.nodes[id].point) != mid_key {
                self.remove_node(id);
            }
        }
        let merged = self.add_node(mid);
        for (neighbor, label) in reattach {
            self.add_edge(merged, neighbor, label);
        }
        Ok(merged)
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
    fn add_node_reuses_coincident_point() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(1.0, 2.0));
        let b = g.add_node(p(1.0 + 1e-13, 2.0 - 1e-13));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
        assert!(same_point(&p(0.1 + 0.2, 0.0), &p(0.3, 0.0)));
    }

    #[test]
    fn keys_saturate_far_from_origin() {
        assert_eq!(PointKey::of(&p(1e10, 0.0)), PointKey::of(&p(2e10, 0.0)));
        assert_ne!(PointKey::of(&p(1e9, 0.0)), PointKey::of(&p(2e9, 0.0)));
    }

    #[test]
    fn self_loops_are_not_stored() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(0.0, 0.0));
        g.add_edge(a, a, "s0");
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree(a), 0);
    }

    #[test]
    fn edges_are_undirected_and_relabelled() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(0.0, 0.0));
        let b = g.add_node(p(3.0, 4.0));
        g.add_edge(a, b, "s0");
        g.add_edge(b, a, "h1");
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_label(a, b), Some("h1"));
        let edge = g.edges().next().unwrap();
        assert!((edge.length() - 5.0).abs() < 1e-12);
        assert_eq!(g.remove_edge(a, b).as_deref(), Some("h1"));
        assert!(!g.has_edge(b, a));
    }

    #[test]
    fn remove_node_detaches_edges() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(0.0, 0.0));
        let b = g.add_node(p(1.0, 0.0));
        let c = g.add_node(p(2.0, 0.0));
        g.add_edge(a, b, "s0");
        g.add_edge(b, c, "s0");
        g.remove_node(b);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree(a), 0);
        assert!(g.find_node(&p(1.0, 0.0)).is_none());
        assert!(g.node(b).is_err());
    }

    #[test]
    fn merge_reattaches_neighbors() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(0.0, 0.0));
        let b = g.add_node(p(0.0, 2.0));
        let left = g.add_node(p(-5.0, 0.0));
        let right = g.add_node(p(5.0, 2.0));
        g.add_edge(a, b, "i0");
        g.add_edge(a, left, "s0");
        g.add_edge(b, right, "s1");

        let m = g.merge_nodes(a, b).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!((g.position(m) - p(0.0, 1.0)).norm() < 1e-12);
        assert_eq!(g.edge_label(m, left), Some("s0"));
        assert_eq!(g.edge_label(m, right), Some("s1"));
    }

    #[test]
    fn merge_into_existing_midpoint_node() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(0.0, 0.0));
        let b = g.add_node(p(2.0, 0.0));
        let c = g.add_node(p(1.0, 0.0));
        let top = g.add_node(p(1.0, 5.0));
        g.add_edge(a, top, "h0");
        g.add_edge(c, b, "s0");

        let m = g.merge_nodes(a, b).unwrap();
        assert_eq!(m, c);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_label(c, top), Some("h0"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn ordered_nodes_sort_by_x_then_y() {
        let mut g = ProjectionGraph::new();
        let a = g.add_node(p(1.0, 1.0));
        let b = g.add_node(p(0.0, 5.0));
        let c = g.add_node(p(1.0, -1.0));
        assert_eq!(g.ordered_nodes(), vec![b, c, a]);
    }
}
