use std::collections::HashSet;

use crate::error::GraphError;
use crate::math::vector_2d::distance;
use crate::math::Point2;

use super::{NodeId, ProjectionGraph};

/// The longest arm of a projection graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arm {
    /// Length along the arm.
    pub length: f64,
    /// The degree-1 node the arm starts at.
    pub leaf: Point2,
    /// The first node of degree != 2 reached from the leaf.
    pub end: Point2,
}

impl ProjectionGraph {
    /// Counts branch points.
    ///
    /// With `degree == None` every node of degree >= 3 is counted, otherwise
    /// only nodes of exactly the given degree. Sensitive to resolution: a
    /// low-resolution image may merge or hide branch points.
    #[must_use]
    pub fn branch_point_count(&self, degree: Option<usize>) -> usize {
        self.nodes
            .values()
            .map(|n| n.neighbors.len())
            .filter(|&d| degree.map_or(d >= 3, |wanted| d == wanted))
            .count()
    }

    /// Sum of the lengths of all edges.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.edges().map(|e| e.length()).sum()
    }

    /// Degree-1 nodes in position order.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.ordered_nodes()
            .into_iter()
            .filter(|&id| self.degree(id) == 1)
            .collect()
    }

    /// The longest arm: a path from a leaf through degree-2 nodes up to the
    /// first node whose degree is not 2. On ties the first leaf in position
    /// order wins. Returns `None` if the graph has no leaves.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MalformedArm`] if a walk step finds anything but
    /// exactly one way to continue.
    pub fn longest_arm(&self) -> Result<Option<Arm>, GraphError> {
        let mut best: Option<Arm> = None;
        for leaf in self.leaves() {
            let (length, end) = self.walk_arm(leaf)?;
            if best.is_none_or(|b| length > b.length) {
                best = Some(Arm {
                    length,
                    leaf: self.position(leaf),
                    end: self.position(end),
                });
            }
        }
        Ok(best)
    }

    fn walk_arm(&self, leaf: NodeId) -> Result<(f64, NodeId), GraphError> {
        let mut length = 0.0;
        let mut previous: Option<NodeId> = None;
        let mut current = leaf;
        loop {
            let candidates: Vec<NodeId> = self
                .neighbors(current)
                .map(|(n, _)| n)
                .filter(|&n| Some(n) != previous)
                .collect();
            let [next] = candidates[..] else {
                let p = self.position(current);
                return Err(GraphError::MalformedArm {
                    x: p.x,
                    y: p.y,
                    candidates: candidates.len(),
                });
            };
            length += distance(&self.position(current), &self.position(next));
            if self.degree(next) != 2 {
                return Ok((length, next));
            }
            previous = Some(current);
            current = next;
        }
    }

    /// Straight-line distances between all pairs of leaves, longest first.
    #[must_use]
    pub fn leaf_leaf_distances(&self) -> Vec<f64> {
        let mut lengths: Vec<f64> = self
            .leaf_pairs()
            .into_iter()
            .map(|(d, _, _)| d)
            .collect();
        lengths.sort_by(|a, b| b.total_cmp(a));
        lengths
    }

    /// Leaf-to-leaf distances where every leaf is used at most once.
    ///
    /// Pairs are taken greedily, longest first, skipping pairs that reuse a
    /// leaf, so the result holds at most `leaves / 2` distances.
    #[must_use]
    pub fn some_leaf_leaf_distances(&self) -> Vec<f64> {
        let mut pairs = self.leaf_pairs();
        pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut used = HashSet::new();
        let mut lengths = Vec::new();
        for (d, a, b) in pairs {
            if used.contains(&a) || used.contains(&b) {
                continue;
            }
            lengths.push(d);
            used.insert(a);
            used.insert(b);
        }
        lengths
    }

    fn leaf_pairs(&self) -> Vec<(f64, NodeId, NodeId)> {
        let leaves = self.leaves();
        let mut pairs = Vec::new();
        for (i, &a) in leaves.iter().enumerate() {
            for &b in &leaves[i + 1..] {
                pairs.push((distance(&self.position(a), &self.position(b)), a, b));
            }
        }
        pairs
    }

    /// Length of the longest simple path in the graph.
    ///
    /// Enumerates every simple path, which is exponential in the number of
    /// nodes. Only call this on small, condensed graphs.
    #[must_use]
    pub fn maximal_path_length(&self) -> f64 {
        let mut best = 0.0_f64;
        let mut on_path = HashSet::new();
        for start in self.ordered_nodes() {
            on_path.insert(start);
            self.extend_paths(start, 0.0, &mut on_path, &mut best);
            on_path.remove(&start);
        }
        best
    }

    fn extend_paths(
        &self,
        node: NodeId,
        length: f64,
        on_path: &mut HashSet<NodeId>,
        best: &mut f64,
    ) {
        *best = best.max(length);
        let here = self.position(node);
        let neighbors: Vec<NodeId> = self.neighbors(node).map(|(n, _)| n).collect();
        for next in neighbors {
            if on_path.insert(next) {
                let step = distance(&here, &self.position(next));
                self.extend_paths(next, length + step, on_path, best);
                on_path.remove(&next);
            }
        }
    }

    /// Summed edge length along a path of adjacent nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if a node is not in the graph.
    pub fn path_length(&self, path: &[NodeId]) -> Result<f64, GraphError> {
        let mut length = 0.0;
        for pair in path.windows(2) {
            length += distance(&self.node(pair[0])?.point, &self.node(pair[1])?.point);
        }
        Ok(length)
    }
}
