use std::collections::{HashMap, HashSet};

use super::{NodeId, ProjectionGraph};

impl ProjectionGraph {
    /// Returns a cycle basis of the graph.
    ///
    /// Each cycle is a list of nodes; consecutive nodes (and the last and
    /// first) are adjacent. Roots are taken in position order, so the basis
    /// is reproducible for a given graph. For every connected component a
    /// spanning tree is grown depth-first and each non-tree edge closes one
    /// cycle with the tree paths (Paton's algorithm).
    #[must_use]
    pub fn cycle_basis(&self) -> Vec<Vec<NodeId>> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<NodeId> = HashSet::new();

        for root in self.ordered_nodes() {
            if visited.contains(&root) {
                continue;
            }
            let mut stack = vec![root];
            let mut pred: HashMap<NodeId, NodeId> = HashMap::from([(root, root)]);
            let mut used: HashMap<NodeId, HashSet<NodeId>> =
                HashMap::from([(root, HashSet::new())]);

            while let Some(z) = stack.pop() {
                let neighbors: Vec<NodeId> = self.neighbors(z).map(|(n, _)| n).collect();
                for nbr in neighbors {
                    if !used.contains_key(&nbr) {
                        pred.insert(nbr, z);
                        stack.push(nbr);
                        used.insert(nbr, HashSet::from([z]));
                    } else if !used[&z].contains(&nbr) {
                        let pn = &used[&nbr];
                        let mut cycle = vec![nbr, z];
                        let mut p = pred[&z];
                        while !pn.contains(&p) {
                            cycle.push(p);
                            p = pred[&p];
                        }
                        cycle.push(p);
                        cycles.push(cycle);
                        if let Some(set) = used.get_mut(&nbr) {
                            set.insert(z);
                        }
                    }
                }
            }
            visited.extend(pred.keys());
        }
        cycles
    }

    /// Number of cycles of length > 1 in the cycle basis.
    #[must_use]
    pub fn cycle_basis_len(&self) -> usize {
        self.cycle_basis().iter().filter(|c| c.len() > 1).count()
    }
}
