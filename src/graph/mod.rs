/*
    A small directed graph, enough to find the cycles of a derivation graph
*/

use std::hash::Hash;

use indexmap::IndexSet;

#[derive(Debug, Clone)]
pub struct DiGraph<N> {
    nodes: IndexSet<N>,
    // Successor indices per node, in insertion order
    edges: Vec<IndexSet<usize>>,
}

impl<N: Clone + Eq + Hash> Default for DiGraph<N> {
    fn default() -> Self {
        DiGraph { nodes: IndexSet::new(), edges: Vec::new() }
    }
}

impl<N: Clone + Eq + Hash> DiGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the node, adding it if needed.
    pub fn add_node(&mut self, node: N) -> usize {
        let (index, inserted) = self.nodes.insert_full(node);
        if inserted {
            self.edges.push(IndexSet::new());
        }
        index
    }

    pub fn add_edge(&mut self, from: N, to: N) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.edges[from].insert(to);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        match (self.nodes.get_index_of(from), self.nodes.get_index_of(to)) {
            (Some(from), Some(to)) => self.edges[from].contains(&to),
            _ => false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(IndexSet::len).sum()
    }

    /// Whether some simple cycle exists, by depth first search with node
    /// colouring.
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Colour { White, Grey, Black }

        let mut colour = vec![Colour::White; self.nodes.len()];
        for root in 0..self.nodes.len() {
            if colour[root] != Colour::White {
                continue;
            }
            // (node, index of the next successor to visit)
            let mut stack = vec![(root, 0)];
            colour[root] = Colour::Grey;
            while let Some((node, next)) = stack.last_mut() {
                let node = *node;
                match self.edges[node].get_index(*next) {
                    Some(&successor) => {
                        *next += 1;
                        match colour[successor] {
                            Colour::Grey => return true,
                            Colour::White => {
                                colour[successor] = Colour::Grey;
                                stack.push((successor, 0));
                            }
                            Colour::Black => {}
                        }
                    }
                    None => {
                        colour[node] = Colour::Black;
                        stack.pop();
                    }
                }
            }
        }
        false
    }

    /// Every elementary cycle once, as the list of its nodes starting at the
    /// node that was inserted first.
    pub fn simple_cycles(&self) -> Vec<Vec<N>> {
        let mut cycles = Vec::new();
        for root in 0..self.nodes.len() {
            let mut path = vec![root];
            let mut on_path = vec![false; self.nodes.len()];
            on_path[root] = true;
            self.extend_cycles(root, &mut path, &mut on_path, &mut cycles);
        }
        cycles
    }

    // Only nodes after the root are walked through, so each cycle is found
    // from its smallest node only
    fn extend_cycles(&self, root: usize, path: &mut Vec<usize>, on_path: &mut [bool], cycles: &mut Vec<Vec<N>>) {
        let Some(&last) = path.last() else {
            return;
        };
        for &successor in &self.edges[last] {
            if successor == root {
                cycles.push(path.iter().map(|&i| self.nodes[i].clone()).collect());
            } else if successor > root && !on_path[successor] {
                on_path[successor] = true;
                path.push(successor);
                self.extend_cycles(root, path, on_path, cycles);
                path.pop();
                on_path[successor] = false;
            }
        }
    }
}
