/*
    This module decides properties of the language a grammar generates
*/

use log::debug;

use crate::grammar::*;
use crate::graph::DiGraph;

impl Grammar {
    /// The language is empty when the start variable derives no terminal word.
    pub fn empty_language(&self) -> bool {
        !self.determine_variables_replaced_by_terminals().contains(&self.start)
    }

    /// Nodes are the variables, with an edge `A -> B` whenever some rule
    /// `A -> αBβ` exists.
    pub fn derivation_graph(&self) -> DiGraph<Variable> {
        let mut graph = DiGraph::new();
        for variable in &self.variables {
            graph.add_node(variable.clone());
        }
        for rule in &self.rules {
            for variable in rule.right.iter().filter_map(Symbol::as_variable) {
                graph.add_edge(rule.left.clone(), variable.clone());
            }
        }
        graph
    }

    /// The language is infinite iff the derivation graph of the cleaned up
    /// grammar has a cycle. The cleanup runs on a copy.
    pub fn infinite_language(&self) -> bool {
        let mut cleaned = self.clone();
        cleaned.delete_null_productions();
        cleaned.delete_unit_productions();
        cleaned.delete_useless_symbols_productions();

        let graph = cleaned.derivation_graph();
        let infinite = graph.has_cycle();
        debug!(
            "Derivation graph with {} edges is {}",
            graph.edge_count(),
            if infinite { "cyclic" } else { "acyclic" }
        );
        infinite
    }
}
