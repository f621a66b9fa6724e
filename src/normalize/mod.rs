/*
    This module removes null, unit and useless productions from a grammar
*/

use std::collections::VecDeque;

use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;

use crate::grammar::*;

impl Grammar {
    // Left parts of null rules, then of rules made only of nullable variables
    pub fn compute_nullable_variables(&self) -> IndexSet<Variable> {
        let mut nullable = IndexSet::new();

        loop {
            let mut changed = false;
            for rule in &self.rules {
                if nullable.contains(&rule.left) {
                    continue;
                }
                let all_nullable = rule.right.iter()
                    .all(|symbol| symbol.as_variable().is_some_and(|v| nullable.contains(v)));
                if all_nullable {
                    nullable.insert(rule.left.clone());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        nullable
    }

    /// Deletes the null rules. Every other rule is compensated with a copy
    /// for each non-empty subset of its nullable positions, where the symbols
    /// at those positions are dropped. The empty word leaves the language.
    pub fn delete_null_productions(&mut self) {
        let nullable = self.compute_nullable_variables();
        debug!("Nullable variables: {{{}}}", nullable.iter().join(", "));

        let before = self.rules.len();
        self.rules.retain(|rule| !rule.is_null());
        debug!("Deleted {} null productions", before - self.rules.len());

        let snapshot = self.rules.iter().cloned().collect_vec();
        let mut added = 0;
        for rule in &snapshot {
            let positions = rule.right.iter()
                .positions(|symbol| symbol.as_variable().is_some_and(|v| nullable.contains(v)))
                .collect_vec();

            for dropped in positions.into_iter().powerset().filter(|subset| !subset.is_empty()) {
                let right = rule.right.iter()
                    .enumerate()
                    .filter(|(i, _)| !dropped.contains(i))
                    .map(|(_, symbol)| symbol.clone())
                    .collect_vec();
                if !right.is_empty() && self.add_rule(Rule::new(rule.left.clone(), right)) {
                    added += 1;
                }
            }
        }
        debug!("Added {} compensating productions", added);
    }

    // (A, B) such that B derives from A through unit rules only
    pub fn compute_derivable_pairs(&self) -> IndexSet<(Variable, Variable)> {
        let mut pairs: IndexSet<(Variable, Variable)> = self.rules.iter()
            .filter(|rule| rule.is_unit())
            .filter_map(|rule| rule.first_variable().map(|b| (rule.left.clone(), b.clone())))
            .collect();

        loop {
            let composed = pairs.iter()
                .cartesian_product(pairs.iter())
                .filter(|((_, b), (c, _))| b == c)
                .map(|((a, _), (_, d))| (a.clone(), d.clone()))
                .filter(|pair| !pairs.contains(pair))
                .collect_vec();
            if composed.is_empty() {
                break;
            }
            pairs.extend(composed);
        }

        pairs
    }

    /// Deletes the unit rules `A -> B`, adding `A -> α` for every derivable
    /// pair `(A, B)` and every remaining rule `B -> α`.
    pub fn delete_unit_productions(&mut self) {
        let pairs = self.compute_derivable_pairs();
        debug!(
            "Derivable pairs: {{{}}}",
            pairs.iter().map(|(a, b)| format!("({}, {})", a, b)).join(", ")
        );

        let before = self.rules.len();
        self.rules.retain(|rule| !rule.is_unit());
        debug!("Deleted {} unit productions", before - self.rules.len());

        let snapshot = self.rules.iter().cloned().collect_vec();
        let mut added = 0;
        for (a, b) in &pairs {
            for rule in snapshot.iter().filter(|rule| rule.left == *b) {
                if self.add_rule(Rule::new(a.clone(), rule.right.clone())) {
                    added += 1;
                }
            }
        }
        debug!("Added {} productions replacing unit chains", added);
    }

    pub fn determine_variables_replaced_by_terminals(&self) -> IndexSet<Variable> {
        let mut generating = IndexSet::new();

        loop {
            let mut changed = false;
            for rule in &self.rules {
                if generating.contains(&rule.left) {
                    continue;
                }
                let all_generating = rule.right.iter().all(|symbol| match symbol {
                    Symbol::Terminal(_) => true,
                    Symbol::Variable(v) => generating.contains(v),
                });
                if all_generating {
                    generating.insert(rule.left.clone());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        generating
    }

    // The start variable stays even when it derives nothing, its rules don't
    pub fn delete_variables_not_replaced_by_terminals(&mut self) {
        let generating = self.determine_variables_replaced_by_terminals();
        let dead = self.variables.iter()
            .filter(|v| !generating.contains(*v))
            .cloned()
            .collect_vec();
        debug!("Variables not replaced by terminals: {{{}}}", dead.iter().join(", "));

        for variable in dead {
            self.delete_rules_with_symbol(&Symbol::Variable(variable.clone()));
            if variable != self.start {
                self.remove_variable(&variable);
            }
        }
    }

    pub fn delete_symbols_not_reachable(&mut self) {
        let mut reached_variables = IndexSet::from([self.start.clone()]);
        let mut reached_terminals = IndexSet::new();
        let mut queue = VecDeque::from([self.start.clone()]);

        while let Some(variable) = queue.pop_front() {
            for rule in self.rules_of(&variable) {
                for symbol in &rule.right {
                    match symbol {
                        Symbol::Variable(v) => {
                            if reached_variables.insert(v.clone()) {
                                queue.push_back(v.clone());
                            }
                        }
                        Symbol::Terminal(t) => {
                            reached_terminals.insert(t.clone());
                        }
                    }
                }
            }
        }

        let lost_variables = self.variables.iter()
            .filter(|v| !reached_variables.contains(*v))
            .cloned()
            .collect_vec();
        let lost_terminals = self.terminals.iter()
            .filter(|t| !reached_terminals.contains(*t))
            .cloned()
            .collect_vec();
        debug!(
            "Unreachable symbols: {{{}}}",
            lost_variables.iter().map(|v| format!("<{}>", v)).chain(lost_terminals.iter().cloned()).join(", ")
        );

        for variable in lost_variables {
            self.delete_rules_with_symbol(&Symbol::Variable(variable.clone()));
            self.remove_variable(&variable);
        }
        for terminal in lost_terminals {
            self.delete_rules_with_symbol(&Symbol::Terminal(terminal.clone()));
            self.remove_terminal(&terminal);
        }
    }

    // Non generating symbols go first, removing them can leave others unreachable
    pub fn delete_useless_symbols_productions(&mut self) {
        self.delete_variables_not_replaced_by_terminals();
        self.delete_symbols_not_reachable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grammar(text: &str) -> Grammar {
        text.parse().unwrap()
    }

    fn rules(grammar: &Grammar) -> Vec<String> {
        grammar.rules().iter().map(Rule::to_string).sorted().collect()
    }

    fn variables(names: &[&str]) -> IndexSet<Variable> {
        names.iter().map(|name| Variable::named(*name)).collect()
    }

    #[test]
    fn nullable_fixpoint() {
        let g = grammar("
            V = {S,A,B,C}
            T = {a}
            <S> -> <A><B>|a<C>
            <A> ->
            <B> -> <A><A>|a
            <C> -> <C>a
        ");

        assert_eq!(g.compute_nullable_variables(), variables(&["A", "B", "S"]));
    }

    #[test]
    fn null_compensation_drops_only_nullable_positions() {
        let mut g = grammar("
            V = {A,X,Y,Z}
            T = {x,z}
            <A> -> <X><Y><Z>
            <X> -> x
            <Y> ->
            <Z> -> z
        ");

        g.delete_null_productions();

        let of_a = g.rules_of(&Variable::named("A")).map(Rule::to_string).collect_vec();
        assert_eq!(of_a, vec!["<A> -> <X><Y><Z>", "<A> -> <X><Z>"]);
        assert!(g.rules().iter().all(|rule| !rule.is_null()));
    }

    #[test]
    fn null_compensation_by_position() {
        let mut g = grammar("
            V = {S,X}
            T = {a}
            <S> -> <X><X>
            <X> -> a|
        ");

        g.delete_null_productions();

        assert_eq!(rules(&g), vec!["<S> -> <X>", "<S> -> <X><X>", "<X> -> a"]);
    }

    #[test]
    fn null_deletion_idempotent() {
        let mut g = grammar("
            V = {S,A}
            T = {a,b}
            <S> -> a<S>b|<A>
            <A> -> <A>a|
        ");

        g.delete_null_productions();
        let once = rules(&g);
        g.delete_null_productions();

        assert_eq!(rules(&g), once);
    }

    #[test]
    fn derivable_pairs_closure() {
        let g = grammar("
            V = {A,B,C}
            T = {c}
            <A> -> <B>
            <B> -> <C>
            <C> -> c
        ");
        let pairs = g.compute_derivable_pairs().into_iter()
            .map(|(a, b)| format!("{}{}", a, b))
            .sorted()
            .collect_vec();

        assert_eq!(pairs, vec!["AB", "AC", "BC"]);
    }

    #[test]
    fn unit_deletion() {
        let mut g = grammar("
            V = {A,B,C}
            T = {b,c}
            <A> -> <B>
            <B> -> <C>|b
            <C> -> c
        ");

        g.delete_unit_productions();

        assert_eq!(rules(&g), vec!["<A> -> b", "<A> -> c", "<B> -> b", "<B> -> c", "<C> -> c"]);

        let once = rules(&g);
        g.delete_unit_productions();
        assert_eq!(rules(&g), once);
    }

    #[test]
    fn unit_cycle() {
        let mut g = grammar("
            V = {A,B}
            T = {a,b}
            <A> -> <B>|a
            <B> -> <A>|b
        ");

        g.delete_unit_productions();

        assert_eq!(rules(&g), vec!["<A> -> a", "<A> -> b", "<B> -> a", "<B> -> b"]);
    }

    #[test]
    fn generating_variables() {
        let g = grammar("
            V = {S,A,B,C}
            T = {a,b}
            <S> -> <A><B>|<C>
            <A> -> a
            <B> -> <A>b
            <C> -> <C>a
        ");

        assert_eq!(g.determine_variables_replaced_by_terminals(), variables(&["A", "B", "S"]));
    }

    #[test]
    fn start_survives_when_not_generating() {
        let mut g = grammar("
            V = {S,A}
            T = {a}
            <S> -> <A>
            <A> -> a<A>
        ");

        g.delete_variables_not_replaced_by_terminals();

        assert_eq!(g.variables(), &variables(&["S"]));
        assert!(g.rules().is_empty());
    }

    #[test]
    fn unreachable_symbols() {
        let mut g = grammar("
            V = {S,A,B}
            T = {a,b,c}
            <S> -> a<A>
            <A> -> a
            <B> -> b|c
        ");

        g.delete_symbols_not_reachable();

        assert_eq!(g.variables(), &variables(&["S", "A"]));
        assert_eq!(g.terminals().iter().cloned().collect_vec(), vec!["a"]);
        assert_eq!(rules(&g), vec!["<A> -> a", "<S> -> a<A>"]);
    }

    #[test]
    fn useless_order_matters() {
        let mut g = grammar("
            V = {S,A,B}
            T = {a,b}
            <S> -> a|<A><B>
            <A> -> b
            <B> -> <B>b
        ");

        g.delete_useless_symbols_productions();

        assert_eq!(g.variables(), &variables(&["S"]));
        assert_eq!(g.terminals().iter().cloned().collect_vec(), vec!["a"]);
        assert_eq!(rules(&g), vec!["<S> -> a"]);

        let once = rules(&g);
        g.delete_useless_symbols_productions();
        assert_eq!(rules(&g), once);
    }
}
