use itertools::Itertools;
use log::debug;

use crate::grammar::*;

impl Grammar {
    /// Every right part is a terminal followed only by variables.
    pub fn greibach_appliable(&self) -> bool {
        self.greibach_violation().is_none()
    }

    pub(crate) fn greibach_violation(&self) -> Option<&Rule> {
        self.rules.iter().find(|rule| match rule.right.split_first() {
            Some((Symbol::Terminal(_), tail)) => !tail.iter().all(Symbol::is_variable),
            _ => true,
        })
    }

    // Deletes `A -> Bα` and adds `A -> βα` for every rule `B -> β`
    pub fn first_deletion_greibach(&mut self, rule: &Rule) {
        let Some(target) = rule.first_variable() else {
            return;
        };
        if !self.remove_rule(rule) {
            return;
        }

        let alpha = &rule.right[1..];
        let substituted = self.rules_of(target)
            .map(|own| own.right.iter().chain(alpha).cloned().collect_vec())
            .collect_vec();
        for right in substituted {
            self.add_rule(Rule::new(rule.left.clone(), right));
        }
    }

    // Every `A -> Aα` becomes `B_A -> α` and `B_A -> αB_A`, every other
    // `A -> β` gains a sibling `A -> βB_A`
    pub fn second_deletion_greibach(&mut self, variable: &Variable) -> Variable {
        let tail = Variable::Tail(Box::new(variable.clone()));
        self.add_variable(tail.clone());

        let (recursive, others): (Vec<Rule>, Vec<Rule>) = self.rules_of(variable)
            .cloned()
            .partition(|rule| rule.first_variable() == Some(variable));

        for rule in recursive {
            self.remove_rule(&rule);
            let alpha = rule.right[1..].to_vec();
            // `A -> A` adds nothing to the language
            if alpha.is_empty() {
                continue;
            }
            let looped = alpha.iter().cloned().chain([Symbol::Variable(tail.clone())]).collect_vec();
            self.add_rule(Rule::new(tail.clone(), alpha));
            self.add_rule(Rule::new(tail.clone(), looped));
        }
        for rule in others {
            let right = rule.right.into_iter().chain([Symbol::Variable(tail.clone())]).collect_vec();
            self.add_rule(Rule::new(variable.clone(), right));
        }

        tail
    }

    /// Rewrites the grammar into Greibach normal form. Null and unit rules
    /// are deleted first, so the empty word is lost. Useless symbols go too.
    pub fn transform_greibach(&mut self) {
        self.delete_null_productions();
        self.delete_unit_productions();
        self.delete_useless_symbols_productions();
        if self.greibach_appliable() {
            return;
        }
        self.isolate_terminals(true);

        // A1 .. Am, fixed for the whole transform
        let order = self.variables.iter().cloned().collect_vec();
        let tails = self.first_part_greibach(&order);
        debug!("Left recursion removed, {} tail variables introduced", tails.len());
        self.second_part_greibach(&order, &tails);
    }

    // Leaves only rules Ai -> a.. or Ai -> Aj.. with j > i
    fn first_part_greibach(&mut self, order: &[Variable]) -> Vec<Variable> {
        let mut tails = Vec::new();

        for (i, ai) in order.iter().enumerate() {
            for aj in &order[..i] {
                self.substitute_leading(ai, aj);
            }
            let left_recursive = self.rules_of(ai).any(|rule| rule.first_variable() == Some(ai));
            if left_recursive {
                tails.push(self.second_deletion_greibach(ai));
            }
        }

        tails
    }

    fn second_part_greibach(&mut self, order: &[Variable], tails: &[Variable]) {
        for i in (0..order.len().saturating_sub(1)).rev() {
            for aj in &order[i + 1..] {
                self.substitute_leading(&order[i], aj);
            }
        }

        for tail in tails {
            for ai in order {
                self.substitute_leading(tail, ai);
            }
        }
    }

    // First deletion on every rule `left -> leading α` until none is left
    fn substitute_leading(&mut self, left: &Variable, leading: &Variable) {
        loop {
            let next = self.rules_of(left)
                .find(|rule| rule.first_variable() == Some(leading))
                .cloned();
            match next {
                Some(rule) => self.first_deletion_greibach(&rule),
                None => break,
            }
        }
    }
}
