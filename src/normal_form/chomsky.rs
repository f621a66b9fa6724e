use itertools::Itertools;
use log::debug;

use crate::grammar::*;

impl Grammar {
    /// Every right part is one terminal or two variables.
    pub fn is_chomsky(&self) -> bool {
        self.chomsky_violation().is_none()
    }

    pub(crate) fn chomsky_violation(&self) -> Option<&Rule> {
        self.rules.iter().find(|rule| !matches!(
            rule.right.as_slice(),
            [Symbol::Terminal(_)] | [Symbol::Variable(_), Symbol::Variable(_)]
        ))
    }

    /// Rewrites the grammar into Chomsky normal form. Null and unit rules
    /// are deleted first, so the empty word is lost.
    pub fn transform_chomsky(&mut self) {
        self.delete_null_productions();
        self.delete_unit_productions();
        self.isolate_terminals(false);
        self.reduce_arity();
    }

    // A -> B1 B2 ... Bm becomes A -> B1 D1, D1 -> B2 D2, ..., Dm-2 -> Bm-1 Bm
    fn reduce_arity(&mut self) {
        let mut counter = self.next_counter(|variable| match variable {
            Variable::Chain(n) => Some(*n),
            _ => None,
        });
        let long = self.rules.iter()
            .filter(|rule| rule.right.len() > 2)
            .cloned()
            .collect_vec();

        for rule in &long {
            self.remove_rule(rule);

            let (init, last_two) = rule.right.split_at(rule.right.len() - 2);
            let mut left = rule.left.clone();
            for symbol in init {
                let link = Variable::Chain(counter);
                counter += 1;
                self.add_variable(link.clone());
                self.add_rule(Rule::new(left, vec![symbol.clone(), Symbol::Variable(link.clone())]));
                left = link;
            }
            self.add_rule(Rule::new(left, last_two.to_vec()));
        }
        debug!("Split {} rules longer than two symbols", long.len());
    }
}
