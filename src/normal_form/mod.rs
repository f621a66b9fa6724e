/*
    This module rewrites grammars into Chomsky and Greibach normal form
*/

mod chomsky;
mod greibach;

use itertools::Itertools;
use log::debug;

use crate::grammar::*;

impl Grammar {
    // Terminals in right parts longer than one symbol become `C_a -> a`,
    // apart from the first symbol with `keep_leading`
    pub(crate) fn isolate_terminals(&mut self, keep_leading: bool) {
        let skip = usize::from(keep_leading);
        let snapshot = self.rules.iter()
            .filter(|rule| rule.right.len() > 1)
            .filter(|rule| rule.right.iter().skip(skip).any(Symbol::is_terminal))
            .cloned()
            .collect_vec();

        for rule in &snapshot {
            let right = rule.right.iter()
                .enumerate()
                .map(|(i, symbol)| match symbol {
                    Symbol::Terminal(terminal) if i >= skip => Symbol::Variable(self.isolated(terminal)),
                    _ => symbol.clone(),
                })
                .collect_vec();
            self.replace_rule(rule, Rule::new(rule.left.clone(), right));
        }
        debug!("Isolated the terminals of {} rules", snapshot.len());
    }

    fn isolated(&mut self, terminal: &str) -> Variable {
        let variable = Variable::Isolated(terminal.to_string());
        self.add_variable(variable.clone());
        self.add_rule(Rule::new(variable.clone(), vec![Symbol::term(terminal)]));
        variable
    }
}
