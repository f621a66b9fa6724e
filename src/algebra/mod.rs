/*
    This module builds new grammars out of existing ones: union,
    concatenation and Kleene closure
*/

use itertools::Itertools;
use log::debug;

use crate::grammar::*;

impl Grammar {
    /// A grammar for `L(self) ∪ L(other)` with start `S_u -> S1 | S2`.
    pub fn union(&self, other: &Grammar) -> Result<Grammar, GrammarError> {
        self.check_compatible(other)?;
        let start = Variable::Union(self.next_shared_counter(other, |v| match v {
            Variable::Union(n) => Some(*n),
            _ => None,
        }));

        let linking = [
            Rule::new(start.clone(), vec![Symbol::Variable(self.start.clone())]),
            Rule::new(start.clone(), vec![Symbol::Variable(other.start.clone())]),
        ];
        Ok(self.combined(other, start, linking))
    }

    /// A grammar for `L(self) L(other)` with start `S_c -> S1 S2`.
    pub fn concatenation(&self, other: &Grammar) -> Result<Grammar, GrammarError> {
        self.check_compatible(other)?;
        let start = Variable::Concatenation(self.next_shared_counter(other, |v| match v {
            Variable::Concatenation(n) => Some(*n),
            _ => None,
        }));

        let linking = [Rule::new(
            start.clone(),
            vec![Symbol::Variable(self.start.clone()), Symbol::Variable(other.start.clone())],
        )];
        Ok(self.combined(other, start, linking))
    }

    /// A grammar for `L(self)*` with start `S_v -> S S_v | ε`.
    pub fn closure(&self) -> Grammar {
        let start = Variable::Closure(self.next_counter(|v| match v {
            Variable::Closure(n) => Some(*n),
            _ => None,
        }));

        let linking = [
            Rule::new(start.clone(), vec![Symbol::Variable(self.start.clone()), Symbol::Variable(start.clone())]),
            Rule::new(start.clone(), vec![]),
        ];
        debug!("Closure of the grammar starting at {} starts at {}", self.start, start);

        Grammar {
            variables: [start.clone()].into_iter().chain(self.variables.iter().cloned()).collect(),
            terminals: self.terminals.clone(),
            rules: linking.into_iter().chain(self.rules.iter().cloned()).collect(),
            start,
        }
    }

    fn check_compatible(&self, other: &Grammar) -> Result<(), GrammarError> {
        // IndexSet equality ignores order
        if self.terminals != other.terminals {
            return Err(GrammarError::AlphabetMismatch);
        }

        let shared = self.variables.intersection(&other.variables).cloned().collect_vec();
        if !shared.is_empty() {
            return Err(GrammarError::SharedVariables(shared));
        }
        Ok(())
    }

    fn next_shared_counter(&self, other: &Grammar, counter: impl Fn(&Variable) -> Option<u32>) -> u32 {
        self.next_counter(&counter).max(other.next_counter(&counter))
    }

    fn combined(&self, other: &Grammar, start: Variable, linking: impl IntoIterator<Item = Rule>) -> Grammar {
        debug!("Combining the grammars starting at {} and {} under {}", self.start, other.start, start);

        Grammar {
            variables: [start.clone()].into_iter()
                .chain(self.variables.iter().cloned())
                .chain(other.variables.iter().cloned())
                .collect(),
            terminals: self.terminals.clone(),
            rules: linking.into_iter()
                .chain(self.rules.iter().cloned())
                .chain(other.rules.iter().cloned())
                .collect(),
            start,
        }
    }
}
