/*
    This module is for storing and manipulating grammars
*/

mod error;
mod rule;
mod symbol;

use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexSet;
use itertools::Itertools;
use log::trace;

pub use error::GrammarError;
pub use rule::Rule;
pub use symbol::{Symbol, Variable};

use crate::parser::{self, CompileErrors};

// The symbols of a word to recognise
pub type Word = [String];

/// A context-free grammar.
///
/// Variables, terminals and rules are insertion ordered sets. The order of
/// the variables is what the Greibach transform numbers them by, so every
/// mutation keeps the relative order of what remains.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    pub(crate) variables: IndexSet<Variable>,
    pub(crate) terminals: IndexSet<String>,
    pub(crate) rules: IndexSet<Rule>,
    pub(crate) start: Variable,
}

impl Grammar {
    /// Builds a grammar, rejecting a start symbol outside of the variables and
    /// rules that mention undeclared symbols.
    pub fn new(
        variables: impl IntoIterator<Item = Variable>,
        terminals: impl IntoIterator<Item = String>,
        start: Variable,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Result<Self, GrammarError> {
        let grammar = Grammar {
            variables: variables.into_iter().collect(),
            terminals: terminals.into_iter().collect(),
            rules: rules.into_iter().collect(),
            start,
        };
        grammar.validate()?;
        Ok(grammar)
    }

    pub(crate) fn validate(&self) -> Result<(), GrammarError> {
        if !self.variables.contains(&self.start) {
            return Err(GrammarError::StartNotVariable(self.start.clone()));
        }

        for rule in &self.rules {
            if !self.variables.contains(&rule.left) {
                return Err(GrammarError::UnknownVariable {
                    rule: rule.clone(),
                    variable: rule.left.clone(),
                });
            }
            for symbol in &rule.right {
                match symbol {
                    Symbol::Variable(variable) if !self.variables.contains(variable) => {
                        return Err(GrammarError::UnknownVariable {
                            rule: rule.clone(),
                            variable: variable.clone(),
                        });
                    }
                    Symbol::Terminal(terminal) if !self.terminals.contains(terminal) => {
                        return Err(GrammarError::UnknownTerminal {
                            rule: rule.clone(),
                            terminal: terminal.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    pub fn variables(&self) -> &IndexSet<Variable> {
        &self.variables
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    pub fn rules(&self) -> &IndexSet<Rule> {
        &self.rules
    }

    pub fn start(&self) -> &Variable {
        &self.start
    }

    pub fn rules_of<'a>(&'a self, variable: &'a Variable) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.left == *variable)
    }

    pub fn variable_index(&self, variable: &Variable) -> Option<usize> {
        self.variables.get_index_of(variable)
    }

    pub fn is_variable(&self, symbol: &Symbol) -> bool {
        symbol.as_variable().is_some_and(|v| self.variables.contains(v))
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        symbol.as_terminal().is_some_and(|t| self.terminals.contains(t))
    }

    /// Deletes every rule where `symbol` appears on either side. Returns how
    /// many rules were deleted.
    pub fn delete_rules_with_symbol(&mut self, symbol: &Symbol) -> usize {
        let before = self.rules.len();
        self.rules.retain(|rule| {
            let keep = !rule.mentions(symbol);
            if !keep {
                trace!("Deleting the rule {}", rule);
            }
            keep
        });
        before - self.rules.len()
    }

    /// Adds `rule` unless an equal rule is already there.
    pub fn add_rule(&mut self, rule: Rule) -> bool {
        if self.rules.contains(&rule) {
            return false;
        }
        trace!("Adding the rule {}", rule);
        self.rules.insert(rule)
    }

    pub fn remove_rule(&mut self, rule: &Rule) -> bool {
        let removed = self.rules.shift_remove(rule);
        if removed {
            trace!("Deleting the rule {}", rule);
        }
        removed
    }

    /// Puts `new` where `old` was. If `new` is already present elsewhere,
    /// `old` just disappears.
    pub fn replace_rule(&mut self, old: &Rule, new: Rule) {
        if !self.rules.contains(old) {
            return;
        }
        trace!("Replacing the rule {} with {}", old, new);
        self.rules = std::mem::take(&mut self.rules)
            .into_iter()
            .map(|rule| if rule == *old { new.clone() } else { rule })
            .collect();
    }

    pub fn add_variable(&mut self, variable: Variable) -> bool {
        if self.variables.contains(&variable) {
            return false;
        }
        trace!("Adding the variable {}", variable);
        self.variables.insert(variable)
    }

    pub fn remove_variable(&mut self, variable: &Variable) -> bool {
        let removed = self.variables.shift_remove(variable);
        if removed {
            trace!("Deleting the variable {}", variable);
        }
        removed
    }

    pub fn remove_terminal(&mut self, terminal: &str) -> bool {
        let removed = self.terminals.shift_remove(terminal);
        if removed {
            trace!("Deleting the terminal {}", terminal);
        }
        removed
    }

    // One past the largest counter of the synthetic variables `counter` picks out
    pub(crate) fn next_counter(&self, counter: impl Fn(&Variable) -> Option<u32>) -> u32 {
        self.variables.iter().filter_map(counter).max().map_or(1, |n| n + 1)
    }

    /// Right linear: every symbol of a right part but the last is a terminal.
    pub fn is_right_linear(&self) -> bool {
        self.rules.iter().all(|rule| match rule.right.split_last() {
            Some((_, init)) => init.iter().all(Symbol::is_terminal),
            None => true,
        })
    }

    /// Left linear: every symbol of a right part but the first is a terminal.
    pub fn is_left_linear(&self) -> bool {
        self.rules.iter().all(|rule| match rule.right.split_first() {
            Some((_, tail)) => tail.iter().all(Symbol::is_terminal),
            None => true,
        })
    }

    /// Applies one of the grammar's rules to the variable at `position` of a
    /// sentential form.
    pub fn apply_rule(&self, form: &[Symbol], position: usize, rule: &Rule) -> Option<Vec<Symbol>> {
        if !self.rules.contains(rule) {
            return None;
        }
        match form.get(position) {
            Some(Symbol::Variable(variable)) if *variable == rule.left => {}
            _ => return None,
        }

        let mut derived = Vec::with_capacity(form.len() + rule.right.len());
        derived.extend_from_slice(&form[..position]);
        derived.extend(rule.right.iter().cloned());
        derived.extend_from_slice(&form[position + 1..]);
        Some(derived)
    }
}

// Writes the grammar in the same text format the parser reads
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "V = {{{}}}", self.variables.iter().map(|v| format!("<{}>", v)).join(","))?;
        writeln!(f, "T = {{{}}}", self.terminals.iter().join(","))?;
        writeln!(f)?;

        for variable in &self.variables {
            let alternatives = self.rules_of(variable)
                .map(|rule| rule.right.iter().join(""))
                .collect_vec();
            if !alternatives.is_empty() {
                writeln!(f, "<{}> -> {}", variable, alternatives.join("|"))?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = CompileErrors;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parser::parse_str(text, &std::path::PathBuf::new())
    }
}
