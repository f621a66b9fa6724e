use std::fmt::Display;

use itertools::Itertools;

use super::symbol::{Symbol, Variable};

// A production `left -> right`. An empty right part is a null production.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule {
    pub left: Variable,
    pub right: Vec<Symbol>,
}

impl Rule {
    pub fn new(left: Variable, right: Vec<Symbol>) -> Self {
        Rule { left, right }
    }

    pub fn is_null(&self) -> bool {
        self.right.is_empty()
    }

    // A rule whose right part is a single variable
    pub fn is_unit(&self) -> bool {
        matches!(self.right.as_slice(), [Symbol::Variable(_)])
    }

    pub fn only_terminals(&self) -> bool {
        self.right.iter().all(Symbol::is_terminal)
    }

    pub fn first(&self) -> Option<&Symbol> {
        self.right.first()
    }

    // The variable leading the right part, if any
    pub fn first_variable(&self) -> Option<&Variable> {
        self.first().and_then(Symbol::as_variable)
    }

    pub fn mentions(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Variable(variable) if *variable == self.left => true,
            _ => self.right.contains(symbol),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.right.is_empty() {
            write!(f, "<{}> -> ε", self.left)
        } else {
            write!(f, "<{}> -> {}", self.left, self.right.iter().join(""))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(left: &str, right: Vec<Symbol>) -> Rule {
        Rule::new(Variable::named(left), right)
    }

    #[test]
    fn classify_rules() {
        let null = rule("A", vec![]);
        let unit = rule("A", vec![Symbol::var("B")]);
        let terminal = rule("A", vec![Symbol::term("a"), Symbol::term("b")]);

        assert!(null.is_null() && !null.is_unit());
        assert!(unit.is_unit() && !unit.only_terminals());
        assert!(terminal.only_terminals() && !terminal.is_unit());
        assert!(null.only_terminals());
    }

    #[test]
    fn mentions_left_and_right() {
        let r = rule("A", vec![Symbol::term("a"), Symbol::var("B")]);

        assert!(r.mentions(&Symbol::var("A")));
        assert!(r.mentions(&Symbol::var("B")));
        assert!(r.mentions(&Symbol::term("a")));
        assert!(!r.mentions(&Symbol::term("b")));
    }

    #[test]
    fn display_rule() {
        assert_eq!(rule("S", vec![Symbol::term("a"), Symbol::var("S")]).to_string(), "<S> -> a<S>");
        assert_eq!(rule("S", vec![]).to_string(), "<S> -> ε");
    }
}
