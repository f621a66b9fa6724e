use itertools::Itertools;
use thiserror::Error;

use super::{Rule, Variable};
use crate::error_handling::ErrorType;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GrammarError {
    // The start variable has to be one of the variables
    #[error("The start symbol `{0}` is not a variable")]
    StartNotVariable(Variable),
    // A rule uses a variable that was never declared
    #[error("`{rule}` uses the undeclared variable `{variable}`")]
    UnknownVariable { rule: Rule, variable: Variable },
    // A rule uses a terminal outside of the alphabet
    #[error("`{rule}` uses the terminal `{terminal}` which is not in the alphabet")]
    UnknownTerminal { rule: Rule, terminal: String },
    // Union and concatenation need the same terminal alphabet on both sides
    #[error("The grammars have different terminal alphabets")]
    AlphabetMismatch,
    // Union and concatenation need disjoint variables
    #[error("The grammars share the variables {}", .0.iter().map(|v| format!("`{}`", v)).join(", "))]
    SharedVariables(Vec<Variable>),
    // CYK was handed a grammar that is not in Chomsky normal form
    #[error("`{0}` is not in Chomsky normal form")]
    NotChomsky(Rule),
    // The recursive recognizer was handed a grammar not in Greibach normal form
    #[error("`{0}` is not in Greibach normal form")]
    NotGreibach(Rule),
}

impl ErrorType for GrammarError {}
