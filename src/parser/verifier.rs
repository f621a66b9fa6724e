use indexmap::IndexSet;

use crate::grammar::{Symbol, Variable};
use super::CompileErrorType::{UndefinedTerminal, UndefinedVariable};
use super::{Alternative, CompileError, CompileErrors, FileResult, Location, RuleLine};

fn get_alternative_undefined_symbols(
    alternative: &Alternative,
    location: &Location,
    variables: &IndexSet<Variable>,
    terminals: &IndexSet<String>
) -> CompileErrors {
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Symbol::Variable(variable) if !variables.contains(variable) => Some(UndefinedVariable(variable.to_string())),
            Symbol::Terminal(terminal) if !terminals.contains(terminal) => Some(UndefinedTerminal(terminal.clone())),
            _ => None
        })
        .map(|error| CompileError {
            location: location.to_owned(),
            error
        })
        .collect()
}

fn get_line_undefined_symbols(
    rule: &RuleLine,
    variables: &IndexSet<Variable>,
    terminals: &IndexSet<String>
) -> CompileErrors {
    let mut errors = CompileErrors::new();
    if !variables.contains(&rule.left) {
        errors.push(CompileError {
            location: rule.location.clone(),
            error: UndefinedVariable(rule.left.to_string())
        });
    }

    // Get the undefined symbols in each alternative, while flattening
    // into all the undefined symbols of the line
    errors.extend(rule.alternatives.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, &rule.location, variables, terminals)));
    errors
}

/// Reports every symbol used by a rule line without being declared, in line
/// order.
pub fn verify_rules(rules: &[RuleLine], variables: &IndexSet<Variable>, terminals: &IndexSet<String>) -> FileResult<()> {
    let errors: CompileErrors = rules.iter()
        .flat_map(|rule| get_line_undefined_symbols(rule, variables, terminals))
        .collect();

    if !errors.is_empty() {
        Err(errors)
    } else {
        Ok(())
    }
}
