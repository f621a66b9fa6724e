use itertools::Itertools;

use crate::grammar::*;

/// Recognises a word with a grammar in Greibach normal form, deriving it
/// leftmost one terminal at a time and backtracking over the rules that fit.
pub fn recognize(grammar: &Grammar, word: &Word) -> Result<bool, GrammarError> {
    if let Some(rule) = grammar.greibach_violation() {
        return Err(GrammarError::NotGreibach(rule.clone()));
    }
    Ok(derive(grammar, word, &[grammar.start()]))
}

// `form` holds the variables still to expand, leftmost first
fn derive<'g>(grammar: &'g Grammar, remaining: &Word, form: &[&'g Variable]) -> bool {
    let (Some((next, rest_word)), Some((&variable, rest_form))) = (remaining.split_first(), form.split_first()) else {
        return remaining.is_empty() && form.is_empty();
    };
    // Each variable yields at least one terminal
    if form.len() > remaining.len() {
        return false;
    }

    grammar.rules_of(variable)
        .filter(|rule| rule.first().and_then(Symbol::as_terminal) == Some(next.as_str()))
        .any(|rule| {
            let derived = rule.right[1..].iter()
                .filter_map(Symbol::as_variable)
                .chain(rest_form.iter().copied())
                .collect_vec();
            derive(grammar, rest_word, &derived)
        })
}
