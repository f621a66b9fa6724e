use indexmap::IndexSet;
use itertools::Itertools;
use log::trace;

use crate::grammar::*;

/// CYK over a grammar in Chomsky normal form. Any other grammar is refused
/// with the first rule out of shape.
pub fn recognize(grammar: &Grammar, word: &Word) -> Result<bool, GrammarError> {
    if let Some(rule) = grammar.chomsky_violation() {
        return Err(GrammarError::NotChomsky(rule.clone()));
    }
    if word.is_empty() {
        return Ok(false);
    }

    let n = word.len();
    let binary = grammar.rules().iter()
        .filter_map(|rule| match rule.right.as_slice() {
            [Symbol::Variable(b), Symbol::Variable(c)] => Some((&rule.left, b, c)),
            _ => None,
        })
        .collect_vec();

    // table[length - 1][i] derives the `length` symbols starting at i
    let mut table: Vec<Vec<IndexSet<&Variable>>> = Vec::with_capacity(n);
    table.push(word.iter()
        .map(|symbol| grammar.rules().iter()
            .filter(|rule| matches!(rule.right.as_slice(), [Symbol::Terminal(t)] if t == symbol))
            .map(|rule| &rule.left)
            .collect())
        .collect());

    for length in 2..=n {
        let row = (0..=n - length)
            .map(|i| {
                let mut cell = IndexSet::new();
                for k in 1..length {
                    for &(a, b, c) in &binary {
                        if table[k - 1][i].contains(b) && table[length - k - 1][i + k].contains(c) {
                            cell.insert(a);
                        }
                    }
                }
                trace!("V[{}][{}] = {{{}}}", i, length, cell.iter().join(", "));
                cell
            })
            .collect();
        table.push(row);
    }

    Ok(table[n - 1][0].contains(grammar.start()))
}
