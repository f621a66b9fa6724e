/*
    This module generates words of a grammar's language
*/

use itertools::Itertools;
use log::trace;
use rand::prelude::*;
use thiserror::Error;

use crate::grammar::*;
use crate::error_handling::*;

// Derivations that fail are retried up to this many times per word asked for
const ATTEMPTS_PER_WORD: usize = 16;

#[derive(Debug, PartialEq, Error)]
pub enum GenerateErrorType {
    // The derivation reached a variable nothing rewrites
    #[error("No rule rewrites the variable `{0}`")]
    NoRules(Variable),
    // The derivation kept going past the limit
    #[error("Gave up after {0} derivation steps")]
    StepLimit(usize),
}

impl ErrorType for GenerateErrorType {}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<Vec<String>, GenerateErrorType>;

/// Derives a word from the start variable, always rewriting the leftmost
/// variable with one of its rules picked uniformly. Fails after `limit`
/// rewrites.
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, limit: usize) -> GenResult {
    // The sentential form still to derive, reversed so the leftmost symbol is on top
    let mut pending = vec![Symbol::Variable(grammar.start().clone())];
    let mut word = Vec::new();
    let mut steps = 0;

    while let Some(symbol) = pending.pop() {
        match symbol {
            Symbol::Terminal(terminal) => word.push(terminal),
            Symbol::Variable(variable) => {
                if steps == limit {
                    return Err(GenerateErrorType::StepLimit(limit));
                }
                steps += 1;

                let rules = grammar.rules_of(&variable).collect_vec();
                let rule = rules.choose(&mut *rng).ok_or_else(|| GenerateErrorType::NoRules(variable.clone()))?;
                pending.extend(rule.right.iter().rev().cloned());
            }
        }
    }

    Ok(word)
}

/// Up to `amount` words, skipping the derivations that fail.
pub fn sample<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, amount: usize, limit: usize) -> Vec<Vec<String>> {
    (0..amount * ATTEMPTS_PER_WORD)
        .filter_map(|_| match generate(grammar, &mut *rng, limit) {
            Ok(word) => Some(word),
            Err(error) => {
                trace!("Derivation failed: {}", error);
                None
            }
        })
        .take(amount)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar(text: &str) -> Grammar {
        text.parse().unwrap()
    }

    #[test]
    fn generated_words_belong() {
        let g = grammar("V = {S}\nT = {(,)}\n<S> -> (<S>)<S>|");
        let mut rng = StdRng::seed_from_u64(17);

        let words = sample(&g, &mut rng, 20, 200);

        assert!(!words.is_empty());
        for word in words {
            assert!(crate::recognizer::earley::recognize(&g, &word), "{}", word.concat());
        }
    }

    #[test]
    fn finite_language_words() {
        let g = grammar("V = {S,A}\nT = {a,b}\n<S> -> <A><A>\n<A> -> a|b");
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..10 {
            let word = generate(&g, &mut rng, 10).unwrap();
            assert_eq!(word.len(), 2);
            assert!(word.iter().all(|t| t == "a" || t == "b"));
        }
    }

    #[test]
    fn variable_without_rules() {
        let g = grammar("V = {S,A}\nT = {a}\n<S> -> a<A>");
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(generate(&g, &mut rng, 10), Err(GenerateErrorType::NoRules(Variable::named("A"))));
        assert!(sample(&g, &mut rng, 3, 10).is_empty());
    }

    #[test]
    fn endless_derivation_stops() {
        let g = grammar("V = {S}\nT = {a}\n<S> -> a<S>");
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(generate(&g, &mut rng, 50), Err(GenerateErrorType::StepLimit(50)));
    }
}
