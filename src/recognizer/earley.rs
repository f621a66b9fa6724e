use indexmap::IndexSet;
use itertools::Itertools;
use log::trace;

use crate::grammar::*;

// `left -> matched • remaining` over the word between `start` and `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register<'g> {
    pub start: usize,
    pub end: usize,
    pub left: &'g Variable,
    right: &'g [Symbol],
    dot: usize,
}

impl<'g> Register<'g> {
    fn predicted(position: usize, rule: &'g Rule) -> Self {
        Register { start: position, end: position, left: &rule.left, right: &rule.right, dot: 0 }
    }

    fn advanced(&self, end: usize) -> Self {
        Register { end, dot: self.dot + 1, ..*self }
    }

    pub fn matched(&self) -> &'g [Symbol] {
        &self.right[..self.dot]
    }

    pub fn remaining(&self) -> &'g [Symbol] {
        &self.right[self.dot..]
    }

    pub fn is_complete(&self) -> bool {
        self.dot == self.right.len()
    }

    fn next(&self) -> Option<&'g Symbol> {
        self.right.get(self.dot)
    }

    fn next_variable(&self) -> Option<&'g Variable> {
        self.next().and_then(Symbol::as_variable)
    }
}

/// Whether the chart ends with a complete register for the start variable
/// spanning the whole word.
pub fn recognize(grammar: &Grammar, word: &Word) -> bool {
    let chart = chart(grammar, word);
    chart[word.len()]
        .iter()
        .any(|register| register.start == 0 && register.left == grammar.start() && register.is_complete())
}

pub fn chart<'g>(grammar: &'g Grammar, word: &Word) -> Vec<IndexSet<Register<'g>>> {
    let mut chart = vec![IndexSet::new(); word.len() + 1];
    chart[0].extend(grammar.rules_of(grammar.start()).map(|rule| Register::predicted(0, rule)));

    for j in 0..=word.len() {
        close(grammar, &mut chart, j);
        trace!("REGISTERS[{}] holds {} registers", j, chart[j].len());

        if let Some(symbol) = word.get(j) {
            let scanned = chart[j]
                .iter()
                .filter(|register| register.next().and_then(Symbol::as_terminal) == Some(symbol.as_str()))
                .map(|register| register.advanced(j + 1))
                .collect_vec();
            chart[j + 1].extend(scanned);
        }
    }

    chart
}

// Predicts and completes at position `j` until nothing new appears. A
// register waiting on a variable that already completed here without
// consuming anything advances over it right away.
fn close<'g>(grammar: &'g Grammar, chart: &mut [IndexSet<Register<'g>>], j: usize) {
    let mut index = 0;
    while index < chart[j].len() {
        let register = chart[j][index];
        let mut found = Vec::new();

        match register.next() {
            Some(Symbol::Variable(waiting_on)) => {
                found.extend(grammar.rules_of(waiting_on).map(|rule| Register::predicted(j, rule)));
                let nulled = chart[j]
                    .iter()
                    .any(|done| done.is_complete() && done.start == j && done.left == waiting_on);
                if nulled {
                    found.push(register.advanced(j));
                }
            }
            Some(Symbol::Terminal(_)) => {}
            None => {
                found.extend(chart[register.start]
                    .iter()
                    .filter(|waiting| waiting.next_variable() == Some(register.left))
                    .map(|waiting| waiting.advanced(j)));
            }
        }

        for new in found {
            if chart[j].insert(new) {
                trace!("Adding ({}, {}, {}, {}, {})", new.start, new.end, new.left, new.matched().iter().join(""), new.remaining().iter().join(""));
            }
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::parser::split_word;

    #[test]
    fn left_recursive_expressions() {
        let grammar: Grammar = "
            V = {E,T,F}
            T = {+,*,(,),x}
            <E> -> <E>+<T>|<T>
            <T> -> <T>*<F>|<F>
            <F> -> (<E>)|x
        ".parse().unwrap();
        let words = vec!["x", "x+x*x", "(x+x)*x", "((x))", "x+", "(x", "x*+x", ""];
        let answers = vec![true, true, true, true, false, false, false, false];

        for (word, answer) in zip(words, answers) {
            assert_eq!(recognize(&grammar, &split_word(word)), answer, "{}", word);
        }
    }

    #[test]
    fn nullable_variables_in_the_middle() {
        let grammar: Grammar = "
            V = {S,A,B}
            T = {a,b}
            <S> -> a<A><B>b
            <A> -> <B>|
            <B> -> <A>|b
        ".parse().unwrap();
        let words = vec!["ab", "abb", "abbb", "aab", "a"];
        let answers = vec![true, true, true, false, false];

        for (word, answer) in zip(words, answers) {
            assert_eq!(recognize(&grammar, &split_word(word)), answer, "{}", word);
        }
    }

    #[test]
    fn empty_word() {
        let nullable: Grammar = "V = {S,A}\nT = {a}\n<S> -> <A><A>\n<A> -> a|".parse().unwrap();
        let not_nullable: Grammar = "V = {S}\nT = {a}\n<S> -> a".parse().unwrap();

        assert!(recognize(&nullable, &[]));
        assert!(!recognize(&not_nullable, &[]));
    }

    #[test]
    fn chart_registers() {
        let grammar: Grammar = "V = {S}\nT = {a}\n<S> -> a<S>|a".parse().unwrap();
        let chart = chart(&grammar, &split_word("a"));

        let last = chart[1].iter()
            .map(|r| format!("({}, {}, {}, {}, {})", r.start, r.end, r.left, r.matched().iter().join(""), r.remaining().iter().join("")))
            .collect_vec();
        assert_eq!(last, vec![
            "(0, 1, S, a, <S>)",
            "(0, 1, S, a, )",
            "(1, 1, S, , a<S>)",
            "(1, 1, S, , a)",
        ]);
    }
}
