use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    Arrow,
    Or,
    Variable(String),
    Terminal(String)
}

pub fn lex_variable(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume `<`
    let name: String = line.peeking_take_while(|&c| c != '>').collect();

    // Check if there is a closing bracket and consume it if there is
    if line.next() != Some('>') {
        return Err(CompileErrorType::UnmatchedBracket);
    }
    if name.trim().is_empty() {
        return Err(CompileErrorType::EmptyVariable);
    }

    Ok(Token::Variable(name.trim().to_string()))
}

// Every character outside of angle brackets is a terminal on its own, apart
// from `|` and the `->` arrow
pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '<' {
            tokens.push(lex_variable(&mut line_chars)?);
        } else if c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if c.is_whitespace() {
            line_chars.next();
        } else {
            line_chars.next();
            if c == '-' && line_chars.peeking_next(|&n| n == '>').is_some() {
                tokens.push(Token::Arrow);
            } else {
                tokens.push(Token::Terminal(c.to_string()));
            }
        }
    }

    Ok(tokens)
}

/// Splits the inside of `{a,b,<C>}` into its items, dropping the optional
/// angle brackets around each one.
pub fn lex_set(text: &str) -> Result<Vec<String>> {
    let inner = text.trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or(CompileErrorType::MalformedSet)?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner.split(',')
        .map(str::trim)
        .map(|item| {
            let item = item.strip_prefix('<')
                .map(|rest| rest.strip_suffix('>').ok_or(CompileErrorType::UnmatchedBracket))
                .unwrap_or(Ok(item))?;
            if item.is_empty() {
                return Err(CompileErrorType::MalformedSet);
            }
            Ok(item.to_string())
        })
        .collect()
}
