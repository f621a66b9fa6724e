/*
    This module parses grammar files
*/

mod lexer;
mod verifier;

use std::path::PathBuf;

use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;

use crate::grammar::{self, Grammar, GrammarError, Symbol, Variable};
use crate::error_handling::*;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug, Error)]
pub enum CompileErrorType {
    // A rule line has no `->`
    #[error("Expected `->` after the left part")]
    MissingArrow,
    // A rule line has more than one `->`
    #[error("Unexpected `->` encountered")]
    UnexpectedArrow,
    // The left part of a rule is not a single variable
    #[error("Tried to define something other than a variable")]
    MissingVariable,
    // A `<` without its `>`
    #[error("Unmatched angle brackets")]
    UnmatchedBracket,
    #[error("A variable needs a name")]
    EmptyVariable,
    // A declaration is not of the shape `{a,b,c}`
    #[error("Expected a set like `{{a,b,c}}`")]
    MalformedSet,
    // There is no `V = {..}` or `T = {..}` line
    #[error("Missing the `{0} = {{..}}` declaration")]
    MissingDeclaration(char),
    #[error("`{0}` was already declared")]
    DuplicateDeclaration(char),
    // The variables are declared but there are none, so no start variable
    #[error("There must be at least one variable to start from")]
    NoStartVariable,
    // An undeclared variable was used
    #[error("Could not find a declaration for the variable `{0}`")]
    UndefinedVariable(String),
    // A terminal outside of the alphabet was used
    #[error("The terminal `{0}` is not in the alphabet")]
    UndefinedTerminal(String),
    // The parsed grammar failed validation
    #[error(transparent)]
    Grammar(GrammarError),
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::FileError(a), Self::FileError(b)) => a.kind() == b.kind(),
            (Self::Grammar(a), Self::Grammar(b)) => a == b,
            (Self::MissingDeclaration(a), Self::MissingDeclaration(b))
            | (Self::DuplicateDeclaration(a), Self::DuplicateDeclaration(b)) => a == b,
            (Self::UndefinedVariable(a), Self::UndefinedVariable(b))
            | (Self::UndefinedTerminal(a), Self::UndefinedTerminal(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

type Alternative = Vec<Symbol>;

#[derive(PartialEq, Debug)]
struct RuleLine {
    left: Variable,
    alternatives: Vec<Alternative>,
    location: Location
}

#[derive(PartialEq, Debug)]
enum Line {
    Variables(Vec<String>),
    Terminals(Vec<String>),
    Rule(RuleLine)
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    tokens.iter().map(|t| match t {
        // `|` never gets here, the alternatives are split on it
        Token::Arrow | Token::Or => Err(CompileErrorType::UnexpectedArrow),
        Token::Variable(name) => Ok(Symbol::Variable(Variable::from_written(name))),
        Token::Terminal(terminal) => Ok(Symbol::term(terminal.as_str()))
    }).collect()
}

// The left part is `<name>`, or a name written bare
fn parse_left(tokens: &[Token]) -> Result<Variable> {
    match tokens {
        [Token::Variable(name)] => Ok(Variable::from_written(name)),
        [] => Err(CompileErrorType::MissingVariable),
        bare => bare.iter()
            .map(|t| match t {
                Token::Terminal(c) => Ok(c.as_str()),
                _ => Err(CompileErrorType::MissingVariable)
            })
            .collect::<Result<String>>()
            .map(|name| Variable::from_written(&name))
    }
}

fn parse_rule(tokens: &[Token], location: Location) -> Result<RuleLine> {
    let Some(arrow) = tokens.iter().position(|t| *t == Token::Arrow) else {
        return Err(CompileErrorType::MissingArrow);
    };

    let left = parse_left(&tokens[..arrow])?;
    let alternatives = tokens[arrow + 1..]
        .split(|t| *t == Token::Or)
        .map(parse_alternative)
        .collect::<Result<Vec<_>>>()?;

    Ok(RuleLine {
        left,
        alternatives,
        location
    })
}

// `V = {..}` and `T = {..}` declare the sets, anything else is a rule
fn parse_line(line: &str, location: Location) -> Result<Line> {
    if let Some((key, set)) = line.split_once('=') {
        match key.trim() {
            "V" => return lex_set(set).map(Line::Variables),
            "T" => return lex_set(set).map(Line::Terminals),
            _ => {}
        }
    }

    let tokens = lexer::lex_line(line)?;
    parse_rule(&tokens, location).map(Line::Rule)
}

fn parse_located_line(line: &str, location: Location) -> LineResult<Line> {
    parse_line(line, location.clone())
        .map_err(|error| CompileError { location, error })
}

fn is_content_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(';')
}

// Puts the declarations and rules together, or reports everything that is
// missing or declared twice
fn grammar_from_lines(lines: Vec<(Line, Location)>, path: &PathBuf) -> FileResult<Grammar> {
    let mut variables: Option<IndexSet<Variable>> = None;
    let mut terminals: Option<IndexSet<String>> = None;
    let mut rules = Vec::new();
    let mut errors = CompileErrors::new();

    for (line, location) in lines {
        match line {
            Line::Variables(names) if variables.is_none() => {
                variables = Some(names.iter().map(|name| Variable::from_written(name)).collect());
            }
            Line::Terminals(names) if terminals.is_none() => {
                terminals = Some(names.into_iter().collect());
            }
            Line::Variables(_) => errors.push(CompileError { location, error: CompileErrorType::DuplicateDeclaration('V') }),
            Line::Terminals(_) => errors.push(CompileError { location, error: CompileErrorType::DuplicateDeclaration('T') }),
            Line::Rule(rule) => rules.push(rule),
        }
    }

    let missing = |declaration| CompileError {
        location: Location::file(path.clone()),
        error: CompileErrorType::MissingDeclaration(declaration)
    };
    if variables.is_none() {
        errors.push(missing('V'));
    }
    if terminals.is_none() {
        errors.push(missing('T'));
    }
    let (Some(variables), Some(terminals), true) = (variables, terminals, errors.is_empty()) else {
        return Err(errors);
    };

    verify_rules(&rules, &variables, &terminals)?;

    let whole_file = |error| vec![CompileError { location: Location::file(path.clone()), error }];
    let start = variables.first().cloned().ok_or_else(|| whole_file(CompileErrorType::NoStartVariable))?;
    let rules = rules.into_iter()
        .flat_map(|line| {
            let left = line.left;
            line.alternatives.into_iter().map(move |right| grammar::Rule::new(left.clone(), right))
        })
        .collect_vec();

    Grammar::new(variables, terminals, start, rules).map_err(|e| whole_file(CompileErrorType::Grammar(e)))
}

/// Reads a grammar from text. `path` only labels the error locations.
pub fn parse_str(text: &str, path: &PathBuf) -> FileResult<Grammar> {
    let parsed_lines = text.lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| is_content_line(line))
        .map(|(num, line)| {
            let location = Location {
                file: path.clone(),
                line: num + 1
            };
            parse_located_line(line, location.clone()).map(|parsed| (parsed, location))
        });

    let (lines, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_lines(lines, path)
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let text = std::fs::read_to_string(path).map_err(|e| vec![io_error(e, path.clone())])?;
    parse_str(&text, path)
}

/// Splits a word into its terminals, one per character. Whitespace is not
/// part of any word.
pub fn split_word(text: &str) -> Vec<String> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use pretty_assertions::assert_eq;

    fn nowhere() -> Location {
        Location::file(PathBuf::new())
    }

    fn at(file: &PathBuf, line: usize) -> Location {
        Location { file: file.clone(), line }
    }

    #[test]
    fn parse_normal_alternative() {
        let lines = vec![
            vec![
                Token::Terminal("a".to_string()),
                Token::Variable("S".to_string()),
                Token::Terminal("b".to_string())
            ],
            vec![]
        ];
        let answers = vec![
            vec![Symbol::term("a"), Symbol::var("S"), Symbol::term("b")],
            vec![]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_alternative(&line[..]).unwrap(), answer);
        }
    }

    #[test]
    fn parse_normal_rule() {
        let lexed = lexer::lex_line("<S> -> a<S>b|<A>|").unwrap();

        let answer = RuleLine {
            left: Variable::named("S"),
            alternatives: vec![
                vec![Symbol::term("a"), Symbol::var("S"), Symbol::term("b")],
                vec![Symbol::var("A")],
                vec![]
            ],
            location: nowhere()
        };

        assert_eq!(parse_rule(&lexed[..], nowhere()), Ok(answer));
    }

    #[test]
    fn parse_bare_left_part() {
        let lexed = lexer::lex_line("Expr -> x").unwrap();

        assert_eq!(parse_rule(&lexed[..], nowhere()).unwrap().left, Variable::named("Expr"));
    }

    #[test]
    fn parse_malformed_rule() {
        let lines = vec!["<S> a<S>", "<S> -> a -> b", "-> a", "<S><A> -> a", "a<S> -> b"];
        let answers = vec![
            CompileErrorType::MissingArrow,
            CompileErrorType::UnexpectedArrow,
            CompileErrorType::MissingVariable,
            CompileErrorType::MissingVariable,
            CompileErrorType::MissingVariable,
        ];

        for (line, answer) in zip(lines, answers) {
            let lexed = lexer::lex_line(line).unwrap();
            assert_eq!(parse_rule(&lexed[..], nowhere()).unwrap_err(), answer, "{}", line);
        }
    }

    #[test]
    fn parse_declarations() {
        assert_eq!(parse_line("V = {<S>,A}", nowhere()), Ok(Line::Variables(vec!["S".to_string(), "A".to_string()])));
        assert_eq!(parse_line("T={a}", nowhere()), Ok(Line::Terminals(vec!["a".to_string()])));
        assert_eq!(parse_line("V = S,A", nowhere()), Err(CompileErrorType::MalformedSet));
    }

    #[test]
    fn parse_normal_file() {
        let path = PathBuf::from("example_data/expressions.cfg");
        let grammar = parse_file(&path).unwrap();

        let variables = ["E", "T", "F"].map(Variable::named);
        let rule = |left: &str, right: Vec<Symbol>| grammar::Rule::new(Variable::named(left), right);

        assert_eq!(grammar.start(), &Variable::named("E"));
        assert_eq!(grammar.variables().iter().cloned().collect_vec(), variables.to_vec());
        assert_eq!(grammar.terminals().iter().cloned().collect_vec(), vec!["+", "*", "(", ")", "x"]);
        assert_eq!(grammar.rules().iter().cloned().collect_vec(), vec![
            rule("E", vec![Symbol::var("E"), Symbol::term("+"), Symbol::var("T")]),
            rule("E", vec![Symbol::var("T")]),
            rule("T", vec![Symbol::var("T"), Symbol::term("*"), Symbol::var("F")]),
            rule("T", vec![Symbol::var("F")]),
            rule("F", vec![Symbol::term("("), Symbol::var("E"), Symbol::term(")")]),
            rule("F", vec![Symbol::term("x")]),
        ]);
    }

    #[test]
    fn parse_malformed_file() {
        let path = PathBuf::from("example_data/malformed.cfg");
        let errors = parse_file(&path).unwrap_err();

        assert_eq!(errors, vec![
            CompileError { location: at(&path, 4), error: CompileErrorType::MissingArrow },
            CompileError { location: at(&path, 6), error: CompileErrorType::UnmatchedBracket },
        ]);
    }

    #[test]
    fn undeclared_symbols_reported() {
        let path = PathBuf::from("example_data/undeclared.cfg");
        let errors = parse_file(&path).unwrap_err();

        assert_eq!(errors, vec![
            CompileError { location: at(&path, 4), error: CompileErrorType::UndefinedTerminal("c".to_string()) },
            CompileError { location: at(&path, 5), error: CompileErrorType::UndefinedVariable("B".to_string()) },
        ]);
    }

    #[test]
    fn declarations_checked() {
        let path = PathBuf::new();

        assert_eq!(parse_str("T = {a}\n<S> -> a", &path).unwrap_err(), vec![
            CompileError { location: nowhere(), error: CompileErrorType::MissingDeclaration('V') },
        ]);
        assert_eq!(parse_str("V = {S}\nT = {a}\nT = {b}\n<S> -> a", &path).unwrap_err(), vec![
            CompileError { location: at(&path, 3), error: CompileErrorType::DuplicateDeclaration('T') },
        ]);
        assert_eq!(parse_str("V = {}\nT = {a}", &path).unwrap_err(), vec![
            CompileError { location: nowhere(), error: CompileErrorType::NoStartVariable },
        ]);
    }

    #[test]
    fn missing_file() {
        let path = PathBuf::from("example_data/does_not_exist.cfg");
        let errors = parse_file(&path).unwrap_err();

        assert_eq!(errors, vec![io_error(std::io::ErrorKind::NotFound.into(), path)]);
    }

    #[test]
    fn written_synthetic_names() {
        let text = "V = {<S_u#1>,<D#2>,<C[\\u{3e}]>,<B[S]>,<S>}\nT = {a,>}\n<S_u#1> -> <C[\\u{3e}]><D#2>\n<D#2> -> a<B[S]>";
        let grammar = parse_str(text, &PathBuf::new()).unwrap();

        assert_eq!(grammar.start(), &Variable::Union(1));
        assert_eq!(grammar.variables().iter().cloned().collect_vec(), vec![
            Variable::Union(1),
            Variable::Chain(2),
            Variable::Isolated(">".to_string()),
            Variable::Tail(Box::new(Variable::named("S"))),
            Variable::named("S"),
        ]);
        assert_eq!(grammar.rules_of(&Variable::Union(1)).next().map(|rule| rule.right.clone()), Some(vec![
            Symbol::Variable(Variable::Isolated(">".to_string())),
            Symbol::Variable(Variable::Chain(2)),
        ]));
    }

    #[test]
    fn split_words() {
        assert_eq!(split_word("a b(c)"), vec!["a", "b", "(", "c", ")"]);
        assert!(split_word("  ").is_empty());
    }
}
