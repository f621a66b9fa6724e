pub mod algebra;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod graph;
pub mod normal_form;
pub mod normalize;
pub mod parser;
pub mod properties;
pub mod recognizer;

pub use grammar::{Grammar, GrammarError, Rule, Symbol, Variable, Word};
pub use recognizer::Algorithm;
