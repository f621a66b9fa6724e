mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{info, LevelFilter};
use rand::prelude::*;

use grammarian::error_handling::{Error, ErrorType, Location};
use grammarian::generator::{self, GenerateError};
use grammarian::parser::{self, split_word};
use grammarian::Grammar;
use cli::{Cli, Command};

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    // RUST_LOG still has the last word
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn located<T: ErrorType>(file: &Path, error: T) -> Error<T> {
    Error {
        location: Location::file(file.to_path_buf()),
        error
    }
}

fn report<T: ErrorType>(errors: impl IntoIterator<Item = Error<T>>) -> ExitCode {
    for error in errors {
        eprintln!("{}", error);
    }
    ExitCode::FAILURE
}

fn run(cli: &Cli, mut grammar: Grammar) -> Result<(), ExitCode> {
    match &cli.command {
        Command::Show => print!("{}", grammar),
        Command::Clean => {
            grammar.delete_null_productions();
            grammar.delete_unit_productions();
            grammar.delete_useless_symbols_productions();
            print!("{}", grammar);
        }
        Command::Chomsky => {
            grammar.transform_chomsky();
            print!("{}", grammar);
        }
        Command::Greibach => {
            grammar.transform_greibach();
            print!("{}", grammar);
        }
        Command::Check { words, algorithm } => {
            for word in words {
                let accepted = grammar.accepts(&split_word(word), *algorithm)
                    .map_err(|e| report([located(&cli.file, e)]))?;
                println!("{}\t{}", if accepted { "accepted" } else { "rejected" }, word);
            }
        }
        Command::Properties => {
            println!("empty: {}", grammar.empty_language());
            println!("infinite: {}", grammar.infinite_language());
            println!("right linear: {}", grammar.is_right_linear());
            println!("left linear: {}", grammar.is_left_linear());
        }
        Command::Generate { amount, limit, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy()
            };
            for _ in 0..*amount {
                let word = generator::generate(&grammar, &mut rng, *limit)
                    .map_err(|error| report([GenerateError { location: Location::file(cli.file.clone()), error }]))?;
                println!("{}", word.concat());
            }
        }
        Command::Union { other } => {
            let other_grammar = parser::parse_file(other).map_err(report)?;
            let union = grammar.union(&other_grammar).map_err(|e| report([located(other, e)]))?;
            print!("{}", union);
        }
        Command::Concat { other } => {
            let other_grammar = parser::parse_file(other).map_err(report)?;
            let concatenation = grammar.concatenation(&other_grammar).map_err(|e| report([located(other, e)]))?;
            print!("{}", concatenation);
        }
        Command::Closure => print!("{}", grammar.closure())
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let grammar = match parser::parse_file(&cli.file) {
        Ok(grammar) => grammar,
        Err(errors) => return report(errors)
    };
    info!("Read {} rules from {}", grammar.rules().len(), cli.file.display());

    match run(&cli, grammar) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code
    }
}
