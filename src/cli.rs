use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use grammarian::Algorithm;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Log what the transforms do (-v for steps, -vv for every rule)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the grammar as read
    Show,
    /// Remove null, unit and useless productions
    Clean,
    /// Print the Chomsky normal form
    Chomsky,
    /// Print the Greibach normal form
    Greibach,
    /// Decide whether each word belongs to the language
    Check {
        /// Words to check, one terminal per character (`""` is the empty word)
        words: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Earley)]
        algorithm: Algorithm
    },
    /// Report whether the language is empty or infinite
    Properties,
    /// Generate random words of the language
    Generate {
        /// Amount to generate
        #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
        amount: usize,

        /// Most rewrites a single derivation may take
        #[arg(short, long, value_name = "STEPS", default_value_t = 1000)]
        limit: usize,

        /// Seed for repeatable output (default: random)
        #[arg(short, long)]
        seed: Option<u64>
    },
    /// Print the union with another grammar
    Union {
        /// File containing the other grammar
        other: PathBuf
    },
    /// Print the concatenation with another grammar
    Concat {
        /// File containing the other grammar
        other: PathBuf
    },
    /// Print the Kleene closure
    Closure
}
