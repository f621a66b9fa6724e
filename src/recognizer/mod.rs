/*
    This module decides whether a word belongs to the language of a grammar
*/

pub mod cyk;
pub mod earley;
pub mod greibach;

use log::debug;

use crate::grammar::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    // Chart parsing over the Chomsky normal form
    Cyk,
    // Chart parsing over the grammar as it is
    Earley,
    // Backtracking derivation over the Greibach normal form
    Greibach,
}

impl Grammar {
    /// Decides membership of `word` with the chosen algorithm, normalising a
    /// copy of the grammar when the algorithm needs it.
    ///
    /// The normal forms cannot derive the empty word, so it is answered from
    /// the nullable variables of the grammar as given.
    pub fn accepts(&self, word: &Word, algorithm: Algorithm) -> Result<bool, GrammarError> {
        if word.is_empty() {
            return Ok(self.compute_nullable_variables().contains(&self.start));
        }

        let accepted = match algorithm {
            Algorithm::Cyk => {
                let mut chomsky = self.clone();
                chomsky.transform_chomsky();
                cyk::recognize(&chomsky, word)?
            }
            Algorithm::Earley => earley::recognize(self, word),
            Algorithm::Greibach => {
                let mut greibach = self.clone();
                greibach.transform_greibach();
                greibach::recognize(&greibach, word)?
            }
        };
        debug!("{:?} says `{}` is {}", algorithm, word.concat(), if accepted { "accepted" } else { "rejected" });
        Ok(accepted)
    }
}
