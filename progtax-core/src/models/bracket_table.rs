use std::ops::Deref;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::Bracket;

/// Reasons a bracket table is rejected at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBracketTable {
    /// The table has no brackets at all.
    #[error("bracket table is empty")]
    Empty,

    /// A finite upper bound is below zero.
    #[error("bracket {index} has a negative upper bound {bound}")]
    NegativeUpperBound { index: usize, bound: Decimal },

    /// Upper bounds must be strictly ascending, starting above zero.
    #[error("bracket {index} upper bound {bound} does not exceed the previous bound {previous}")]
    NotAscending {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    /// Rates must be within [0, 1].
    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },

    /// An unbounded bracket can only appear at the end of the table.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    /// The top bracket has a finite bound, which would leave income above it untaxed.
    #[error("top bracket must be unbounded, found upper bound {0}")]
    BoundedTopBracket(Decimal),
}

/// A validated, immutable progressive schedule.
///
/// Brackets are ascending by upper bound, cover income from zero upward, and
/// the last one is unbounded. Once built, a table can be handed to
/// [`ProgressiveTax`](crate::calculations::ProgressiveTax) without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Validates `brackets` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBracketTable`] if:
    /// - the list is empty
    /// - a finite upper bound is negative or not strictly above the previous one
    /// - a rate is outside [0, 1]
    /// - an unbounded bracket appears before the end, or the last bracket is bounded
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use progtax_core::{Bracket, BracketTable, InvalidBracketTable};
    ///
    /// let table = BracketTable::new(vec![
    ///     Bracket::bounded(dec!(10000), dec!(0)),
    ///     Bracket::unbounded(dec!(0.20)),
    /// ]);
    /// assert!(table.is_ok());
    ///
    /// let truncated = BracketTable::new(vec![Bracket::bounded(dec!(10000), dec!(0.10))]);
    /// assert_eq!(truncated, Err(InvalidBracketTable::BoundedTopBracket(dec!(10000))));
    /// ```
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, InvalidBracketTable> {
        Self::validate(&brackets)?;
        Ok(Self { brackets })
    }

    fn validate(brackets: &[Bracket]) -> Result<(), InvalidBracketTable> {
        let last_index = brackets
            .len()
            .checked_sub(1)
            .ok_or(InvalidBracketTable::Empty)?;

        let mut previous = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(InvalidBracketTable::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.upper_bound {
                Some(bound) if bound < Decimal::ZERO => {
                    return Err(InvalidBracketTable::NegativeUpperBound { index, bound });
                }
                Some(bound) if bound <= previous => {
                    return Err(InvalidBracketTable::NotAscending {
                        index,
                        bound,
                        previous,
                    });
                }
                Some(bound) if index == last_index => {
                    return Err(InvalidBracketTable::BoundedTopBracket(bound));
                }
                Some(bound) => previous = bound,
                None if index != last_index => {
                    return Err(InvalidBracketTable::UnboundedBeforeEnd { index });
                }
                None => {}
            }
        }

        Ok(())
    }

}

impl Deref for BracketTable {
    type Target = [Bracket];

    fn deref(&self) -> &Self::Target {
        &self.brackets
    }
}

/// The built-in five bracket schedule (0%, 7.5%, 15%, 22.5%, 27.5%).
impl Default for BracketTable {
    fn default() -> Self {
        Self {
            brackets: default_brackets(),
        }
    }
}

/// Returns the brackets of the built-in schedule.
pub fn default_brackets() -> Vec<Bracket> {
    vec![
        Bracket::bounded(Decimal::new(2_284_776, 2), Decimal::ZERO),
        Bracket::bounded(Decimal::new(3_391_980, 2), Decimal::new(75, 3)),
        Bracket::bounded(Decimal::new(4_501_260, 2), Decimal::new(15, 2)),
        Bracket::bounded(Decimal::new(5_597_616, 2), Decimal::new(225, 3)),
        Bracket::unbounded(Decimal::new(275, 3)),
    ]
}
