use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One segment of a progressive tax schedule.
///
/// The lower bound is implied by the previous bracket's upper bound (or zero
/// for the first bracket). An `upper_bound` of `None` marks the open-ended top
/// bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl Bracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}
