use std::collections::BTreeMap;

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over the votes of one votable.
///
/// `sum` and `mean` are widened to `i128` so no set of `i64` votes can overflow;
/// `mean` is an exact rational (serialized as `[numerator, denominator]`);
/// `winner` is `None` when there are no votes or the most frequent value is tied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteAggregate {
    pub total: i64,
    pub sum: i128,
    pub mean: Ratio<i128>,
    pub counts_by_value: BTreeMap<i64, i64>,
    pub winner: Option<i64>,
}

impl Default for VoteAggregate {
    fn default() -> Self {
        Self {
            total: 0,
            sum: 0,
            mean: Ratio::from_integer(0),
            counts_by_value: BTreeMap::new(),
            winner: None,
        }
    }
}
