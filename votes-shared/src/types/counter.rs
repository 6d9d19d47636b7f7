use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// A denormalized vote counter a votable type may declare.
///
/// Counters mirror aggregate queries over the votable's votes and are only
/// ever written by the cache synchronizer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CounterField {
    /// Number of votes of any value.
    Total,
    /// Number of votes valued 1.
    Up,
    /// Number of votes valued 0.
    Neutral,
    /// Number of votes valued -1.
    Down,
}

impl CounterField {
    pub const ALL: [CounterField; 4] = [
        CounterField::Total,
        CounterField::Up,
        CounterField::Neutral,
        CounterField::Down,
    ];

    /// Storage column name of the counter.
    pub fn column_name(&self) -> &'static str {
        match self {
            CounterField::Total => "cached_votes_total",
            CounterField::Up => "cached_votes_up",
            CounterField::Neutral => "cached_votes_neutral",
            CounterField::Down => "cached_votes_down",
        }
    }

    /// The vote value this counter tallies, or `None` for the total.
    pub fn counted_value(&self) -> Option<i64> {
        match self {
            CounterField::Total => None,
            CounterField::Up => Some(1),
            CounterField::Neutral => Some(0),
            CounterField::Down => Some(-1),
        }
    }
}

impl Display for CounterField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Counter values keyed by field, as read from or written to a votable.
pub type CounterValues = BTreeMap<CounterField, i64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        let names: Vec<&str> = CounterField::ALL.iter().map(|f| f.column_name()).collect();
        assert_eq!(
            names,
            vec![
                "cached_votes_total",
                "cached_votes_up",
                "cached_votes_neutral",
                "cached_votes_down"
            ]
        );
    }

    #[test]
    fn test_counted_values() {
        assert_eq!(CounterField::Total.counted_value(), None);
        assert_eq!(CounterField::Up.counted_value(), Some(1));
        assert_eq!(CounterField::Neutral.counted_value(), Some(0));
        assert_eq!(CounterField::Down.counted_value(), Some(-1));
    }
}
