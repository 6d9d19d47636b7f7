//! Aggregate statistics over a set of votes.
//!
//! All functions are pure and treat an empty slice as "no opinion": zero
//! sums, a zero mean and no winner.
use std::collections::BTreeMap;

use num_rational::Ratio;
use votes_shared::types::{CounterField, Vote, VoteAggregate};

/// Sum of all vote values.
///
/// Accumulates in `i128`, which holds the sum of any number of `i64` values
/// a slice can contain.
pub fn sum(votes: &[Vote]) -> i128 {
    votes.iter().map(|vote| i128::from(vote.value)).sum()
}

/// Exact arithmetic mean of the vote values, `0` when there are no votes.
pub fn mean(votes: &[Vote]) -> Ratio<i128> {
    if votes.is_empty() {
        return Ratio::from_integer(0);
    }
    Ratio::new(sum(votes), votes.len() as i128)
}

/// Number of votes carrying exactly `value`.
pub fn count_by_value(votes: &[Vote], value: i64) -> i64 {
    votes.iter().filter(|vote| vote.value == value).count() as i64
}

/// Number of votes per distinct value.
pub fn counts_by_value(votes: &[Vote]) -> BTreeMap<i64, i64> {
    let mut counts = BTreeMap::new();
    for vote in votes {
        *counts.entry(vote.value).or_insert(0) += 1;
    }
    counts
}

/// The single most frequent value.
///
/// Returns `None` when there are no votes or when two or more values share
/// the highest count.
pub fn winner(votes: &[Vote]) -> Option<i64> {
    let counts = counts_by_value(votes);
    let max = counts.values().copied().max()?;

    let mut leaders = counts
        .into_iter()
        .filter(|(_, count)| *count == max)
        .map(|(value, _)| value);

    match (leaders.next(), leaders.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}

/// Live value of a counter field over the given votes.
pub fn counter_value(votes: &[Vote], field: CounterField) -> i64 {
    match field.counted_value() {
        Some(value) => count_by_value(votes, value),
        None => votes.len() as i64,
    }
}

/// Computes every aggregate in one pass over the counts.
pub fn summarize(votes: &[Vote]) -> VoteAggregate {
    VoteAggregate {
        total: votes.len() as i64,
        sum: sum(votes),
        mean: mean(votes),
        counts_by_value: counts_by_value(votes),
        winner: winner(votes),
    }
}
