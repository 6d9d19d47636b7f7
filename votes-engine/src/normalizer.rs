//! Maps raw vote inputs onto signed integer vote values.
use votes_shared::types::VoteInput;

/// Words that count as an up vote.
pub const POSITIVE_WORDS: [&str; 8] = [
    "up", "upvote", "like", "liked", "positive", "yes", "good", "true",
];

/// Words that count as a down vote.
pub const NEGATIVE_WORDS: [&str; 8] = [
    "down", "downvote", "dislike", "disliked", "negative", "no", "bad", "false",
];

/// Normalizes a raw vote input into the integer value that gets stored.
///
/// Integers pass through unchanged, booleans map to `1`/`-1` and words are
/// matched case-sensitively against [`POSITIVE_WORDS`] and [`NEGATIVE_WORDS`].
/// Any other word is a neutral vote.
pub fn normalize(input: &VoteInput) -> i64 {
    match input {
        VoteInput::Integer(value) => *value,
        VoteInput::Bool(true) => 1,
        VoteInput::Bool(false) => -1,
        VoteInput::Word(word) => {
            if POSITIVE_WORDS.contains(&word.as_str()) {
                1
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                -1
            } else {
                0
            }
        }
    }
}
