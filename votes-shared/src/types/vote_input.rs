use serde::{Deserialize, Serialize};

/// A raw vote value as submitted by a caller, before normalization.
///
/// Deserializes untagged, so `1`, `true` and `"like"` are all accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum VoteInput {
    /// A numeric vote, stored as-is.
    Integer(i64),
    /// `true` counts as an upvote, `false` as a downvote.
    Bool(bool),
    /// A word such as "like" or "dislike".
    Word(String),
}

impl Default for VoteInput {
    fn default() -> Self {
        VoteInput::Integer(0)
    }
}

impl From<i64> for VoteInput {
    fn from(value: i64) -> Self {
        VoteInput::Integer(value)
    }
}

impl From<i32> for VoteInput {
    fn from(value: i32) -> Self {
        VoteInput::Integer(i64::from(value))
    }
}

impl From<bool> for VoteInput {
    fn from(value: bool) -> Self {
        VoteInput::Bool(value)
    }
}

impl From<&str> for VoteInput {
    fn from(value: &str) -> Self {
        VoteInput::Word(value.to_string())
    }
}

impl From<String> for VoteInput {
    fn from(value: String) -> Self {
        VoteInput::Word(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged() {
        let inputs: Vec<VoteInput> = serde_json::from_str(r#"[42, true, "like", -1]"#).unwrap();
        assert_eq!(
            inputs,
            vec![
                VoteInput::Integer(42),
                VoteInput::Bool(true),
                VoteInput::Word("like".to_string()),
                VoteInput::Integer(-1),
            ]
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(VoteInput::from(7i32), VoteInput::Integer(7));
        assert_eq!(VoteInput::from(false), VoteInput::Bool(false));
        assert_eq!(VoteInput::from("no"), VoteInput::Word("no".to_string()));
        assert_eq!(VoteInput::default(), VoteInput::Integer(0));
    }
}
