use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean combinators accepted as operator keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    #[serde(rename = "$and")]
    And,
    #[serde(rename = "$or")]
    Or,
}

impl Combinator {
    pub const ALL: [Combinator; 2] = [Combinator::Or, Combinator::And];

    /// The operator key as written in filter input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "$and",
            Combinator::Or => "$or",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$and" => Some(Combinator::And),
            "$or" => Some(Combinator::Or),
            _ => None,
        }
    }

    /// Comma-separated list of known keys, used in error messages.
    pub fn known_keys() -> String {
        Self::ALL
            .iter()
            .map(Combinator::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn keyword(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
