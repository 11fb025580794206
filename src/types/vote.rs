use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ballot option as the governor contract encodes it: `0 = Against`,
/// `1 = For`, `2 = Abstain`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteChoice {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(VoteChoice::Against),
            1 => Some(VoteChoice::For),
            2 => Some(VoteChoice::Abstain),
            _ => None,
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteChoice::Against => "against",
            VoteChoice::For => "for",
            VoteChoice::Abstain => "abstain",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown vote choice '{0}' (expected for, against or abstain)")]
pub struct UnknownChoice(pub String);

impl FromStr for VoteChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "against" | "0" => Ok(VoteChoice::Against),
            "for" | "1" => Ok(VoteChoice::For),
            "abstain" | "2" => Ok(VoteChoice::Abstain),
            _ => Err(UnknownChoice(s.to_string())),
        }
    }
}
