//! Fixed set of expense categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Health,
    Entertainment,
    Shopping,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Food,
        Self::Transport,
        Self::Utilities,
        Self::Health,
        Self::Entertainment,
        Self::Shopping,
        Self::Education,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Health => "Health",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Case-insensitive match on the canonical names, after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidCategory(
                "category must not be empty".to_string(),
            ));
        }
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::InvalidCategory(format!("unknown category: {trimmed}")))
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
