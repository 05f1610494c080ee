//! Webhook actions understood by the bartender.

use std::fmt;
use std::str::FromStr;

/// Action names configured on the agent's intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Look a cocktail up by name
    Search,
    /// Suggest a random cocktail
    Random,
    /// Follow-up turn where the user names the cocktail to search
    SearchSpecify,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::Random => "random",
            Action::SearchSpecify => "search.specify",
        }
    }
}

/// Returned when the agent sends an action this service does not handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Action::Search),
            "random" => Ok(Action::Random),
            "search.specify" => Ok(Action::SearchSpecify),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
