//! Concrete `technology:verb` action identifiers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// A concrete, lowercase action identifier such as `ec2:describeinstances`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionId {
    technology: String,
    verb: String,
}

impl ActionId {
    /// The service prefix, e.g. `ec2`.
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// The action name within the technology, e.g. `describeinstances`.
    pub fn verb(&self) -> &str {
        &self.verb
    }
}

impl Display for ActionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.technology, self.verb)
    }
}

impl FromStr for ActionId {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [technology, verb] if !technology.is_empty() && !verb.is_empty() => Ok(ActionId {
                technology: technology.to_lowercase(),
                verb: verb.to_lowercase(),
            }),
            _ => Err(PolicyError::InvalidFormat(format!(
                "Failed to parse action '{s}' (expected format: technology:verb)"
            ))),
        }
    }
}

impl TryFrom<String> for ActionId {
    type Error = PolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActionId> for String {
    fn from(value: ActionId) -> Self {
        value.to_string()
    }
}
