use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Knobs for policy expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ExpandOptions {
    /// Also expand `Deny` statements. Off by default, since inverted deny
    /// sets tend to be enormous.
    pub expand_deny: bool,
}

/// Knobs for policy minimization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MinimizeOptions {
    /// Minimum verb length of a wildcard prefix. `None` and `Some(0)` allow
    /// any length.
    pub minchars: Option<usize>,
}

impl MinimizeOptions {
    pub fn with_minchars(minchars: usize) -> Self {
        MinimizeOptions {
            minchars: Some(minchars),
        }
    }

    /// Whether a candidate whose verb part is `verb_len` characters long is too short.
    /// The bare `technology:` prefix is never too short.
    pub(crate) fn too_short(&self, verb_len: usize) -> bool {
        match self.minchars {
            Some(min) => verb_len != 0 && verb_len < min,
            None => false,
        }
    }
}
