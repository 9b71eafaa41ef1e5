//! Size report for policy minimization.
//!
//! Sizes are the length of the pretty-printed JSON (two-space indent), which is
//! what matters when a policy has to fit a provider's document size limit.

use serde::Serialize;
use utoipa::ToSchema;

/// Before/after figures for one minimized policy.
///
/// # Fields
///
/// * `statements` - Number of statements minimized
/// * `start_size` - Serialized size of the input policy, in bytes
/// * `end_size` - Serialized size of the minimized policy, in bytes
/// * `duration_ms` - Time spent minimizing, excluding serialization
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MinimizeStats {
    pub statements: usize,
    pub start_size: usize,
    pub end_size: usize,
    pub duration_ms: f64,
}

impl MinimizeStats {
    /// Bytes saved; zero if the policy grew.
    pub fn saved_bytes(&self) -> usize {
        self.start_size.saturating_sub(self.end_size)
    }

    /// `end_size / start_size`, or 1.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.start_size == 0 {
            return 1.0;
        }
        self.end_size as f64 / self.start_size as f64
    }
}
