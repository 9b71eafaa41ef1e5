use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::PolicyError;
use crate::options::{ExpandOptions, MinimizeOptions};
use crate::stats::MinimizeStats;
use crate::types::{Policy, PolicyDocument, Statement};
use crate::universe::PermissionUniverse;
use crate::{expander, matcher, minimizer, resolver};

/// The main analyzer handle. Cloneable and thread-safe; clones share one universe.
#[derive(Debug, Clone)]
pub struct PolicyAnalyzer {
    universe: Arc<PermissionUniverse>,
}

impl PolicyAnalyzer {
    pub fn new(universe: PermissionUniverse) -> Self {
        PolicyAnalyzer {
            universe: Arc::new(universe),
        }
    }

    pub fn from_shared(universe: Arc<PermissionUniverse>) -> Self {
        PolicyAnalyzer { universe }
    }

    pub fn from_reference_str(text: &str) -> Result<Self, PolicyError> {
        let universe = PermissionUniverse::from_reference_str(text)?;
        debug!(event = "Analyzer", phase = "Loaded", actions = universe.len());
        Ok(Self::new(universe))
    }

    pub fn universe(&self) -> &PermissionUniverse {
        &self.universe
    }

    pub fn shared_universe(&self) -> Arc<PermissionUniverse> {
        Arc::clone(&self.universe)
    }

    pub fn expand_pattern(&self, pattern: &str) -> BTreeSet<String> {
        matcher::expand_pattern(&self.universe, pattern)
    }

    /// Actions a statement resolves to, keeping actions unknown to the universe.
    pub fn resolve(&self, statement: &Statement) -> BTreeSet<String> {
        resolver::resolve_statement(&self.universe, statement)
    }

    /// Resolve, failing with `UnknownAction` if `Action` names anything outside the universe.
    pub fn validate_statement(
        &self,
        statement: &Statement,
    ) -> Result<BTreeSet<String>, PolicyError> {
        resolver::resolve_statement_strict(&self.universe, statement)
    }

    pub fn expand_policy(&self, policy: &Policy, options: ExpandOptions) -> Policy {
        expander::expand_policy(&self.universe, policy, options)
    }

    pub fn expand_document(
        &self,
        document: &PolicyDocument,
        options: ExpandOptions,
    ) -> PolicyDocument {
        expander::expand_document(&self.universe, document, options)
    }

    pub fn minimize_statement(
        &self,
        statement: &Statement,
        options: MinimizeOptions,
    ) -> Result<Vec<String>, PolicyError> {
        minimizer::minimize_statement(&self.universe, statement, options)
    }

    pub fn minimize_policy(
        &self,
        policy: &Policy,
        options: MinimizeOptions,
    ) -> Result<Policy, PolicyError> {
        minimizer::minimize_policy(&self.universe, policy, options)
    }

    pub fn minimize_policy_with_stats(
        &self,
        policy: &Policy,
        options: MinimizeOptions,
    ) -> Result<(Policy, MinimizeStats), PolicyError> {
        minimizer::minimize_policy_with_stats(&self.universe, policy, options)
    }

    pub fn minimize_document(
        &self,
        document: &PolicyDocument,
        options: MinimizeOptions,
    ) -> Result<PolicyDocument, PolicyError> {
        minimizer::minimize_document(&self.universe, document, options)
    }
}

#[cfg(test)]
mod tests;
