//! The permission universe: every concrete action known to the reference data.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use tracing::debug;

use crate::error::PolicyError;
use crate::loader;
use crate::types::ActionId;

/// Immutable set of lowercase `technology:verb` identifiers, indexed by technology.
///
/// Built once and shared read-only, typically behind an `Arc`. Every member is
/// guaranteed to be lowercase and well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionUniverse {
    actions: BTreeSet<String>,
    by_technology: BTreeMap<String, BTreeSet<String>>,
}

impl PermissionUniverse {
    /// Build from concrete identifiers. Input is lowercased; malformed entries
    /// fail with `PolicyError::InvalidFormat`.
    pub fn from_actions<I, S>(actions: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut universe = PermissionUniverse::default();
        for action in actions {
            let id: ActionId = action.as_ref().parse()?;
            let canonical = id.to_string();
            universe
                .by_technology
                .entry(id.technology().to_string())
                .or_default()
                .insert(canonical.clone());
            universe.actions.insert(canonical);
        }

        debug!(
            event = "Universe",
            phase = "Built",
            technologies = universe.by_technology.len(),
            actions = universe.actions.len()
        );

        Ok(universe)
    }

    /// Build from reference data JSON, see [`loader::parse_reference`].
    pub fn from_reference_str(text: &str) -> Result<Self, PolicyError> {
        Self::from_actions(loader::parse_reference(text)?)
    }

    /// Build from reference data JSON read from `reader`.
    pub fn from_reference_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        Self::from_actions(loader::read_reference(reader)?)
    }

    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// All actions in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }

    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.by_technology.keys().map(String::as_str)
    }

    /// Actions belonging to one technology, empty if the technology is unknown.
    pub fn actions_for_technology<'a>(
        &'a self,
        technology: &str,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        self.by_technology
            .get(technology)
            .into_iter()
            .flat_map(|actions| actions.iter().map(String::as_str))
    }

    /// Every action in the universe that is not in `actions`.
    pub fn difference<'a>(
        &'a self,
        actions: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a str> {
        self.actions.difference(actions).map(String::as_str)
    }
}
