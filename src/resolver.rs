use std::collections::BTreeSet;

use tracing::debug;

use crate::error::PolicyError;
use crate::matcher::expand_patterns;
use crate::types::{Effect, Statement};
use crate::universe::PermissionUniverse;

/// Actions a statement grants (or denies, for `Deny`), leniently.
///
/// `Action` entries are expanded and unioned. When `NotAction` is present, the
/// universe minus its expansion is added as well. Actions outside the universe
/// are kept, so services missing from the reference data survive expansion.
pub fn resolve_statement(
    universe: &PermissionUniverse,
    statement: &Statement,
) -> BTreeSet<String> {
    let actions = expand_patterns(universe, statement.action_patterns());
    with_not_action(universe, statement, actions)
}

/// As [`resolve_statement`], but every action produced by `Action` must exist
/// in the universe.
pub fn resolve_statement_strict(
    universe: &PermissionUniverse,
    statement: &Statement,
) -> Result<BTreeSet<String>, PolicyError> {
    let actions = expand_patterns(universe, statement.action_patterns());
    ensure_known(universe, &actions)?;
    Ok(with_not_action(universe, statement, actions))
}

/// Add the universe minus the `NotAction` expansion to already-expanded `Action` entries.
fn with_not_action(
    universe: &PermissionUniverse,
    statement: &Statement,
    mut allowed: BTreeSet<String>,
) -> BTreeSet<String> {
    let not_actions = statement.not_action_patterns();
    if !not_actions.is_empty() {
        let excluded = expand_patterns(universe, not_actions);
        allowed.extend(universe.difference(&excluded).map(str::to_string));
    }

    debug!(
        event = "Resolve",
        phase = "Statement",
        effect = statement.effect.as_ref(),
        actions = statement.action_patterns().len(),
        not_actions = not_actions.len(),
        resolved = allowed.len()
    );

    allowed
}

/// The concrete set an `Allow` statement's `Action` names, for minimization.
pub fn desired_actions(
    universe: &PermissionUniverse,
    statement: &Statement,
) -> Result<BTreeSet<String>, PolicyError> {
    if statement.effect != Effect::Allow {
        return Err(PolicyError::Validation(format!(
            "minimization only supports Allow statements, found {}",
            statement.effect
        )));
    }
    if !statement.not_action_patterns().is_empty() {
        return Err(PolicyError::Validation(
            "minimization does not support NotAction".to_string(),
        ));
    }

    let desired = expand_patterns(universe, statement.action_patterns());
    ensure_known(universe, &desired)?;
    Ok(desired)
}

fn ensure_known(
    universe: &PermissionUniverse,
    actions: &BTreeSet<String>,
) -> Result<(), PolicyError> {
    match actions.iter().find(|action| !universe.contains(action)) {
        Some(unknown) => Err(PolicyError::UnknownAction(unknown.clone())),
        None => Ok(()),
    }
}
