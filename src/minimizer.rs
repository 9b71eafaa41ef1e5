//! Minimization: the smallest prefix-wildcard cover of a concrete action set.
//!
//! For a desired set `D`, every prefix of every action in `universe − D` is
//! "denied". Each action in `D` is replaced by its shortest prefix that is not
//! denied, with a trailing `*` when the prefix is shorter than the action. A
//! non-denied prefix can only be shared with actions in `D`, so the result
//! expands back to exactly `D`.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use itertools::Itertools;
use tracing::{debug, info};

use crate::error::PolicyError;
use crate::options::MinimizeOptions;
use crate::prefix::prefixes_for_action;
use crate::resolver::desired_actions;
use crate::stats::MinimizeStats;
use crate::timers::{PhaseTimer, as_millis_f64};
use crate::types::{ActionList, Policy, PolicyDocument, Statement, StatementList};
use crate::universe::PermissionUniverse;

/// Minimized, sorted `Action` list for one `Allow` statement.
pub fn minimize_statement(
    universe: &PermissionUniverse,
    statement: &Statement,
    options: MinimizeOptions,
) -> Result<Vec<String>, PolicyError> {
    let desired = desired_actions(universe, statement)?;
    let denied = denied_prefixes(universe, &desired)?;

    let minimized = desired
        .iter()
        .map(|action| minimal_prefix(action, &denied, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(minimized.into_iter().sorted().dedup().collect())
}

/// Every prefix of every universe action outside `desired`.
pub(crate) fn denied_prefixes(
    universe: &PermissionUniverse,
    desired: &BTreeSet<String>,
) -> Result<HashSet<String>, PolicyError> {
    let mut denied = HashSet::new();
    for action in universe.difference(desired) {
        denied.extend(prefixes_for_action(action)?);
    }
    Ok(denied)
}

fn minimal_prefix(
    action: &str,
    denied: &HashSet<String>,
    options: MinimizeOptions,
) -> Result<String, PolicyError> {
    // A denied action extends this one, e.g. `iam:create` vs `iam:createrole`.
    if denied.contains(action) {
        debug!(event = "Minimize", phase = "DeniedPrefix", action = action);
        return Ok(action.to_string());
    }

    let prefixes = prefixes_for_action(action)?;
    let full = prefixes.len() - 1;

    // prefixes[i] has a verb part of exactly i characters.
    for (verb_len, prefix) in prefixes.into_iter().enumerate() {
        if options.too_short(verb_len) || denied.contains(&prefix) {
            continue;
        }
        if verb_len < full {
            return Ok(format!("{prefix}*"));
        }
        return Ok(prefix);
    }

    debug!(event = "Minimize", phase = "NoPrefix", action = action);
    Ok(action.to_string())
}

/// Minimize every statement of `policy`, returning a new policy.
pub fn minimize_policy(
    universe: &PermissionUniverse,
    policy: &Policy,
    options: MinimizeOptions,
) -> Result<Policy, PolicyError> {
    minimize_policy_with_stats(universe, policy, options).map(|(minimized, _)| minimized)
}

/// As [`minimize_policy`], also returning the before/after size report.
pub fn minimize_policy_with_stats(
    universe: &PermissionUniverse,
    policy: &Policy,
    options: MinimizeOptions,
) -> Result<(Policy, MinimizeStats), PolicyError> {
    let start_size = serialized_size(policy)?;

    let mut elapsed = Duration::ZERO;
    let statements = {
        let _timer = PhaseTimer::new(&mut elapsed);
        policy
            .statements()
            .iter()
            .map(|statement| {
                let actions = minimize_statement(universe, statement, options)?;
                let mut minimized = statement.clone();
                minimized.action = Some(ActionList::Many(actions));
                Ok(minimized)
            })
            .collect::<Result<Vec<_>, PolicyError>>()?
    };

    let minimized = Policy {
        statement: StatementList::Many(statements),
        ..policy.clone()
    };

    let stats = MinimizeStats {
        statements: minimized.statements().len(),
        start_size,
        end_size: serialized_size(&minimized)?,
        duration_ms: as_millis_f64(elapsed),
    };

    info!(
        event = "Minimize",
        phase = "Policy",
        statements = stats.statements,
        start_size = stats.start_size,
        end_size = stats.end_size,
        duration_ms = stats.duration_ms
    );

    Ok((minimized, stats))
}

/// Minimize a bare policy or every policy under a recognized header.
pub fn minimize_document(
    universe: &PermissionUniverse,
    document: &PolicyDocument,
    options: MinimizeOptions,
) -> Result<PolicyDocument, PolicyError> {
    document.try_map(|policy| minimize_policy(universe, policy, options))
}

fn serialized_size(policy: &Policy) -> Result<usize, PolicyError> {
    Ok(serde_json::to_string_pretty(policy)?.len())
}
