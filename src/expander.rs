use tracing::debug;

use crate::options::ExpandOptions;
use crate::resolver::resolve_statement;
use crate::types::{ActionList, Effect, Policy, PolicyDocument, Statement, StatementList};
use crate::universe::PermissionUniverse;

/// Rewrite one statement's `Action`/`NotAction` into a sorted explicit `Action` list.
pub fn expand_statement(universe: &PermissionUniverse, statement: &Statement) -> Statement {
    let actions = resolve_statement(universe, statement);

    let mut expanded = statement.clone();
    expanded.not_action = None;
    expanded.action = Some(ActionList::Many(actions.into_iter().collect()));
    expanded
}

/// Expand every statement of `policy`, returning a new policy.
///
/// `Statement` always comes back as a list. `Deny` statements are copied
/// untouched unless `options.expand_deny` is set.
pub fn expand_policy(
    universe: &PermissionUniverse,
    policy: &Policy,
    options: ExpandOptions,
) -> Policy {
    let statements = policy
        .statements()
        .iter()
        .map(|statement| {
            if statement.effect == Effect::Deny && !options.expand_deny {
                debug!(event = "Expand", phase = "SkipDeny");
                statement.clone()
            } else {
                expand_statement(universe, statement)
            }
        })
        .collect();

    Policy {
        statement: StatementList::Many(statements),
        ..policy.clone()
    }
}

/// Expand a bare policy or every policy under a recognized header.
pub fn expand_document(
    universe: &PermissionUniverse,
    document: &PolicyDocument,
    options: ExpandOptions,
) -> PolicyDocument {
    document.map(|policy| expand_policy(universe, policy, options))
}
