use crate::error::PolicyError;
use crate::types::{Effect, Policy, Statement};
use crate::universe::PermissionUniverse;

// Synthetic inputs for benches/. The shapes mimic real reference data: a few
// hundred technologies, verbs sharing common leading words.

const VERBS: [&str; 12] = [
    "Create", "Delete", "Describe", "Get", "List", "Put", "Update", "Tag", "Untag", "Start",
    "Stop", "Modify",
];

const NOUNS: [&str; 8] = [
    "Bucket", "Instance", "Role", "Policy", "Volume", "Snapshot", "Key", "Stream",
];

/// A universe of `technologies * VERBS * NOUNS` actions, `svc0:createbucket` and so on.
pub fn synthetic_universe(technologies: usize) -> Result<PermissionUniverse, PolicyError> {
    let actions = (0..technologies).flat_map(|idx| {
        VERBS.iter().flat_map(move |verb| {
            NOUNS
                .iter()
                .map(move |noun| format!("svc{idx}:{verb}{noun}"))
        })
    });
    PermissionUniverse::from_actions(actions)
}

/// One read-only `Allow` statement per technology, e.g. `svc3:Describe*`, `svc3:Get*`, `svc3:List*`.
pub fn read_only_policy(technologies: usize) -> Policy {
    let statements = (0..technologies)
        .map(|idx| {
            Statement::new(Effect::Allow).with_action(vec![
                format!("svc{idx}:Describe*"),
                format!("svc{idx}:Get*"),
                format!("svc{idx}:List*"),
            ])
        })
        .collect();
    Policy::new(statements).with_version("2012-10-17")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_universe_size() {
        let universe = synthetic_universe(3).unwrap();
        assert_eq!(universe.len(), 3 * VERBS.len() * NOUNS.len());
        assert!(universe.contains("svc2:describeinstance"));
    }

    #[test]
    fn test_read_only_policy() {
        let policy = read_only_policy(4);
        assert_eq!(policy.statements().len(), 4);
        assert_eq!(policy.statements()[1].action_patterns()[0], "svc1:Describe*");
    }
}
