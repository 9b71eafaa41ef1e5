use super::*;
use crate::types::{ActionList, Effect};
use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::sync::Arc;


const REFERENCE: &str = r#"{
    "AWS Identity and Access Management": {
        "StringPrefix": "iam",
        "Actions": ["CreateRole", "CreateUser", "DeleteRole", "GetRole"]
    },
    "Amazon S3": {
        "StringPrefix": "s3",
        "Actions": ["GetBucketPolicy", "GetObject", "ListBucket", "PutObject"]
    },
    "Amazon EC2": {
        "StringPrefix": "ec2",
        "Actions": ["DescribeInstances", "DescribeRegions", "RunInstances", "TerminateInstances"]
    }
}"#;

static UNIVERSE: Lazy<Arc<PermissionUniverse>> = Lazy::new(|| {
    Arc::new(PermissionUniverse::from_reference_str(REFERENCE).expect("test reference must load"))
});

fn analyzer() -> PolicyAnalyzer {
    PolicyAnalyzer::from_shared(Arc::clone(&UNIVERSE))
}

fn analyzer_with(actions: &[&str]) -> PolicyAnalyzer {
    PolicyAnalyzer::new(PermissionUniverse::from_actions(actions).unwrap())
}

fn statement(value: Value) -> Statement {
    serde_json::from_value(value).unwrap()
}

fn policy(value: Value) -> Policy {
    serde_json::from_value(value).unwrap()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_analyzer_from_reference() {
    let analyzer = PolicyAnalyzer::from_reference_str(REFERENCE).unwrap();
    assert_eq!(analyzer.universe().len(), 12);
    assert_eq!(analyzer.universe().technologies().count(), 3);
}

#[test]
fn test_analyzer_rejects_bad_reference() {
    let result = PolicyAnalyzer::from_reference_str(r#"["not", "a", "map"]"#);
    assert!(matches!(result, Err(PolicyError::Serialization(_))));
}

#[test]
fn test_clones_share_universe() {
    let analyzer = analyzer();
    let clone = analyzer.clone();
    assert!(Arc::ptr_eq(&analyzer.shared_universe(), &clone.shared_universe()));
}

#[test]
fn test_validate_statement() {
    let analyzer = analyzer();
    let ok = statement(json!({"Effect": "Allow", "Action": ["iam:Get*", "s3:ListBucket"]}));
    assert_eq!(
        analyzer.validate_statement(&ok).unwrap(),
        set(&["iam:getrole", "s3:listbucket"])
    );

    let unknown = statement(json!({"Effect": "Allow", "Action": "iam:PassRole"}));
    assert_eq!(
        analyzer.validate_statement(&unknown),
        Err(PolicyError::UnknownAction("iam:passrole".to_string()))
    );
    assert_eq!(analyzer.resolve(&unknown), set(&["iam:passrole"]));
}

#[test]
fn test_concurrent_analysis() {
    use std::thread;

    let analyzer = analyzer();
    let mut handles = vec![];

    for i in 0..8 {
        let analyzer = analyzer.clone();
        let handle = thread::spawn(move || {
            let stmt = Statement::new(Effect::Allow).with_action(if i % 2 == 0 {
                "ec2:Describe*"
            } else {
                "s3:Get*"
            });
            for _ in 0..50 {
                let expanded = analyzer.expand_policy(
                    &Policy::new(vec![stmt.clone()]),
                    ExpandOptions::default(),
                );
                let minimized = analyzer
                    .minimize_policy(&expanded, MinimizeOptions::default())
                    .unwrap();
                assert_eq!(
                    analyzer.resolve(&minimized.statements()[0]),
                    analyzer.resolve(&expanded.statements()[0])
                );
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_expand_pattern_via_analyzer() {
    let analyzer = analyzer();
    assert_eq!(
        analyzer.expand_pattern("ec2:*Instances"),
        set(&[
            "ec2:describeinstances",
            "ec2:runinstances",
            "ec2:terminateinstances"
        ])
    );
    assert_eq!(analyzer.expand_pattern("newsvc:*"), set(&["newsvc:*"]));
}

#[test]
fn test_action_list_stays_scalar_until_rewritten() {
    let stmt = statement(json!({"Effect": "Deny", "Action": "s3:*"}));
    let expanded = analyzer().expand_policy(&Policy::new(vec![stmt]), ExpandOptions::default());
    assert_eq!(
        expanded.statements()[0].action,
        Some(ActionList::One("s3:*".to_string()))
    );
}
