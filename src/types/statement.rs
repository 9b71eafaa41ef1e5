//! Policy statements and their action lists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::effect::Effect;

/// `Action`/`NotAction` as written in a document: a single pattern or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ActionList {
    One(String),
    Many(Vec<String>),
}

impl ActionList {
    /// The patterns as a slice, whichever form was used.
    pub fn patterns(&self) -> &[String] {
        match self {
            ActionList::One(pattern) => std::slice::from_ref(pattern),
            ActionList::Many(patterns) => patterns,
        }
    }
}

impl From<Vec<String>> for ActionList {
    fn from(value: Vec<String>) -> Self {
        ActionList::Many(value)
    }
}

impl From<&str> for ActionList {
    fn from(value: &str) -> Self {
        ActionList::One(value.to_string())
    }
}

/// One policy statement. Fields other than `Effect`, `Action` and `NotAction`
/// (`Sid`, `Resource`, `Condition`, ...) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "Effect")]
    pub effect: Effect,
    #[serde(rename = "Action", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionList>,
    #[serde(rename = "NotAction", default, skip_serializing_if = "Option::is_none")]
    pub not_action: Option<ActionList>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Statement {
    pub fn new(effect: Effect) -> Self {
        Statement {
            effect,
            action: None,
            not_action: None,
            extra: Map::new(),
        }
    }

    pub fn with_action(mut self, action: impl Into<ActionList>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_not_action(mut self, not_action: impl Into<ActionList>) -> Self {
        self.not_action = Some(not_action.into());
        self
    }

    /// `Action` patterns, empty when absent.
    pub fn action_patterns(&self) -> &[String] {
        self.action.as_ref().map(ActionList::patterns).unwrap_or(&[])
    }

    /// `NotAction` patterns, empty when absent.
    pub fn not_action_patterns(&self) -> &[String] {
        self.not_action
            .as_ref()
            .map(ActionList::patterns)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statement_scalar_action() {
        let stmt: Statement =
            serde_json::from_value(json!({"Effect": "Allow", "Action": "s3:*"})).unwrap();
        assert_eq!(stmt.action, Some(ActionList::One("s3:*".to_string())));
        assert_eq!(stmt.action_patterns(), &["s3:*".to_string()]);
        assert!(stmt.not_action_patterns().is_empty());
    }

    #[test]
    fn test_statement_keeps_unknown_fields() {
        let input = json!({
            "Sid": "ReadOnly",
            "Effect": "Allow",
            "NotAction": ["iam:*"],
            "Resource": "*",
            "Condition": {"Bool": {"aws:MultiFactorAuthPresent": "true"}}
        });
        let stmt: Statement = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(stmt.extra.len(), 3);
        assert_eq!(serde_json::to_value(&stmt).unwrap(), input);
    }

    #[test]
    fn test_statement_requires_effect() {
        let result = serde_json::from_value::<Statement>(json!({"Action": "s3:*"}));
        assert!(result.is_err());
    }
}
