//! Policy documents and per-principal policy containers.

use std::collections::BTreeMap;
use std::convert::Infallible;

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::statement::Statement;

/// `Statement` as written in a document: one statement or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatementList {
    One(Box<Statement>),
    Many(Vec<Statement>),
}

impl StatementList {
    pub fn statements(&self) -> &[Statement] {
        match self {
            StatementList::One(statement) => std::slice::from_ref(statement.as_ref()),
            StatementList::Many(statements) => statements,
        }
    }
}

/// A single policy: `Version`, `Statement` and anything else, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "Statement")]
    pub statement: StatementList,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Policy {
    pub fn new(statements: Vec<Statement>) -> Self {
        Policy {
            version: None,
            statement: StatementList::Many(statements),
            extra: Map::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn statements(&self) -> &[Statement] {
        self.statement.statements()
    }
}

/// Top-level keys that wrap a map of named policies, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PolicyHeader {
    RolePolicies,
    GroupPolicies,
    UserPolicies,
    Policy,
}

/// Either a bare [`Policy`] or a header-keyed container of named policies.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyDocument {
    Bare(Policy),
    Container {
        header: PolicyHeader,
        policies: BTreeMap<String, Policy>,
    },
}

impl PolicyDocument {
    /// Apply `f` to the bare policy, or to every policy under the header.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&Policy) -> Result<Policy, E>,
    ) -> Result<PolicyDocument, E> {
        match self {
            PolicyDocument::Bare(policy) => Ok(PolicyDocument::Bare(f(policy)?)),
            PolicyDocument::Container { header, policies } => {
                let policies = policies
                    .iter()
                    .map(|(name, policy)| Ok((name.clone(), f(policy)?)))
                    .collect::<Result<BTreeMap<_, _>, E>>()?;
                Ok(PolicyDocument::Container {
                    header: *header,
                    policies,
                })
            }
        }
    }

    /// Infallible form of [`PolicyDocument::try_map`].
    pub fn map(&self, mut f: impl FnMut(&Policy) -> Policy) -> PolicyDocument {
        match self.try_map::<Infallible>(|policy| Ok(f(policy))) {
            Ok(mapped) => mapped,
            Err(never) => match never {},
        }
    }

    /// All policies in the document, paired with their name when wrapped.
    pub fn policies(&self) -> Vec<(Option<&str>, &Policy)> {
        match self {
            PolicyDocument::Bare(policy) => vec![(None, policy)],
            PolicyDocument::Container { policies, .. } => policies
                .iter()
                .map(|(name, policy)| (Some(name.as_str()), policy))
                .collect(),
        }
    }
}

impl From<Policy> for PolicyDocument {
    fn from(value: Policy) -> Self {
        PolicyDocument::Bare(value)
    }
}

impl Serialize for PolicyDocument {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PolicyDocument::Bare(policy) => policy.serialize(ser),
            PolicyDocument::Container { header, policies } => {
                let mut map = ser.serialize_map(Some(1))?;
                map.serialize_entry(header.as_ref(), policies)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PolicyDocument {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut top = Map::<String, Value>::deserialize(de)?;

        for header in PolicyHeader::iter() {
            if let Some(inner) = top.remove(header.as_ref()) {
                let policies: BTreeMap<String, Policy> =
                    serde_json::from_value(inner).map_err(D::Error::custom)?;
                return Ok(PolicyDocument::Container { header, policies });
            }
        }

        serde_json::from_value(Value::Object(top))
            .map(PolicyDocument::Bare)
            .map_err(D::Error::custom)
    }
}
