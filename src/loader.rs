use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use crate::error::PolicyError;

/// One service entry in the reference data. Other keys are ignored.
#[derive(Debug, Deserialize)]
struct ServiceEntry {
    #[serde(rename = "StringPrefix")]
    string_prefix: String,
    #[serde(rename = "Actions", default)]
    actions: Vec<String>,
}

/// Flatten reference data into `prefix:action` identifiers.
///
/// The input is an object keyed by service name, where each value carries a
/// `StringPrefix` and an `Actions` list. Malformed JSON is mapped into
/// `PolicyError::Serialization`; identifiers are validated later, when the
/// universe is built.
///
/// Example:
/// ```rust
/// use iam_universe::loader::parse_reference;
/// let text = r#"{
///     "Amazon S3": { "StringPrefix": "s3", "Actions": ["GetObject", "PutObject"] }
/// }"#;
/// let actions = parse_reference(text).unwrap();
/// assert_eq!(actions, vec!["s3:getobject", "s3:putobject"]);
/// ```
pub fn parse_reference(text: &str) -> Result<Vec<String>, PolicyError> {
    let services: BTreeMap<String, ServiceEntry> = serde_json::from_str(text)?;
    Ok(flatten(services))
}

/// Same as [`parse_reference`], reading from `reader`.
pub fn read_reference<R: Read>(reader: R) -> Result<Vec<String>, PolicyError> {
    let services: BTreeMap<String, ServiceEntry> = serde_json::from_reader(reader)?;
    Ok(flatten(services))
}

fn flatten(services: BTreeMap<String, ServiceEntry>) -> Vec<String> {
    let actions: Vec<String> = services
        .values()
        .flat_map(|service| {
            service.actions.iter().map(move |action| {
                format!("{}:{}", service.string_prefix, action).to_lowercase()
            })
        })
        .collect();

    debug!(
        event = "Reference",
        phase = "Loaded",
        services = services.len(),
        actions = actions.len()
    );

    actions
}
