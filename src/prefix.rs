use crate::error::PolicyError;
use crate::types::ActionId;

/// Every prefix of a concrete action, least to most specific.
///
/// `iam:cat` gives `["iam:", "iam:c", "iam:ca", "iam:cat"]`. The verb is cut on
/// character boundaries, so non-ASCII names never split a code point.
pub fn prefixes_for_action(action: &str) -> Result<Vec<String>, PolicyError> {
    let id: ActionId = action.parse()?;
    Ok(prefixes_for_id(&id))
}

fn prefixes_for_id(id: &ActionId) -> Vec<String> {
    let technology = id.technology();
    let verb = id.verb();

    let mut prefixes = Vec::with_capacity(verb.chars().count() + 1);
    prefixes.push(format!("{technology}:"));
    prefixes.extend(
        verb.char_indices()
            .map(|(idx, ch)| format!("{technology}:{}", &verb[..idx + ch.len_utf8()])),
    );
    prefixes
}
