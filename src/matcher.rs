//! Glob expansion of action patterns against the permission universe.
//!
//! Patterns follow shell glob rules, matched case-insensitively:
//! - `*` matches any run of characters, including `:`
//! - `?` matches exactly one character
//!
//! A pattern that matches nothing (typically a technology missing from the
//! reference data) expands to itself, lowercased.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::universe::PermissionUniverse;

const WILDCARDS: [char; 2] = ['*', '?'];

pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARDS)
}

/// Concrete actions denoted by one pattern.
pub fn expand_pattern(universe: &PermissionUniverse, pattern: &str) -> BTreeSet<String> {
    let lowered = pattern.to_lowercase();
    if !is_wildcard(&lowered) {
        return BTreeSet::from([lowered]);
    }

    let expanded: BTreeSet<String> = match compile_glob(&lowered) {
        Ok(re) => candidates(universe, &lowered)
            .filter(|action| re.is_match(action))
            .map(str::to_string)
            .collect(),
        Err(err) => {
            warn!(
                event = "Expand",
                phase = "Glob",
                pattern = lowered.as_str(),
                error = err.to_string()
            );
            BTreeSet::new()
        }
    };

    if expanded.is_empty() {
        return BTreeSet::from([lowered]);
    }
    expanded
}

/// Union of [`expand_pattern`] over every pattern.
pub fn expand_patterns<S: AsRef<str>>(
    universe: &PermissionUniverse,
    patterns: &[S],
) -> BTreeSet<String> {
    patterns
        .iter()
        .flat_map(|pattern| expand_pattern(universe, pattern.as_ref()))
        .collect()
}

/// Restrict the scan to one technology when the part before `:` is literal.
fn candidates<'a>(
    universe: &'a PermissionUniverse,
    pattern: &str,
) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    match pattern.split_once(':') {
        Some((technology, _)) if !is_wildcard(technology) => {
            Box::new(universe.actions_for_technology(technology))
        }
        _ => Box::new(universe.iter()),
    }
}

fn compile_glob(pattern: &str) -> Result<Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn universe() -> PermissionUniverse {
        PermissionUniverse::from_actions([
            "ec2:describeinstances",
            "ec2:describeregions",
            "ec2:runinstances",
            "s3:getobject",
            "s3:putobject",
            "s3:getbucketpolicy",
        ])
        .unwrap()
    }

    fn sorted(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[parameterized(
        service_star = { "s3:*", &["s3:getbucketpolicy", "s3:getobject", "s3:putobject"] },
        verb_prefix = { "ec2:Describe*", &["ec2:describeinstances", "ec2:describeregions"] },
        infix = { "s3:*Object", &["s3:getobject", "s3:putobject"] },
        question_mark = { "s3:?utobject", &["s3:putobject"] },
        across_technologies = { "*:get*", &["s3:getbucketpolicy", "s3:getobject"] },
        everything = { "*", &["ec2:describeinstances", "ec2:describeregions", "ec2:runinstances", "s3:getbucketpolicy", "s3:getobject", "s3:putobject"] },
    )]
    fn test_expand_wildcards(pattern: &str, expected: &[&str]) {
        assert_eq!(expand_pattern(&universe(), pattern), sorted(expected));
    }

    #[parameterized(
        known = { "S3:GetObject", "s3:getobject" },
        unknown_concrete = { "NewService:DoThing", "newservice:dothing" },
        unknown_technology_wildcard = { "unknowntech:*", "unknowntech:*" },
        no_match_wildcard = { "s3:Delete*", "s3:delete*" },
    )]
    fn test_expand_falls_back_to_pattern(pattern: &str, expected: &str) {
        assert_eq!(expand_pattern(&universe(), pattern), sorted(&[expected]));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let u = PermissionUniverse::from_actions(["a:x.y", "a:xzy"]).unwrap();
        assert_eq!(expand_pattern(&u, "a:x.*"), sorted(&["a:x.y"]));
    }

    #[test]
    fn test_expand_patterns_unions() {
        let patterns = vec!["s3:Get*".to_string(), "ec2:RunInstances".to_string()];
        assert_eq!(
            expand_patterns(&universe(), patterns.as_slice()),
            sorted(&["ec2:runinstances", "s3:getbucketpolicy", "s3:getobject"])
        );
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard("s3:*"));
        assert!(is_wildcard("s3:get?bject"));
        assert!(!is_wildcard("s3:getobject"));
    }
}
