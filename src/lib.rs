pub use engine::PolicyAnalyzer;
pub use error::PolicyError;
pub use options::{ExpandOptions, MinimizeOptions};
pub use prefix::prefixes_for_action;
pub use stats::MinimizeStats;
pub use types::{
    ActionId, ActionList, Effect, Policy, PolicyDocument, PolicyHeader, Statement, StatementList,
};
pub use universe::PermissionUniverse;

pub mod bench_helpers;
pub mod expander;
pub mod loader;
pub mod matcher;
pub mod minimizer;
pub mod resolver;

mod engine;
mod error;
mod options;
mod prefix;
mod stats;
mod timers;
mod types;
mod universe;
