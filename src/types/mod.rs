//! Document and identifier types.
//!
//! Canonical forms:
//! - Action: `technology:verb`, lowercase, exactly one colon
//! - Effect: `Allow` or `Deny`, accepted in any case
//! - Statement/Policy: JSON objects keyed `Effect`, `Action`, `NotAction`,
//!   `Statement`, `Version`; any other key is preserved verbatim
//!
//! Scalar-or-list fields (`Action`, `NotAction`, `Statement`) deserialize from
//! either form and keep the form they were read in until they are rewritten.

mod action_id;
mod effect;
mod policy;
mod statement;

pub use action_id::ActionId;
pub use effect::Effect;
pub use policy::{Policy, PolicyDocument, PolicyHeader, StatementList};
pub use statement::{ActionList, Statement};
