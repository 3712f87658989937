//! Core decision logic: matching and resolution.

mod matcher;
mod resolver;

pub use matcher::{evaluate_policy, match_policies};
pub use resolver::{resolve, Resolver};
