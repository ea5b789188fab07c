//! Execution of specifications against values

mod executor;

pub(crate) use executor::{Scope, Traversal, execute_member, execute_root};
