//! The interpreter/dispatch engine: field validators, the static entity
//! schema registry, and the command interpreter itself.

pub mod interpreter;
pub mod schema;
pub mod validators;
