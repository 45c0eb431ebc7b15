//! Infrastructure shared by the interpreter and the CLI: errors, settings,
//! database access, the persistence capability, auth, and text rendering.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod output;
pub mod schemas;
pub mod store;
