//! Taller: command-language front end for an auto repair shop system.
//!
//! Operators manage seven business entities (usuarios, vehiculos, servicios,
//! citas, diagnosticos, ordenes de trabajo, pagos) through short imperative
//! Spanish commands:
//!
//! ```text
//! usuario mostrar
//! usuario ver [5]
//! usuario agregar [Juan; juan@mail.com; pass123; 70123456; Calle 1; cliente]
//! cliente mostrar
//! cita reporte
//! ```
//!
//! # Pipeline
//!
//! text → [`lang::lexer`] → tokens → [`lang::parser`] → `Command` →
//! [`interp::interpreter`] validate/interpret → handler → SQLite store →
//! `Outcome` envelope.
//!
//! The interpreter is total: every fault (bad parameter counts, field
//! format violations, missing ids, collaborator errors) comes back as a
//! `{success, message, data}` envelope, never as a panic or an escaped
//! error.
//!
//! # Crate structure
//!
//! - [`lang`]: tokens, lexer, parser (the command-language front end)
//! - [`interp`]: field validators, entity schema registry, interpreter
//! - [`core`]: errors, settings, SQLite access, stores, auth, rendering
//! - [`cli`]: the `taller` binary surface (init / run / exec)

pub mod cli;
pub mod core;
pub mod interp;
pub mod lang;
