//! Command-language front end: tokens, lexer, and parser.

pub mod lexer;
pub mod parser;
pub mod token;
