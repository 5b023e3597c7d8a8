//! SQL processing module
//!
//! This module provides:
//! - `parser`: SQL lexer and parser
//! - `types`: scalar values and column types
//! - `schema`: Table and column schema definitions
//! - `executor`: Statement execution
//! - `engine`: Table store abstraction and sessions

pub mod engine;
pub mod executor;
pub mod parser;
pub mod schema;
pub mod types;
