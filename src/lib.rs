//! MiniSQL - a small in-memory SQL database
//!
//! This crate provides:
//! - SQL tokenizing and parsing (lexer, parser, AST)
//! - Statement execution against an in-memory table store
//! - A byte-level key/value storage layer underneath the table store

pub mod error;
pub mod sql;
pub mod storage;

pub use sql::engine::{Engine, Session, kv::Database};
pub use sql::executor::ResultSet;
pub use sql::parser::{ast::Statement, parse};
