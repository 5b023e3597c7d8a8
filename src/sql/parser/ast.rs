use crate::sql::{schema::ColumnDef, types::Value};

/// Abstract Syntax Tree (AST) node definitions for SQL statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE TABLE statement
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
    },
    /// INSERT statement, values are bound positionally at execution
    Insert {
        table_name: String,
        values: Vec<Value>,
    },
    /// SELECT statement
    Select {
        table_name: String,
        /// Requested columns in order; None means `*`
        columns: Option<Vec<String>>,
    },
}
