use crate::{
    error::Result,
    sql::{
        engine::Engine,
        executor::{mutation::Insert, query::Scan, schema::CreateTable},
        parser::ast::Statement,
        types::{Row, Value},
    },
};

mod mutation;
mod query;
mod schema;

/// SQL executor trait
pub trait Executor<E: Engine> {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet>;
}

/// Builds the executor matching a statement variant
///
/// The `'static` bound is required for trait object usage.
impl<E: Engine + 'static> dyn Executor<E> {
    pub fn build(stmt: Statement) -> Box<dyn Executor<E>> {
        match stmt {
            Statement::CreateTable { name, columns } => CreateTable::new(name, columns),
            Statement::Insert { table_name, values } => Insert::new(table_name, values),
            Statement::Select {
                table_name,
                columns,
            } => Scan::new(table_name, columns),
        }
    }
}

/// Execution result set
///
/// Only `Scan` carries rows; the other variants mean the statement succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    CreateTable { table_name: String },
    Insert { count: usize },
    Scan {
        columns: Vec<String>,
        rows: Vec<Row>,
    },
}

impl ResultSet {
    /// Returns the result rows, or None for statements that produce no rows
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            ResultSet::Scan { rows, .. } => Some(rows),
            _ => None,
        }
    }

    /// Returns each row as (column name, value) pairs in output order
    pub fn records(&self) -> Option<Vec<Vec<(&str, &Value)>>> {
        match self {
            ResultSet::Scan { columns, rows } => {
                let records = rows
                    .iter()
                    .map(|row| columns.iter().map(String::as_str).zip(row).collect())
                    .collect();
                Some(records)
            }
            _ => None,
        }
    }
}
