use crate::{
    error::{Error, Result},
    sql::{
        executor::{Executor, ResultSet},
        parser::{self, ast::Statement},
        schema::Table,
        types::{Row, Value},
    },
};

pub mod kv;

/// Table store operations (DDL and DML)
///
/// Table names are matched case-insensitively but keep their original
/// casing in the stored schema. Rows are append-only.
pub trait Engine {
    /// Registers a new, empty table; fails if the name is taken
    fn create_table(&mut self, table: Table) -> Result<()>;
    fn get_table(&self, table_name: &str) -> Result<Option<Table>>;
    /// Lists every table schema, ordered by name
    fn list_tables(&self) -> Result<Vec<Table>>;
    /// Appends an already validated row to the end of the table
    fn create_row(&mut self, table: &Table, row: Row) -> Result<()>;
    /// Returns every row of the table in insertion order
    fn scan_table(&self, table: &Table) -> Result<Vec<Row>>;

    /// Returns table info, returns error if table doesn't exist
    fn must_get_table(&self, table_name: &str) -> Result<Table> {
        self.get_table(table_name)?.ok_or_else(|| {
            Error::Execution(format!("Table '{}' does not exist", table_name))
        })
    }

    /// Binds values positionally to the table's columns and appends the row
    fn insert(&mut self, table_name: &str, values: Vec<Value>) -> Result<()> {
        let table = self.must_get_table(table_name)?;
        let row = table.make_row(values)?;
        self.create_row(&table, row)
    }

    /// Returns all rows, projected onto `columns` when given
    ///
    /// A column requested several times is returned once per occurrence.
    fn select(&self, table_name: &str, columns: Option<&[String]>) -> Result<ResultSet> {
        let table = self.must_get_table(table_name)?;
        match columns {
            None => Ok(ResultSet::Scan {
                columns: table.column_names(),
                rows: self.scan_table(&table)?,
            }),
            Some(names) => {
                let positions = table.resolve_columns(names)?;
                let rows = self
                    .scan_table(&table)?
                    .into_iter()
                    .map(|row| positions.iter().map(|&i| row[i].clone()).collect())
                    .collect();
                Ok(ResultSet::Scan {
                    columns: names.to_vec(),
                    rows,
                })
            }
        }
    }
}

/// SQL session owning its database for the session's lifetime
pub struct Session<E: Engine> {
    engine: E,
}

impl<E: Engine + 'static> Session<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Parses and executes a single SQL statement
    pub fn execute(&mut self, sql: &str) -> Result<ResultSet> {
        let stmt = parser::parse(sql)?;
        self.execute_statement(stmt)
    }

    /// Executes an already parsed statement
    pub fn execute_statement(&mut self, stmt: Statement) -> Result<ResultSet> {
        <dyn Executor<E>>::build(stmt).execute(&mut self.engine)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
