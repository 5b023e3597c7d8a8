use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::types::{ColumnType, Row, Value},
};

/// Table schema definition
///
/// Column order is fixed at creation and drives positional INSERT binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl Table {
    pub fn new(name: String, columns: Vec<ColumnDef>) -> Self {
        Self { name, columns }
    }

    /// Validates table schema
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::Execution(format!(
                "table {} has no columns",
                self.name
            )));
        }
        Ok(())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Binds values positionally to the declared columns
    pub fn make_row(&self, values: Vec<Value>) -> Result<Row> {
        if values.len() != self.columns.len() {
            return Err(Error::Execution(format!(
                "Expected {} values, got {}",
                self.columns.len(),
                values.len()
            )));
        }
        Ok(values)
    }

    /// Resolves column names to positions, reporting every unknown name at once
    pub fn resolve_columns(&self, names: &[String]) -> Result<Vec<usize>> {
        let mut positions = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.columns.iter().position(|c| c.name == *name) {
                Some(pos) => positions.push(pos),
                None => missing.push(name.as_str()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::Execution(format!(
                "Unknown columns in SELECT: {}",
                missing.join(", ")
            )));
        }
        Ok(positions)
    }
}

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    /// Accepted but not enforced yet
    pub nullable: bool,
    /// Accepted but not enforced yet
    pub primary_key: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
            primary_key: false,
        }
    }
}
