use crate::{
    error::Result,
    sql::{
        engine::Engine,
        executor::{Executor, ResultSet},
        schema::{ColumnDef, Table},
    },
};

/// CREATE TABLE executor
pub struct CreateTable {
    schema: Table,
}

impl CreateTable {
    pub fn new(name: String, columns: Vec<ColumnDef>) -> Box<Self> {
        Box::new(Self {
            schema: Table::new(name, columns),
        })
    }
}

impl<E: Engine> Executor<E> for CreateTable {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        let table_name = self.schema.name.clone();
        engine.create_table(self.schema)?;
        Ok(ResultSet::CreateTable { table_name })
    }
}
