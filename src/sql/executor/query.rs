use crate::{
    error::Result,
    sql::{
        engine::Engine,
        executor::{Executor, ResultSet},
    },
};

/// Table scan executor (SELECT), projecting when columns are listed
pub struct Scan {
    table_name: String,
    columns: Option<Vec<String>>,
}

impl Scan {
    pub fn new(table_name: String, columns: Option<Vec<String>>) -> Box<Self> {
        Box::new(Self {
            table_name,
            columns,
        })
    }
}

impl<E: Engine> Executor<E> for Scan {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        engine.select(&self.table_name, self.columns.as_deref())
    }
}
