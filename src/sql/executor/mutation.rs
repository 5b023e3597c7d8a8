use crate::{
    error::Result,
    sql::{
        engine::Engine,
        executor::{Executor, ResultSet},
        types::Value,
    },
};

/// INSERT executor
pub struct Insert {
    table_name: String,
    values: Vec<Value>,
}

impl Insert {
    pub fn new(table_name: String, values: Vec<Value>) -> Box<Self> {
        Box::new(Self { table_name, values })
    }
}

impl<E: Engine> Executor<E> for Insert {
    fn execute(self: Box<Self>, engine: &mut E) -> Result<ResultSet> {
        engine.insert(&self.table_name, self.values)?;
        Ok(ResultSet::Insert { count: 1 })
    }
}
