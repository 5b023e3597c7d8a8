use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::{schema::Table, types::Row},
    storage::{
        engine::Engine as StorageEngine,
        keycode::{deserialize_key, serialize_key},
        memory::MemoryEngine,
    },
};

use super::Engine;

/// The in-memory database used by sessions
pub type Database = KVEngine<MemoryEngine>;

/// Key-value store backed SQL engine
///
/// Schemas live under `Key::Table`, rows under `Key::Row` with a dense
/// per-table row id, so a prefix scan yields rows in insertion order.
#[derive(Debug, Default)]
pub struct KVEngine<E: StorageEngine> {
    kv: E,
}

impl<E: StorageEngine> KVEngine<E> {
    pub fn new(engine: E) -> Self {
        Self { kv: engine }
    }

    /// Returns the id the next row of the table will get
    fn next_row_id(&self, table_key: &str) -> Result<u64> {
        let prefix = KeyPrefix::Row(table_key.to_string()).encode()?;
        let last = self.kv.scan_prefix(prefix).next_back().transpose()?;
        match last {
            Some((key, _)) => match Key::decode(&key)? {
                Key::Row(_, id) => Ok(id + 1),
                key => Err(Error::Internal(format!(
                    "unexpected key {:?} in row range",
                    key
                ))),
            },
            None => Ok(0),
        }
    }
}

impl<E: StorageEngine> Engine for KVEngine<E> {
    fn create_table(&mut self, table: Table) -> Result<()> {
        table.validate()?;

        // Check if table already exists (names are case-insensitive)
        let key = Key::Table(table.name.to_lowercase()).encode()?;
        if self.kv.get(&key)?.is_some() {
            return Err(Error::Execution(format!(
                "Table '{}' already exists",
                table.name
            )));
        }

        self.kv.set(key, bincode::serialize(&table)?)?;
        tracing::debug!(table = %table.name, columns = table.columns.len(), "created table");
        Ok(())
    }

    fn get_table(&self, table_name: &str) -> Result<Option<Table>> {
        let key = Key::Table(table_name.to_lowercase()).encode()?;
        Ok(self
            .kv
            .get(&key)?
            .map(|v| bincode::deserialize(&v))
            .transpose()?)
    }

    fn list_tables(&self) -> Result<Vec<Table>> {
        let mut tables = self
            .kv
            .scan_prefix(KeyPrefix::Table.encode()?)
            .map(|r| r.and_then(|(_, v)| Ok(bincode::deserialize(&v)?)))
            .collect::<Result<Vec<Table>>>()?;
        // Encoded keys order by name length first
        tables.sort_by_key(|t| t.name.to_lowercase());
        Ok(tables)
    }

    fn create_row(&mut self, table: &Table, row: Row) -> Result<()> {
        let table_key = table.name.to_lowercase();
        let id = self.next_row_id(&table_key)?;
        let key = Key::Row(table_key, id).encode()?;
        self.kv.set(key, bincode::serialize(&row)?)?;
        tracing::debug!(table = %table.name, id, "appended row");
        Ok(())
    }

    fn scan_table(&self, table: &Table) -> Result<Vec<Row>> {
        let prefix = KeyPrefix::Row(table.name.to_lowercase()).encode()?;
        let rows = self
            .kv
            .scan_prefix(prefix)
            .map(|r| r.and_then(|(_, v)| Ok(bincode::deserialize(&v)?)))
            .collect::<Result<Vec<Row>>>()?;
        tracing::debug!(table = %table.name, rows = rows.len(), "scanned table");
        Ok(rows)
    }
}

/// Key types for KV storage operations
#[derive(Debug, Serialize, Deserialize)]
enum Key {
    Table(String),
    Row(String, u64),
}

impl Key {
    fn encode(&self) -> Result<Vec<u8>> {
        serialize_key(self)
    }

    fn decode(data: &[u8]) -> Result<Self> {
        deserialize_key(data)
    }
}

/// Key prefix types for prefix scanning
///
/// Variant indices must line up with `Key`, since an encoded enum starts
/// with its variant index.
#[derive(Debug, Serialize)]
enum KeyPrefix {
    Table,
    Row(String),
}

impl KeyPrefix {
    fn encode(&self) -> Result<Vec<u8>> {
        serialize_key(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Database;
    use crate::{
        error::{Error, Result},
        sql::{
            engine::Engine,
            executor::ResultSet,
            schema::{ColumnDef, Table},
            types::{ColumnType, Value},
        },
    };

    fn users() -> Table {
        Table::new(
            "Users".to_string(),
            vec![
                ColumnDef::new("id", ColumnType::Int),
                ColumnDef::new("name", ColumnType::Text),
            ],
        )
    }

    fn row_count(db: &Database, name: &str) -> Result<usize> {
        let table = db.must_get_table(name)?;
        Ok(db.scan_table(&table)?.len())
    }

    #[test]
    fn test_create_table() -> Result<()> {
        let mut db = Database::default();
        db.create_table(users())?;

        // Lookup ignores case, the schema keeps the original name
        let table = db.must_get_table("USERS")?;
        assert_eq!(table, users());

        let dup = Table::new(
            "users".to_string(),
            vec![ColumnDef::new("x", ColumnType::Int)],
        );
        assert_eq!(
            db.create_table(dup),
            Err(Error::Execution("Table 'users' already exists".to_string()))
        );
        assert_eq!(db.must_get_table("users")?.columns.len(), 2);

        assert_eq!(db.get_table("missing")?, None);
        assert_eq!(
            db.must_get_table("missing"),
            Err(Error::Execution("Table 'missing' does not exist".into()))
        );
        Ok(())
    }

    #[test]
    fn test_list_tables() -> Result<()> {
        let mut db = Database::default();
        assert!(db.list_tables()?.is_empty());
        db.create_table(users())?;
        db.create_table(Table::new(
            "Accounts".to_string(),
            vec![ColumnDef::new("id", ColumnType::Int)],
        ))?;
        db.insert("users", vec![Value::from(1), Value::from("a")])?;

        let names = db
            .list_tables()?
            .into_iter()
            .map(|t| t.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Accounts".to_string(), "Users".to_string()]);
        Ok(())
    }

    #[test]
    fn test_insert() -> Result<()> {
        let mut db = Database::default();
        db.create_table(users())?;

        db.insert("users", vec![Value::from(1), Value::from("Alice")])?;
        assert_eq!(row_count(&db, "users")?, 1);

        // Count mismatch leaves the table untouched
        assert!(matches!(
            db.insert("users", vec![Value::from(2)]),
            Err(Error::Execution(_))
        ));
        let too_many = vec![Value::from(2), Value::from("b"), Value::from(3)];
        assert!(matches!(
            db.insert("users", too_many),
            Err(Error::Execution(_))
        ));
        assert_eq!(row_count(&db, "users")?, 1);

        assert!(matches!(
            db.insert("nope", vec![Value::from(1)]),
            Err(Error::Execution(_))
        ));
        Ok(())
    }

    #[test]
    fn test_insertion_order() -> Result<()> {
        let mut db = Database::default();
        db.create_table(users())?;
        // Neighbouring table names must not share row ranges
        db.create_table(Table::new(
            "Users2".to_string(),
            vec![ColumnDef::new("id", ColumnType::Int)],
        ))?;

        for i in 0..300i64 {
            let name = Value::Text(format!("u{}", i));
            db.insert("users", vec![Value::from(i), name])?;
            db.insert("users2", vec![Value::from(-i)])?;
        }

        let table = db.must_get_table("users")?;
        let rows = db.scan_table(&table)?;
        assert_eq!(rows.len(), 300);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row[0], Value::Integer(i as i64));
        }
        assert_eq!(row_count(&db, "users2")?, 300);
        Ok(())
    }

    #[test]
    fn test_select() -> Result<()> {
        let mut db = Database::default();
        db.create_table(users())?;
        db.insert("users", vec![Value::from(1), Value::from("Alice")])?;
        db.insert("users", vec![Value::from(2), Value::from("Bob")])?;

        assert_eq!(
            db.select("USERS", None)?,
            ResultSet::Scan {
                columns: vec!["id".to_string(), "name".to_string()],
                rows: vec![
                    vec![Value::from(1), Value::from("Alice")],
                    vec![Value::from(2), Value::from("Bob")],
                ],
            }
        );

        let cols = vec!["name".to_string(), "id".to_string(), "name".to_string()];
        assert_eq!(
            db.select("users", Some(cols.as_slice()))?,
            ResultSet::Scan {
                columns: cols.clone(),
                rows: vec![
                    vec![Value::from("Alice"), Value::from(1), Value::from("Alice")],
                    vec![Value::from("Bob"), Value::from(2), Value::from("Bob")],
                ],
            }
        );

        let cols = vec!["age".to_string(), "email".to_string()];
        match db.select("users", Some(cols.as_slice())) {
            Err(Error::Execution(msg)) => assert!(msg.contains("age") && msg.contains("email")),
            other => panic!("unexpected result {:?}", other),
        }

        // Empty tables still report their columns
        db.create_table(Table::new(
            "empty".to_string(),
            vec![ColumnDef::new("a", ColumnType::Bool)],
        ))?;
        assert_eq!(
            db.select("empty", None)?,
            ResultSet::Scan {
                columns: vec!["a".to_string()],
                rows: vec![],
            }
        );
        Ok(())
    }
}
