//! INSERT statement builder

use super::Statement;
use crate::executor::{Connection, Database};
use crate::value::{FloatPolicy, Values};
use crate::Result;

/// Builder for INSERT statements.
///
/// Constructed with a target table and a value map; columns and values
/// render in the map's insertion order. Integers and floats are emitted as
/// bare numeric literals, text as quoted and escaped literals.
#[derive(Debug)]
pub struct InsertBuilder<'a, C: Connection> {
    db: &'a mut Database<C>,
    table: String,
    values: Values,
}

impl<'a, C: Connection> InsertBuilder<'a, C> {
    pub(crate) fn new(db: &'a mut Database<C>, table: String, values: Values) -> Self {
        Self { db, table, values }
    }

    /// Render, execute, and return the generated auto-increment id (0 when
    /// the table has none).
    pub async fn run(self) -> Result<u64> {
        let sql = self.sql()?;
        self.db.conn_mut().execute_returning_id(&sql).await
    }
}

impl<C: Connection> Statement for InsertBuilder<'_, C> {
    fn sql(&self) -> Result<String> {
        let mut columns = Vec::with_capacity(self.values.len());
        let mut literals = Vec::with_capacity(self.values.len());
        for (column, value) in self.values.iter() {
            columns.push(column);
            literals.push(value.literal(FloatPolicy::Bare, |s| self.db.escape(s)));
        }

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.table,
            columns.join(", "),
            literals.join(", ")
        ))
    }
}
