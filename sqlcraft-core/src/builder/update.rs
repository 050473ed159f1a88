//! UPDATE statement builder

use super::{and_join, Statement};
use crate::executor::{Connection, Database};
use crate::value::{FloatPolicy, Values};
use crate::Result;

/// Builder for UPDATE statements.
///
/// Constructed with a table, a value map, and a where specification (a
/// single predicate, a collection, or nothing). The default float policy is
/// [`FloatPolicy::Quoted`]: integers render bare but floats render as quoted
/// strings, matching the system this crate replaced. Call
/// [`float_policy`](Self::float_policy) with [`FloatPolicy::Bare`] for the
/// corrected behavior.
#[derive(Debug)]
pub struct UpdateBuilder<'a, C: Connection> {
    db: &'a mut Database<C>,
    table: String,
    values: Values,
    predicates: Vec<String>,
    floats: FloatPolicy,
}

impl<'a, C: Connection> UpdateBuilder<'a, C> {
    pub(crate) fn new(
        db: &'a mut Database<C>,
        table: String,
        values: Values,
        predicates: Vec<String>,
    ) -> Self {
        Self {
            db,
            table,
            values,
            predicates,
            floats: FloatPolicy::Quoted,
        }
    }

    /// Choose how float values render in the SET clause.
    pub fn float_policy(mut self, policy: FloatPolicy) -> Self {
        self.floats = policy;
        self
    }

    /// Render, execute, and return the affected-row count.
    pub async fn run(self) -> Result<u64> {
        let sql = self.sql()?;
        self.db.conn_mut().execute_returning_affected(&sql).await
    }
}

impl<C: Connection> Statement for UpdateBuilder<'_, C> {
    fn sql(&self) -> Result<String> {
        let assignments: Vec<String> = self
            .values
            .iter()
            .map(|(column, value)| {
                format!(
                    "{} = {}",
                    column,
                    value.literal(self.floats, |s| self.db.escape(s))
                )
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, assignments.join(", "));
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&and_join(&self.predicates));
        }
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::mock_db;

    #[test]
    fn test_update_with_where() {
        let mut db = mock_db();
        let sql = db
            .update("users", Values::new().set("age", 31), "id = 5")
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE users SET age = 31 WHERE id = 5");
    }

    #[test]
    fn test_update_without_where() {
        let mut db = mock_db();
        let sql = db
            .update("users", Values::new().set("active", 0), ())
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE users SET active = 0");
    }

    #[test]
    fn test_update_multiple_predicates() {
        let mut db = mock_db();
        let sql = db
            .update(
                "users",
                Values::new().set("age", 31),
                vec!["id = 5", "status = 'x'"],
            )
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE users SET age = 31 WHERE id = 5 AND status = 'x'");
    }

    #[test]
    fn test_update_escapes_text_values() {
        let mut db = mock_db();
        let sql = db
            .update("users", Values::new().set("name", "O'Brien"), "id = 1")
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE users SET name = 'O\\'Brien' WHERE id = 1");
    }

    // Legacy quirk carried over from the replaced system: UPDATE quotes
    // floats like strings while INSERT emits them bare.
    #[test]
    fn test_update_floats_quoted_by_default() {
        let mut db = mock_db();
        let sql = db
            .update("products", Values::new().set("price", 19.99), "id = 1")
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE products SET price = '19.99' WHERE id = 1");
    }

    #[test]
    fn test_update_floats_bare_when_opted_in() {
        let mut db = mock_db();
        let sql = db
            .update("products", Values::new().set("price", 19.99), "id = 1")
            .float_policy(FloatPolicy::Bare)
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE products SET price = 19.99 WHERE id = 1");
    }

    #[test]
    fn test_update_set_order_follows_value_map() {
        let mut db = mock_db();
        let sql = db
            .update(
                "users",
                Values::new().set("b", 2).set("a", 1),
                (),
            )
            .sql()
            .unwrap();
        assert_eq!(sql, "UPDATE users SET b = 2, a = 1");
    }
}
