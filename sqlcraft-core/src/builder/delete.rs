//! DELETE statement builder

use super::{and_join, IntoPredicates, Statement};
use crate::executor::{Connection, Database};
use crate::{Error, Result};

/// Builder for DELETE statements.
///
/// Starts with no target table; [`from`](Self::from) must be called before
/// rendering. Unlike the SELECT builder, [`where_`](Self::where_) replaces
/// the predicate list instead of appending to it — only the most recent
/// call's predicates are kept.
#[derive(Debug)]
pub struct DeleteBuilder<'a, C: Connection> {
    db: &'a mut Database<C>,
    table: Option<String>,
    predicates: Vec<String>,
}

impl<'a, C: Connection> DeleteBuilder<'a, C> {
    pub(crate) fn new(db: &'a mut Database<C>) -> Self {
        Self {
            db,
            table: None,
            predicates: Vec::new(),
        }
    }

    /// Set the target table (last write wins).
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Set the WHERE predicate list, replacing anything set before.
    pub fn where_(mut self, predicates: impl IntoPredicates) -> Self {
        self.predicates = predicates.into_predicates();
        self
    }

    /// Render, execute, and return the affected-row count.
    pub async fn run(self) -> Result<u64> {
        let sql = self.sql()?;
        self.db.conn_mut().execute_returning_affected(&sql).await
    }
}

impl<C: Connection> Statement for DeleteBuilder<'_, C> {
    fn sql(&self) -> Result<String> {
        let table = self
            .table
            .as_deref()
            .ok_or_else(|| Error::configuration("no table selected"))?;

        let mut sql = format!("DELETE FROM {}", table);
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&and_join(&self.predicates));
        }
        Ok(sql)
    }
}
