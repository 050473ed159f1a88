//! SELECT statement builder

use serde::de::DeserializeOwned;

use super::{and_join, IntoPredicates, JoinClause, JoinKind, Statement};
use crate::executor::{Connection, Database};
use crate::{Error, Result};

/// Builder for SELECT statements.
///
/// Clause calls consume and return the builder, so a whole statement chains
/// from the factory to a terminal call:
///
/// ```ignore
/// let rows: Vec<User> = db
///     .select("id, name")
///     .from("users")
///     .where_("status = 'active'")
///     .order_by("name")
///     .get_all()
///     .await?;
/// ```
#[derive(Debug)]
pub struct SelectBuilder<'a, C: Connection> {
    db: &'a mut Database<C>,
    columns: Option<String>,
    from: Vec<String>,
    joins: Vec<JoinClause>,
    predicates: Vec<String>,
    group_by: Option<String>,
    having: Option<String>,
    order_by: Option<String>,
    limit: Option<String>,
}

impl<'a, C: Connection> SelectBuilder<'a, C> {
    pub(crate) fn new(db: &'a mut Database<C>, columns: Option<String>) -> Self {
        Self {
            db,
            columns,
            from: Vec::new(),
            joins: Vec::new(),
            predicates: Vec::new(),
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
        }
    }

    /// Append a source to the FROM list. Repeatable; sources render
    /// comma-separated in insertion order.
    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.from.push(source.into());
        self
    }

    /// Append a plain (inner) JOIN.
    pub fn join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_kind(target, on, JoinKind::Inner)
    }

    /// Append a LEFT JOIN.
    pub fn left_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_kind(target, on, JoinKind::Left)
    }

    /// Append a RIGHT JOIN.
    pub fn right_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_kind(target, on, JoinKind::Right)
    }

    /// Append an OUTER JOIN.
    pub fn outer_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join_kind(target, on, JoinKind::Outer)
    }

    /// Append a JOIN with an explicit kind, including caller-supplied
    /// keywords via `JoinKind::from("LEFT OUTER")`.
    pub fn join_kind(
        mut self,
        target: impl Into<String>,
        on: impl Into<String>,
        kind: impl Into<JoinKind>,
    ) -> Self {
        self.joins.push(JoinClause {
            target: target.into(),
            predicate: on.into(),
            kind: kind.into(),
        });
        self
    }

    /// Append one predicate or a collection of predicates to the WHERE
    /// list. Predicates are AND-joined in insertion order.
    pub fn where_(mut self, predicates: impl IntoPredicates) -> Self {
        self.predicates.extend(predicates.into_predicates());
        self
    }

    /// Set the GROUP BY expression (last write wins).
    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.group_by = Some(expr.into());
        self
    }

    /// Set the HAVING expression (last write wins).
    pub fn having(mut self, expr: impl Into<String>) -> Self {
        self.having = Some(expr.into());
        self
    }

    /// Set the ORDER BY expression (last write wins).
    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    /// Set the LIMIT expression (last write wins). Any expression the
    /// server accepts is allowed, e.g. `"10"` or `"10, 20"`.
    pub fn limit(mut self, expr: impl Into<String>) -> Self {
        self.limit = Some(expr.into());
        self
    }

    /// Render, execute, and return all matching rows.
    ///
    /// Zero matching rows yields an empty vector, not an error.
    pub async fn get_all<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let sql = self.sql()?;
        let rows = self.db.conn_mut().fetch_rows(&sql).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Error::from))
            .collect()
    }

    /// Render, execute, and return the first matching row, or `None` when
    /// nothing matched.
    pub async fn get_one<T>(self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let sql = self.sql()?;
        let rows = self.db.conn_mut().fetch_rows(&sql).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }
}

impl<C: Connection> Statement for SelectBuilder<'_, C> {
    fn sql(&self) -> Result<String> {
        let mut sql = String::from("SELECT ");
        sql.push_str(self.columns.as_deref().unwrap_or("*"));
        sql.push('\n');

        if !self.from.is_empty() {
            sql.push_str("FROM ");
            sql.push_str(&self.from.join(", "));
            sql.push('\n');
        }

        for join in &self.joins {
            sql.push_str(&join.render());
            sql.push('\n');
        }

        if !self.predicates.is_empty() {
            sql.push_str("WHERE ");
            sql.push_str(&and_join(&self.predicates));
            sql.push('\n');
        }

        if let Some(group_by) = &self.group_by {
            sql.push_str("GROUP BY ");
            sql.push_str(group_by);
            sql.push('\n');
        }

        if let Some(having) = &self.having {
            sql.push_str("HAVING ");
            sql.push_str(having);
            sql.push('\n');
        }

        if let Some(order_by) = &self.order_by {
            sql.push_str("ORDER BY ");
            sql.push_str(order_by);
            sql.push('\n');
        }

        if let Some(limit) = &self.limit {
            sql.push_str("LIMIT ");
            sql.push_str(limit);
            sql.push('\n');
        }

        Ok(sql)
    }
}
