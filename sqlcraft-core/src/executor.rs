//! Connection abstraction and the database wrapper that hands out builders

use std::future::Future;

use crate::builder::{DeleteBuilder, InsertBuilder, IntoColumns, IntoPredicates, SelectBuilder, UpdateBuilder};
use crate::value::Values;
use crate::Result;

/// A live database connection the builders execute against.
///
/// One connection serves one statement at a time; the exclusive borrow each
/// builder takes on the [`Database`] wrapper enforces that. Every operation
/// runs to completion with no internal retry.
pub trait Connection: Send {
    /// Escape a raw string for a single-quoted SQL literal.
    ///
    /// The default follows MySQL's `real_escape_string` rules; a backend may
    /// override it with a charset-aware routine.
    fn escape(&self, raw: &str) -> String {
        crate::escape::escape(raw)
    }

    /// Run a statement and collect the result rows as JSON objects keyed by
    /// column name.
    fn fetch_rows(
        &mut self,
        sql: &str,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>>> + Send;

    /// Run a statement and return the generated auto-increment id (0 when
    /// the table has none).
    fn execute_returning_id(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send;

    /// Run a statement and return the affected-row count.
    fn execute_returning_affected(&mut self, sql: &str)
        -> impl Future<Output = Result<u64>> + Send;

    /// Run a statement and discard any result.
    fn execute(&mut self, sql: &str) -> impl Future<Output = Result<()>> + Send;

    /// Close the connection.
    fn close(self) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized;
}

/// Connection parameters for a MySQL server.
#[derive(Debug, Clone)]
pub struct Config {
    host: String,
    user: String,
    password: String,
    database: String,
    port: u16,
    charset: String,
}

impl Config {
    /// Parameters for `host:3306` with the `utf8` character set.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
            port: 3306,
            charset: "utf8".to_string(),
        }
    }

    /// Override the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the connection character set.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

/// Owns a [`Connection`] and hands out single-use statement builders.
///
/// Each factory call increments a statement counter, exposed through
/// [`queries`](Self::queries). Builders borrow the wrapper mutably for their
/// whole construct-then-render-or-run lifecycle, which also serializes
/// access to the underlying connection.
#[derive(Debug)]
pub struct Database<C: Connection> {
    conn: C,
    queries: u64,
}

impl<C: Connection> Database<C> {
    /// Wrap an already-established connection.
    pub fn new(conn: C) -> Self {
        Self { conn, queries: 0 }
    }

    /// Start a SELECT statement. Pass `()` for `SELECT *` or a column
    /// expression string.
    pub fn select(&mut self, columns: impl IntoColumns) -> SelectBuilder<'_, C> {
        self.queries += 1;
        SelectBuilder::new(self, columns.into_columns())
    }

    /// Start an INSERT statement for the given table and value map.
    pub fn insert(&mut self, table: impl Into<String>, values: Values) -> InsertBuilder<'_, C> {
        self.queries += 1;
        InsertBuilder::new(self, table.into(), values)
    }

    /// Start an UPDATE statement. The where specification may be a single
    /// predicate, a collection, or `()` for none.
    pub fn update(
        &mut self,
        table: impl Into<String>,
        values: Values,
        predicates: impl IntoPredicates,
    ) -> UpdateBuilder<'_, C> {
        self.queries += 1;
        UpdateBuilder::new(self, table.into(), values, predicates.into_predicates())
    }

    /// Start a DELETE statement; set its table with `from()`.
    pub fn delete(&mut self) -> DeleteBuilder<'_, C> {
        self.queries += 1;
        DeleteBuilder::new(self)
    }

    /// Number of statements handed out by the factories.
    pub fn queries(&self) -> u64 {
        self.queries
    }

    /// Escape a raw string via the connection.
    pub fn escape(&self, raw: &str) -> String {
        self.conn.escape(raw)
    }

    /// Run a one-off statement that produces no result.
    pub async fn execute(&mut self, sql: &str) -> Result<()> {
        self.conn.execute(sql).await
    }

    /// Close the underlying connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut C {
        &mut self.conn
    }
}

/// MySQL backend over a single sqlx connection
#[cfg(feature = "mysql")]
pub mod mysql {
    use super::*;
    use crate::{Error, Result};
    use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
    use sqlx::{Column, ConnectOptions, Connection as _, Row, TypeInfo};

    /// A single live MySQL connection.
    pub struct MySqlSession {
        inner: MySqlConnection,
    }

    impl MySqlSession {
        /// Establish a connection and wrap it in a [`Database`].
        pub async fn connect(config: &Config) -> Result<Database<MySqlSession>> {
            let options = MySqlConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.database)
                .charset(&config.charset);

            let inner = options.connect().await.map_err(connection_error)?;
            Ok(Database::new(MySqlSession { inner }))
        }
    }

    impl Connection for MySqlSession {
        async fn fetch_rows(&mut self, sql: &str) -> Result<Vec<serde_json::Value>> {
            let rows = sqlx::query(sql)
                .fetch_all(&mut self.inner)
                .await
                .map_err(|e| execution_error(e, sql))?;
            rows.iter().map(row_to_json).collect()
        }

        async fn execute_returning_id(&mut self, sql: &str) -> Result<u64> {
            let result = sqlx::query(sql)
                .execute(&mut self.inner)
                .await
                .map_err(|e| execution_error(e, sql))?;
            Ok(result.last_insert_id())
        }

        async fn execute_returning_affected(&mut self, sql: &str) -> Result<u64> {
            let result = sqlx::query(sql)
                .execute(&mut self.inner)
                .await
                .map_err(|e| execution_error(e, sql))?;
            Ok(result.rows_affected())
        }

        async fn execute(&mut self, sql: &str) -> Result<()> {
            sqlx::query(sql)
                .execute(&mut self.inner)
                .await
                .map_err(|e| execution_error(e, sql))?;
            Ok(())
        }

        async fn close(self) -> Result<()> {
            self.inner
                .close()
                .await
                .map_err(|e| Error::connection(native_code(&e), e.to_string()))
        }
    }

    fn connection_error(err: sqlx::Error) -> Error {
        Error::connection(native_code(&err), err.to_string())
    }

    fn execution_error(err: sqlx::Error, sql: &str) -> Error {
        Error::execution(native_code(&err), err.to_string(), sql)
    }

    fn decode_error(err: sqlx::Error) -> Error {
        Error::decode(err.to_string())
    }

    /// The server-side error code, or "0" when the failure happened before
    /// the server could answer.
    fn native_code(err: &sqlx::Error) -> String {
        match err {
            sqlx::Error::Database(db) => db
                .code()
                .map(|c| c.into_owned())
                .unwrap_or_else(|| "0".to_string()),
            _ => "0".to_string(),
        }
    }

    /// Convert one result row into a JSON object keyed by column name.
    fn row_to_json(row: &MySqlRow) -> Result<serde_json::Value> {
        let mut object = serde_json::Map::new();
        for column in row.columns() {
            let index = column.ordinal();
            let value = match column.type_info().name() {
                "NULL" => serde_json::Value::Null,
                "BOOLEAN" => row
                    .try_get::<Option<bool>, _>(index)
                    .map(json_from)
                    .map_err(decode_error)?,
                "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
                    .try_get::<Option<i64>, _>(index)
                    .map(json_from)
                    .map_err(decode_error)?,
                "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED"
                | "INT UNSIGNED" | "BIGINT UNSIGNED" => row
                    .try_get::<Option<u64>, _>(index)
                    .map(json_from)
                    .map_err(decode_error)?,
                "FLOAT" => row
                    .try_get::<Option<f32>, _>(index)
                    .map(|v| json_float(v.map(f64::from)))
                    .map_err(decode_error)?,
                "DOUBLE" => row
                    .try_get::<Option<f64>, _>(index)
                    .map(json_float)
                    .map_err(decode_error)?,
                "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB"
                | "BIT" | "GEOMETRY" => row
                    .try_get::<Option<Vec<u8>>, _>(index)
                    .map(json_bytes)
                    .map_err(decode_error)?,
                // CHAR/VARCHAR/TEXT, ENUM/SET, DECIMAL and the temporal
                // types all arrive as text
                _ => row
                    .try_get::<Option<String>, _>(index)
                    .map(json_from)
                    .map_err(decode_error)?,
            };
            object.insert(column.name().to_string(), value);
        }
        Ok(serde_json::Value::Object(object))
    }

    fn json_from<T: Into<serde_json::Value>>(value: Option<T>) -> serde_json::Value {
        value.map(Into::into).unwrap_or(serde_json::Value::Null)
    }

    fn json_float(value: Option<f64>) -> serde_json::Value {
        value
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }

    fn json_bytes(value: Option<Vec<u8>>) -> serde_json::Value {
        match value {
            Some(bytes) => serde_json::Value::Array(
                bytes
                    .into_iter()
                    .map(|b| serde_json::Value::Number(b.into()))
                    .collect(),
            ),
            None => serde_json::Value::Null,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{mock_db, MockConnection};
    use super::*;
    use crate::{Error, Statement, Values};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct User {
        id: i64,
        name: String,
    }

    #[tokio::test]
    async fn test_get_all_returns_typed_rows() {
        let mut db = Database::new(MockConnection::with_rows(vec![
            json!({"id": 1, "name": "John"}),
            json!({"id": 2, "name": "Jane"}),
        ]));

        let users: Vec<User> = db
            .select("id, name")
            .from("users")
            .get_all()
            .await
            .unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "John");
        assert_eq!(users[1].name, "Jane");
    }

    #[tokio::test]
    async fn test_get_all_zero_rows_is_empty_not_error() {
        let mut db = mock_db();
        let users: Vec<User> = db.select(()).from("users").get_all().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_get_one_returns_first_row() {
        let mut db = Database::new(MockConnection::with_rows(vec![
            json!({"id": 1, "name": "John"}),
            json!({"id": 2, "name": "Jane"}),
        ]));

        let user: Option<User> = db.select(()).from("users").get_one().await.unwrap();
        assert_eq!(
            user,
            Some(User {
                id: 1,
                name: "John".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_get_one_zero_rows_is_none_not_error() {
        let mut db = mock_db();
        let user: Option<User> = db
            .select(())
            .from("users")
            .where_("id = 999")
            .get_one()
            .await
            .unwrap();
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_insert_run_returns_generated_id() {
        let mut db = Database::new(MockConnection {
            insert_id: 42,
            ..MockConnection::new()
        });

        let id = db
            .insert("users", Values::new().set("name", "Jane"))
            .run()
            .await
            .unwrap();
        assert_eq!(id, 42);
        assert_eq!(
            db.connection().executed,
            vec!["INSERT INTO users (name) VALUES ('Jane');".to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_run_returns_affected_count() {
        let mut db = Database::new(MockConnection {
            affected: 3,
            ..MockConnection::new()
        });

        let affected = db
            .update("users", Values::new().set("active", 0), "age < 18")
            .run()
            .await
            .unwrap();
        assert_eq!(affected, 3);
    }

    #[tokio::test]
    async fn test_delete_run_returns_affected_count() {
        let mut db = Database::new(MockConnection {
            affected: 2,
            ..MockConnection::new()
        });

        let affected = db
            .delete()
            .from("users")
            .where_("status = 'inactive'")
            .run()
            .await
            .unwrap();
        assert_eq!(affected, 2);
        assert_eq!(
            db.connection().executed,
            vec!["DELETE FROM users WHERE status = 'inactive'".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_without_table_never_reaches_connection() {
        let mut db = mock_db();
        let result = db.delete().where_("id = 1").run().await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
        assert!(db.connection().executed.is_empty());
    }

    #[tokio::test]
    async fn test_execution_error_carries_attempted_sql() {
        let mut db = Database::new(MockConnection::failing());
        let result: Result<Vec<User>> = db.select(()).from("users").get_all().await;
        match result {
            Err(Error::Execution { sql, code, .. }) => {
                assert_eq!(sql, "SELECT *\nFROM users\n");
                assert_eq!(code, "1064");
            }
            other => panic!("expected execution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_modification_failure_propagates() {
        let mut db = Database::new(MockConnection::failing());
        let result = db
            .insert("users", Values::new().set("name", "x"))
            .run()
            .await;
        assert!(matches!(result, Err(Error::Execution { .. })));
    }

    #[tokio::test]
    async fn test_factories_increment_query_counter() {
        let mut db = mock_db();
        assert_eq!(db.queries(), 0);

        let _ = db.select(()).from("users").sql();
        let _ = db.insert("users", Values::new().set("a", 1)).sql();
        let _ = db.update("users", Values::new().set("a", 1), ()).sql();
        let _ = db.delete().from("users").sql();
        assert_eq!(db.queries(), 4);
    }

    #[tokio::test]
    async fn test_one_off_execute() {
        let mut db = mock_db();
        db.execute("SET NAMES 'utf8'").await.unwrap();
        assert_eq!(
            db.connection().executed,
            vec!["SET NAMES 'utf8'".to_string()]
        );
        // one-off statements bypass the factories and the counter
        assert_eq!(db.queries(), 0);
    }

    #[tokio::test]
    async fn test_close() {
        let db = mock_db();
        db.close().await.unwrap();
    }

    #[test]
    fn test_database_escape_uses_connection() {
        let db = mock_db();
        assert_eq!(db.escape("it's"), "it\\'s");
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new("localhost", "root", "", "test");
        assert_eq!(config.port, 3306);
        assert_eq!(config.charset, "utf8");

        let config = config.port(3307).charset("utf8mb4");
        assert_eq!(config.port, 3307);
        assert_eq!(config.charset, "utf8mb4");
    }
}
