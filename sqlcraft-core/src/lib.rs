//! Sqlcraft Core - a fluent SQL statement builder and execution wrapper
//!
//! This crate lets calling code assemble SELECT, INSERT, UPDATE and DELETE
//! statements by chaining clause calls on a builder, then render the final
//! SQL text or execute it against a live MySQL connection and get typed
//! results back.
//!
//! ```no_run
//! use sqlcraft_core::{Config, Values};
//!
//! # #[cfg(feature = "mysql")]
//! # async fn demo() -> sqlcraft_core::Result<()> {
//! let mut db = sqlcraft_core::MySqlSession::connect(
//!     &Config::new("localhost", "app", "secret", "shop"),
//! ).await?;
//!
//! let users: Vec<serde_json::Value> = db
//!     .select("id, name")
//!     .from("users")
//!     .where_("status = 'active'")
//!     .get_all()
//!     .await?;
//!
//! let id = db
//!     .insert("users", Values::new().set("name", "O'Brien").set("age", 30))
//!     .run()
//!     .await?;
//! # let _ = (users, id);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod escape;
pub mod executor;
pub mod value;

// Re-export main types
pub use builder::{
    DeleteBuilder, InsertBuilder, IntoColumns, IntoPredicates, JoinKind, SelectBuilder, Statement,
    UpdateBuilder,
};
pub use error::{Error, Result};
pub use escape::escape;
pub use executor::{Config, Connection, Database};
pub use value::{FloatPolicy, Value, Values};

#[cfg(feature = "mysql")]
pub use executor::mysql::MySqlSession;
