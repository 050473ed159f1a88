//! Error types for Sqlcraft

use thiserror::Error;

/// The main error type for Sqlcraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// Connection establishment failed
    #[error("could not connect: {code} - {message}")]
    Connection { code: String, message: String },

    /// A builder was invoked in an invalid state
    #[error("invalid statement: {message}")]
    Configuration { message: String },

    /// The database rejected or failed to execute a rendered statement
    #[error("could not execute query: {code} - {message} - {sql}")]
    Execution {
        code: String,
        message: String,
        /// The exact SQL text that was attempted.
        sql: String,
    },

    /// A result row could not be converted into the requested type
    #[error("could not decode row: {message}")]
    Decode { message: String },
}

/// Convenience Result type for Sqlcraft operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new connection error
    pub fn connection(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new execution error
    pub fn execution(
        code: impl Into<String>,
        message: impl Into<String>,
        sql: impl Into<String>,
    ) -> Self {
        Self::Execution {
            code: code.into(),
            message: message.into(),
            sql: sql.into(),
        }
    }

    /// Create a new row decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
