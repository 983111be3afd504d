//! Error type shared by the library and the CLI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReminderError>;

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("reminder schedule {0} not found")]
    ScheduleNotFound(i32),

    #[error("no action mapping registered for `{0}`")]
    UnknownMapping(String),

    #[error("action mapping `{0}` is already registered")]
    DuplicateMapping(String),

    /// A filter references a parameter that was never bound.
    #[error("query parameter `{0}` is not bound")]
    UnboundParam(String),

    /// A bound parameter cannot be rendered as a SQL value.
    #[error("query parameter `{name}` has an unsupported value: {value}")]
    UnsupportedParam {
        name: String,
        value: serde_json::Value,
    },

    #[error("configuration error: {0}")]
    Config(String),
}
