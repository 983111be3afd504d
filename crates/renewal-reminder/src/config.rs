//! Command line and environment configuration.
//!
//! Every flag falls back to an environment variable; a `.env` file is loaded
//! by the binary before parsing.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::db::DatabaseSettings;
use crate::error::{ReminderError, Result};

#[derive(Parser, Debug, Clone)]
#[command(name = "renewal-reminder")]
#[command(about = "Membership renewal reminder eligibility and job registry tooling")]
pub struct Args {
    /// Database connection URL (sqlite://, postgres://, mysql://)
    #[arg(long, env = "DATABASE_URL", value_parser = parse_env_value)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "4")]
    pub db_max_connections: u32,

    /// Connect/acquire timeout in seconds
    #[arg(long, env = "DB_CONNECT_TIMEOUT_SECS", default_value = "5")]
    pub db_connect_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate {
        /// Apply at most this many migrations
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Insert the default scheduled jobs for a domain
    InstallJobs {
        #[arg(long, env = "DOMAIN_ID", default_value = "1")]
        domain_id: i32,
    },
    /// Print the default scheduled job definitions
    Jobs,
    /// Print the registered action mappings
    Mappings,
    /// List memberships eligible for a reminder schedule
    Eligible {
        #[arg(long)]
        schedule_id: i32,

        /// Recipient resolution phase
        #[arg(long, default_value = "rel_first")]
        phase: String,
    },
}

impl Command {
    /// Whether the command talks to the database.
    pub fn needs_database(&self) -> bool {
        !matches!(self, Command::Jobs)
    }
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.command.needs_database() && self.database_url.is_none() {
            return Err(ReminderError::Config("DATABASE_URL is required".to_string()));
        }
        if self.db_max_connections == 0 {
            return Err(ReminderError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn database(&self) -> Result<DatabaseSettings> {
        let url = self
            .database_url
            .clone()
            .ok_or_else(|| ReminderError::Config("DATABASE_URL is required".to_string()))?;

        Ok(DatabaseSettings {
            url,
            max_connections: self.db_max_connections,
            min_connections: 0,
            connect_timeout: Duration::from_secs(self.db_connect_timeout_secs),
            idle_timeout: Some(Duration::from_secs(30)),
        })
    }
}

/// Trim a raw value and strip one layer of matching surrounding quotes.
///
/// Deployment tooling frequently writes `DATABASE_URL="sqlite://..."` verbatim.
pub fn normalize_env_value(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return inner.trim().to_string();
    }

    trimmed.to_string()
}

fn parse_env_value(raw: &str) -> std::result::Result<String, String> {
    let value = normalize_env_value(raw);
    if value.is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_quotes() {
        assert_eq!(normalize_env_value("  \"sqlite::memory:\" "), "sqlite::memory:");
        assert_eq!(normalize_env_value("'postgres://db'"), "postgres://db");
    }

    #[test]
    fn keeps_unbalanced_quotes() {
        assert_eq!(normalize_env_value("\"abc"), "\"abc");
        assert_eq!(normalize_env_value(" plain "), "plain");
    }

    #[test]
    fn parses_subcommand_with_normalized_url() {
        let args = Args::try_parse_from([
            "renewal-reminder",
            "--database-url",
            "\"sqlite::memory:\"",
            "eligible",
            "--schedule-id",
            "7",
        ])
        .unwrap();

        assert_eq!(args.database_url.as_deref(), Some("sqlite::memory:"));
        assert!(args.validate().is_ok());
        match args.command {
            Command::Eligible { schedule_id, phase } => {
                assert_eq!(schedule_id, 7);
                assert_eq!(phase, "rel_first");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_pool_size() {
        let args = Args::try_parse_from([
            "renewal-reminder",
            "--database-url",
            "sqlite::memory:",
            "--db-max-connections",
            "0",
            "jobs",
        ])
        .unwrap();

        assert!(matches!(args.validate(), Err(ReminderError::Config(_))));
    }

    #[test]
    fn jobs_runs_without_database_url() {
        let args = Args::try_parse_from(["renewal-reminder", "jobs"]).unwrap();

        assert!(matches!(args.command, Command::Jobs));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn database_commands_require_url() {
        let args = Args {
            database_url: None,
            db_max_connections: 4,
            db_connect_timeout_secs: 5,
            log_level: "info".to_string(),
            command: Command::Mappings,
        };

        assert!(matches!(args.validate(), Err(ReminderError::Config(_))));
        assert!(matches!(args.database(), Err(ReminderError::Config(_))));

        let jobs = Args {
            command: Command::Jobs,
            ..args
        };
        assert!(jobs.validate().is_ok());
    }
}
