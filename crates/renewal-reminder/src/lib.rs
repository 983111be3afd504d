//! Membership renewal reminders: eligibility queries, action mapping
//! registry, schedule behaviour and the default scheduled-job registry.

pub mod config;
pub mod db;
pub mod eligibility;
pub mod error;
pub mod jobs;
pub mod mapping;
pub mod metadata;
pub mod migrate;
pub mod query;
pub mod schedule;
pub mod value_list;

pub use error::{ReminderError, Result};
pub use mapping::{ActionMapping, MappingDescriptor, MappingRegistry, MembershipMapping, Phase};
pub use query::{Params, ReminderQuery};
pub use schedule::ReminderSchedule;
