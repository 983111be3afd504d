//! Action mappings: strategies describing which entity, date fields, values
//! and statuses a reminder schedule may target, and how eligible rows are
//! selected.

mod membership;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::error::{ReminderError, Result};
use crate::query::{Params, ReminderQuery};
use crate::schedule::ReminderSchedule;

pub use membership::{
    permission_filter, MembershipMapping, AUTO_RENEW, MEMBERSHIP_MAPPING_ID, NON_AUTO_RENEW,
};

/// Stage of multi-step recipient resolution. Opaque to mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Phase(String);

impl Phase {
    pub const RELATION_FIRST: &'static str = "rel_first";
    pub const ADDITION_FIRST: &'static str = "addl_first";
    pub const RELATION_REPEAT: &'static str = "rel_repeat";
    pub const ADDITION_REPEAT: &'static str = "addl_repeat";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn relation_first() -> Self {
        Self::new(Self::RELATION_FIRST)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Labels and field bindings advertised for a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingDescriptor {
    pub id: String,
    /// Table the mapping selects from.
    pub entity: String,
    pub label: String,
    pub value_label: String,
    /// Column that schedule values are matched against.
    pub value_field: String,
    pub value_options: BTreeMap<String, String>,
    pub status_label: String,
    /// Logical field that schedule statuses are matched against.
    pub status_field: String,
    pub status_options: BTreeMap<String, String>,
}

pub trait ActionMapping: Send + Sync {
    fn descriptor(&self) -> &MappingDescriptor;

    /// Trigger date fields, as (field name, label).
    fn date_fields(&self) -> Vec<(&'static str, &'static str)>;

    /// Build the selection of rows eligible for `schedule`. Never performs I/O.
    fn create_query(
        &self,
        schedule: &ReminderSchedule,
        phase: &Phase,
        default_params: &Params,
    ) -> ReminderQuery;

    /// Whether editing the trigger date restarts reminder tracking.
    fn reset_on_trigger_date_change(&self, schedule: &ReminderSchedule) -> bool;

    /// Whether additional recipients may be notified for `entity_id`.
    fn send_to_additional(&self, entity_id: i32) -> bool;
}

/// Mappings registered at boot, keyed by mapping id.
#[derive(Default)]
pub struct MappingRegistry {
    mappings: BTreeMap<String, Box<dyn ActionMapping>>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mapping: Box<dyn ActionMapping>) -> Result<()> {
        let id = mapping.descriptor().id.clone();
        if self.mappings.contains_key(&id) {
            return Err(ReminderError::DuplicateMapping(id));
        }

        info!(mapping = %id, "registered action mapping");
        self.mappings.insert(id, mapping);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&dyn ActionMapping> {
        self.mappings
            .get(id)
            .map(|m| m.as_ref())
            .ok_or_else(|| ReminderError::UnknownMapping(id.to_string()))
    }

    pub fn descriptors(&self) -> Vec<&MappingDescriptor> {
        self.mappings.values().map(|m| m.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
