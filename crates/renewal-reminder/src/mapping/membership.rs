//! Membership renewal reminders.

use std::collections::BTreeMap;

use serde_json::json;

use entity::relationship::Permission;

use super::{ActionMapping, MappingDescriptor, Phase};
use crate::error::Result;
use crate::metadata::MembershipMetadata;
use crate::query::{Field, Filter, Join, Params, QueryFragment, ReminderQuery};
use crate::schedule::ReminderSchedule;

pub const MEMBERSHIP_MAPPING_ID: &str = "civicrm_membership";

/// `entity_status` option: only memberships that do not auto-renew.
pub const NON_AUTO_RENEW: i64 = 1;
/// `entity_status` option: only auto-renewing memberships.
pub const AUTO_RENEW: i64 = 2;

const MEMBERSHIPS: &str = "memberships";
const RELATIONSHIPS: &str = "relationships";
const DATE_FIELD_PREFIX: &str = "membership_";
const DATE_FIELDS: [(&str, &str); 3] = [
    ("join_date", "Member Since"),
    ("start_date", "Membership Start Date"),
    ("end_date", "Membership Expiration Date"),
];

/// Selects memberships due a renewal reminder.
///
/// The set of current-or-expired status ids is resolved once, when the
/// mapping is built, so [`ActionMapping::create_query`] stays pure.
#[derive(Debug, Clone)]
pub struct MembershipMapping {
    descriptor: MappingDescriptor,
    member_statuses: Vec<i32>,
}

impl MembershipMapping {
    pub fn new(member_statuses: Vec<i32>, membership_types: Vec<(i32, String)>) -> Self {
        let descriptor = MappingDescriptor {
            id: MEMBERSHIP_MAPPING_ID.to_string(),
            entity: MEMBERSHIPS.to_string(),
            label: "Membership".to_string(),
            value_label: "Membership Type".to_string(),
            value_field: "membership_type_id".to_string(),
            value_options: membership_types
                .into_iter()
                .map(|(id, name)| (id.to_string(), name))
                .collect(),
            status_label: "Auto Renew Options".to_string(),
            status_field: "auto_renew".to_string(),
            status_options: BTreeMap::from([
                (
                    NON_AUTO_RENEW.to_string(),
                    "Renewal Reminder (non-auto-renew memberships only)".to_string(),
                ),
                (
                    AUTO_RENEW.to_string(),
                    "Auto-renew Memberships only".to_string(),
                ),
            ]),
        };

        Self {
            descriptor,
            member_statuses,
        }
    }

    /// Resolve statuses and type options through `metadata`.
    pub async fn load(metadata: &dyn MembershipMetadata) -> Result<Self> {
        let statuses = metadata.current_or_expired_status_ids().await?;
        let types = metadata.membership_types().await?;
        Ok(Self::new(statuses, types))
    }

    pub fn member_statuses(&self) -> &[i32] {
        &self.member_statuses
    }
}

/// Map `membership_end_date` style names onto the membership row.
///
/// Names outside the known set pass through unaliased for older schedules.
fn date_field(start_action_date: Option<&str>) -> Option<Field> {
    let raw = start_action_date?;
    let name = raw.replace(DATE_FIELD_PREFIX, "");

    if DATE_FIELDS.iter().any(|(known, _)| *known == name) {
        Some(Field::new("e", &name))
    } else {
        Some(Field::bare(&name))
    }
}

/// Numeric option codes in `values`; anything unparseable is skipped.
fn numeric_options(values: &[String]) -> Vec<i64> {
    values
        .iter()
        .filter_map(|v| v.trim().parse::<i64>().ok())
        .collect()
}

/// Inherited memberships are only reminded when a relationship grants edit
/// permission between the member and the owner, in either direction.
pub fn permission_filter() -> QueryFragment {
    let owner_contact = Field::new("cm", "contact_id");
    let member_contact = Field::new("e", "contact_id");

    QueryFragment::new()
        .join(Join::left(
            MEMBERSHIPS,
            "cm",
            Filter::EqField(Field::new("cm", "id"), Field::new("e", "owner_membership_id")),
        ))
        .join(Join::left(
            RELATIONSHIPS,
            "rela",
            Filter::all([
                Filter::EqField(Field::new("rela", "contact_id_a"), member_contact.clone()),
                Filter::EqField(Field::new("rela", "contact_id_b"), owner_contact.clone()),
                Filter::EqParam(Field::new("rela", "is_permission_a_b"), "editPerm".into()),
            ]),
        ))
        .join(Join::left(
            RELATIONSHIPS,
            "relb",
            Filter::all([
                Filter::EqField(Field::new("relb", "contact_id_a"), owner_contact),
                Filter::EqField(Field::new("relb", "contact_id_b"), member_contact),
                Filter::EqParam(Field::new("relb", "is_permission_b_a"), "editPerm".into()),
            ]),
        ))
        .param("editPerm", Permission::Edit.as_i32())
        .filter(Filter::negate(Filter::all([
            Filter::IsNotNull(Field::new("e", "owner_membership_id")),
            Filter::IsNull(Field::new("rela", "id")),
            Filter::IsNull(Field::new("relb", "id")),
        ])))
}

impl ActionMapping for MembershipMapping {
    fn descriptor(&self) -> &MappingDescriptor {
        &self.descriptor
    }

    fn date_fields(&self) -> Vec<(&'static str, &'static str)> {
        DATE_FIELDS.to_vec()
    }

    fn create_query(
        &self,
        schedule: &ReminderSchedule,
        _phase: &Phase,
        default_params: &Params,
    ) -> ReminderQuery {
        let statuses = numeric_options(&schedule.entity_status);
        let types = numeric_options(&schedule.entity_value);

        let mut query = ReminderQuery::from(MEMBERSHIPS, "e")
            .params(default_params)
            .with_date_field(date_field(schedule.start_action_date.as_deref()))
            .with_reference_date(schedule.start_action_date.is_some() && !schedule.is_repeat);

        // Auto-renew wins when both options are selected.
        let recur = Field::new("e", "contribution_recur_id");
        if statuses.contains(&AUTO_RENEW) {
            query = query.filter(Filter::IsNotNull(recur));
        } else if statuses.contains(&NON_AUTO_RENEW) {
            query = query.filter(Filter::IsNull(recur));
        }

        // No selected types selects nothing: membership_type_id is never null.
        let membership_type = Field::new("e", "membership_type_id");
        if types.is_empty() {
            query = query.filter(Filter::IsNull(membership_type));
        } else {
            query = query
                .filter(Filter::InParam(membership_type, "memberTypeValues".into()))
                .param("memberTypeValues", json!(types));
        }

        query
            .filter(Filter::Falsy(Field::new("e", "is_override")))
            .merge(permission_filter())
            .filter(Filter::InParam(Field::new("e", "status_id"), "memberStatus".into()))
            .param("memberStatus", json!(self.member_statuses))
    }

    fn reset_on_trigger_date_change(&self, schedule: &ReminderSchedule) -> bool {
        schedule.absolute_date.is_none()
    }

    fn send_to_additional(&self, _entity_id: i32) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use sea_orm::sea_query::SqliteQueryBuilder;

    use super::*;

    fn mapping() -> MembershipMapping {
        MembershipMapping::new(vec![1, 2, 3, 4], vec![(2, "General".to_string())])
    }

    fn schedule(values: &[&str], statuses: &[&str]) -> ReminderSchedule {
        ReminderSchedule {
            mapping_id: MEMBERSHIP_MAPPING_ID.to_string(),
            entity_value: values.iter().map(|v| v.to_string()).collect(),
            entity_status: statuses.iter().map(|s| s.to_string()).collect(),
            start_action_date: Some("membership_end_date".to_string()),
            ..Default::default()
        }
    }

    fn query(schedule: &ReminderSchedule) -> ReminderQuery {
        mapping().create_query(schedule, &Phase::relation_first(), &Params::new())
    }

    fn recur_filters(query: &ReminderQuery) -> Vec<&Filter> {
        query
            .filters()
            .iter()
            .filter(|f| {
                matches!(f, Filter::IsNull(field) | Filter::IsNotNull(field)
                    if field.column == "contribution_recur_id")
            })
            .collect()
    }

    #[test]
    fn base_table_is_memberships_aliased_e() {
        let q = query(&schedule(&["2"], &[]));
        assert_eq!(q.table(), "memberships");
        assert_eq!(q.alias(), "e");
        assert_eq!(q.contact_id_field(), &Field::new("e", "contact_id"));
        assert_eq!(q.entity_id_field(), &Field::new("e", "id"));
    }

    #[test]
    fn auto_renew_status_requires_recurring_contribution() {
        let q = query(&schedule(&["2"], &["2"]));
        assert_eq!(
            recur_filters(&q),
            vec![&Filter::IsNotNull(Field::new("e", "contribution_recur_id"))]
        );
    }

    #[test]
    fn non_auto_renew_status_requires_no_recurring_contribution() {
        let q = query(&schedule(&["2"], &["1"]));
        assert_eq!(
            recur_filters(&q),
            vec![&Filter::IsNull(Field::new("e", "contribution_recur_id"))]
        );
    }

    #[test]
    fn both_statuses_behave_like_auto_renew() {
        let both = query(&schedule(&["2"], &["1", "2"]));
        let auto = query(&schedule(&["2"], &["2"]));
        assert_eq!(both, auto);
    }

    #[test]
    fn no_or_malformed_status_applies_no_recurring_restriction() {
        assert!(recur_filters(&query(&schedule(&["2"], &[]))).is_empty());
        assert!(recur_filters(&query(&schedule(&["2"], &["auto", "x2"]))).is_empty());
    }

    #[test]
    fn selected_types_become_an_in_list() {
        let q = query(&schedule(&["2", "5"], &[]));
        assert!(q.filters().contains(&Filter::InParam(
            Field::new("e", "membership_type_id"),
            "memberTypeValues".to_string()
        )));
        assert_eq!(q.get_param("memberTypeValues"), Some(&json!([2, 5])));
    }

    #[test]
    fn empty_types_degenerate_to_null_check() {
        let q = query(&schedule(&[], &[]));
        assert!(q
            .filters()
            .contains(&Filter::IsNull(Field::new("e", "membership_type_id"))));
        assert_eq!(q.get_param("memberTypeValues"), None);
    }

    #[test]
    fn always_filters_override_and_status() {
        let q = query(&schedule(&["2"], &[]));
        assert!(q.filters().contains(&Filter::Falsy(Field::new("e", "is_override"))));
        assert!(q.filters().contains(&Filter::InParam(
            Field::new("e", "status_id"),
            "memberStatus".to_string()
        )));
        assert_eq!(q.get_param("memberStatus"), Some(&json!([1, 2, 3, 4])));
    }

    #[test]
    fn permission_fragment_is_merged() {
        let q = query(&schedule(&["2"], &[]));
        let aliases: Vec<&str> = q.joins().iter().map(|j| j.alias.as_str()).collect();
        assert_eq!(aliases, vec!["cm", "rela", "relb"]);
        assert_eq!(q.get_param("editPerm"), Some(&json!(1)));
    }

    #[test]
    fn default_params_are_merged_verbatim() {
        let mut defaults = Params::new();
        defaults.insert("casActionScheduleId".to_string(), json!(12));
        defaults.insert("casNow".to_string(), json!("2026-10-19 00:00:00"));

        let q = mapping().create_query(&schedule(&["2"], &[]), &Phase::relation_first(), &defaults);
        assert_eq!(q.get_param("casActionScheduleId"), Some(&json!(12)));
        assert_eq!(q.get_param("casNow"), Some(&json!("2026-10-19 00:00:00")));
    }

    #[test]
    fn known_date_fields_are_aliased() {
        for (name, _) in DATE_FIELDS {
            let mut s = schedule(&["2"], &[]);
            s.start_action_date = Some(format!("membership_{name}"));
            assert_eq!(query(&s).date_field(), Some(&Field::new("e", name)));
        }
    }

    #[test]
    fn unknown_date_field_passes_through_unaliased() {
        let mut s = schedule(&["2"], &[]);
        s.start_action_date = Some("membership_renewal_date".to_string());
        assert_eq!(query(&s).date_field(), Some(&Field::bare("renewal_date")));

        s.start_action_date = None;
        assert_eq!(query(&s).date_field(), None);
    }

    #[test]
    fn reference_date_only_for_non_repeating_schedules() {
        let mut s = schedule(&["2"], &[]);
        assert!(query(&s).use_reference_date());

        s.is_repeat = true;
        assert!(!query(&s).use_reference_date());

        s.is_repeat = false;
        s.start_action_date = None;
        assert!(!query(&s).use_reference_date());
    }

    #[test]
    fn absolute_date_disables_reset_on_trigger_change() {
        let m = mapping();
        let mut s = schedule(&["2"], &["1"]);
        assert!(m.reset_on_trigger_date_change(&s));

        s.absolute_date = NaiveDate::from_ymd_opt(2026, 12, 31);
        assert!(!m.reset_on_trigger_date_change(&s));
    }

    #[test]
    fn renders_permission_clause() {
        let sql = query(&schedule(&["2"], &[]))
            .to_select()
            .unwrap()
            .to_string(SqliteQueryBuilder);

        assert!(sql.contains(r#"LEFT JOIN "memberships" AS "cm""#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "relationships" AS "rela""#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "relationships" AS "relb""#), "{sql}");
        assert!(sql.contains(r#""e"."membership_type_id" IN (2)"#), "{sql}");
        assert!(sql.contains("NOT"), "{sql}");
    }

    #[test]
    fn descriptor_lists_labels_and_options() {
        let m = mapping();
        let d = m.descriptor();
        assert_eq!(d.id, MEMBERSHIP_MAPPING_ID);
        assert_eq!(d.value_options.get("2").map(String::as_str), Some("General"));
        assert_eq!(d.status_options.len(), 2);
        assert_eq!(m.date_fields().len(), 3);
    }

    proptest! {
        #[test]
        fn create_query_is_deterministic(
            values in proptest::collection::vec("[0-9]{1,3}|[a-z]{1,3}", 0..5),
            statuses in proptest::collection::vec("[0-3]|[a-z]", 0..4),
            entity_id in any::<i32>(),
            is_repeat in any::<bool>(),
        ) {
            let m = mapping();
            let s = ReminderSchedule {
                mapping_id: MEMBERSHIP_MAPPING_ID.to_string(),
                entity_value: values,
                entity_status: statuses,
                start_action_date: Some("membership_start_date".to_string()),
                is_repeat,
                ..Default::default()
            };
            let phase = Phase::new("rel_first");

            let first = m.create_query(&s, &phase, &Params::new());
            let second = m.create_query(&s, &phase, &Params::new());
            prop_assert_eq!(first, second);
            prop_assert!(m.send_to_additional(entity_id));
        }
    }
}
