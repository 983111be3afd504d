//! Default scheduled jobs.
//!
//! The job runner itself lives elsewhere; this module only knows which jobs a
//! fresh domain starts with and how to insert them.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use tracing::{debug, info};

use entity::job::{self, RunFrequency};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub run_frequency: RunFrequency,
    pub api_entity: &'static str,
    pub api_action: &'static str,
    pub parameters: Option<&'static str>,
    pub is_active: bool,
}

pub const DEFAULT_JOBS: &[JobDefinition] = &[
    JobDefinition {
        name: "CiviCRM Update Check",
        description: "Checks for version updates. Important for keeping the database secure.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "version_check",
        parameters: None,
        is_active: true,
    },
    JobDefinition {
        name: "Send Scheduled Mailings",
        description: "Sends out scheduled bulk mailings.",
        run_frequency: RunFrequency::Always,
        api_entity: "job",
        api_action: "process_mailing",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Fetch Bounces",
        description: "Fetches bounces from mailings and writes them to mailing statistics.",
        run_frequency: RunFrequency::Hourly,
        api_entity: "job",
        api_action: "fetch_bounces",
        parameters: Some("is_create_activities=0"),
        is_active: false,
    },
    JobDefinition {
        name: "Process Inbound Emails",
        description: "Inserts activity for a contact or a case by retrieving inbound emails.",
        run_frequency: RunFrequency::Always,
        api_entity: "job",
        api_action: "fetch_activities",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Process Pledges",
        description: "Updates pledge records and sends out reminders.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "process_pledge",
        parameters: Some("send_reminders=[1 or 0] optional- 1 to send payment reminders"),
        is_active: false,
    },
    JobDefinition {
        name: "Geocode and Parse Addresses",
        description: "Retrieves geocodes for addresses and splits street addresses.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "geocode",
        parameters: Some("geocoding=[1 or 0] required\nparse=[1 or 0] required\nstart=[contact ID] optional\nend=[contact ID] optional\nthrottle=[1 or 0] optional"),
        is_active: false,
    },
    JobDefinition {
        name: "Update Greetings and Addressees",
        description: "Goes through contact records and updates email and postal greetings, or addressee value.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "update_greeting",
        parameters: Some("ct=[Individual or Household or Organization] required\ngt=[email_greeting or postal_greeting or addressee] required\nforce=[0 or 1] optional\nlimit=Number optional"),
        is_active: false,
    },
    JobDefinition {
        name: "Mail Reports",
        description: "Generates and sends out reports via email.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "mail_report",
        parameters: Some("instanceId=[ID of report instance] required\nformat=[csv or print] optional"),
        is_active: false,
    },
    JobDefinition {
        name: "Send Scheduled Reminders",
        description: "Sends out scheduled reminders via email.",
        run_frequency: RunFrequency::Always,
        api_entity: "job",
        api_action: "send_reminder",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Update Participant Statuses",
        description: "Updates pending event participant statuses based on time.",
        run_frequency: RunFrequency::Always,
        api_entity: "job",
        api_action: "process_participant",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Update Membership Statuses",
        description: "Updates membership statuses. Only needed with status rules enabled.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "process_membership",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Process Survey Respondents",
        description: "Releases the reserved survey respondents.",
        run_frequency: RunFrequency::Always,
        api_entity: "job",
        api_action: "process_respondent",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Clean-up Temporary Data and Files",
        description: "Removes temporary data and files, and clears old data from cache tables.",
        run_frequency: RunFrequency::Hourly,
        api_entity: "job",
        api_action: "cleanup",
        parameters: Some("session=0\ntempTables=1\njobLog=1\nprevNext=1\ndbCache=0\nmemCache=0\nwordRplc=0\nexpired=1"),
        is_active: false,
    },
    JobDefinition {
        name: "Send Scheduled SMS",
        description: "Sends out scheduled SMS.",
        run_frequency: RunFrequency::Always,
        api_entity: "job",
        api_action: "process_sms",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Rebuild Smart Group Cache",
        description: "Rebuilds the smart group cache.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "group_rebuild",
        parameters: Some("limit=Number optional-Limit the number of smart groups rebuild"),
        is_active: false,
    },
    JobDefinition {
        name: "Disable expired relationships",
        description: "Disables relationships that have expired (ie. those relationships whose end date is in the past).",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "disable_expired_relationships",
        parameters: None,
        is_active: false,
    },
    JobDefinition {
        name: "Validate Email Address from Mailings.",
        description: "Updates the reset_date on an email address to indicate that there was a valid delivery to this email address.",
        run_frequency: RunFrequency::Daily,
        api_entity: "mailing",
        api_action: "update_email_resetdate",
        parameters: Some("minDays, maxDays=Consider mailings that have completed between minDays and maxDays"),
        is_active: false,
    },
    JobDefinition {
        name: "Dedupe Contacts",
        description: "Executes the Individual, Unsupervised redundant rule group.",
        run_frequency: RunFrequency::Daily,
        api_entity: "job",
        api_action: "process_batch_merge",
        parameters: None,
        is_active: false,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert every default job not yet registered for `domain_id`.
///
/// Jobs are matched by entity, action and name, so reinstalling after an
/// upgrade only adds new definitions and never touches administrator edits.
pub async fn install_jobs(db: &DatabaseConnection, domain_id: i32) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    for def in DEFAULT_JOBS {
        let existing = job::Entity::find()
            .filter(job::Column::DomainId.eq(domain_id))
            .filter(job::Column::ApiEntity.eq(def.api_entity))
            .filter(job::Column::ApiAction.eq(def.api_action))
            .filter(job::Column::Name.eq(def.name))
            .one(db)
            .await?;

        if existing.is_some() {
            debug!(job = def.name, domain_id, "job already installed");
            report.skipped += 1;
            continue;
        }

        job::ActiveModel {
            domain_id: Set(domain_id),
            name: Set(def.name.to_string()),
            description: Set(Some(def.description.to_string())),
            run_frequency: Set(def.run_frequency),
            api_entity: Set(def.api_entity.to_string()),
            api_action: Set(def.api_action.to_string()),
            parameters: Set(def.parameters.map(str::to_string)),
            is_active: Set(def.is_active),
            last_run: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.inserted += 1;
    }

    info!(
        domain_id,
        inserted = report.inserted,
        skipped = report.skipped,
        "installed default jobs"
    );
    Ok(report)
}
