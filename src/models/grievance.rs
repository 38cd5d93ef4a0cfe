//! The three grievance categories: general, mahila-shakti and social-media.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AdminRecord, Tally, has_entries, includes, present, record};
use crate::auth::validate;
use crate::table::ColumnDef;

pub const STATUS_OPEN: &str = "Open";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_RESOLVED: &str = "Resolved";
pub const STATUS_UNDER_REVIEW: &str = "Under Review";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrievanceFields {
    pub user_id: Option<Uuid>,
    pub fullname: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub caste: Option<String>,
    pub aadhaar: Option<String>,
    pub grievance: Option<String>,
    pub grievance_other: Option<String>,
    pub details: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub political_sensitive: Option<String>,
    pub parties: Option<String>,
    pub anonymous: Option<String>,
    pub opponent_name: Option<String>,
    pub opponent_phone: Option<String>,
    pub opponent_details: Option<String>,
    pub status: Option<String>,
}

record! {
    /// General grievance, possibly naming an opposing party.
    Grievance {
        fields: GrievanceFields,
        table: "grievances",
        created: submitted_at,
        columns: [
            "user_id", "fullname", "age", "gender", "mobile", "email", "address",
            "caste", "aadhaar", "grievance", "grievance_other", "details", "attachments",
            "political_sensitive", "parties", "anonymous", "opponent_name",
            "opponent_phone", "opponent_details", "status",
        ],
    }
}

impl AdminRecord for Grievance {
    const LABEL: &'static str = "grievance";
    const STATUSES: &'static [&'static str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_RESOLVED];

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("fullname", "Full Name"),
            ColumnDef::text("age", "Age"),
            ColumnDef::text("gender", "Gender"),
            ColumnDef::text("mobile", "Mobile"),
            ColumnDef::text("email", "Email"),
            ColumnDef::preview("address", "Address"),
            ColumnDef::text("caste", "Caste"),
            ColumnDef::text("aadhaar", "Aadhaar"),
            ColumnDef::text("grievance", "Grievance Type"),
            ColumnDef::text("grievance_other", "Other Grievance"),
            ColumnDef::preview("details", "Details"),
            ColumnDef::list("attachments", "Attachments"),
            ColumnDef::text("political_sensitive", "Political Sensitive"),
            ColumnDef::text("parties", "Parties"),
            ColumnDef::text("anonymous", "Anonymous"),
            ColumnDef::text("opponent_name", "Opponent Name"),
            ColumnDef::text("opponent_phone", "Opponent Phone"),
            ColumnDef::preview("opponent_details", "Opponent Details"),
            ColumnDef::date("submitted_at", "Submitted At"),
            ColumnDef::text("status", "Status"),
        ]
    }

    fn validate(fields: &GrievanceFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.fullname.as_deref(), "Full name", 100));
        if let Some(age) = present(&fields.age) {
            errors.extend(validate::validate_age_text(age, "Age"));
        }
        if let Some(mobile) = present(&fields.mobile) {
            errors.extend(validate::validate_phone(mobile, "Mobile"));
        }
        if let Some(email) = present(&fields.email) {
            errors.extend(validate::validate_email(email));
        }
        if let Some(phone) = present(&fields.opponent_phone) {
            errors.extend(validate::validate_phone(phone, "Opponent phone"));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MahilaShaktiGrievanceFields {
    pub user_id: Option<Uuid>,
    pub fullname: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub district: Option<String>,
    pub constituency: Option<String>,
    pub mandal: Option<String>,
    pub ward: Option<String>,
    pub grievance_types: Option<Vec<String>>,
    pub grievance_other: Option<String>,
    pub description: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub response_modes: Option<Vec<String>>,
    pub volunteer: Option<String>,
    pub declaration: Option<bool>,
    pub status: Option<String>,
}

record! {
    /// Women's-welfare grievance.
    MahilaShaktiGrievance {
        fields: MahilaShaktiGrievanceFields,
        table: "mahila_shakti_grievances",
        created: submitted_at,
        columns: [
            "user_id", "fullname", "age", "gender", "mobile", "email", "district",
            "constituency", "mandal", "ward", "grievance_types", "grievance_other",
            "description", "attachments", "response_modes", "volunteer", "declaration",
            "status",
        ],
    }
}

impl AdminRecord for MahilaShaktiGrievance {
    const LABEL: &'static str = "grievance";
    const STATUSES: &'static [&'static str] =
        &[STATUS_UNDER_REVIEW, STATUS_IN_PROGRESS, STATUS_RESOLVED];

    fn tallies() -> Vec<Tally<MahilaShaktiGrievanceFields>> {
        vec![Tally { label: "Urgent", matches: |g| includes(&g.grievance_types, "Urgent") }]
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("fullname", "Full Name"),
            ColumnDef::text("age", "Age"),
            ColumnDef::text("gender", "Gender"),
            ColumnDef::text("mobile", "Mobile"),
            ColumnDef::text("email", "Email"),
            ColumnDef::text("district", "District"),
            ColumnDef::text("constituency", "Constituency"),
            ColumnDef::text("mandal", "Mandal"),
            ColumnDef::text("ward", "Ward"),
            ColumnDef::list("grievance_types", "Grievance Types"),
            ColumnDef::text("grievance_other", "Other Grievance"),
            ColumnDef::preview("description", "Description"),
            ColumnDef::list("attachments", "Attachments"),
            ColumnDef::list("response_modes", "Response Modes"),
            ColumnDef::text("volunteer", "Volunteer"),
            ColumnDef::text("declaration", "Declaration"),
            ColumnDef::date("submitted_at", "Submitted At"),
            ColumnDef::text("status", "Status"),
        ]
    }

    fn validate(fields: &MahilaShaktiGrievanceFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.fullname.as_deref(), "Full name", 100));
        if let Some(age) = present(&fields.age) {
            errors.extend(validate::validate_age_text(age, "Age"));
        }
        if let Some(mobile) = present(&fields.mobile) {
            errors.extend(validate::validate_phone(mobile, "Mobile"));
        }
        if let Some(email) = present(&fields.email) {
            errors.extend(validate::validate_email(email));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMediaGrievanceFields {
    pub user_id: Option<Uuid>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub platform_other: Option<String>,
    pub grievance: Option<String>,
    pub action: Option<String>,
    pub file_urls: Option<Vec<String>>,
    pub warrior_options: Option<Vec<String>>,
    pub updates_options: Option<Vec<String>>,
    pub status: Option<String>,
}

record! {
    /// Report of online harassment or misinformation.
    SocialMediaGrievance {
        fields: SocialMediaGrievanceFields,
        table: "social_media_grievances",
        created: submitted_at,
        columns: [
            "user_id", "fullname", "email", "phone", "location", "platforms",
            "platform_other", "grievance", "action", "file_urls", "warrior_options",
            "updates_options", "status",
        ],
    }
}

impl AdminRecord for SocialMediaGrievance {
    const LABEL: &'static str = "grievance";
    const STATUSES: &'static [&'static str] = &["Investigating", "Action Taken"];

    fn tallies() -> Vec<Tally<SocialMediaGrievanceFields>> {
        vec![Tally { label: "Platform Reports", matches: |g| has_entries(&g.platforms) }]
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("fullname", "Full Name"),
            ColumnDef::text("email", "Email"),
            ColumnDef::text("phone", "Phone"),
            ColumnDef::text("location", "Location"),
            ColumnDef::list("platforms", "Platforms"),
            ColumnDef::text("platform_other", "Other Platform"),
            ColumnDef::preview("grievance", "Grievance"),
            ColumnDef::preview("action", "Action Requested"),
            ColumnDef::list("file_urls", "Files"),
            ColumnDef::list("warrior_options", "Warrior Options"),
            ColumnDef::list("updates_options", "Updates Options"),
            ColumnDef::date("submitted_at", "Submitted"),
            ColumnDef::text("status", "Status"),
        ]
    }

    fn validate(fields: &SocialMediaGrievanceFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.fullname.as_deref(), "Full name", 100));
        if let Some(phone) = present(&fields.phone) {
            errors.extend(validate::validate_phone(phone, "Phone"));
        }
        if let Some(email) = present(&fields.email) {
            errors.extend(validate::validate_email(email));
        }
        errors
    }
}
