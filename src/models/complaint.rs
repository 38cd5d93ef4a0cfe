use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AdminRecord, present, record};
use crate::auth::validate;
use crate::table::ColumnDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplaintFields {
    pub user_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub contact_mode: Option<String>,
    pub problem_category: Option<String>,
    pub constituency: Option<String>,
    pub mandal_village: Option<String>,
    pub location: Option<String>,
    pub problem_description: Option<String>,
    pub supporting_documents: Option<String>,
    pub problem_date: Option<String>,
    pub reported_before: Option<String>,
    pub report_details: Option<String>,
    pub specific_authority: Option<String>,
    pub similar_issues: Option<String>,
    pub similar_issues_details: Option<String>,
    pub auth_name: Option<String>,
    pub auth_phone: Option<String>,
    pub auth_email: Option<String>,
    pub leader_photo: Option<String>,
    pub status: Option<String>,
}

record! {
    /// A public complaint about a local problem.
    Complaint {
        fields: ComplaintFields,
        table: "complaints",
        created: submitted_at,
        columns: [
            "user_id", "full_name", "age", "gender", "phone", "email", "address",
            "contact_mode", "problem_category", "constituency", "mandal_village",
            "location", "problem_description", "supporting_documents", "problem_date",
            "reported_before", "report_details", "specific_authority", "similar_issues",
            "similar_issues_details", "auth_name", "auth_phone", "auth_email",
            "leader_photo", "status",
        ],
    }
}

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_RESOLVED: &str = "Resolved";

impl AdminRecord for Complaint {
    const LABEL: &'static str = "complaint";
    const STATUSES: &'static [&'static str] = &[STATUS_PENDING, "In Progress", STATUS_RESOLVED];

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("full_name", "Name"),
            ColumnDef::text("age", "Age"),
            ColumnDef::text("gender", "Gender"),
            ColumnDef::text("phone", "Phone"),
            ColumnDef::text("email", "Email"),
            ColumnDef::preview("address", "Address"),
            ColumnDef::text("contact_mode", "Contact Mode"),
            ColumnDef::text("problem_category", "Category"),
            ColumnDef::text("constituency", "Constituency"),
            ColumnDef::text("mandal_village", "Mandal/Village"),
            ColumnDef::text("location", "Location"),
            ColumnDef::preview("problem_description", "Description"),
            ColumnDef::text("supporting_documents", "Documents"),
            ColumnDef::text("problem_date", "Problem Date"),
            ColumnDef::text("reported_before", "Reported Before"),
            ColumnDef::preview("report_details", "Report Details"),
            ColumnDef::text("specific_authority", "Specific Authority"),
            ColumnDef::text("similar_issues", "Similar Issues"),
            ColumnDef::preview("similar_issues_details", "Similar Issues Details"),
            ColumnDef::text("auth_name", "Authority Name"),
            ColumnDef::text("auth_phone", "Authority Phone"),
            ColumnDef::text("auth_email", "Authority Email"),
            ColumnDef::text("leader_photo", "Leader Photo"),
            ColumnDef::date("submitted_at", "Submitted At"),
            ColumnDef::text("status", "Status"),
        ]
    }

    fn validate(fields: &ComplaintFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.full_name.as_deref(), "Name", 100));
        if let Some(age) = present(&fields.age) {
            errors.extend(validate::validate_age_text(age, "Age"));
        }
        if let Some(phone) = present(&fields.phone) {
            errors.extend(validate::validate_phone(phone, "Phone"));
        }
        if let Some(email) = present(&fields.email) {
            errors.extend(validate::validate_email(email));
        }
        if let Some(email) = present(&fields.auth_email) {
            errors.extend(validate::validate_email(email));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complaint_validation_collects_every_problem() {
        let fields = ComplaintFields {
            full_name: None,
            age: Some("abc".into()),
            email: Some("nowhere".into()),
            ..Default::default()
        };
        let errors = Complaint::validate(&fields);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], "Name is required");
    }

    #[test]
    fn complaint_blank_optionals_are_ignored() {
        let fields = ComplaintFields {
            full_name: Some("Suresh".into()),
            phone: Some("   ".into()),
            age: Some(String::new()),
            ..Default::default()
        };
        assert!(Complaint::validate(&fields).is_empty());
    }
}
