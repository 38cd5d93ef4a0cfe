use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AdminRecord, present, record};
use crate::auth::validate;
use crate::table::ColumnDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeEligibilityFields {
    pub user_id: Option<Uuid>,
    pub fullname: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub mobile: Option<String>,
    pub aadhaar: Option<String>,
    pub caste: Option<String>,
    pub marital: Option<String>,
    pub disability: Option<String>,
    pub disability_details: Option<String>,
    pub income: Option<String>,
    pub education: Option<String>,
    pub employment: Option<String>,
    pub skill_training: Option<String>,
    pub skill_training_details: Option<String>,
    pub social_service: Option<String>,
    pub social_service_details: Option<String>,
    pub welfare_member: Option<String>,
    pub schemes: Option<String>,
    pub status: Option<String>,
}

record! {
    /// Application for a government welfare scheme.
    SchemeEligibility {
        fields: SchemeEligibilityFields,
        table: "scheme_eligibility",
        created: submitted_at,
        columns: [
            "user_id", "fullname", "age", "gender", "mobile", "aadhaar", "caste",
            "marital", "disability", "disability_details", "income", "education",
            "employment", "skill_training", "skill_training_details", "social_service",
            "social_service_details", "welfare_member", "schemes", "status",
        ],
    }
}

impl AdminRecord for SchemeEligibility {
    const LABEL: &'static str = "application";
    const STATUSES: &'static [&'static str] =
        &["Under Review", "Approved", "Beneficiary", "Rejected"];

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("fullname", "Full Name"),
            ColumnDef::text("age", "Age"),
            ColumnDef::text("gender", "Gender"),
            ColumnDef::text("mobile", "Mobile"),
            ColumnDef::text("aadhaar", "Aadhaar"),
            ColumnDef::text("caste", "Caste"),
            ColumnDef::text("marital", "Marital Status"),
            ColumnDef::text("disability", "Disability"),
            ColumnDef::preview("disability_details", "Disability Details"),
            ColumnDef::text("income", "Income"),
            ColumnDef::text("education", "Education"),
            ColumnDef::text("employment", "Employment"),
            ColumnDef::text("skill_training", "Skill Training"),
            ColumnDef::preview("skill_training_details", "Skill Training Details"),
            ColumnDef::text("social_service", "Social Service"),
            ColumnDef::preview("social_service_details", "Social Service Details"),
            ColumnDef::text("welfare_member", "Welfare Member"),
            ColumnDef::preview("schemes", "Schemes"),
            ColumnDef::date("submitted_at", "Submitted At"),
            ColumnDef::text("status", "Status"),
        ]
    }

    fn validate(fields: &SchemeEligibilityFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.fullname.as_deref(), "Full name", 100));
        if let Some(age) = fields.age {
            errors.extend(validate::validate_age(i64::from(age), "Age"));
        }
        if let Some(mobile) = present(&fields.mobile) {
            errors.extend(validate::validate_phone(mobile, "Mobile"));
        }
        errors
    }
}
