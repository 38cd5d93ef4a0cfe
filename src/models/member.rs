use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AdminRecord, present, record};
use crate::auth::validate;
use crate::table::ColumnDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YuvaShakthiMemberFields {
    pub user_id: Option<Uuid>,
    pub fullname: Option<String>,
    pub parentname: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub village: Option<String>,
    pub mandal: Option<String>,
    pub constituency: Option<String>,
    pub district: Option<String>,
    pub education: Option<String>,
    pub stream: Option<String>,
    pub occupation: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<Vec<String>>,
    pub interest_other: Option<String>,
    pub why: Option<String>,
}

record! {
    /// Youth-program registration.
    YuvaShakthiMember {
        fields: YuvaShakthiMemberFields,
        table: "yuva_shakthi_members",
        created: submitted_at,
        columns: [
            "user_id", "fullname", "parentname", "dob", "gender", "phone", "email",
            "address", "village", "mandal", "constituency", "district", "education",
            "stream", "occupation", "skills", "interests", "interest_other", "why",
        ],
    }
}

impl AdminRecord for YuvaShakthiMember {
    const LABEL: &'static str = "member";

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("fullname", "Full Name"),
            ColumnDef::text("parentname", "Parent Name"),
            ColumnDef::text("dob", "Date of Birth"),
            ColumnDef::text("gender", "Gender"),
            ColumnDef::text("phone", "Phone"),
            ColumnDef::text("email", "Email"),
            ColumnDef::preview("address", "Address"),
            ColumnDef::text("village", "Village"),
            ColumnDef::text("mandal", "Mandal"),
            ColumnDef::text("constituency", "Constituency"),
            ColumnDef::text("district", "District"),
            ColumnDef::text("education", "Education"),
            ColumnDef::text("stream", "Stream"),
            ColumnDef::text("occupation", "Occupation"),
            ColumnDef::text("skills", "Skills"),
            ColumnDef::list("interests", "Interests"),
            ColumnDef::text("interest_other", "Other Interests"),
            ColumnDef::preview("why", "Why"),
            ColumnDef::date("submitted_at", "Submitted At"),
        ]
    }

    fn validate(fields: &YuvaShakthiMemberFields) -> Vec<String> {
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
