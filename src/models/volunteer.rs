use serde::{Deserialize, Serialize};

use super::{AdminRecord, present, record};
use crate::auth::validate;
use crate::table::ColumnDef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub constituency: Option<String>,
    pub message: Option<String>,
}

record! {
    Volunteer {
        fields: VolunteerFields,
        table: "volunteers",
        created: submitted_at,
        columns: ["name", "email", "phone", "constituency", "message"],
    }
}

impl AdminRecord for Volunteer {
    const LABEL: &'static str = "volunteer";

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("name", "Name"),
            ColumnDef::text("email", "Email"),
            ColumnDef::text("phone", "Phone"),
            ColumnDef::text("constituency", "Constituency"),
            ColumnDef::preview("message", "Message"),
            ColumnDef::date("submitted_at", "Applied Date"),
        ]
    }

    fn validate(fields: &VolunteerFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.name.as_deref(), "Name", 100));
        if let Some(email) = present(&fields.email) {
            errors.extend(validate::validate_email(email));
        }
        if let Some(phone) = present(&fields.phone) {
            errors.extend(validate::validate_phone(phone, "Phone"));
        }
        if let Some(message) = present(&fields.message) {
            errors.extend(validate::validate_optional(message, "Message", 2000));
        }
        errors
    }
}
