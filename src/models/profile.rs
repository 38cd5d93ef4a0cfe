use serde::{Deserialize, Serialize};

use super::{AdminRecord, present, record};
use crate::auth::validate;
use crate::table::ColumnDef;

/// Editable part of a user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
}

record! {
    /// A row of `profiles`. The id is shared with the identity account.
    Profile {
        fields: ProfileFields,
        table: "profiles",
        created: created_at,
        columns: ["name", "mobile", "gender", "role"],
    }
}

/// Roles that may use the admin console.
pub const STAFF_ROLES: &[&str] = &["admin", "staff"];

pub fn is_staff_role(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}

impl AdminRecord for Profile {
    const LABEL: &'static str = "user";
    const STATUSES: &'static [&'static str] = &[];

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::text("name", "Name"),
            ColumnDef::text("mobile", "Mobile"),
            ColumnDef::text("gender", "Gender"),
            ColumnDef::text("role", "Role"),
            ColumnDef::date("created_at", "Joined Date"),
        ]
    }

    fn validate(fields: &ProfileFields) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(fields.name.as_deref(), "Name", 100));
        if let Some(mobile) = present(&fields.mobile) {
            errors.extend(validate::validate_phone(mobile, "Mobile"));
        }
        if let Some(role) = present(&fields.role) {
            errors.extend(validate::validate_optional(role, "Role", 50));
        }
        errors
    }
}
