//! Domain record types, one per backing table.

pub mod complaint;
pub mod dashboard;
pub mod grievance;
pub mod member;
pub mod profile;
pub mod scheme;
pub mod volunteer;

pub use complaint::{Complaint, ComplaintFields};
pub use grievance::{
    Grievance, GrievanceFields, MahilaShaktiGrievance, MahilaShaktiGrievanceFields,
    SocialMediaGrievance, SocialMediaGrievanceFields,
};
pub use member::{YuvaShakthiMember, YuvaShakthiMemberFields};
pub use profile::{Profile, ProfileFields};
pub use scheme::{SchemeEligibility, SchemeEligibilityFields};
pub use volunteer::{Volunteer, VolunteerFields};

use crate::store::Record;
use crate::table::ColumnDef;

/// What an admin page needs to know about a record type beyond storage.
pub trait AdminRecord: Record {
    /// Singular noun used in messages ("complaint", "volunteer").
    const LABEL: &'static str;
    /// Status values tallied in the page overview. Empty when the table has
    /// no status column.
    const STATUSES: &'static [&'static str] = &[];

    fn columns() -> Vec<ColumnDef>;

    /// Field-level problems with a create or update payload.
    fn validate(fields: &Self::Fields) -> Vec<String>;

    /// Overview cards that are not status values, counted over the listed records.
    fn tallies() -> Vec<Tally<Self::Fields>> {
        Vec::new()
    }
}

/// A named predicate counted across a listing.
pub struct Tally<F> {
    pub label: &'static str,
    pub matches: fn(&F) -> bool,
}

impl<F> Tally<F> {
    pub fn count<'a>(&self, fields: impl IntoIterator<Item = &'a F>) -> u64
    where
        F: 'a,
    {
        fields.into_iter().filter(|f| (self.matches)(f)).count() as u64
    }
}

/// Whether an array field holds `value` exactly.
pub(crate) fn includes(list: &Option<Vec<String>>, value: &str) -> bool {
    list.as_ref().is_some_and(|items| items.iter().any(|i| i == value))
}

/// Whether an array field has at least one entry.
pub(crate) fn has_entries(list: &Option<Vec<String>>) -> bool {
    list.as_ref().is_some_and(|items| !items.is_empty())
}

/// Declares the envelope struct of a record and its [`Record`] impl.
///
/// The envelope carries the store-assigned `id` and creation timestamp and
/// flattens the editable fields next to them, matching the row layout.
macro_rules! record {
    (
        $(#[$meta:meta])*
        $name:ident {
            fields: $fields:ident,
            table: $table:literal,
            created: $created:ident,
            columns: [$($col:literal),* $(,)?] $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub id: uuid::Uuid,
            pub $created: chrono::DateTime<chrono::Utc>,
            #[serde(flatten)]
            pub fields: $fields,
        }

        impl $crate::store::Record for $name {
            type Fields = $fields;

            const TABLE: &'static str = $table;
            const CREATED_AT: &'static str = stringify!($created);
            const FIELDS: &'static [&'static str] = &["id", stringify!($created), $($col),*];

            fn id(&self) -> uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
                self.$created
            }

            fn fields(&self) -> &Self::Fields {
                &self.fields
            }

            fn assemble(
                id: uuid::Uuid,
                created_at: chrono::DateTime<chrono::Utc>,
                fields: Self::Fields,
            ) -> Self {
                $name { id, $created: created_at, fields }
            }
        }
    };
}

pub(crate) use record;

/// Trimmed value of an optional text field, `None` when blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
