//! Detection of mutual grievances: two filers who each name the other as
//! the opposing party.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Grievance, GrievanceFields, present};

/// Case-insensitive comparison of trimmed names.
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// The four fields the match needs, all present.
struct Parties<'a> {
    name: &'a str,
    mobile: &'a str,
    opponent_name: &'a str,
    opponent_phone: &'a str,
}

impl<'a> Parties<'a> {
    fn of(g: &'a GrievanceFields) -> Option<Self> {
        Some(Parties {
            name: present(&g.fullname)?,
            mobile: present(&g.mobile)?,
            opponent_name: present(&g.opponent_name)?,
            opponent_phone: present(&g.opponent_phone)?,
        })
    }

    /// Whether `self` names `other` as its opponent.
    fn names(&self, other: &Parties<'_>) -> bool {
        same_name(self.opponent_name, other.name) && self.opponent_phone == other.mobile
    }
}

/// Whether `a` and `b` name each other. Phones compare literally after trimming.
pub fn is_mutual(a: &GrievanceFields, b: &GrievanceFields) -> bool {
    match (Parties::of(a), Parties::of(b)) {
        (Some(pa), Some(pb)) => pa.names(&pb) && pb.names(&pa),
        _ => false,
    }
}

/// Every mutual pair `(i, j)` with `i < j`, in scan order.
///
/// Exhaustive over all pairs; a record is never paired with itself.
pub fn find_mutual_pairs(grievances: &[Grievance]) -> Vec<(usize, usize)> {
    let parties: Vec<Option<Parties<'_>>> =
        grievances.iter().map(|g| Parties::of(&g.fields)).collect();

    let mut pairs = Vec::new();
    for i in 0..parties.len() {
        let Some(a) = &parties[i] else { continue };
        for j in (i + 1)..parties.len() {
            let Some(b) = &parties[j] else { continue };
            if a.names(b) && b.names(a) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// One side of a dispute as shown in the alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisputeParty {
    pub id: Uuid,
    pub fullname: String,
    pub mobile: String,
}

impl DisputeParty {
    fn of(g: &Grievance) -> Self {
        DisputeParty {
            id: g.id,
            fullname: g.fields.fullname.clone().unwrap_or_default(),
            mobile: g.fields.mobile.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispute {
    pub first: DisputeParty,
    pub second: DisputeParty,
}

/// Alert payload listing every detected pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisputeAlert {
    pub count: usize,
    pub disputes: Vec<Dispute>,
    pub message: String,
}

impl DisputeAlert {
    pub fn from_grievances(grievances: &[Grievance]) -> Self {
        let disputes: Vec<Dispute> = find_mutual_pairs(grievances)
            .into_iter()
            .map(|(i, j)| Dispute {
                first: DisputeParty::of(&grievances[i]),
                second: DisputeParty::of(&grievances[j]),
            })
            .collect();

        let message = match disputes.len() {
            0 => "No mutual grievances detected".to_string(),
            1 => "1 mutual grievance detected".to_string(),
            n => format!("{n} mutual grievances detected"),
        };

        DisputeAlert { count: disputes.len(), disputes, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::store::Record;

    fn grievance(name: &str, mobile: &str, opponent: &str, opponent_phone: &str) -> Grievance {
        let fields = GrievanceFields {
            fullname: Some(name.to_string()),
            mobile: Some(mobile.to_string()),
            opponent_name: Some(opponent.to_string()),
            opponent_phone: Some(opponent_phone.to_string()),
            ..Default::default()
        };
        Grievance::assemble(Uuid::new_v4(), Utc::now(), fields)
    }

    fn ravi() -> Grievance {
        grievance("Ravi Kumar", "9876543210", "Suresh Babu", "9123456780")
    }

    fn suresh() -> Grievance {
        grievance("suresh babu ", "9123456780", " RAVI KUMAR", "9876543210")
    }

    #[test]
    fn detects_the_reciprocal_pair() {
        let list = vec![ravi(), suresh()];
        assert_eq!(find_mutual_pairs(&list), vec![(0, 1)]);
    }

    #[test]
    fn changed_mobile_breaks_the_pair() {
        let mut second = suresh();
        second.fields.mobile = Some("9000000000".into());
        assert!(find_mutual_pairs(&[ravi(), second]).is_empty());
    }

    #[test]
    fn detection_is_symmetric() {
        let (a, b) = (ravi(), suresh());
        assert_eq!(is_mutual(&a.fields, &b.fields), is_mutual(&b.fields, &a.fields));
        assert_eq!(find_mutual_pairs(&[b, a]), vec![(0, 1)]);
    }

    #[test]
    fn each_pair_is_reported_once_in_scan_order() {
        let other_a = grievance("Lakshmi", "7000000001", "Padma", "7000000002");
        let other_b = grievance("Padma", "7000000002", "Lakshmi", "7000000001");
        let bystander = grievance("Kiran", "7000000003", "Nobody", "7000000004");
        let list = vec![ravi(), other_a, bystander, suresh(), other_b];
        assert_eq!(find_mutual_pairs(&list), vec![(0, 3), (1, 4)]);
    }

    #[test]
    fn self_naming_record_is_not_a_pair() {
        let narcissist = grievance("Ravi Kumar", "9876543210", "Ravi Kumar", "9876543210");
        assert!(find_mutual_pairs(&[narcissist]).is_empty());
    }

    #[test]
    fn missing_fields_reject_the_pair() {
        let mut a = ravi();
        a.fields.opponent_phone = None;
        assert!(find_mutual_pairs(&[a, suresh()]).is_empty());

        let mut b = suresh();
        b.fields.fullname = Some("   ".into());
        assert!(find_mutual_pairs(&[ravi(), b]).is_empty());
    }

    #[test]
    fn phone_formatting_is_not_normalized() {
        let mut b = suresh();
        b.fields.opponent_phone = Some("98765 43210".into());
        assert!(find_mutual_pairs(&[ravi(), b]).is_empty());
    }

    #[test]
    fn alert_lists_names_and_phones() {
        let list = vec![ravi(), suresh()];
        let alert = DisputeAlert::from_grievances(&list);
        assert_eq!(alert.count, 1);
        assert_eq!(alert.disputes[0].first.fullname, "Ravi Kumar");
        assert_eq!(alert.disputes[0].second.mobile, "9123456780");
        assert_eq!(alert.message, "1 mutual grievance detected");
    }
}
