//! Landing-page statistics and recent activity.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::{
    Complaint, MahilaShaktiGrievance, Profile, SocialMediaGrievance, Volunteer, YuvaShakthiMember,
};
use super::complaint::{STATUS_PENDING, STATUS_RESOLVED};
use super::grievance::STATUS_UNDER_REVIEW;
use crate::store::{Filter, ListQuery, Record, Store};
use crate::table::ColumnDef;

/// Rows taken from each source for the activity feed.
pub const RECENT_PER_SOURCE: usize = 5;
/// Rows shown in the merged activity feed.
pub const RECENT_TOTAL: usize = 10;

/// The stores the dashboard reads from.
pub struct DashboardSources<'a> {
    pub profiles: &'a dyn Store<Profile>,
    pub members: &'a dyn Store<YuvaShakthiMember>,
    pub complaints: &'a dyn Store<Complaint>,
    pub mahila: &'a dyn Store<MahilaShaktiGrievance>,
    pub social: &'a dyn Store<SocialMediaGrievance>,
    pub volunteers: &'a dyn Store<Volunteer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub users: u64,
    pub active_complaints: u64,
    pub yuva_members: u64,
    pub open_grievances: u64,
    pub volunteers: u64,
    /// Percentage of this month's complaints already resolved.
    pub resolution_rate: f64,
    /// This month's rate minus last month's; 0 when last month had none.
    pub resolution_rate_trend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub activity: &'static str,
    pub user: Option<String>,
    pub time: DateTime<Utc>,
    pub status: Option<String>,
}

pub fn activity_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::text("activity", "Activity"),
        ColumnDef::text("user", "User"),
        ColumnDef::date("time", "Time"),
        ColumnDef::text("status", "Status"),
    ]
}

async fn count_or_zero<T: Record>(store: &dyn Store<T>, filters: &[Filter]) -> u64 {
    match store.count(filters).await {
        Ok(n) => n,
        Err(e) => {
            log::warn!("Counting {} failed, showing 0: {e}", T::TABLE);
            0
        }
    }
}

fn month_start(date: NaiveDate) -> DateTime<Utc> {
    date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN).and_utc()
}

/// Start of the month containing `now` and of the month before it.
pub fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let this_month = month_start(now.date_naive());
    let last_day_before = this_month.date_naive() - Days::new(1);
    (this_month, month_start(last_day_before))
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Resolution rate of complaints submitted in `[from, until)`.
async fn resolution_rate(
    complaints: &dyn Store<Complaint>,
    from: DateTime<Utc>,
    until: Option<DateTime<Utc>>,
) -> f64 {
    let mut window = vec![Filter::gte(Complaint::CREATED_AT, from)];
    if let Some(until) = until {
        window.push(Filter::lt(Complaint::CREATED_AT, until));
    }
    let all = count_or_zero(complaints, &window).await;

    window.push(Filter::eq("status", STATUS_RESOLVED));
    let resolved = count_or_zero(complaints, &window).await;

    percentage(resolved, all)
}

pub async fn collect_stats(src: &DashboardSources<'_>, now: DateTime<Utc>) -> DashboardStats {
    let (this_month, last_month) = month_bounds(now);

    let rate_now = resolution_rate(src.complaints, this_month, None).await;
    let rate_before = resolution_rate(src.complaints, last_month, Some(this_month)).await;
    let trend = if rate_before == 0.0 { 0.0 } else { rate_now - rate_before };

    DashboardStats {
        users: count_or_zero(src.profiles, &[]).await,
        active_complaints: count_or_zero(src.complaints, &[Filter::eq("status", STATUS_PENDING)])
            .await,
        yuva_members: count_or_zero(src.members, &[]).await,
        open_grievances: count_or_zero(src.mahila, &[Filter::eq("status", STATUS_UNDER_REVIEW)])
            .await,
        volunteers: count_or_zero(src.volunteers, &[]).await,
        resolution_rate: round1(rate_now),
        resolution_rate_trend: round1(trend),
    }
}

async fn latest<T: Record>(store: &dyn Store<T>) -> Vec<T> {
    let query = ListQuery::newest_first::<T>().limit(RECENT_PER_SOURCE);
    store.list(&query).await.unwrap_or_else(|e| {
        log::warn!("Recent {} unavailable: {e}", T::TABLE);
        Vec::new()
    })
}

/// Latest complaints and grievances merged into one feed, newest first.
pub async fn recent_activity(src: &DashboardSources<'_>) -> Vec<Activity> {
    let mut feed: Vec<Activity> = Vec::new();

    feed.extend(latest(src.complaints).await.into_iter().map(|c| Activity {
        activity: "Complaint",
        user: c.fields.full_name,
        time: c.submitted_at,
        status: c.fields.status,
    }));
    feed.extend(latest(src.mahila).await.into_iter().map(|g| Activity {
        activity: "Mahila Shakti Grievance",
        user: g.fields.fullname,
        time: g.submitted_at,
        status: g.fields.status,
    }));
    feed.extend(latest(src.social).await.into_iter().map(|g| Activity {
        activity: "Social Media Grievance",
        user: g.fields.fullname,
        time: g.submitted_at,
        status: g.fields.status,
    }));

    feed.sort_by(|a, b| b.time.cmp(&a.time));
    feed.truncate(RECENT_TOTAL);
    feed
}
