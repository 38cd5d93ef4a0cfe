use serde::{Deserialize, Serialize};

use crate::models::ProfileFields;
use crate::models::dashboard::{Activity, DashboardStats};
use crate::table::{ActionSet, ColumnDef, PAGE_SIZE, TableView};

/// Tally of one status value over a domain's full table.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: u64,
}

/// One page of a domain table, with everything needed to render it.
#[derive(Serialize, Debug, Clone)]
pub struct TablePage<T: Serialize> {
    pub items: Vec<T>,
    /// Rendered cells of `items`, one string per column.
    pub rows: Vec<Vec<String>>,
    pub columns: Vec<ColumnDef>,
    pub search: String,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub summary: String,
    pub show_pagination: bool,
    pub actions: ActionSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<StatusCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<T: Serialize + Clone> TablePage<T> {
    pub fn from_view(
        view: &TableView<'_, T>,
        columns: Vec<ColumnDef>,
        search: &str,
        actions: ActionSet,
    ) -> Self {
        TablePage {
            items: view.rows.iter().map(|r| (*r).clone()).collect(),
            rows: view.cells(&columns),
            columns,
            search: search.to_string(),
            page: view.page,
            per_page: PAGE_SIZE,
            total: view.total,
            total_pages: view.total_pages,
            summary: view.summary(),
            show_pagination: view.show_pagination(),
            actions,
            statuses: Vec::new(),
            notice: None,
        }
    }
}

/// Query string of a table listing.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ListParams {
    /// Search term.
    pub q: Option<String>,
    pub page: Option<usize>,
    /// Order field; defaults to the creation timestamp.
    pub order: Option<String>,
    /// Ascending order; defaults to newest first.
    pub asc: Option<bool>,
    /// Only records with this status.
    pub status: Option<String>,
}

/// Body of `POST /api/v1/users`.
#[derive(Deserialize, Debug)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

#[derive(Serialize, Debug)]
pub struct RoleResponse {
    pub role: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent: TablePage<Activity>,
}
