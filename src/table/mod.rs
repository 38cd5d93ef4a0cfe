//! Searchable, paginated view over an ordered list of records.
//!
//! The table performs no I/O and has no error conditions: it narrows a slice
//! the caller already holds and dispatches row actions back to the caller.

mod format;

pub use format::{
    CellFormat, ColumnDef, PREVIEW_CHARS, pluralize_entries, render_cell, text_form,
};

use serde::Serialize;
use serde_json::Value;

pub const PAGE_SIZE: usize = 10;

/// Which row actions a table offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionSet {
    pub add: bool,
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ActionSet {
    pub const ALL: ActionSet = ActionSet { add: true, view: true, edit: true, delete: true };
    pub const READ_ONLY: ActionSet =
        ActionSet { add: false, view: false, edit: false, delete: false };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction<'a, T> {
    Add,
    View(&'a T),
    Edit(&'a T),
    Delete(&'a T),
}

/// Receiver of the actions a table dispatches.
pub trait TableActions<T> {
    fn on_add(&mut self);
    fn on_view(&mut self, record: &T);
    fn on_edit(&mut self, record: &T);
    fn on_delete(&mut self, record: &T);
}

/// Table state: search term, current page and enabled actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    search_term: String,
    current_page: usize,
    actions: ActionSet,
}

impl Default for DataTable {
    fn default() -> Self {
        Self::new(ActionSet::ALL)
    }
}

impl DataTable {
    pub fn new(actions: ActionSet) -> Self {
        DataTable { search_term: String::new(), current_page: 1, actions }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn actions(&self) -> ActionSet {
        self.actions
    }

    /// Replace the search term. Always returns to the first page.
    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.current_page = 1;
    }

    /// Jump to `page` as given. Pages past the end are allowed and show no rows.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.current_page < total_pages {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Records kept by the current search term, in input order.
    pub fn filter<'a, T: Serialize>(&self, records: &'a [T]) -> Vec<&'a T> {
        let term = self.search_term.to_lowercase();
        if term.is_empty() {
            return records.iter().collect();
        }
        records
            .iter()
            .filter(|r| serde_json::to_value(r).is_ok_and(|row| row_matches(&row, &term)))
            .collect()
    }

    pub fn view<'a, T: Serialize>(&self, records: &'a [T]) -> TableView<'a, T> {
        let filtered = self.filter(records);
        let total = filtered.len();
        let start = self.current_page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        let rows = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();
        TableView {
            rows,
            total,
            page: self.current_page,
            total_pages: total.div_ceil(PAGE_SIZE),
        }
    }

    /// Send `action` to `target` if this table offers it. Returns whether it was sent.
    pub fn dispatch<T>(
        &self,
        action: TableAction<'_, T>,
        target: &mut impl TableActions<T>,
    ) -> bool {
        match action {
            TableAction::Add if self.actions.add => target.on_add(),
            TableAction::View(r) if self.actions.view => target.on_view(r),
            TableAction::Edit(r) if self.actions.edit => target.on_edit(r),
            TableAction::Delete(r) if self.actions.delete => target.on_delete(r),
            _ => return false,
        }
        true
    }
}

/// A record matches when any of its values contains `term_lower`.
fn row_matches(row: &Value, term_lower: &str) -> bool {
    match row {
        Value::Object(map) => map
            .values()
            .any(|v| text_form(v).is_some_and(|t| t.to_lowercase().contains(term_lower))),
        other => text_form(other).is_some_and(|t| t.to_lowercase().contains(term_lower)),
    }
}

/// One page of a filtered table.
#[derive(Debug)]
pub struct TableView<'a, T> {
    pub rows: Vec<&'a T>,
    /// Number of records kept by the search, across all pages.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl<T: Serialize> TableView<'_, T> {
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// "Showing X to Y of N entries"
    pub fn summary(&self) -> String {
        let start = self.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        let (first, last) = if start >= self.total {
            (0, 0)
        } else {
            (start + 1, start.saturating_add(PAGE_SIZE).min(self.total))
        };
        format!(
            "Showing {first} to {last} of {} {}",
            self.total,
            pluralize_entries(self.total)
        )
    }

    /// "N entries found"
    pub fn found(&self) -> String {
        format!("{} {} found", self.total, pluralize_entries(self.total))
    }

    /// Rendered cells of each row on this page, one string per column.
    pub fn cells(&self, columns: &[ColumnDef]) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                let row = serde_json::to_value(r).unwrap_or(Value::Null);
                columns
                    .iter()
                    .map(|c| render_cell(row.get(&c.key).unwrap_or(&Value::Null), c.format))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Row {
        name: String,
        phone: Option<String>,
        tags: Vec<String>,
        age: Option<i32>,
    }

    fn row(name: &str) -> Row {
        Row { name: name.to_string(), phone: None, tags: vec![], age: None }
    }

    fn numbered(n: usize) -> Vec<Row> {
        (0..n).map(|i| row(&format!("Citizen {i:02}"))).collect()
    }

    #[test]
    fn empty_term_keeps_everything_in_order() {
        let records = numbered(4);
        let table = DataTable::default();
        let kept: Vec<Row> = table.filter(&records).into_iter().cloned().collect();
        assert_eq!(kept, records);
    }

    #[test]
    fn search_is_case_insensitive_over_every_field() {
        let records = vec![
            Row { phone: Some("98480 22338".into()), ..row("Ravi Kumar") },
            Row { tags: vec!["Roads".into(), "Water".into()], ..row("Anita") },
            Row { age: Some(47), ..row("Suresh") },
        ];
        let mut table = DataTable::default();

        table.set_search("RAVI");
        assert_eq!(table.filter(&records).len(), 1);

        table.set_search("22338");
        assert_eq!(table.filter(&records)[0].name, "Ravi Kumar");

        table.set_search("s,wat");
        assert_eq!(table.filter(&records)[0].name, "Anita");

        table.set_search("47");
        assert_eq!(table.filter(&records)[0].name, "Suresh");

        table.set_search("nobody");
        assert!(table.filter(&records).is_empty());
    }

    #[test]
    fn null_values_never_match() {
        let records = vec![row("A")];
        let mut table = DataTable::default();
        table.set_search("null");
        assert!(table.filter(&records).is_empty());
    }

    #[test]
    fn page_three_of_twenty_five_holds_last_five() {
        let records = numbered(25);
        let mut table = DataTable::default();
        table.go_to(3);
        let view = table.view(&records);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].name, "Citizen 20");
        assert_eq!(view.rows[4].name, "Citizen 24");
        assert_eq!(view.summary(), "Showing 21 to 25 of 25 entries");
    }

    #[test]
    fn slices_are_contiguous_and_sized() {
        let records = numbered(37);
        let mut table = DataTable::default();
        let total_pages = table.view(&records).total_pages;
        let mut seen = Vec::new();
        for page in 1..=total_pages {
            table.go_to(page);
            let view = table.view(&records);
            let expected = PAGE_SIZE.min(37 - (page - 1) * PAGE_SIZE);
            assert_eq!(view.rows.len(), expected);
            seen.extend(view.rows.into_iter().cloned());
        }
        assert_eq!(seen, records);
    }

    #[test]
    fn changing_search_resets_to_first_page() {
        let records = numbered(30);
        let mut table = DataTable::default();
        table.go_to(3);
        table.set_search("citizen");
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.view(&records).rows.len(), PAGE_SIZE);
    }

    #[test]
    fn page_past_end_is_empty_not_clamped() {
        // 21 records on 3 pages; the only row of page 3 is removed
        let mut records = numbered(21);
        let mut table = DataTable::default();
        table.go_to(3);
        assert_eq!(table.view(&records).rows.len(), 1);

        records.pop();
        let view = table.view(&records);
        assert_eq!(view.page, 3);
        assert_eq!(view.total_pages, 2);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn navigation_is_bounded() {
        let mut table = DataTable::default();
        table.prev_page();
        assert_eq!(table.current_page(), 1);

        table.next_page(2);
        table.next_page(2);
        assert_eq!(table.current_page(), 2);

        table.go_to(0);
        assert_eq!(table.current_page(), 1);
        table.go_to(9);
        assert_eq!(table.current_page(), 9);
    }

    #[test]
    fn pagination_only_with_more_than_one_page() {
        let table = DataTable::default();
        assert!(!table.view(&numbered(10)).show_pagination());
        assert!(table.view(&numbered(11)).show_pagination());
    }

    #[test]
    fn summaries() {
        let table = DataTable::default();
        let one = numbered(1);
        assert_eq!(table.view(&one).found(), "1 entry found");
        let none: Vec<Row> = Vec::new();
        let view = table.view(&none);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.summary(), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn huge_page_summarises_as_empty() {
        let records = numbered(3);
        let mut table = DataTable::default();
        table.go_to(usize::MAX);
        let view = table.view(&records);
        assert!(view.rows.is_empty());
        assert_eq!(view.summary(), "Showing 0 to 0 of 3 entries");
    }

    #[test]
    fn hand_built_page_zero_does_not_underflow() {
        let records = numbered(3);
        let view = TableView { rows: records.iter().collect(), total: 3, page: 0, total_pages: 1 };
        assert_eq!(view.summary(), "Showing 1 to 3 of 3 entries");
    }

    #[test]
    fn cells_follow_column_formats() {
        let records = vec![Row { tags: vec!["a".into(), "b".into()], ..row("Meena") }];
        let columns = vec![
            ColumnDef::text("name", "Name"),
            ColumnDef::text("phone", "Phone"),
            ColumnDef::list("tags", "Tags"),
        ];
        let cells = DataTable::default().view(&records).cells(&columns);
        assert_eq!(cells, vec![vec!["Meena".to_string(), "-".to_string(), "a, b".to_string()]]);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl TableActions<Row> for Recorder {
        fn on_add(&mut self) {
            self.calls.push("add".into());
        }
        fn on_view(&mut self, record: &Row) {
            self.calls.push(format!("view {}", record.name));
        }
        fn on_edit(&mut self, record: &Row) {
            self.calls.push(format!("edit {}", record.name));
        }
        fn on_delete(&mut self, record: &Row) {
            self.calls.push(format!("delete {}", record.name));
        }
    }

    #[test]
    fn dispatch_respects_enabled_actions() {
        let record = row("Gopal");
        let mut recorder = Recorder::default();

        let table = DataTable::new(ActionSet { delete: false, ..ActionSet::ALL });
        assert!(table.dispatch(TableAction::Add, &mut recorder));
        assert!(table.dispatch(TableAction::Edit(&record), &mut recorder));
        assert!(!table.dispatch(TableAction::Delete(&record), &mut recorder));
        assert_eq!(recorder.calls, vec!["add", "edit Gopal"]);

        let read_only = DataTable::new(ActionSet::READ_ONLY);
        assert!(!read_only.dispatch(TableAction::View(&record), &mut recorder));
        assert_eq!(recorder.calls.len(), 2);
    }
}
