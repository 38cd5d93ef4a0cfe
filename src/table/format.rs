use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Longest preview cell before it is cut and suffixed with `...`.
pub const PREVIEW_CHARS: usize = 50;

/// How a column renders its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    Text,
    /// Timestamp shown as `YYYY-MM-DD`.
    Date,
    /// Long text cut to [`PREVIEW_CHARS`].
    Preview,
    /// Array joined with `, `.
    List,
}

/// Ordered column definition of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
    pub format: CellFormat,
}

impl ColumnDef {
    fn new(key: &str, label: &str, format: CellFormat) -> Self {
        ColumnDef { key: key.to_string(), label: label.to_string(), format }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, CellFormat::Text)
    }

    pub fn date(key: &str, label: &str) -> Self {
        Self::new(key, label, CellFormat::Date)
    }

    pub fn preview(key: &str, label: &str) -> Self {
        Self::new(key, label, CellFormat::Preview)
    }

    pub fn list(key: &str, label: &str) -> Self {
        Self::new(key, label, CellFormat::List)
    }
}

/// Searchable text of a cell. Arrays join with `,`; null has none.
pub fn text_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| text_form(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

fn is_empty_cell(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Display text of one cell; `-` when the cell is empty.
pub fn render_cell(value: &Value, format: CellFormat) -> String {
    if is_empty_cell(value) {
        return "-".to_string();
    }
    match format {
        CellFormat::Text => text_form(value).unwrap_or_default(),
        CellFormat::Date => match value.as_str().and_then(|s| s.parse::<DateTime<Utc>>().ok()) {
            Some(t) => t.format("%Y-%m-%d").to_string(),
            None => text_form(value).unwrap_or_default(),
        },
        CellFormat::Preview => preview(&text_form(value).unwrap_or_default()),
        CellFormat::List => match value {
            Value::Array(items) => items
                .iter()
                .filter_map(text_form)
                .collect::<Vec<_>>()
                .join(", "),
            other => text_form(other).unwrap_or_default(),
        },
    }
}

pub fn pluralize_entries(n: usize) -> &'static str {
    if n == 1 { "entry" } else { "entries" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_forms() {
        assert_eq!(text_form(&json!("Hello")), Some("Hello".into()));
        assert_eq!(text_form(&json!(42)), Some("42".into()));
        assert_eq!(text_form(&json!(true)), Some("true".into()));
        assert_eq!(text_form(&json!(["a", "b"])), Some("a,b".into()));
        assert_eq!(text_form(&Value::Null), None);
    }

    #[test]
    fn empty_cells_render_dash() {
        assert_eq!(render_cell(&Value::Null, CellFormat::Text), "-");
        assert_eq!(render_cell(&json!(""), CellFormat::Preview), "-");
        assert_eq!(render_cell(&json!([]), CellFormat::List), "-");
        assert_eq!(render_cell(&json!(false), CellFormat::Text), "false");
    }

    #[test]
    fn date_cells_show_calendar_day() {
        let v = json!("2025-03-07T18:45:12.5+00:00");
        assert_eq!(render_cell(&v, CellFormat::Date), "2025-03-07");
        assert_eq!(render_cell(&json!("not a date"), CellFormat::Date), "not a date");
    }

    #[test]
    fn preview_cuts_long_text() {
        let long = "x".repeat(60);
        let rendered = render_cell(&json!(long), CellFormat::Preview);
        assert_eq!(rendered.len(), PREVIEW_CHARS + 3);
        assert!(rendered.ends_with("..."));

        assert_eq!(render_cell(&json!("short"), CellFormat::Preview), "short");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let telugu = "అ".repeat(51);
        let rendered = render_cell(&json!(telugu), CellFormat::Preview);
        assert_eq!(rendered.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn list_cells_join_with_comma_space() {
        let v = json!(["Facebook", "X"]);
        assert_eq!(render_cell(&v, CellFormat::List), "Facebook, X");
    }

    #[test]
    fn entry_pluralization() {
        assert_eq!(pluralize_entries(0), "entries");
        assert_eq!(pluralize_entries(1), "entry");
        assert_eq!(pluralize_entries(2), "entries");
    }
}
