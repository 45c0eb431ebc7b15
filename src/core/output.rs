//! Plain-text rendering for interpreter results.
//!
//! Keeps REPL output bounded and readable: record lists become aligned
//! tables, single records become key/value detail blocks, long cell values
//! are compacted to one line.

use crate::core::store::Record;
use serde_json::Value as JsonValue;

const MAX_CELL_CHARS: usize = 40;

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn cell(value: &JsonValue) -> String {
    let raw = match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    compact_line(&raw, MAX_CELL_CHARS)
}

/// Renders a list of records as an aligned text table, columns in row order.
pub fn render_table(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return "No hay datos para mostrar".to_string();
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len());
    for record in records {
        rows.push(
            headers
                .iter()
                .map(|h| record.get(*h).map(cell).unwrap_or_default())
                .collect(),
        );
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let mut out = String::new();
    render_row(&mut out, &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &rule, &widths);
    for row in &rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let rendered: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    out.push_str(rendered.join("  ").trim_end());
    out.push('\n');
}

/// Renders one record as `clave: valor` lines.
pub fn render_detail(record: &Record) -> String {
    let width = record.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in record {
        out.push_str(&format!("{:<width$}  {}\n", key, cell(value), width = width));
    }
    out
}

/// Renders interpreter payload data for the text output mode.
pub fn render_data(data: &JsonValue) -> String {
    match data {
        JsonValue::Array(items) => {
            let records: Vec<Record> = items
                .iter()
                .filter_map(|v| v.as_object().cloned())
                .collect();
            if records.len() == items.len() {
                render_table(&records)
            } else {
                serde_json::to_string_pretty(data).unwrap_or_default()
            }
        }
        JsonValue::Object(record) => render_detail(record),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, JsonValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_compact_line_bounds_length() {
        assert_eq!(compact_line("hola mundo", 20), "hola mundo");
        assert_eq!(compact_line("uno\ndos   tres", 20), "uno dos tres");
        assert_eq!(compact_line("abcdef", 3), "abc...");
    }

    #[test]
    fn test_render_table_alignment() {
        let records = vec![
            record(&[("id", json!(1)), ("nombre", json!("Juan"))]),
            record(&[("id", json!(22)), ("nombre", json!("Ana"))]),
        ];
        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[2].contains("Juan"));
        assert!(lines[3].contains("Ana"));
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[]), "No hay datos para mostrar");
    }

    #[test]
    fn test_render_detail() {
        let detail = render_detail(&record(&[
            ("id", json!(5)),
            ("nombre", json!("Juan")),
        ]));
        assert!(detail.contains("id"));
        assert!(detail.contains("Juan"));
    }
}
