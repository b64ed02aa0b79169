//! Output formatting utilities

use serde::Serialize;
use serde_json::Value;
use wikinav_eval::report::csv_escape;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Format output based on format type
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    let value = serde_json::to_value(data)?;
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Csv => {
            let (header, rows) = tabulate(&value);
            let mut out = String::new();
            for line in std::iter::once(header).chain(rows) {
                let cells: Vec<String> = line.iter().map(|c| csv_escape(c)).collect();
                out.push_str(&cells.join(","));
                out.push('\n');
            }
            out
        }
        OutputFormat::Table => render_table(&value),
    })
}

/// Flatten a JSON value into a header and rows of cells
fn tabulate(value: &Value) -> (Vec<String>, Vec<Vec<String>>) {
    match value {
        Value::Array(items) => {
            let header: Vec<String> = match items.first() {
                Some(Value::Object(first)) => first.keys().cloned().collect(),
                _ => vec!["value".to_string()],
            };
            let rows = items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => header
                        .iter()
                        .map(|key| map.get(key).map(cell).unwrap_or_default())
                        .collect(),
                    other => vec![cell(other)],
                })
                .collect();
            (header, rows)
        }
        Value::Object(map) => (
            vec!["key".to_string(), "value".to_string()],
            map.iter().map(|(k, v)| vec![k.clone(), cell(v)]).collect(),
        ),
        other => (vec!["value".to_string()], vec![vec![cell(other)]]),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}

fn render_table(value: &Value) -> String {
    let (header, rows) = tabulate(value);
    if rows.is_empty() {
        return "(no results)\n".to_string();
    }

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| c.trim_end().replace('\n', " ")).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, c) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(c.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&header[..]);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(&rule[..]));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(&row[..]));
        out.push('\n');
    }
    out
}
