//! Result rendering

use crate::error::EvalResult;
use crate::result::ResultRow;

pub fn to_json(rows: &[ResultRow]) -> EvalResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn to_csv(rows: &[ResultRow]) -> String {
    let mut output = ResultRow::COLUMNS.join(",");
    output.push('\n');
    for row in rows {
        let fields: Vec<String> = row.fields().iter().map(|f| csv_escape(f)).collect();
        output.push_str(&fields.join(","));
        output.push('\n');
    }
    output
}

/// Quote a CSV field, neutralising leading spreadsheet formula characters
pub fn csv_escape(s: &str) -> String {
    let needs_formula_protection = s
        .chars()
        .next()
        .map(|c| matches!(c, '=' | '+' | '-' | '@' | '\t' | '\r'))
        .unwrap_or(false);

    let escaped = if needs_formula_protection {
        format!("'{}", s)
    } else {
        s.to_string()
    };

    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') {
        format!("\"{}\"", escaped.replace('"', "\"\""))
    } else {
        escaped
    }
}
