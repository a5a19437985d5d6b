use std::io;

use serde_json::Value;

use super::format;

/// Raw CSV when the report went to stdout, otherwise a short summary.
pub fn render_report(data: &Value) -> io::Result<String> {
    if let Some(csv) = data.get("csv").and_then(Value::as_str) {
        return Ok(csv.trim_end_matches('\n').to_string());
    }

    let path = data
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("report output requires path or csv"))?;
    let window = format!(
        "{} to {}",
        data.get("window_start").and_then(Value::as_str).unwrap_or("unknown"),
        data.get("window_end").and_then(Value::as_str).unwrap_or("unknown")
    );

    let mut lines = vec!["Activity report exported.".to_string(), String::new()];
    lines.extend(format::field_rows(&[
        ("File:", path.to_string()),
        ("Window:", window),
        (
            "Users:",
            data.get("users").and_then(Value::as_i64).unwrap_or(0).to_string(),
        ),
        (
            "Rows:",
            data.get("rows_written")
                .and_then(Value::as_i64)
                .unwrap_or(0)
                .to_string(),
        ),
    ]));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_report;

    #[test]
    fn stdout_report_is_raw_csv() {
        let rendered = render_report(&json!({
            "csv": "Center,Username,Date,CallsThatDay,StatusLast7Days,CurrentLimit\n"
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert_eq!(
                text,
                "Center,Username,Date,CallsThatDay,StatusLast7Days,CurrentLimit"
            );
        }
    }

    #[test]
    fn file_report_summarizes_destination() {
        let rendered = render_report(&json!({
            "path": "admin_activity_report.csv",
            "window_start": "2026-05-01",
            "window_end": "2026-05-30",
            "users": 2,
            "rows_written": 60
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("File:    admin_activity_report.csv"));
            assert!(text.contains("2026-05-01 to 2026-05-30"));
            assert!(text.contains("Rows:    60"));
        }
    }
}
