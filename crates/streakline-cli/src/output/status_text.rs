use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_status(data: &Value) -> io::Result<String> {
    let streak = data
        .get("streak")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("status output requires streak"))?;
    let username = data.get("username").and_then(Value::as_str).unwrap_or("unknown");
    let status_text = data
        .get("streak_status_text")
        .and_then(Value::as_str)
        .unwrap_or("Inactive user");

    let mut lines = vec![format!("{username}: {status_text}"), String::new()];
    lines.extend(format::field_rows(&[
        ("Role:", text(data, "role_label")),
        ("Center:", text(data, "center")),
        ("Today:", text(data, "today")),
        ("Customers today:", number(data, "today_count")),
        ("Current limit:", number(data, "current_limit")),
    ]));

    if streak.is_empty() {
        lines.push(String::new());
        lines.push("No live streak in the last 30 days.".to_string());
        lines.push("Log at least 3 customers a day to start one:".to_string());
        lines.push(format!(
            "  streakline records add {username} --customer NAME:PHONE ..."
        ));
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Customers",
            align: Align::Right,
        },
    ];
    let table_rows = streak
        .iter()
        .map(|day| vec![text(day, "date"), number(day, "count")])
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.push(format!("Streak ({} days):", streak.len()));
    lines.extend(format::render_table(
        &columns,
        &table_rows,
        format::terminal_width(),
    ));

    Ok(lines.join("\n"))
}

fn text(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

fn number(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_i64)
        .map_or_else(|| "0".to_string(), |value| value.to_string())
}
