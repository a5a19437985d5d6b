use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_records_add(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("records add output requires message"))?;

    let mut lines = vec![message.to_string()];
    let skipped = data.get("skipped").and_then(Value::as_i64).unwrap_or(0);
    if skipped > 0 {
        lines.push(format!(
            "Skipped {skipped} blank {}.",
            if skipped == 1 { "entry" } else { "entries" }
        ));
    }
    Ok(lines.join("\n"))
}

pub fn render_records_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("records list output requires rows"))?;
    let username = data.get("username").and_then(Value::as_str).unwrap_or("unknown");
    let date = data.get("date").and_then(Value::as_str).unwrap_or("unknown");

    if rows.is_empty() {
        return Ok(format!("No customers logged by {username} on {date}."));
    }

    let columns = [
        Column {
            name: "#",
            align: Align::Right,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Phone",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                (index + 1).to_string(),
                row.get("name").and_then(Value::as_str).unwrap_or("").to_string(),
                row.get("phone").and_then(Value::as_str).unwrap_or("").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Customers logged by {username} on {date} ({}):", rows.len()),
        String::new(),
    ];
    lines.extend(format::render_table(
        &columns,
        &table_rows,
        format::terminal_width(),
    ));
    Ok(lines.join("\n"))
}
