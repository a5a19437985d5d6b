use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_user_create(data: &Value) -> io::Result<String> {
    let user = data
        .get("user")
        .ok_or_else(|| io::Error::other("users create output requires user"))?;
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Registered user.");

    let mut lines = vec![message.to_string(), String::new()];
    lines.extend(format::field_rows(&[
        ("Username:", text(user, "username")),
        ("Role:", text(user, "role_label")),
        ("Center:", text(user, "center")),
    ]));
    lines.push(String::new());
    lines.push("Next:".to_string());
    lines.push(format!(
        "  streakline dash {}",
        user.get("username").and_then(Value::as_str).unwrap_or("<username>")
    ));

    Ok(lines.join("\n"))
}

pub fn render_users_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("users list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No users registered yet.",
            "",
            "Register one first:",
            "  streakline users create <username> --role user --center <center>",
        ]
        .join("\n"));
    }

    let columns = [
        Column {
            name: "Center",
            align: Align::Left,
        },
        Column {
            name: "Username",
            align: Align::Left,
        },
        Column {
            name: "Role",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| vec![text(row, "center"), text(row, "username"), text(row, "role_label")])
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Users ({}):", rows.len())];
    lines.extend(format::render_table(
        &columns,
        &table_rows,
        format::terminal_width(),
    ));
    Ok(lines.join("\n"))
}

pub fn render_centers(data: &Value) -> io::Result<String> {
    let centers = data
        .get("centers")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("centers output requires centers"))?;

    let mut lines = vec!["Centers:".to_string()];
    for center in centers {
        if let Some(name) = center.as_str() {
            lines.push(format!("  {name}"));
        }
    }
    Ok(lines.join("\n"))
}

fn text(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}
