use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_center(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("center output requires rows"))?;
    let center = data.get("center").and_then(Value::as_str).unwrap_or("unknown");
    let selected = data
        .get("selected_date")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let is_admin_view = data
        .get("is_admin_view")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let heading = if is_admin_view {
        format!("Center {center} (admin view), customers on {selected}:")
    } else {
        format!("Your center {center}, customers on {selected}:")
    };
    let mut lines = vec![heading];
    if let Some(search) = data.get("search").and_then(Value::as_str) {
        lines.push(format!("  Filtered by username containing `{search}`"));
    }
    lines.push(String::new());

    if rows.is_empty() {
        lines.push("No users found.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Username",
            align: Align::Left,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
        Column {
            name: "Limit",
            align: Align::Right,
        },
        Column {
            name: "Count",
            align: Align::Right,
        },
        Column {
            name: "Customers",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("username").and_then(Value::as_str).unwrap_or("").to_string(),
                row.get("status").and_then(Value::as_str).unwrap_or("").to_string(),
                row.get("current_limit")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                row.get("count").and_then(Value::as_i64).unwrap_or(0).to_string(),
                customer_summary(row),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table(
        &columns,
        &table_rows,
        format::terminal_width(),
    ));
    Ok(lines.join("\n"))
}

fn customer_summary(row: &Value) -> String {
    let customers = row
        .get("customers")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if customers.is_empty() {
        return "-".to_string();
    }
    customers
        .iter()
        .map(|customer| {
            format!(
                "{} ({})",
                customer.get("name").and_then(Value::as_str).unwrap_or(""),
                customer.get("phone").and_then(Value::as_str).unwrap_or("")
            )
        })
        .collect::<Vec<String>>()
        .join(", ")
}
