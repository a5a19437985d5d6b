use std::io;

use serde::Serialize;
use serde_json::{Value, json};
use streakline_client::{ClientError, SuccessEnvelope};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "users list" | "records list" => render_rows_json(&success.data),
        _ => render_envelope_json(&success.command, &success.data),
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    serialize_json_pretty(&payload)
}

fn render_envelope_json(command: &str, data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "command": command,
        "data": data.clone()
    })
}

/// Listing commands print their rows as a bare array.
fn render_rows_json(data: &Value) -> Value {
    Value::Array(
        data.get("rows")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
    )
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use streakline_client::{ClientError, SuccessEnvelope};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap_or(Value::Null)
    }

    #[test]
    fn users_list_json_returns_raw_array() {
        let rendered = render_success_json(&success(
            "users list",
            json!({"rows": [{"username": "asha", "center": "bbsr"}]}),
        ));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let value = parse(&text);
            assert!(value.is_array());
            assert_eq!(value[0]["username"], "asha");
        }
    }

    #[test]
    fn status_json_uses_structured_envelope() {
        let rendered = render_success_json(&success(
            "status",
            json!({"username": "asha", "is_active": true, "current_limit": 5}),
        ));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let value = parse(&text);
            assert_eq!(value["ok"], true);
            assert_eq!(value["version"], "v1");
            assert_eq!(value["command"], "status");
            assert_eq!(value["data"]["current_limit"], 5);
        }
    }

    #[test]
    fn runtime_error_json_uses_universal_shape() {
        let error = ClientError::user_not_found("ghost");
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let value = parse(&text);
            assert_eq!(value["error"]["code"], "user_not_found");
            assert!(value.get("ok").is_none());
        }
    }
}
