use serde_json::Value;

/// Render a response's `extra` payload as display lines.
///
/// Objects become one `key: value` line per entry, arrays one bullet per
/// item; nested values are flattened onto their line.
pub fn format_extra(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, inline(value)))
            .collect(),
        Value::Array(items) => items.iter().map(|item| format!("• {}", inline(item))).collect(),
        other => vec![inline(other)],
    }
}

fn inline(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(inline).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{} = {}", key, inline(value)))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vaccination_schedule() {
        let extra = json!({
            "infant": ["BCG", "OPV", "Hepatitis B"],
            "pregnant": ["TT vaccine"]
        });
        assert_eq!(
            format_extra(&extra),
            vec!["infant: BCG, OPV, Hepatitis B", "pregnant: TT vaccine"]
        );
    }

    #[test]
    fn test_array_of_objects() {
        let extra = json!([
            {"disease": "Dengue", "risk": "medium"},
            {"disease": "Influenza", "risk": "low"}
        ]);
        assert_eq!(
            format_extra(&extra),
            vec![
                "• disease = Dengue; risk = medium",
                "• disease = Influenza; risk = low"
            ]
        );
    }

    #[test]
    fn test_scalars_and_null() {
        assert!(format_extra(&Value::Null).is_empty());
        assert_eq!(format_extra(&json!("plain")), vec!["plain"]);
        assert_eq!(format_extra(&json!({"count": 3, "note": null})), vec!["count: 3", "note: -"]);
    }
}
