//! Tests for record filtering

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::normalize::{drop_empty_records, drop_empty_values, is_placeholder, strip_placeholders, Record};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_drop_empty_records() {
        let records = vec![record(json!({})), record(json!({"a": 1})), record(json!({}))];
        assert_eq!(drop_empty_records(records), vec![record(json!({"a": 1}))]);
    }

    #[test]
    fn test_drop_empty_values_keeps_non_objects() {
        let items = vec![json!({}), json!("texto"), json!({"a": 1}), json!(null), json!([])];
        assert_eq!(
            drop_empty_values(items),
            vec![json!("texto"), json!({"a": 1}), json!(null), json!([])]
        );
    }

    #[test]
    fn test_strip_placeholders() {
        let input = record(json!({"a": "null", "b": "", "c": null, "d": 1}));
        let stripped = strip_placeholders(&input);

        assert_eq!(stripped, record(json!({"c": null, "d": 1})));
        let keys: Vec<&String> = stripped.keys().collect();
        assert_eq!(keys, vec!["c", "d"]);
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder(&json!("null")));
        assert!(is_placeholder(&json!("")));
        assert!(!is_placeholder(&json!(null)));
        assert!(!is_placeholder(&json!("NULL ")));
        assert!(!is_placeholder(&json!(0)));
    }
}
