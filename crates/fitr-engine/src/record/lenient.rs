//! Lenient field readers.
//!
//! Profile and posting records are produced by forms, spreadsheets and other services, so a
//! field declared as text may hold a number, a boolean, a list, or nothing at all, and the
//! same field often arrives under several names. These helpers read a JSON object by key
//! lists, coerce whatever is present into the shape the engine needs, and never fail.

use serde_json::{Map, Value};

/// A JSON object's fields.
pub type Fields = Map<String, Value>;

/// Returns the text of the first key, in priority order, whose value is non-empty.
pub fn text(fields: &Fields, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| fields.get(*k))
        .map(value_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Collects list items from every key, in key order.
///
/// A single value stands for a one-item list and null stands for an empty one, so records
/// spread over several alias keys are all kept.
pub fn items<'a>(fields: &'a Fields, keys: &[&str]) -> Vec<&'a Value> {
    keys.iter()
        .filter_map(|k| fields.get(*k))
        .flat_map(|value| match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        })
        .collect()
}

/// Reads the object entries listed under `keys`. Entries that are not objects are skipped.
pub fn records<T, F>(fields: &Fields, keys: &[&str], read: F) -> Vec<T>
where
    F: Fn(&Fields) -> T,
{
    items(fields, keys)
        .into_iter()
        .filter_map(|value| match value.as_object() {
            Some(entry) => Some(read(entry)),
            None => {
                tracing::debug!("skipping record entry that is {}", kind_of(value));
                None
            }
        })
        .collect()
}

/// Renders a JSON value as text.
///
/// Scalars become their string form, lists are joined with `", "`, objects are flattened to
/// their scalar values, and null becomes the empty string.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => join_nonempty(items.iter().map(value_text), ", "),
        Value::Object(map) => join_nonempty(map.values().map(value_text), ", "),
    }
}

/// Joins the non-empty strings of an iterator.
pub fn join_nonempty<I>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Names a JSON value's type for messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn scalars_coerce_to_text() {
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(2.5)), "2.5");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!("  padded ")), "padded");
    }

    #[test]
    fn lists_join_with_commas() {
        assert_eq!(value_text(&json!(["python", "", "sql", 3])), "python, sql, 3");
    }

    #[test]
    fn objects_flatten_to_values() {
        let text = value_text(&json!({"name": "Acme", "city": "Cebu"}));
        assert!(text.contains("Acme"));
        assert!(text.contains("Cebu"));
    }

    #[test]
    fn first_non_empty_key_wins() {
        let f = fields(json!({"title": "", "job_title": "Nurse II", "name": "ignored"}));
        assert_eq!(text(&f, &["title", "job_title", "name"]), "Nurse II");
        assert_eq!(text(&f, &["missing"]), "");
    }

    #[test]
    fn items_from_every_alias_are_kept() {
        let f = fields(json!({
            "other_skills": ["python", "sql"],
            "skills": "flask",
            "empty": null
        }));
        let all = items(&f, &["other_skills", "skills", "empty"]);
        assert_eq!(all, vec![&json!("python"), &json!("sql"), &json!("flask")]);
    }

    #[test]
    fn non_object_records_are_skipped() {
        let f = fields(json!({"items": [{"name": "a"}, "loose", {"name": 7}]}));
        let names = records(&f, &["items"], |entry| text(entry, &["name"]));
        assert_eq!(names, vec!["a", "7"]);

        let single = fields(json!({"items": {"name": "one"}}));
        assert_eq!(records(&single, &["items"], |e| text(e, &["name"])), vec!["one"]);
    }
}
