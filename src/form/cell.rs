//! Cell coercion
//!
//! Table cells are free text. Whatever arrives from a form post or a JSON
//! body is turned into its text form instead of being rejected.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Loose key/value payload for one row, keyed by column label.
pub type RowCells = Map<String, Value>;

/// Text representation of a submitted cell value.
///
/// Strings pass through, numbers and booleans use their display form,
/// `null` becomes the empty string and nested values are kept as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

/// Serde adapter for row fields: accepts any JSON value.
pub fn deserialize_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(cell_text(&value))
}

/// Build a row payload from plain string pairs (urlencoded form posts).
pub fn cells_from_pairs<I, K, V>(pairs: I) -> RowCells
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_become_text() {
        assert_eq!(cell_text(&json!("Engineer")), "Engineer");
        assert_eq!(cell_text(&json!(2)), "2");
        assert_eq!(cell_text(&json!(12.5)), "12.5");
        assert_eq!(cell_text(&json!(true)), "true");
    }

    #[test]
    fn test_null_becomes_empty() {
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn test_nested_values_kept_as_json() {
        assert_eq!(cell_text(&json!([1, 2])), "[1,2]");
        assert_eq!(cell_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_cells_from_pairs() {
        let cells = cells_from_pairs(vec![("Grade", "E1"), ("Remarks", "")]);
        assert_eq!(cells["Grade"], json!("E1"));
        assert_eq!(cells["Remarks"], json!(""));
    }
}
