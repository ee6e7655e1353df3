//! Tolerant deserializers for backend fields.
//!
//! The backend is loose about types: form-originated numbers arrive as
//! strings, optional columns arrive as `null`, and some counters arrive as a
//! number in one endpoint and a list in another. Every helper here is total
//! over JSON input and falls back to a default instead of failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treat `null` the same as an absent field.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a number that may be encoded as a JSON number or a numeric string.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Like [`opt_number`], narrowed to a non-negative integer.
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = opt_number(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32))
}

/// Read free text that may arrive as a string, a number, or `null`.
///
/// Empty strings are normalised to `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Read a counter that is either a number or a list whose length is the count.
pub fn count_or_len<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.len() as u64,
        Some(other) => number_from_value(&other)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
            .unwrap_or(0),
        None => 0,
    })
}

/// Read a list that may be `null` or replaced by a bare number.
pub fn list_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_number")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "opt_u32")]
        age: Option<u32>,
        #[serde(default, deserialize_with = "opt_text")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "count_or_len")]
        count: u64,
        #[serde(default, deserialize_with = "null_default")]
        name: String,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_from_strings() {
        let p = probe(r#"{"rate": "1,500,000", "age": "31"}"#);
        assert_eq!(p.rate, Some(1_500_000.0));
        assert_eq!(p.age, Some(31));
    }

    #[test]
    fn test_empty_and_null_fields() {
        let p = probe(r#"{"rate": "", "age": null, "phone": "", "name": null}"#);
        assert_eq!(p.rate, None);
        assert_eq!(p.age, None);
        assert_eq!(p.phone, None);
        assert_eq!(p.name, "");
        assert_eq!(p.count, 0);
    }

    #[test]
    fn test_negative_age_rejected() {
        let p = probe(r#"{"age": -3}"#);
        assert_eq!(p.age, None);
    }

    #[test]
    fn test_count_from_list_or_number() {
        assert_eq!(probe(r#"{"count": [1, 2, 3]}"#).count, 3);
        assert_eq!(probe(r#"{"count": 7}"#).count, 7);
        assert_eq!(probe(r#"{"count": "x"}"#).count, 0);
    }

    #[test]
    fn test_text_from_number() {
        assert_eq!(probe(r#"{"phone": 1012345678}"#).phone.as_deref(), Some("1012345678"));
    }
}
