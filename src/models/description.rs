//! Searchable area descriptions.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Lowercased values and token set for one feature's `area_description_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionRecord {
    /// Index of the owning feature in the dataset.
    pub feature: usize,
    /// Every non-null description value, lowercased, in key order.
    pub values: Vec<String>,
    pub keywords: BTreeSet<String>,
}

impl DescriptionRecord {
    /// Build a record from an `area_description_data` object.
    ///
    /// Returns None when the object holds no non-null values.
    pub fn from_area_description(feature: usize, data: &Map<String, Value>) -> Option<Self> {
        let values: Vec<String> = data
            .values()
            .filter_map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.to_lowercase()),
                other => Some(other.to_string().to_lowercase()),
            })
            .collect();

        if values.is_empty() {
            return None;
        }

        let keywords = values.iter().flat_map(|v| tokenize(v)).collect();
        Some(Self {
            feature,
            values,
            keywords,
        })
    }

    /// Substring match within a single value; `needle` must already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        self.values.iter().any(|v| v.contains(needle))
    }

    /// Token match; `token` must already be lowercase.
    pub fn has_keyword(&self, token: &str) -> bool {
        self.keywords.contains(token)
    }
}

/// Split text into lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn area(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_lowercases_and_skips_nulls() {
        let data = area(json!({
            "5": "Providence's finest section",
            "1a": "Rolling",
            "3n": null,
            "4": 12
        }));
        let record = DescriptionRecord::from_area_description(3, &data).unwrap();

        assert_eq!(record.feature, 3);
        assert!(record.contains("providence"));
        assert!(record.contains("rolling"));
        assert!(record.contains("12"));
        assert!(!record.contains("null"));
        assert!(record.has_keyword("finest"));
        assert!(record.has_keyword("s"));
        assert!(!record.has_keyword("Providence"));
    }

    #[test]
    fn test_substring_does_not_span_values() {
        let data = area(json!({
            "1a": "Rolling, well landscaped",
            "2b": "Executives, professional men"
        }));
        let record = DescriptionRecord::from_area_description(0, &data).unwrap();

        assert_eq!(record.values.len(), 2);
        assert!(record.contains("well landscaped"));
        assert!(record.contains("executives"));
        assert!(!record.contains("landscaped\nexecutives"));
        assert!(!record.contains("landscapedexecutives"));
        assert!(!record.contains("landscaped executives"));
    }

    #[test]
    fn test_record_none_when_all_null() {
        let data = area(json!({ "a": null }));
        assert!(DescriptionRecord::from_area_description(0, &data).is_none());
        assert!(DescriptionRecord::from_area_description(0, &Map::new()).is_none());
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Mill workers, LABORERS; mill");
        assert_eq!(
            tokens.into_iter().collect::<Vec<_>>(),
            vec!["laborers", "mill", "workers"]
        );
    }
}
