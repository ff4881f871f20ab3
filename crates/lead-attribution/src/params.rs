//! Attribution parameter set

use serde::{Deserialize, Serialize};

/// Campaign-tracking values carried in the landing URL
///
/// Every field is an empty string when the parameter was absent. Serialized
/// keys match the query-string keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionParams {
    /// `utm_source`
    pub utm_source: String,
    /// `utm_medium`
    pub utm_medium: String,
    /// `utm_campaign`
    pub utm_campaign: String,
    /// `utm_content`
    pub utm_content: String,
    /// `utm_term`
    pub utm_term: String,
}

impl AttributionParams {
    /// Recognized query-string keys
    pub const KEYS: [&'static str; 5] = [
        "utm_source",
        "utm_medium",
        "utm_campaign",
        "utm_content",
        "utm_term",
    ];

    /// All-empty parameter set
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Value for a recognized key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "utm_source" => &self.utm_source,
            "utm_medium" => &self.utm_medium,
            "utm_campaign" => &self.utm_campaign,
            "utm_content" => &self.utm_content,
            "utm_term" => &self.utm_term,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "utm_source" => Some(&mut self.utm_source),
            "utm_medium" => Some(&mut self.utm_medium),
            "utm_campaign" => Some(&mut self.utm_campaign),
            "utm_content" => Some(&mut self.utm_content),
            "utm_term" => Some(&mut self.utm_term),
            _ => None,
        }
    }

    /// True when no parameter carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Self::KEYS
            .iter()
            .all(|key| self.get(key).map_or(true, str::is_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_serialize_every_key() {
        let json = serde_json::to_value(AttributionParams::empty()).unwrap();
        for key in AttributionParams::KEYS {
            assert_eq!(json[key], "");
        }
    }

    #[test]
    fn is_empty_tracks_any_value() {
        let mut params = AttributionParams::empty();
        assert!(params.is_empty());
        params.utm_term = "shoes".into();
        assert!(!params.is_empty());
        assert_eq!(params.get("utm_term"), Some("shoes"));
        assert_eq!(params.get("gclid"), None);
    }
}
