use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FormError;

/// A single form value.
///
/// Defaults loaded from a profile keep their JSON type; anything typed by the
/// user is stored as raw text and sent to the analysis service as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(serde_json::Number),
    Text(String),
}

impl ParamValue {
    pub fn text(s: impl Into<String>) -> Self {
        ParamValue::Text(s.into())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Number(n.into())
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

/// One `name = value` pair of a parameter profile, as written in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    pub value: ParamValue,
}

/// Ordered parameter name -> value mapping. Serializes as a flat JSON object in
/// insertion order, which is exactly the request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(IndexMap<String, ParamValue>);

impl ParameterSet {
    /// Built-in project profile shown when no config supplies one.
    pub fn default_profile() -> Self {
        Self::from_pairs([
            ("area", ParamValue::from(1000)),
            ("floors", ParamValue::from(2)),
            ("deadline", ParamValue::from(120)),
            ("budget", ParamValue::from(5_000_000)),
            ("workforce_cap", ParamValue::from(50)),
            ("provider", ParamValue::from("gemini")),
            ("api_key", ParamValue::from("")),
        ])
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, ParamValue)>) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Later duplicates overwrite the value but keep the first position.
    pub fn from_entries(entries: impl IntoIterator<Item = ParameterEntry>) -> Self {
        Self::from_pairs(entries.into_iter().map(|e| (e.name, e.value)))
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Session-scoped form state. The key set is fixed at construction; only
/// values change afterwards.
#[derive(Debug, Clone)]
pub struct FormStore {
    params: ParameterSet,
}

impl FormStore {
    pub fn new(profile: ParameterSet) -> Self {
        Self { params: profile }
    }

    pub fn get(&self) -> &ParameterSet {
        &self.params
    }

    /// Store raw text for `key`. No parsing or range checks happen here.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        match self.params.0.get_mut(key) {
            Some(slot) => {
                *slot = ParamValue::text(value);
                debug!(field = key, "form value updated");
                Ok(())
            }
            None => Err(FormError::UnknownField(key.to_string())),
        }
    }

    /// Apply a `key=value` assignment (the `--set` flag).
    pub fn apply_assignment(&mut self, raw: &str) -> Result<(), FormError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| FormError::InvalidAssignment(raw.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(FormError::InvalidAssignment(raw.to_string()));
        }
        self.set(key, value)
    }

    pub fn value_text(&self, key: &str) -> Option<String> {
        self.params.get(key).map(ToString::to_string)
    }

    /// Snapshot of the current values, used as the request body.
    pub fn payload(&self) -> ParameterSet {
        self.params.clone()
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(ParameterSet::default_profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_serializes_in_insertion_order() {
        let store = FormStore::default();
        let body = serde_json::to_string(store.get()).unwrap();
        assert_eq!(
            body,
            r#"{"area":1000,"floors":2,"deadline":120,"budget":5000000,"workforce_cap":50,"provider":"gemini","api_key":""}"#
        );
    }

    #[test]
    fn set_stores_raw_text_without_coercion() {
        let mut store = FormStore::default();
        store.set("area", "12.5e3").unwrap();
        store.set("floors", "lots").unwrap();
        store.set("deadline", "").unwrap();

        let body = serde_json::to_value(store.get()).unwrap();
        assert_eq!(body["area"], serde_json::json!("12.5e3"));
        assert_eq!(body["floors"], serde_json::json!("lots"));
        assert_eq!(body["deadline"], serde_json::json!(""));
        // untouched fields keep their numeric default
        assert_eq!(body["budget"], serde_json::json!(5_000_000));
    }

    #[test]
    fn set_never_adds_keys() {
        let mut store = FormStore::default();
        let err = store.set("colour", "blue").unwrap_err();
        assert_eq!(err, FormError::UnknownField("colour".into()));
        assert_eq!(store.get().len(), 7);
        assert!(store.get().get("colour").is_none());
    }

    #[test]
    fn keys_keep_position_after_edits() {
        let mut store = FormStore::default();
        store.set("provider", "groq").unwrap();
        store.set("area", "1").unwrap();
        let keys: Vec<&str> = store.get().keys().collect();
        assert_eq!(
            keys,
            vec![
                "area",
                "floors",
                "deadline",
                "budget",
                "workforce_cap",
                "provider",
                "api_key"
            ]
        );
    }

    #[test]
    fn apply_assignment_splits_on_first_equals() {
        let mut store = FormStore::default();
        store.apply_assignment("api_key=abc=def").unwrap();
        assert_eq!(store.value_text("api_key").as_deref(), Some("abc=def"));

        assert_eq!(
            store.apply_assignment("no-equals").unwrap_err(),
            FormError::InvalidAssignment("no-equals".into())
        );
        assert_eq!(
            store.apply_assignment("=5").unwrap_err(),
            FormError::InvalidAssignment("=5".into())
        );
    }

    #[test]
    fn value_text_renders_numbers_plainly() {
        let store = FormStore::default();
        assert_eq!(store.value_text("budget").as_deref(), Some("5000000"));
        assert_eq!(store.value_text("api_key").as_deref(), Some(""));
        assert_eq!(store.value_text("missing"), None);
    }

    #[test]
    fn entries_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            parameters: Vec<ParameterEntry>,
        }
        let w: Wrapper = toml::from_str(
            r#"
[[parameters]]
name = "area"
value = 250

[[parameters]]
name = "provider"
value = "groq"
"#,
        )
        .unwrap();
        let set = ParameterSet::from_entries(w.parameters);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"area":250,"provider":"groq"}"#
        );
    }
}
