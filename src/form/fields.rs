use super::store::ParameterSet;

pub const SECRET_FIELD: &str = "api_key";
pub const PROVIDER_FIELD: &str = "provider";
pub const PROVIDER_HINT: &str = "gemini or groq";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Masked credential input.
    Secret,
    Text,
    Numeric,
}

/// Pick the input kind from the key name alone. Values are never inspected.
pub fn classify(key: &str) -> InputKind {
    if key == SECRET_FIELD {
        InputKind::Secret
    } else if key == PROVIDER_FIELD {
        InputKind::Text
    } else {
        InputKind::Numeric
    }
}

pub fn placeholder_for(key: &str) -> Option<&'static str> {
    (key == PROVIDER_FIELD).then_some(PROVIDER_HINT)
}

/// Only the first underscore becomes a space: `workforce_cap` -> `workforce cap`,
/// `max_crew_size` -> `max crew_size`.
pub fn label_for(key: &str) -> String {
    key.replacen('_', " ", 1)
}

/// Display text for a raw value; secrets show one `*` per character.
pub fn display_value(kind: InputKind, raw: &str) -> String {
    match kind {
        InputKind::Secret => "*".repeat(raw.chars().count()),
        InputKind::Text | InputKind::Numeric => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub kind: InputKind,
    pub display: String,
    pub placeholder: Option<&'static str>,
}

/// One view per parameter, in the set's insertion order.
pub fn field_views(params: &ParameterSet) -> Vec<FieldView> {
    params
        .iter()
        .map(|(key, value)| {
            let kind = classify(key);
            FieldView {
                key: key.to_string(),
                label: label_for(key),
                kind,
                display: display_value(kind, &value.to_string()),
                placeholder: placeholder_for(key),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormStore, ParamValue};

    #[test]
    fn classification_is_by_key_name() {
        assert_eq!(classify("api_key"), InputKind::Secret);
        assert_eq!(classify("provider"), InputKind::Text);
        assert_eq!(classify("area"), InputKind::Numeric);
        assert_eq!(classify("workforce_cap"), InputKind::Numeric);
        // a text-looking name that is not the provider field is still numeric
        assert_eq!(classify("site_name"), InputKind::Numeric);
    }

    #[test]
    fn labels_replace_only_first_underscore() {
        assert_eq!(label_for("area"), "area");
        assert_eq!(label_for("workforce_cap"), "workforce cap");
        assert_eq!(label_for("api_key"), "api key");
        assert_eq!(label_for("max_crew_size"), "max crew_size");
    }

    #[test]
    fn one_view_per_key_in_order_with_secret_masked() {
        let mut store = FormStore::default();
        store.set("api_key", "s3cret").unwrap();
        let views = field_views(store.get());

        let keys: Vec<&str> = views.iter().map(|v| v.key.as_str()).collect();
        let expected: Vec<&str> = store.get().keys().collect();
        assert_eq!(keys, expected);

        let secret = views.iter().find(|v| v.key == "api_key").unwrap();
        assert_eq!(secret.kind, InputKind::Secret);
        assert_eq!(secret.display, "******");

        let provider = views.iter().find(|v| v.key == "provider").unwrap();
        assert_eq!(provider.kind, InputKind::Text);
        assert_eq!(provider.placeholder, Some(PROVIDER_HINT));
        assert_eq!(provider.display, "gemini");

        let area = &views[0];
        assert_eq!(area.kind, InputKind::Numeric);
        assert_eq!(area.display, "1000");
        assert_eq!(area.placeholder, None);
    }

    #[test]
    fn views_follow_a_custom_profile() {
        let profile = ParameterSet::from_pairs([
            ("api_key", ParamValue::from("k")),
            ("crane_count", ParamValue::from(3)),
        ]);
        let views = field_views(&profile);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].display, "*");
        assert_eq!(views[1].label, "crane count");
        assert_eq!(views[1].kind, InputKind::Numeric);
    }
}
