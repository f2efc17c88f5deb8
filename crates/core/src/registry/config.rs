//! Declarative registry configuration.
//!
//! Tag vocabularies are versionable data, not code: a deployment can load
//! its tag set from YAML or JSON and new tag kinds ship without touching the
//! parser or transformer.

use super::{TagDescriptor, TagRegistry};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Top-level shape of a registry configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Tag descriptors to register.
    pub tags: Vec<TagDescriptor>,
}

impl RegistryConfig {
    /// Load a configuration from YAML text.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a configuration from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build a registry from this configuration.
    ///
    /// The registry is fresh and unfrozen, so registration cannot fail;
    /// descriptors later in the list shadow earlier ones of the same name.
    pub fn into_registry(self) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for descriptor in self.tags {
            registry
                .register(descriptor)
                .expect("fresh registry is never frozen");
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AttrType;

    #[test]
    fn load_yaml_config() {
        let yaml = r#"
tags:
  - name: note
    requiredAttributes:
      type: string
    optionalAttributes:
      title: string
  - name: divider
    allowsChildren: false
    selfClosing: true
"#;
        let config = RegistryConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.tags.len(), 2);

        let registry = config.into_registry();
        let note = registry.lookup("note").unwrap();
        assert_eq!(note.required_attributes.get("type"), Some(&AttrType::String));
        assert_eq!(note.optional_attributes.get("title"), Some(&AttrType::String));
        assert!(note.allows_children);

        let divider = registry.lookup("divider").unwrap();
        assert!(!divider.allows_children);
        assert!(divider.self_closing);
    }

    #[test]
    fn load_json_config() {
        let json = r#"{
  "tags": [
    {
      "name": "youtube",
      "requiredAttributes": { "id": "string" },
      "optionalAttributes": { "start": "number" },
      "allowsChildren": false,
      "selfClosing": true
    }
  ]
}"#;
        let config = RegistryConfig::from_json_str(json).unwrap();
        let registry = config.into_registry();
        let youtube = registry.lookup("youtube").unwrap();
        assert_eq!(youtube.optional_attributes.get("start"), Some(&AttrType::Number));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = RegistryConfig::from_yaml_str("tags: {not a list}").unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn invalid_attr_type_is_an_error() {
        let yaml = "tags:\n  - name: note\n    requiredAttributes:\n      type: integer\n";
        assert!(RegistryConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RegistryConfig {
            tags: vec![
                TagDescriptor::new("note").with_required("type", AttrType::String),
            ],
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("requiredAttributes"));
        let back = RegistryConfig::from_json_str(&json).unwrap();
        assert_eq!(back.tags, config.tags);
    }
}
