use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::base_model::{BaseModel, ELOQUENT_MODEL_CLASS};

/// What the classifier does when a method can only be decided by calling it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePolicy {
    /// Invoke zero-argument methods and inspect the result.
    #[default]
    Invoke,
    /// Never run model code; such methods are reported as non-relations.
    Skip,
}

/// Serializable classifier settings.
///
/// Usually kept next to the generated model manifests as `relations.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Schema/config version. This is about the config format, not the library.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    /// Base model class every analyzed model extends.
    #[serde(default = "default_base_model_class")]
    pub base_model_class: String,
    /// Replaces the built-in Eloquent method list when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_model_methods: Option<Vec<String>>,
    /// Added on top of the base method list (e.g. an app-wide `BaseModel`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_base_methods: Vec<String>,
    #[serde(default)]
    pub probe: ProbePolicy,
}

fn default_config_version() -> String {
    "0.1.0".to_string()
}

fn default_base_model_class() -> String {
    ELOQUENT_MODEL_CLASS.to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            base_model_class: default_base_model_class(),
            base_model_methods: None,
            extra_base_methods: Vec::new(),
            probe: ProbePolicy::default(),
        }
    }
}

impl ClassifierConfig {
    /// Build the base model description this config selects.
    pub fn base_model(&self) -> BaseModel {
        let mut base = match &self.base_model_methods {
            Some(methods) => BaseModel::new(self.base_model_class.clone(), methods),
            None => BaseModel::eloquent().with_class_name(self.base_model_class.clone()),
        };
        base.extend(&self.extra_base_methods);
        base
    }
}

/// Load classifier settings from a JSON file.
pub fn load_classifier_config(path: impl AsRef<Path>) -> Result<ClassifierConfig> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read classifier config at {}", path.display()))?;
    let config: ClassifierConfig =
        serde_json::from_str(&json).context("Failed to parse classifier config JSON")?;
    Ok(config)
}
