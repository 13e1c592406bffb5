//! JSON model manifests.
//!
//! A manifest is reflection data captured ahead of time: the class name, its
//! public methods with their signatures and doc comments, and (optionally) what
//! each zero-argument method returned when it was last called. It lets the
//! classifier run without a live runtime.
//!
//! ```json
//! {
//!   "class": "App\\Models\\User",
//!   "methods": [
//!     { "name": "posts", "probe": { "relation": { "kind": "HasMany" } } },
//!     { "name": "author", "doc": "/** @return BelongsTo */" },
//!     { "name": "scopeActive", "returns": "Builder", "params": 1 }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{MethodInfo, Model, RelationInstance, RelationKind, RuntimeValue, TypeRef};

/// Recorded result of calling a method with no arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    Relation {
        kind: RelationKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        related: Option<String>,
    },
    Object { class: String },
    Scalar(String),
    Null,
    /// The call raised; the message is reported as the invocation error.
    Throws(String),
}

/// One method entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestMethod {
    pub name: String,
    /// Defaults to the manifest's class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_class: Option<String>,
    /// Declared return type as written in the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub params: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeOutcome>,
}

impl ManifestMethod {
    fn to_method_info(&self, class: &str) -> MethodInfo {
        MethodInfo {
            name: self.name.clone(),
            declaring_class: self.declaring_class.clone().unwrap_or_else(|| class.to_string()),
            return_type: self.returns.as_deref().and_then(TypeRef::parse),
            doc_comment: self.doc.clone(),
            param_count: self.params,
        }
    }
}

/// A model described entirely by recorded reflection data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub class: String,
    #[serde(default)]
    pub methods: Vec<ManifestMethod>,
}

impl ModelManifest {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(), methods: Vec::new() }
    }

    /// Parse and validate a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: ModelManifest =
            serde_json::from_str(json).context("Failed to parse model manifest JSON")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reject manifests the runtime could never have produced.
    pub fn validate(&self) -> Result<()> {
        if self.class.trim().is_empty() {
            bail!("Model manifest has an empty class name");
        }
        let mut seen = HashSet::new();
        for method in &self.methods {
            if method.name.trim().is_empty() {
                bail!("Model manifest for {} has a method with an empty name", self.class);
            }
            if !seen.insert(method.name.to_ascii_lowercase()) {
                bail!("Model manifest for {} lists method {} twice", self.class, method.name);
            }
            if let Some(returns) = &method.returns {
                if TypeRef::parse(returns).is_none() {
                    bail!(
                        "Model manifest for {} declares unparseable return type {:?} on {}",
                        self.class,
                        returns,
                        method.name
                    );
                }
            }
        }
        Ok(())
    }

    pub fn method(&self, name: &str) -> Option<&ManifestMethod> {
        self.methods.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

impl Model for ModelManifest {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn public_methods(&self) -> Result<Vec<MethodInfo>, ModelError> {
        Ok(self.methods.iter().map(|m| m.to_method_info(&self.class)).collect())
    }

    fn invoke(&self, method: &str) -> Result<RuntimeValue, ModelError> {
        let entry =
            self.method(method).ok_or_else(|| ModelError::UndefinedMethod(method.to_string()))?;
        match &entry.probe {
            None => Err(ModelError::NotInvocable(entry.name.clone())),
            Some(ProbeOutcome::Throws(message)) => {
                Err(ModelError::Thrown { method: entry.name.clone(), message: message.clone() })
            }
            Some(ProbeOutcome::Relation { kind, related }) => {
                Ok(RuntimeValue::Relation(RelationInstance { kind: *kind, related: related.clone() }))
            }
            Some(ProbeOutcome::Object { class }) => Ok(RuntimeValue::Object { class: class.clone() }),
            Some(ProbeOutcome::Scalar(value)) => Ok(RuntimeValue::Scalar(value.clone())),
            Some(ProbeOutcome::Null) => Ok(RuntimeValue::Null),
        }
    }
}

/// Load a model manifest from a JSON file on disk.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<ModelManifest> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model manifest at {}", path.display()))?;
    ModelManifest::from_json(&json)
        .with_context(|| format!("Invalid model manifest at {}", path.display()))
}
