//! Reflection capability set for models under analysis.
//!
//! The classifier only ever talks to a model through the [`Model`] trait:
//! - enumerate public methods as [`MethodInfo`] records
//! - invoke a zero-argument method and receive a [`RuntimeValue`]
//!
//! Anything that can answer those two questions (a live runtime bridge,
//! generated metadata, a JSON manifest) can be analyzed.

mod types;

pub use types::{class_basename, RelationKind, TypeRef};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Reflection data for one public method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    /// Class that declares (or overrides) the method.
    pub declaring_class: String,
    /// Return type written in the signature, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    /// Raw documentation comment attached to the method, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    /// Number of parameters, optional ones included.
    #[serde(default)]
    pub param_count: usize,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_class: declaring_class.into(),
            return_type: None,
            doc_comment: None,
            param_count: 0,
        }
    }

    pub fn with_return_type(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_doc_comment(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    pub fn with_params(mut self, param_count: usize) -> Self {
        self.param_count = param_count;
        self
    }

    /// Documentation text, treating blank comments as absent.
    pub fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref().filter(|doc| !doc.trim().is_empty())
    }

    pub fn requires_parameters(&self) -> bool {
        self.param_count > 0
    }
}

/// A relation object observed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationInstance {
    pub kind: RelationKind,
    /// Class of the related model, when the bridge can tell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

/// Value returned by invoking a model method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeValue {
    /// An instance of the relation base type.
    Relation(RelationInstance),
    /// Any other object.
    Object { class: String },
    /// Strings, numbers, booleans, arrays.
    Scalar(String),
    Null,
}

impl RuntimeValue {
    pub fn relation(kind: RelationKind) -> Self {
        RuntimeValue::Relation(RelationInstance { kind, related: None })
    }

    pub fn relation_to(kind: RelationKind, related: impl Into<String>) -> Self {
        RuntimeValue::Relation(RelationInstance { kind, related: Some(related.into()) })
    }

    pub fn as_relation(&self) -> Option<&RelationInstance> {
        match self {
            RuntimeValue::Relation(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.as_relation().is_some()
    }
}

/// Snapshot of a model's reflection data taken at the start of an analysis.
///
/// Every [`RelationMethod`](crate::analysis::RelationMethod) produced by the
/// same analysis shares one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReflection {
    pub class_name: String,
    pub methods: Vec<MethodInfo>,
}

impl ModelReflection {
    pub fn new(class_name: impl Into<String>, methods: Vec<MethodInfo>) -> Self {
        Self { class_name: class_name.into(), methods }
    }

    /// Look up a method by name (case-insensitive, like the host runtime).
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

/// Reflection interface a model must provide to be analyzed.
pub trait Model {
    /// Fully qualified class name of the model.
    fn class_name(&self) -> &str;

    /// Public methods, inherited and declared, in enumeration order.
    fn public_methods(&self) -> Result<Vec<MethodInfo>, ModelError>;

    /// Invoke a method with zero arguments.
    ///
    /// Implementations must not swallow failures of the method itself; they
    /// are reported through [`ModelError::Thrown`] or another variant.
    fn invoke(&self, method: &str) -> Result<RuntimeValue, ModelError>;

    /// Take a reflection snapshot.
    fn reflect(&self) -> Result<ModelReflection, ModelError> {
        Ok(ModelReflection::new(self.class_name(), self.public_methods()?))
    }
}
