use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::Classification;
use crate::model::{MethodInfo, Model, ModelReflection, RelationKind};

/// A model method classified as a relation accessor.
///
/// Bundles the method, the model it belongs to and the reflection snapshot it
/// was found in. Downstream tooling uses these to dig out relation details
/// (related model, keys) on its own.
pub struct RelationMethod<'m, M: ?Sized> {
    method: MethodInfo,
    model: &'m M,
    reflection: Arc<ModelReflection>,
    classification: Classification,
}

impl<'m, M: Model + ?Sized> RelationMethod<'m, M> {
    pub(crate) fn new(
        method: MethodInfo,
        model: &'m M,
        reflection: Arc<ModelReflection>,
        classification: Classification,
    ) -> Self {
        Self { method, model, reflection, classification }
    }

    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn method(&self) -> &MethodInfo {
        &self.method
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn reflection(&self) -> &ModelReflection {
        &self.reflection
    }

    /// How this method was recognised.
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Relation kind learned while classifying.
    ///
    /// Always `Some` for methods produced by the classifier; `Relation` when
    /// only the base type was named.
    pub fn kind(&self) -> Option<RelationKind> {
        self.classification.relation_kind()
    }

    /// Related model class, known only when the method was probed and the
    /// model reported it.
    pub fn related(&self) -> Option<&str> {
        match &self.classification {
            Classification::Probed { related, .. } => related.as_deref(),
            _ => None,
        }
    }

    pub fn summary(&self) -> RelationSummary {
        RelationSummary {
            model: self.model.class_name().to_string(),
            method: self.method.name.clone(),
            kind: self.kind(),
            rule: self.classification.rule().to_string(),
        }
    }
}

impl<M: ?Sized> Clone for RelationMethod<'_, M> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            model: self.model,
            reflection: Arc::clone(&self.reflection),
            classification: self.classification.clone(),
        }
    }
}

impl<M: ?Sized> fmt::Debug for RelationMethod<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationMethod")
            .field("model", &self.reflection.class_name)
            .field("method", &self.method.name)
            .field("classification", &self.classification)
            .finish()
    }
}

/// Owned, serializable view of a [`RelationMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSummary {
    pub model: String,
    pub method: String,
    pub kind: Option<RelationKind>,
    /// Rule that recognised the method (see [`Classification::rule`]).
    pub rule: String,
}
