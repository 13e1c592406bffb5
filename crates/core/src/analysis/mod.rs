//! Relation-method classification.
//!
//! Each public method of a model goes through a fixed decision chain; the
//! first rule that applies decides and later rules never run:
//! 1. methods declared on the base model class, or sharing a name with one
//!    of its methods, are not relations
//! 2. a declared return type decides on its own
//! 3. otherwise a documentation `@return` tag decides on its own
//! 4. otherwise a zero-argument method is invoked and its result inspected
//!
//! Step 4 runs model code. Whatever that code does (side effects, failures)
//! is not hidden from the caller: invocation errors abort the analysis.

mod detector;
mod relation_method;

pub use detector::{Detector, RelationMethodDetector};
pub use relation_method::{RelationMethod, RelationSummary};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::base_model::BaseModel;
use crate::config::{ClassifierConfig, ProbePolicy};
use crate::docblock;
use crate::error::{AnalysisError, AnalysisResult};
use crate::model::{MethodInfo, Model, RelationKind, TypeRef};

/// Which rule decided a method, and what it found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Classification {
    /// The base model class defines a method of the same name.
    InheritedFromBase,
    /// Decided by the signature's return type.
    DeclaredReturnType { return_type: TypeRef, kind: Option<RelationKind> },
    /// Decided by the documentation comment; `kind` is `None` when no tag
    /// named a relation (including when there was no tag at all).
    DocComment { kind: Option<RelationKind> },
    /// Undocumented, untyped and needs arguments, so it was not invoked.
    RequiresParameters { count: usize },
    /// Would have been probed, but probing is disabled.
    ProbeSkipped,
    /// Decided by invoking the method.
    Probed {
        kind: Option<RelationKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        related: Option<String>,
    },
}

impl Classification {
    pub fn relation_kind(&self) -> Option<RelationKind> {
        match self {
            Classification::DeclaredReturnType { kind, .. }
            | Classification::DocComment { kind }
            | Classification::Probed { kind, .. } => *kind,
            Classification::InheritedFromBase
            | Classification::RequiresParameters { .. }
            | Classification::ProbeSkipped => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.relation_kind().is_some()
    }

    /// Short machine-friendly name of the deciding rule.
    pub fn rule(&self) -> &'static str {
        match self {
            Classification::InheritedFromBase => "inherited_from_base",
            Classification::DeclaredReturnType { .. } => "declared_return_type",
            Classification::DocComment { .. } => "doc_comment",
            Classification::RequiresParameters { .. } => "requires_parameters",
            Classification::ProbeSkipped => "probe_skipped",
            Classification::Probed { .. } => "probed",
        }
    }
}

/// Decides which methods of a model are relation accessors.
#[derive(Debug, Clone, Default)]
pub struct RelationClassifier {
    base: BaseModel,
    probe: ProbePolicy,
}

impl RelationClassifier {
    pub fn new(base: BaseModel) -> Self {
        Self { base, probe: ProbePolicy::default() }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self { base: config.base_model(), probe: config.probe }
    }

    pub fn with_probe_policy(mut self, probe: ProbePolicy) -> Self {
        self.probe = probe;
        self
    }

    pub fn base_model(&self) -> &BaseModel {
        &self.base
    }

    pub fn probe_policy(&self) -> ProbePolicy {
        self.probe
    }

    /// Run the decision chain for a single method of `model`.
    ///
    /// Only the last-resort probe touches `model`; it is the sole source of
    /// errors here.
    pub fn classify<M: Model + ?Sized>(
        &self,
        model: &M,
        method: &MethodInfo,
    ) -> AnalysisResult<Classification> {
        let classification = self.decide(model, method)?;
        tracing::debug!(
            model = model.class_name(),
            method = %method.name,
            rule = classification.rule(),
            relation = ?classification.relation_kind(),
            "classified method"
        );
        Ok(classification)
    }

    fn decide<M: Model + ?Sized>(
        &self,
        model: &M,
        method: &MethodInfo,
    ) -> AnalysisResult<Classification> {
        if self.base.is_class(&method.declaring_class) || self.base.has_method(&method.name) {
            return Ok(Classification::InheritedFromBase);
        }

        if let Some(return_type) = &method.return_type {
            return Ok(Classification::DeclaredReturnType {
                kind: return_type.relation_kind(),
                return_type: return_type.clone(),
            });
        }

        if let Some(doc) = method.doc_comment() {
            return Ok(Classification::DocComment { kind: docblock::relation_return_kind(doc) });
        }

        if method.requires_parameters() {
            return Ok(Classification::RequiresParameters { count: method.param_count });
        }

        if self.probe == ProbePolicy::Skip {
            return Ok(Classification::ProbeSkipped);
        }

        let value = model.invoke(&method.name).map_err(|source| AnalysisError::Invocation {
            class: model.class_name().to_string(),
            method: method.name.clone(),
            source,
        })?;
        let relation = value.as_relation();
        Ok(Classification::Probed {
            kind: relation.map(|r| r.kind),
            related: relation.and_then(|r| r.related.clone()),
        })
    }

    /// Whether a single method of `model` is a relation accessor.
    pub fn is_relation_method<M: Model + ?Sized>(
        &self,
        model: &M,
        method: &MethodInfo,
    ) -> AnalysisResult<bool> {
        Ok(self.classify(model, method)?.is_relation())
    }

    /// Collect every relation method of `model`, in reflection order.
    ///
    /// Either every public method is classified or the first error is
    /// returned; there is no partial result.
    pub fn analyze<'m, M: Model + ?Sized>(
        &self,
        model: &'m M,
    ) -> AnalysisResult<Vec<RelationMethod<'m, M>>> {
        let reflection = model.reflect().map_err(|source| AnalysisError::Reflection {
            class: model.class_name().to_string(),
            source,
        })?;
        let reflection = Arc::new(reflection);

        let mut relations = Vec::new();
        for method in &reflection.methods {
            let classification = self.classify(model, method)?;
            if classification.is_relation() {
                relations.push(RelationMethod::new(
                    method.clone(),
                    model,
                    Arc::clone(&reflection),
                    classification,
                ));
            }
        }

        tracing::debug!(
            model = model.class_name(),
            methods = reflection.methods.len(),
            relations = relations.len(),
            "relation analysis finished"
        );
        Ok(relations)
    }
}
