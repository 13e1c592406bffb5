use crate::analysis::{RelationClassifier, RelationMethod};
use crate::error::AnalysisResult;
use crate::model::Model;

/// Something that inspects a model and reports a finding about it.
pub trait Detector {
    type Output;

    fn analyze(&self) -> AnalysisResult<Self::Output>;
}

/// Detector bound to one model that reports its relation methods.
pub struct RelationMethodDetector<'m, M: ?Sized> {
    model: &'m M,
    classifier: RelationClassifier,
}

impl<'m, M: Model + ?Sized> RelationMethodDetector<'m, M> {
    /// Detector using the default classifier (Eloquent base model, probing on).
    pub fn new(model: &'m M) -> Self {
        Self { model, classifier: RelationClassifier::default() }
    }

    pub fn with_classifier(model: &'m M, classifier: RelationClassifier) -> Self {
        Self { model, classifier }
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn classifier(&self) -> &RelationClassifier {
        &self.classifier
    }
}

impl<'m, M: Model + ?Sized> Detector for RelationMethodDetector<'m, M> {
    type Output = Vec<RelationMethod<'m, M>>;

    fn analyze(&self) -> AnalysisResult<Self::Output> {
        self.classifier.analyze(self.model)
    }
}
