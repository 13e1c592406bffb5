use relation_core::analysis::{Detector, RelationMethodDetector, RelationSummary};
use relation_core::config::ProbePolicy;
use relation_core::manifest::ModelManifest;
use relation_core::{Classification, RelationClassifier, RelationKind};

const POST_MANIFEST: &str = r#"{
  "class": "App\\Models\\Post",
  "methods": [
    { "name": "comments", "returns": "HasMany" },
    { "name": "tags", "doc": "/** @return BelongsToMany<Tag> */" },
    { "name": "author", "probe": { "relation": { "kind": "BelongsTo", "related": "App\\Models\\User" } } },
    { "name": "title", "probe": { "scalar": "Hello" } }
  ]
}"#;

#[test]
fn detector_reports_relations_of_its_model() {
    let manifest = ModelManifest::from_json(POST_MANIFEST).expect("manifest");
    let detector = RelationMethodDetector::new(&manifest);

    let relations = detector.analyze().expect("analyze");
    let names: Vec<&str> = relations.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["comments", "tags", "author"]);
    assert!(std::ptr::eq(detector.model(), &manifest));
}

#[test]
fn detector_uses_supplied_classifier() {
    let manifest = ModelManifest::from_json(POST_MANIFEST).expect("manifest");
    let classifier = RelationClassifier::default().with_probe_policy(ProbePolicy::Skip);
    let detector = RelationMethodDetector::with_classifier(&manifest, classifier);

    let relations = detector.analyze().expect("analyze");
    let names: Vec<&str> = relations.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["comments", "tags"]);
    assert_eq!(detector.classifier().probe_policy(), ProbePolicy::Skip);
}

#[test]
fn summaries_serialize_for_downstream_tools() {
    let manifest = ModelManifest::from_json(POST_MANIFEST).expect("manifest");
    let relations = RelationMethodDetector::new(&manifest).analyze().expect("analyze");

    let summaries: Vec<RelationSummary> = relations.iter().map(|r| r.summary()).collect();
    let json = serde_json::to_value(&summaries).expect("serialize");
    assert_eq!(json[0]["model"], "App\\Models\\Post");
    assert_eq!(json[0]["method"], "comments");
    assert_eq!(json[0]["kind"], "HasMany");
    assert_eq!(json[0]["rule"], "declared_return_type");
    assert_eq!(json[1]["kind"], "BelongsToMany");
    assert_eq!(json[2]["rule"], "probed");

    let back: Vec<RelationSummary> = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, summaries);
}

#[test]
fn classification_serializes_with_rule_tag() {
    let manifest = ModelManifest::from_json(POST_MANIFEST).expect("manifest");
    let relations = RelationMethodDetector::new(&manifest).analyze().expect("analyze");

    let author = &relations[2];
    assert_eq!(
        author.classification(),
        &Classification::Probed {
            kind: Some(RelationKind::BelongsTo),
            related: Some("App\\Models\\User".into())
        }
    );
    let json = serde_json::to_value(author.classification()).expect("serialize");
    assert_eq!(json["rule"], "probed");
    assert_eq!(json["kind"], "BelongsTo");
    assert_eq!(json["related"], "App\\Models\\User");

    let debug = format!("{author:?}");
    assert!(debug.contains("App\\\\Models\\\\Post"));
    assert!(debug.contains("author"));
}
