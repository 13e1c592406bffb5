use relation_core::base_model::ELOQUENT_MODEL_CLASS;
use relation_core::config::{load_classifier_config, ClassifierConfig, ProbePolicy};
use relation_core::manifest::ModelManifest;
use relation_core::RelationClassifier;
use tempfile::tempdir;

#[test]
fn empty_config_falls_back_to_defaults() {
    let config: ClassifierConfig = serde_json::from_str("{}").expect("parse");
    assert_eq!(config, ClassifierConfig::default());
    assert_eq!(config.base_model_class, ELOQUENT_MODEL_CLASS);
    assert_eq!(config.probe, ProbePolicy::Invoke);
    assert!(config.base_model().has_method("save"));
}

#[test]
fn loads_config_from_disk() {
    let tmp = tempdir().expect("temp dir");
    let path = tmp.path().join("relations.json");
    std::fs::write(
        &path,
        r#"{
  "config_version": "0.1.0",
  "base_model_class": "App\\Models\\BaseModel",
  "extra_base_methods": ["tenant", "auditTrail"],
  "probe": "skip"
}"#,
    )
    .expect("write config");

    let config = load_classifier_config(&path).expect("load");
    assert_eq!(config.probe, ProbePolicy::Skip);

    let base = config.base_model();
    assert_eq!(base.class_name(), "App\\Models\\BaseModel");
    assert!(base.has_method("tenant"));
    assert!(base.has_method("audittrail"));
    assert!(base.has_method("save"), "built-in list is kept when only extending");
}

#[test]
fn explicit_method_list_replaces_builtin_list() {
    let config: ClassifierConfig =
        serde_json::from_str(r#"{ "base_model_methods": ["boot"], "extra_base_methods": ["tenant"] }"#)
            .expect("parse");
    let base = config.base_model();
    assert_eq!(base.len(), 2);
    assert!(base.has_method("boot"));
    assert!(base.has_method("tenant"));
    assert!(!base.has_method("save"));
}

#[test]
fn classifier_from_config_honours_probe_policy() {
    let config = ClassifierConfig { probe: ProbePolicy::Skip, ..ClassifierConfig::default() };
    let classifier = RelationClassifier::from_config(&config);
    assert_eq!(classifier.probe_policy(), ProbePolicy::Skip);

    let manifest = ModelManifest::from_json(
        r#"{ "class": "App\\Models\\User", "methods": [ { "name": "posts" } ] }"#,
    )
    .expect("manifest");
    // With probing on, "posts" has no recorded outcome and would fail.
    assert!(classifier.analyze(&manifest).expect("analyze").is_empty());
}

#[test]
fn missing_config_reports_path() {
    let tmp = tempdir().expect("temp dir");
    let err = load_classifier_config(tmp.path().join("relations.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read classifier config"));
}

#[test]
fn malformed_config_is_an_error() {
    let tmp = tempdir().expect("temp dir");
    let path = tmp.path().join("relations.json");
    std::fs::write(&path, r#"{ "probe": "sometimes" }"#).expect("write config");
    let err = load_classifier_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse classifier config JSON"));
}
