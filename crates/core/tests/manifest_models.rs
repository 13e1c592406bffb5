use relation_core::manifest::{load_manifest, ModelManifest, ProbeOutcome};
use relation_core::{
    AnalysisError, Model, ModelError, RelationClassifier, RelationKind, RuntimeValue, TypeRef,
};
use tempfile::tempdir;

const USER_MANIFEST: &str = r#"{
  "class": "App\\Models\\User",
  "methods": [
    { "name": "posts", "probe": { "relation": { "kind": "HasMany", "related": "App\\Models\\Post" } } },
    { "name": "scopeActive", "returns": "Builder", "params": 1 },
    { "name": "author", "doc": "/**\n * @return \\Vendor\\Relations\\BelongsTo\n */", "probe": { "throws": "author must not run" } },
    { "name": "save", "returns": "bool", "params": 1, "probe": { "relation": { "kind": "HasOne" } } },
    { "name": "getKey", "declaring_class": "Illuminate\\Database\\Eloquent\\Model" },
    { "name": "fullName", "probe": { "scalar": "Ada Lovelace" } }
  ]
}"#;

#[test]
fn user_manifest_yields_posts_and_author() {
    let manifest = ModelManifest::from_json(USER_MANIFEST).expect("manifest");
    let relations = RelationClassifier::default().analyze(&manifest).expect("analyze");

    let summaries: Vec<_> = relations.iter().map(|r| r.summary()).collect();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].method, "posts");
    assert_eq!(summaries[0].kind, Some(RelationKind::HasMany));
    assert_eq!(summaries[0].rule, "probed");
    assert_eq!(summaries[1].method, "author");
    assert_eq!(summaries[1].kind, Some(RelationKind::BelongsTo));
    assert_eq!(summaries[1].rule, "doc_comment");
    assert!(summaries.iter().all(|s| s.model == "App\\Models\\User"));
    assert_eq!(relations[0].related(), Some("App\\Models\\Post"));
}

#[test]
fn manifest_methods_become_method_info() {
    let manifest = ModelManifest::from_json(USER_MANIFEST).expect("manifest");
    let methods = manifest.public_methods().expect("methods");
    assert_eq!(methods.len(), 6);

    let scope = &methods[1];
    assert_eq!(scope.name, "scopeActive");
    assert_eq!(scope.declaring_class, "App\\Models\\User");
    assert_eq!(scope.return_type, Some(TypeRef::named("Builder")));
    assert_eq!(scope.param_count, 1);

    assert_eq!(methods[4].declaring_class, "Illuminate\\Database\\Eloquent\\Model");

    let reflection = manifest.reflect().expect("reflect");
    assert_eq!(reflection.class_name, "App\\Models\\User");
    assert_eq!(reflection.method("GETKEY"), Some(&methods[4]));
}

#[test]
fn invoke_replays_recorded_outcomes() {
    let manifest = ModelManifest::from_json(USER_MANIFEST).expect("manifest");

    let posts = manifest.invoke("posts").expect("posts");
    assert!(posts.is_relation());
    assert_eq!(posts, RuntimeValue::relation_to(RelationKind::HasMany, "App\\Models\\Post"));
    assert_eq!(
        manifest.invoke("FULLNAME").expect("fullName"),
        RuntimeValue::Scalar("Ada Lovelace".into())
    );
    assert!(!RuntimeValue::Null.is_relation());
    assert!(matches!(manifest.invoke("author"), Err(ModelError::Thrown { .. })));
    assert!(matches!(manifest.invoke("getKey"), Err(ModelError::NotInvocable(_))));
    assert!(matches!(manifest.invoke("missing"), Err(ModelError::UndefinedMethod(_))));
}

#[test]
fn unrecorded_probe_aborts_the_analysis() {
    let json = r#"{ "class": "App\\Models\\Team", "methods": [ { "name": "members" } ] }"#;
    let manifest = ModelManifest::from_json(json).expect("manifest");

    match RelationClassifier::default().analyze(&manifest) {
        Err(AnalysisError::Invocation { method, source: ModelError::NotInvocable(_), .. }) => {
            assert_eq!(method, "members");
        }
        other => panic!("expected NotInvocable invocation error, got {other:?}"),
    }
}

#[test]
fn load_manifest_reads_from_disk() {
    let tmp = tempdir().expect("temp dir");
    let path = tmp.path().join("user.json");
    std::fs::write(&path, USER_MANIFEST).expect("write manifest");

    let manifest = load_manifest(&path).expect("load");
    assert_eq!(manifest.class, "App\\Models\\User");
    assert_eq!(
        manifest.method("posts").and_then(|m| m.probe.clone()),
        Some(ProbeOutcome::Relation {
            kind: RelationKind::HasMany,
            related: Some("App\\Models\\Post".into())
        })
    );
}

#[test]
fn load_manifest_reports_missing_file() {
    let tmp = tempdir().expect("temp dir");
    let err = load_manifest(tmp.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read model manifest"));
}

#[test]
fn invalid_manifests_are_rejected() {
    let err = ModelManifest::from_json("{ not json").unwrap_err();
    assert!(err.to_string().contains("Failed to parse model manifest JSON"));

    let err = ModelManifest::from_json(r#"{ "class": "  " }"#).unwrap_err();
    assert!(err.to_string().contains("empty class name"));

    let dup = r#"{ "class": "App\\Models\\User", "methods": [ { "name": "posts" }, { "name": "Posts" } ] }"#;
    let err = ModelManifest::from_json(dup).unwrap_err();
    assert!(err.to_string().contains("twice"));
}

#[test]
fn unparseable_return_types_are_rejected() {
    for returns in ["array<int, HasMany", "", "   "] {
        let json = serde_json::json!({
            "class": "App\\Models\\User",
            "methods": [ { "name": "stats", "returns": returns, "probe": { "throws": "db down" } } ]
        })
        .to_string();
        let err = ModelManifest::from_json(&json).unwrap_err();
        assert!(
            err.to_string().contains("unparseable return type"),
            "{returns:?} was accepted: {err}"
        );
    }
}

#[test]
fn redeclared_base_methods_are_skipped_without_a_recorded_outcome() {
    let json = r#"{
      "class": "App\\Models\\Team",
      "methods": [
        { "name": "boot" },
        { "name": "casts", "returns": "array" },
        { "name": "usesUniqueIds", "declaring_class": "\\Illuminate\\Database\\Eloquent\\Model", "probe": { "relation": { "kind": "HasMany" } } },
        { "name": "members", "probe": { "relation": { "kind": "BelongsToMany" } } }
      ]
    }"#;
    let manifest = ModelManifest::from_json(json).expect("manifest");
    let relations = RelationClassifier::default().analyze(&manifest).expect("analyze");
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].name(), "members");
}

#[test]
fn manifest_round_trips_through_serde() {
    let mut manifest = ModelManifest::new("App\\Models\\Comment");
    manifest.methods.push(relation_core::manifest::ManifestMethod {
        name: "post".into(),
        declaring_class: None,
        returns: Some("?BelongsTo<Post, $this>".into()),
        doc: None,
        params: 0,
        probe: Some(ProbeOutcome::Null),
    });
    let json = serde_json::to_string(&manifest).expect("serialize");
    let back = ModelManifest::from_json(&json).expect("parse back");
    assert_eq!(back, manifest);

    let relations = RelationClassifier::default().analyze(&back).expect("analyze");
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].kind(), Some(RelationKind::BelongsTo));
}
