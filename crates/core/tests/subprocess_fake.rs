use modelgen_core::query::{SubprocessIndex, TypeIndex};

/// Exercises the subprocess client against the env-var fake hooks so no
/// indexer tool needs to be installed.
///
/// Kept as a single test because the hooks are process-global environment
/// variables; other subprocess scenarios live in their own test binaries.
#[test]
fn subprocess_client_honors_fake_hooks() {
    let dir = tempfile::tempdir().expect("tempdir");

    let hierarchy_path = dir.path().join("hierarchy.json");
    std::fs::write(
        &hierarchy_path,
        r#"{"response": {"graphene.ObjectType": ["app.Query"]}}"#,
    )
    .expect("write hierarchy fake");

    let defines_path = dir.path().join("defines.json");
    std::fs::write(
        &defines_path,
        r#"{"response": {
            "app.Query": [
                {"name": "app.Query.resolve_user", "parent": "app.Query",
                 "parameters": [{"name": "self"}, {"name": "user_id"}]}
            ],
            "app.Other": [
                {"name": "app.Other.helper", "parent": "app.Other", "parameters": []}
            ]
        }}"#,
    )
    .expect("write defines fake");

    std::env::set_var("MODELGEN_FAKE_HIERARCHY_JSON", &hierarchy_path);
    std::env::set_var("MODELGEN_FAKE_DEFINES_JSON", &defines_path);

    // The tool path is never spawned while the fakes are set.
    let index = SubprocessIndex::new("/nonexistent/index-query");

    let hierarchy = index.class_hierarchy().expect("query").expect("available");
    assert_eq!(hierarchy.subclasses("graphene.ObjectType"), &["app.Query".to_string()]);

    // The fake returns the whole table; the client narrows to the batch.
    let defines = index.defines_batch(&["app.Query".to_string()]).expect("query");
    assert_eq!(defines.len(), 1);
    assert_eq!(defines["app.Query"][0].name, "app.Query.resolve_user");

    // A null response means the service holds no hierarchy data.
    std::fs::write(&hierarchy_path, r#"{"response": null}"#).expect("rewrite hierarchy fake");
    assert!(index.class_hierarchy().expect("query").is_none());

    std::env::remove_var("MODELGEN_FAKE_HIERARCHY_JSON");
    std::env::remove_var("MODELGEN_FAKE_DEFINES_JSON");
}
