use modelgen_core::query::{QueryError, SubprocessIndex, TypeIndex};

/// Without fake hooks, a missing tool is a transport fault: the pass cannot
/// be trusted, unlike an index that merely has no data.
#[test]
fn missing_tool_is_a_transport_fault() {
    let index = SubprocessIndex::new("/nonexistent/index-query");

    let hierarchy = index.class_hierarchy();
    assert!(matches!(hierarchy, Err(QueryError::Transport(_))));

    let defines = index.defines_batch(&["app.Query".to_string()]);
    assert!(matches!(defines, Err(QueryError::Transport(_))));
}
