use apimap::context::{load_object_map, ExtractionContext, MapKind};
use apimap::extract_objects;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn extracted_context() -> ExtractionContext {
    let mut file = NamedTempFile::with_suffix(".yaml").expect("create temp spec");
    file.write_all(
        br#"
paths:
  /books:
    get:
      operationId: listBooks
  /books/{id}:
    get:
      operationId: getBook
  /authors:
    get:
      operationId: listAuthors
"#,
    )
    .expect("write temp spec");
    let extraction = extract_objects(&file.path().to_string_lossy()).expect("extract");
    ExtractionContext::new(extraction.objects)
}

#[test]
fn test_select_from_extracted_source() {
    let mut ctx = extracted_context();
    assert_eq!(ctx.list_objects(MapKind::Source), vec!["books", "authors"]);
    assert!(ctx.list_objects(MapKind::Target).is_empty());

    let report = ctx.select_objects(&["books"]);
    assert!(report.success());
    assert_eq!(report.selected, vec!["books"]);
    assert_eq!(report.methods_count, 2);
    assert_eq!(ctx.list_objects(MapKind::Target), vec!["books"]);
}

#[test]
fn test_unknown_selection_reported() {
    let mut ctx = extracted_context();
    let report = ctx.select_objects(&["books", "reviews"]);
    assert!(!report.success());
    assert_eq!(report.missing, vec!["reviews"]);
    // Known names are still copied even when the call reports misses.
    assert!(ctx.object(MapKind::Target, "books").is_some());
}

#[test]
fn test_save_and_reload_target_map() {
    let dir = TempDir::new().expect("create temp dir");
    let out = dir.path().join("selected.json");

    let mut ctx = extracted_context();
    let _ = ctx.select_objects(&["books", "authors"]);
    ctx.save(MapKind::Target, &out).expect("save target map");

    let reloaded = load_object_map(&out).expect("reload map");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded["books"].methods.len(), 2);
    assert!(reloaded["books"].methods.contains_key("/books/{id}"));
}

#[test]
fn test_load_map_nested_under_objects_key() {
    let dir = TempDir::new().expect("create temp dir");
    let out = dir.path().join("wrapped.json");

    let mut ctx = extracted_context();
    let _ = ctx.select_objects(&["authors"]);
    let inner = serde_json::to_value(ctx.map(MapKind::Target)).expect("serialize");
    std::fs::write(
        &out,
        serde_json::to_string(&serde_json::json!({ "objects": inner })).expect("wrap"),
    )
    .expect("write wrapped map");

    let reloaded = load_object_map(&out).expect("reload map");
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.contains_key("authors"));
}

#[test]
fn test_load_map_rejects_garbage() {
    let dir = TempDir::new().expect("create temp dir");
    let out = dir.path().join("garbage.json");
    std::fs::write(&out, "not json at all").expect("write garbage");
    assert!(load_object_map(&out).is_err());
}
