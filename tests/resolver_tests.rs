use apimap::{extract_objects, load_resolved_spec, Verb};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn multi_file_spec() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("main.yaml"),
        r#"
openapi: 3.0.0
paths:
  /books:
    $ref: "shared.yaml#/paths/Books"
  /authors:
    get:
      operationId: listAuthors
"#,
    )
    .expect("write main spec");
    fs::write(
        dir.path().join("shared.yaml"),
        r#"
paths:
  Books:
    get:
      operationId: listBooks
      tags: [books]
    post:
      operationId: addBook
"#,
    )
    .expect("write shared spec");
    let main = dir.path().join("main.yaml");
    (dir, main)
}

#[test]
fn test_external_ref_resolved_from_sibling_file() {
    let (_dir, main) = multi_file_spec();
    let (spec, report) = load_resolved_spec(&main.to_string_lossy()).expect("load");

    assert_eq!(report.external_refs, 1);
    assert_eq!(report.resolved_refs, 1);
    assert_eq!(report.unresolved(), 0);
    assert!(!spec.paths["/books"].is_unresolved());
}

#[test]
fn test_resolved_methods_flow_into_object_map() {
    let (_dir, main) = multi_file_spec();
    let extraction = extract_objects(&main.to_string_lossy()).expect("extract");

    assert_eq!(extraction.report.resolved_refs, 1);
    assert_eq!(extraction.report.inferred_paths, 0);
    let books = &extraction.objects["books"];
    // Both verbs parse; the path-keyed map keeps the last one.
    let entry = &books.methods["/books"];
    assert!(!entry.inferred);
    assert!(matches!(entry.verb, Verb::Get | Verb::Post));
}

#[test]
fn test_missing_ref_file_degrades_to_inference() {
    let dir = TempDir::new().expect("create temp dir");
    let main = dir.path().join("main.yaml");
    fs::write(
        &main,
        r#"
paths:
  /secrets/{id}:
    $ref: "definitions/secrets.yaml#/GetSecret"
  /books:
    get:
      operationId: listBooks
"#,
    )
    .expect("write main spec");

    let extraction = extract_objects(&main.to_string_lossy()).expect("extract");
    assert_eq!(extraction.report.external_refs, 1);
    assert_eq!(extraction.report.resolved_refs, 0);
    assert_eq!(extraction.report.inferred_paths, 1);

    let group = extraction
        .objects
        .values()
        .find(|g| g.methods.contains_key("/secrets/{id}"))
        .expect("secrets path grouped somewhere");
    let entry = &group.methods["/secrets/{id}"];
    assert!(entry.inferred);
    assert_eq!(entry.parameters.len(), 1);
    assert_eq!(entry.parameters[0].name, "id");
}

#[test]
fn test_bad_pointer_leaves_entry_unresolved() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("shared.yaml"),
        "paths:\n  Other:\n    get: {}\n",
    )
    .expect("write shared spec");
    let main = dir.path().join("main.yaml");
    fs::write(
        &main,
        "paths:\n  /login:\n    $ref: \"shared.yaml#/paths/Missing\"\n",
    )
    .expect("write main spec");

    let (spec, report) = load_resolved_spec(&main.to_string_lossy()).expect("load");
    assert_eq!(report.external_refs, 1);
    assert_eq!(report.resolved_refs, 0);
    assert!(spec.paths["/login"].is_unresolved());
}

#[test]
fn test_login_ref_infers_post_method() {
    let dir = TempDir::new().expect("create temp dir");
    let main = dir.path().join("main.yaml");
    fs::write(
        &main,
        "paths:\n  /v1/login:\n    $ref: \"auth.yaml#/Login\"\n  /pets:\n    get: {}\n",
    )
    .expect("write main spec");

    let extraction = extract_objects(&main.to_string_lossy()).expect("extract");
    let group = extraction
        .objects
        .values()
        .find(|g| g.methods.contains_key("/v1/login"))
        .expect("login path grouped somewhere");
    let entry = &group.methods["/v1/login"];
    assert!(entry.inferred);
    assert_eq!(entry.verb, Verb::Post);
    assert_eq!(entry.tags, vec!["authentication"]);
}

#[test]
fn test_shared_file_loaded_once_for_many_refs() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("shared.yaml"),
        r#"
paths:
  Books:
    get:
      operationId: listBooks
  Authors:
    get:
      operationId: listAuthors
"#,
    )
    .expect("write shared spec");
    let main = dir.path().join("main.yaml");
    fs::write(
        &main,
        r#"
paths:
  /books:
    $ref: "shared.yaml#/paths/Books"
  /authors:
    $ref: "shared.yaml#/paths/Authors"
"#,
    )
    .expect("write main spec");

    let (spec, report) = load_resolved_spec(&main.to_string_lossy()).expect("load");
    assert_eq!(report.external_refs, 2);
    assert_eq!(report.resolved_refs, 2);
    assert!(spec.paths.values().all(|entry| !entry.is_unresolved()));
}
