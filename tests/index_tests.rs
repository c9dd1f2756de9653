use apimap::index::{objects_by_tags, search_by_keywords, top_objects, TagIndex};
use apimap::load_resolved_spec;
use std::io::Write;
use tempfile::NamedTempFile;

const TAGGED_SPEC: &str = r#"
openapi: 3.0.0
tags:
  - name: books
    description: Book catalog operations
  - name: authors
    description: Author registry
paths:
  /books:
    get:
      operationId: listBooks
      tags: [books]
      summary: List all books
    post:
      operationId: addBook
      tags: [books]
  /books/{id}:
    get:
      operationId: getBook
      tags: [books]
    delete:
      operationId: deleteBook
      tags: [books]
  /authors:
    get:
      operationId: listAuthors
      tags: [authors]
      description: Authors of books in the catalog
  /ping:
    get:
      operationId: ping
"#;

fn write_spec(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".yaml").expect("create temp spec");
    file.write_all(content.as_bytes()).expect("write temp spec");
    file
}

#[test]
fn test_tag_index_over_loaded_spec() {
    let file = write_spec(TAGGED_SPEC);
    let (spec, _) = load_resolved_spec(&file.path().to_string_lossy()).expect("load");
    let index = TagIndex::build(&spec);

    assert_eq!(index.tags.len(), 2);
    assert_eq!(
        index.tags["books"].description,
        "Book catalog operations"
    );
    let paths = index.paths_for("books").expect("books indexed");
    assert_eq!(paths, ["/books".to_string(), "/books/{id}".to_string()]);
    // Method tags never declared at spec level do not invent index entries.
    assert!(index.paths_for("ping").is_none());
}

#[test]
fn test_objects_by_tags_counts_and_descriptions() {
    let file = write_spec(TAGGED_SPEC);
    let (spec, _) = load_resolved_spec(&file.path().to_string_lossy()).expect("load");
    let objects = objects_by_tags(&spec, None);

    assert_eq!(objects["books"].path_count, Some(4));
    assert_eq!(
        objects["books"].description.as_deref(),
        Some("Book catalog operations")
    );
    // Untagged /ping falls back to its segment name with no description.
    assert_eq!(objects["ping"].description, None);
}

#[test]
fn test_search_ranks_best_group_first() {
    let file = write_spec(TAGGED_SPEC);
    let (spec, _) = load_resolved_spec(&file.path().to_string_lossy()).expect("load");
    let results = search_by_keywords(&spec, &["books"]);

    assert_eq!(results.keys().next().map(String::as_str), Some("books"));
    assert!(results["books"].relevance_score >= results["authors"].relevance_score);
    assert!(!results.contains_key("ping"));
}

#[test]
fn test_search_is_case_insensitive() {
    let file = write_spec(TAGGED_SPEC);
    let (spec, _) = load_resolved_spec(&file.path().to_string_lossy()).expect("load");
    let results = search_by_keywords(&spec, &["CATALOG"]);

    // Only the authors method text mentions the catalog.
    assert_eq!(results.len(), 1);
    assert!(results.contains_key("authors"));
    assert!(results["authors"].relevance_score > 0);
}

#[test]
fn test_top_objects_ranking() {
    let file = write_spec(TAGGED_SPEC);
    let (spec, _) = load_resolved_spec(&file.path().to_string_lossy()).expect("load");
    let top = top_objects(&spec, 10);

    // books: 4 endpoints plus the multi-verb bonus; everything else has 1.
    assert_eq!(top.keys().next().map(String::as_str), Some("books"));
    // Equal scores break ties by name, ascending.
    let rest: Vec<&str> = top.keys().skip(1).map(String::as_str).collect();
    assert_eq!(rest, ["authors", "ping"]);
}

#[test]
fn test_top_objects_respects_limit() {
    let file = write_spec(TAGGED_SPEC);
    let (spec, _) = load_resolved_spec(&file.path().to_string_lossy()).expect("load");
    assert_eq!(top_objects(&spec, 1).len(), 1);
}
