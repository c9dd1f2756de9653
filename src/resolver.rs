//! Path-level `$ref` resolution across files.
//!
//! Specs split across multiple documents reference shared path definitions as
//! `{"$ref": "<file>#<json-pointer>"}` entries. The resolver loads each
//! distinct referenced file once — relative to the main spec's directory for
//! local specs, relative to its URL for remote ones — walks the pointer, and
//! substitutes the resolved method map in place. Resolution is best-effort
//! and partial: entries whose file or pointer cannot be reached stay
//! [`PathEntry::UnresolvedRef`] and are handed to the inference fallback by
//! the assembler.

use crate::error::LoadError;
use crate::spec::{self, parse_path_entry, PathEntry, PathMap};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Counts reported back to the caller after a resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionReport {
    /// Path entries that were external references before the pass
    pub external_refs: usize,
    /// How many of them were substituted with resolved content
    pub resolved_refs: usize,
}

impl ResolutionReport {
    pub fn unresolved(&self) -> usize {
        self.external_refs - self.resolved_refs
    }
}

/// Resolve every external `$ref` entry in `paths` that can be reached from
/// `location`. Idempotent: a fully-resolved map is left untouched and
/// reports zero external refs.
///
/// Each referenced file is fetched exactly once per pass, with no retry;
/// callers may re-run after fixing file placement.
pub fn resolve_paths(location: &str, paths: &mut PathMap) -> ResolutionReport {
    let mut report = ResolutionReport::default();

    let mut files: Vec<String> = Vec::new();
    for entry in paths.values() {
        if let PathEntry::UnresolvedRef(reference) = entry {
            report.external_refs += 1;
            if let Some((file, _)) = reference.split_once('#') {
                if !file.is_empty() && !files.iter().any(|f| f == file) {
                    files.push(file.to_string());
                }
            }
        }
    }
    if report.external_refs == 0 {
        return report;
    }
    debug!(
        refs = report.external_refs,
        files = files.len(),
        "spec uses external references, attempting to resolve"
    );

    let mut documents: HashMap<String, Value> = HashMap::new();
    for file in files {
        match load_external(location, &file) {
            Ok(value) => {
                debug!(file, "loaded external reference file");
                documents.insert(file, value);
            }
            Err(err) => warn!(file, error = %err, "failed to load external reference file"),
        }
    }

    for (path, entry) in paths.iter_mut() {
        let PathEntry::UnresolvedRef(reference) = entry else {
            continue;
        };
        let Some(target) = resolve_pointer(reference, &documents) else {
            continue;
        };
        // Substitute only when the target parses to an inline method map; a
        // nested reference stays unresolved for the inference fallback.
        let parsed = parse_path_entry(path, target);
        if matches!(parsed, PathEntry::Resolved(_)) {
            *entry = parsed;
            report.resolved_refs += 1;
        }
    }

    debug!(
        resolved = report.resolved_refs,
        total = report.external_refs,
        "external reference resolution finished"
    );
    report
}

/// Walk a `<file>#<json-pointer>` reference through the loaded documents.
/// Any missing file, missing key, or non-object intermediate yields `None`.
fn resolve_pointer<'a>(
    reference: &str,
    documents: &'a HashMap<String, Value>,
) -> Option<&'a Value> {
    let (file, pointer) = reference.split_once('#')?;
    let mut current = documents.get(file)?;
    for part in pointer.trim_matches('/').split('/') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Load a referenced file relative to the main spec's location.
fn load_external(location: &str, file: &str) -> Result<Value, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let target = url::Url::parse(location)
            .and_then(|base| base.join(file))
            .map(String::from)
            .unwrap_or_else(|_| file.to_string());
        spec::load(&target)
    } else {
        let target = Path::new(location)
            .parent()
            .map(|dir| dir.join(file))
            .unwrap_or_else(|| Path::new(file).to_path_buf());
        spec::load(&target.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_pointer_walks_segments() {
        let mut docs = HashMap::new();
        docs.insert(
            "defs.yaml".to_string(),
            json!({"components": {"paths": {"Login": {"post": {}}}}}),
        );
        let v = resolve_pointer("defs.yaml#/components/paths/Login", &docs);
        assert!(v.is_some());
        assert!(v.and_then(|v| v.get("post")).is_some());
    }

    #[test]
    fn test_resolve_pointer_missing_key() {
        let mut docs = HashMap::new();
        docs.insert("defs.yaml".to_string(), json!({"components": {}}));
        assert!(resolve_pointer("defs.yaml#/components/paths/Login", &docs).is_none());
    }

    #[test]
    fn test_resolve_pointer_non_object_intermediate() {
        let mut docs = HashMap::new();
        docs.insert("defs.yaml".to_string(), json!({"components": ["not", "a", "map"]}));
        assert!(resolve_pointer("defs.yaml#/components/0", &docs).is_none());
    }

    #[test]
    fn test_resolve_pointer_requires_fragment() {
        let docs = HashMap::new();
        assert!(resolve_pointer("defs.yaml", &docs).is_none());
    }

    #[test]
    fn test_resolution_idempotent_on_resolved_map() {
        let mut paths = PathMap::new();
        paths.insert(
            "/books".to_string(),
            parse_path_entry("/books", &json!({"get": {}})),
        );
        let report = resolve_paths("spec.yaml", &mut paths);
        assert_eq!(report.external_refs, 0);
        assert_eq!(report.resolved_refs, 0);
        assert!(matches!(paths["/books"], PathEntry::Resolved(_)));
    }

    #[test]
    fn test_missing_file_leaves_entry_unresolved() {
        let mut paths = PathMap::new();
        paths.insert(
            "/login".to_string(),
            PathEntry::UnresolvedRef("no_such_file.yaml#/Login".to_string()),
        );
        let report = resolve_paths("/tmp/apimap-nonexistent/spec.yaml", &mut paths);
        assert_eq!(report.external_refs, 1);
        assert_eq!(report.resolved_refs, 0);
        assert_eq!(report.unresolved(), 1);
        assert!(paths["/login"].is_unresolved());
    }
}
