//! Caller-owned selection state.
//!
//! An extraction run produces a source object map; downstream selection
//! copies chosen objects into a target map of the same shape. Both maps live
//! in an explicit [`ExtractionContext`] value owned by the caller — there is
//! no implicit cross-call state, and nothing here mutates the source map.

use crate::spec::{ObjectGroup, ObjectMap};
use anyhow::Context as _;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Which of the two maps an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    Source,
    Target,
}

/// Source and target object maps for one selection session.
#[derive(Debug, Clone, Default)]
pub struct ExtractionContext {
    source: ObjectMap,
    target: ObjectMap,
}

/// Outcome of one `select_objects` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionReport {
    /// Names copied into the target this call
    pub selected: Vec<String>,
    /// Names not present in the source
    pub missing: Vec<String>,
    /// Total methods across the newly selected objects
    pub methods_count: usize,
    /// Every object name currently in the target
    pub current_objects: Vec<String>,
}

impl SelectionReport {
    pub fn success(&self) -> bool {
        self.missing.is_empty()
    }
}

impl ExtractionContext {
    /// Start a session over an extracted source map; the target starts empty.
    pub fn new(source: ObjectMap) -> ExtractionContext {
        ExtractionContext {
            source,
            target: ObjectMap::new(),
        }
    }

    pub fn map(&self, kind: MapKind) -> &ObjectMap {
        match kind {
            MapKind::Source => &self.source,
            MapKind::Target => &self.target,
        }
    }

    pub fn list_objects(&self, kind: MapKind) -> Vec<String> {
        self.map(kind).keys().cloned().collect()
    }

    pub fn object(&self, kind: MapKind, name: &str) -> Option<&ObjectGroup> {
        self.map(kind).get(name)
    }

    /// Copy named objects from source to target, accumulating across calls.
    /// Unknown names are reported, not fatal; known names are still copied.
    pub fn select_objects<S: AsRef<str>>(&mut self, names: &[S]) -> SelectionReport {
        let mut report = SelectionReport::default();
        for name in names {
            let name = name.as_ref();
            match self.source.get(name) {
                Some(group) => {
                    report.methods_count += group.methods.len();
                    report.selected.push(name.to_string());
                    self.target.insert(name.to_string(), group.clone());
                }
                None => report.missing.push(name.to_string()),
            }
        }
        report.current_objects = self.target.keys().cloned().collect();
        report
    }

    /// Persist either map as JSON.
    pub fn save(&self, kind: MapKind, path: &Path) -> anyhow::Result<()> {
        save_object_map(path, self.map(kind))
    }
}

/// Write an object map as pretty-printed JSON.
pub fn save_object_map(path: &Path, map: &ObjectMap) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(map)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write object map to {}", path.display()))
}

/// Read an object map from JSON, accepting both the flat shape this crate
/// writes and maps nested under a top-level `"objects"` key.
pub fn load_object_map(path: &Path) -> anyhow::Result<ObjectMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read object map from {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("object map at {} is not valid JSON", path.display()))?;
    let inner = match value {
        Value::Object(ref obj) if obj.contains_key("objects") => obj["objects"].clone(),
        other => other,
    };
    serde_json::from_value(inner)
        .with_context(|| format!("object map at {} has an unexpected shape", path.display()))
}
