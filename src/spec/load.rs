use crate::error::LoadError;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Optional retention filters for large-spec mode.
///
/// When either filter is set, [`load_filtered`] drops non-matching `paths`
/// entries as soon as the document is decoded, so only the paths a caller
/// cares about survive into the [`Spec`](super::Spec).
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    /// Keep only these exact path templates
    pub paths: Option<HashSet<String>>,
    /// Keep only paths where at least one method declares one of these tags
    pub tags: Option<HashSet<String>>,
}

impl PathFilter {
    pub fn is_empty(&self) -> bool {
        self.paths.is_none() && self.tags.is_none()
    }

    /// Whether a `paths` entry passes the filter. Path filtering is exact;
    /// tag filtering scans every verb's declared tags.
    pub fn matches(&self, path: &str, entry: &Value) -> bool {
        if let Some(paths) = &self.paths {
            if !paths.contains(path) {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            let declared = entry
                .as_object()
                .map(|methods| {
                    methods.values().any(|op| {
                        op.get("tags")
                            .and_then(Value::as_array)
                            .map(|t| {
                                t.iter()
                                    .filter_map(Value::as_str)
                                    .any(|t| tags.contains(t))
                            })
                            .unwrap_or(false)
                    })
                })
                .unwrap_or(false);
            if !declared {
                return false;
            }
        }
        true
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn fetch(location: &str) -> Result<String, LoadError> {
    if is_remote(location) {
        debug!(location, "fetching spec over HTTP");
        let map_err = |source| LoadError::Fetch {
            location: location.to_string(),
            source,
        };
        // Single attempt, no retry: callers re-run after fixing placement.
        let response = reqwest::blocking::get(location)
            .and_then(|r| r.error_for_status())
            .map_err(map_err)?;
        response.text().map_err(map_err)
    } else {
        debug!(location, "reading spec from file");
        std::fs::read_to_string(location).map_err(|source| LoadError::Read {
            location: location.to_string(),
            source,
        })
    }
}

/// Decode content as JSON, falling back to YAML.
///
/// JSON is tried first because it is cheap to reject; YAML accepts a superset
/// of non-strict-JSON documents seen in the wild. Only when both decoders
/// fail is the location reported undecodable.
pub fn decode(location: &str, content: &str) -> Result<Value, LoadError> {
    let json_err = match serde_json::from_str(content) {
        Ok(value) => {
            debug!(location, "decoded spec as JSON");
            return Ok(value);
        }
        Err(e) => e,
    };
    match serde_yaml::from_str(content) {
        Ok(value) => {
            debug!(location, "JSON decode failed, decoded spec as YAML");
            Ok(value)
        }
        Err(yaml_err) => Err(LoadError::Decode {
            location: location.to_string(),
            json: json_err,
            yaml: yaml_err,
        }),
    }
}

/// Load and decode a spec document from a filesystem path or `http(s)` URL.
pub fn load(location: &str) -> Result<Value, LoadError> {
    let content = fetch(location)?;
    decode(location, &content)
}

/// Load a spec document, retaining only `paths` entries that pass `filter`.
///
/// Non-matching entries are dropped before the document is handed to the
/// caller, so peak retained state for a multi-megabyte spec is bounded by the
/// filter rather than the full `paths` map.
pub fn load_filtered(location: &str, filter: &PathFilter) -> Result<Value, LoadError> {
    let mut value = load(location)?;
    if filter.is_empty() {
        return Ok(value);
    }
    if let Some(paths) = value.get_mut("paths").and_then(Value::as_object_mut) {
        let before = paths.len();
        paths.retain(|path, entry| filter.matches(path, entry));
        debug!(kept = paths.len(), total = before, "filtered spec paths");
    }
    Ok(value)
}
