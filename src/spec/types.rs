use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP verbs the engine recognizes on a path entry. Anything else in a path
/// item (`summary`, `servers`, vendor extensions, ...) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Verb {
    /// Parse a path-item key into a verb, case-insensitively.
    pub fn from_key(key: &str) -> Option<Verb> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Verb::Get),
            "post" => Some(Verb::Post),
            "put" => Some(Verb::Put),
            "delete" => Some(Verb::Delete),
            "patch" => Some(Verb::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
            Verb::Patch => "patch",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter of a method, deserialized leniently: every field is
/// defaulted so irregular specs (or `$ref` placeholders we do not resolve)
/// still yield an entry instead of aborting the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterMeta {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// One HTTP method attached to a path, in the normalized output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodEntry {
    pub verb: Verb,
    pub operation: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterMeta>,
    /// True when the methods were synthesized by the inference fallback
    /// rather than parsed from the document. Lower-confidence data.
    #[serde(default, skip_serializing_if = "is_false")]
    pub inferred: bool,
}

/// Verb → method map for one path, in declaration order.
pub type MethodMap = IndexMap<Verb, MethodEntry>;

/// A `paths` entry is either an inline verb map or an external `$ref`
/// pointer. The variant is decided once at parse time; after resolution the
/// `UnresolvedRef` form only survives when the referenced file or pointer
/// could not be reached, and the assembler falls back to inference for it.
#[derive(Debug, Clone)]
pub enum PathEntry {
    Resolved(MethodMap),
    UnresolvedRef(String),
}

impl PathEntry {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, PathEntry::UnresolvedRef(_))
    }
}

/// Path template → entry, in document order.
pub type PathMap = IndexMap<String, PathEntry>;

/// A named group of paths presented for selection. The optional tag and
/// description metadata are only populated by the tag-grouping views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub methods: IndexMap<String, MethodEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_count: Option<usize>,
}

/// Object name → group. Insertion order is part of the contract: it follows
/// document order, so repeated runs over the same spec serialize identically.
pub type ObjectMap = IndexMap<String, ObjectGroup>;

/// The decoded specification, reduced to the pieces the engine consumes.
/// Built once per extraction run and discarded after assembly.
#[derive(Debug, Clone, Default)]
pub struct Spec {
    /// Base URLs, in declaration order
    pub servers: Vec<String>,
    /// `components.securitySchemes`, passed through untyped
    pub security_schemes: IndexMap<String, Value>,
    /// Top-level `security` requirement sets
    pub global_security: Vec<Value>,
    pub paths: PathMap,
    /// Declared tag name → description
    pub tags: IndexMap<String, String>,
}

impl Spec {
    /// Reduce a decoded document tree to a [`Spec`]. Missing or malformed
    /// sections default to empty; a spec with zero paths is a valid input
    /// that produces an empty object map downstream, not an error.
    pub fn from_value(value: Value) -> Spec {
        let mut spec = Spec::default();
        let Value::Object(mut root) = value else {
            return spec;
        };

        if let Some(Value::Array(servers)) = root.get("servers") {
            spec.servers = servers
                .iter()
                .filter_map(|s| s.get("url").and_then(Value::as_str))
                .map(str::to_string)
                .collect();
        }

        if let Some(schemes) = root
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_object)
        {
            spec.security_schemes = schemes
                .iter()
                .map(|(name, v)| (name.clone(), v.clone()))
                .collect();
        }

        if let Some(Value::Array(security)) = root.get("security") {
            spec.global_security = security.clone();
        }

        if let Some(Value::Array(tags)) = root.get("tags") {
            for tag in tags {
                if let Some(name) = tag.get("name").and_then(Value::as_str) {
                    let desc = tag
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    spec.tags.insert(name.to_string(), desc.to_string());
                }
            }
        }

        if let Some(Value::Object(paths)) = root.remove("paths") {
            for (path, entry) in paths {
                let parsed = parse_path_entry(&path, &entry);
                spec.paths.insert(path, parsed);
            }
        }

        spec
    }
}

/// Deterministic operation id used when the document omits `operationId`.
pub fn default_operation_id(verb: Verb, path: &str) -> String {
    format!("{}_{}", verb, path.replace('/', "_"))
}

/// Classify and parse one `paths` entry.
///
/// A single-key `{"$ref": "<file>#<pointer>"}` object becomes
/// [`PathEntry::UnresolvedRef`]; anything else is scanned for known verbs and
/// parsed into a [`MethodMap`] (which may be empty for degenerate input).
pub fn parse_path_entry(path: &str, value: &Value) -> PathEntry {
    let Some(obj) = value.as_object() else {
        return PathEntry::Resolved(MethodMap::new());
    };

    if obj.len() == 1 {
        if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
            return PathEntry::UnresolvedRef(reference.to_string());
        }
    }

    let mut methods = MethodMap::new();
    for (key, op) in obj {
        let Some(verb) = Verb::from_key(key) else {
            continue;
        };
        methods.insert(verb, parse_method(verb, path, op));
    }
    PathEntry::Resolved(methods)
}

fn parse_method(verb: Verb, path: &str, op: &Value) -> MethodEntry {
    let operation = op
        .get("operationId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default_operation_id(verb, path));

    let tags = op
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let text = |key: &str| {
        op.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let parameters = op
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| serde_json::from_value(p.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    MethodEntry {
        verb,
        operation,
        tags,
        summary: text("summary"),
        description: text("description"),
        parameters,
        inferred: false,
    }
}
