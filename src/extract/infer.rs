use crate::spec::{MethodEntry, MethodMap, ParameterMeta, Verb};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use tracing::debug;

static PARAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid param regex: {e}")));

/// Guess a grouping tag from an unresolved `$ref` string. First keyword
/// match wins; an empty string means no hint.
pub fn guess_tag_from_ref(reference: &str) -> String {
    let lower = reference.to_lowercase();
    for tag in [
        "authentication",
        "status",
        "secrets",
        "policies",
        "roles",
        "resources",
    ] {
        if lower.contains(tag) {
            return tag.to_string();
        }
    }
    String::new()
}

/// Synthesize plausible methods for a path whose `$ref` could not be
/// resolved.
///
/// Fixed lexical rules, first match wins:
/// - login/auth paths → single `post`
/// - status/health/info/whoami paths → single `get`
/// - resource-flavored tag hints (secrets, policies, roles, resources) →
///   `get`, plus `put`+`delete` when the path carries a `{param}` segment,
///   `post` otherwise
/// - anything else → single `get`
///
/// This is a lossy stand-in for schema information that is not available;
/// every produced entry is marked `inferred` so consumers can treat it as
/// lower confidence.
pub fn infer_methods(path: &str, tag_context: &str) -> MethodMap {
    let mut methods = MethodMap::new();
    let path_lower = path.to_lowercase();
    let tag_lower = tag_context.to_lowercase();

    let entry = |verb: Verb, default_tag: &str, description: String| MethodEntry {
        verb,
        operation: inferred_operation_id(verb, path),
        tags: vec![if tag_context.is_empty() {
            default_tag.to_string()
        } else {
            tag_context.to_string()
        }],
        summary: String::new(),
        description,
        parameters: path_parameters(path),
        inferred: true,
    };

    if ["login", "authenticate", "auth"]
        .iter()
        .any(|w| path_lower.contains(w))
    {
        methods.insert(
            Verb::Post,
            entry(
                Verb::Post,
                "authentication",
                format!("Authentication endpoint for {path}"),
            ),
        );
    } else if ["status", "health", "info", "whoami"]
        .iter()
        .any(|w| path_lower.contains(w))
    {
        methods.insert(
            Verb::Get,
            entry(Verb::Get, "status", format!("Get status/info for {path}")),
        );
    } else if ["secrets", "policies", "roles", "resources"]
        .iter()
        .any(|w| tag_lower.contains(w))
    {
        let noun = if tag_context.is_empty() {
            "resource"
        } else {
            tag_context
        };
        methods.insert(
            Verb::Get,
            entry(Verb::Get, "resources", format!("Get {noun} from {path}")),
        );
        if path.contains('{') {
            // An id-carrying path usually supports item updates and deletes.
            methods.insert(
                Verb::Put,
                entry(Verb::Put, "resources", format!("Update {noun} at {path}")),
            );
            methods.insert(
                Verb::Delete,
                entry(
                    Verb::Delete,
                    "resources",
                    format!("Delete {noun} at {path}"),
                ),
            );
        } else {
            // Collection endpoints usually accept creation.
            methods.insert(
                Verb::Post,
                entry(
                    Verb::Post,
                    "resources",
                    format!("Create new {noun} at {path}"),
                ),
            );
        }
    }

    if methods.is_empty() {
        methods.insert(
            Verb::Get,
            entry(Verb::Get, "general", format!("Access endpoint {path}")),
        );
    }

    debug!(path, methods = methods.len(), "inferred methods for unresolved ref");
    methods
}

fn inferred_operation_id(verb: Verb, path: &str) -> String {
    format!("{}_{}", verb, path.replace('/', "_").replace(['{', '}'], ""))
}

/// One required string-typed path parameter per `{name}` segment.
fn path_parameters(path: &str) -> Vec<ParameterMeta> {
    PARAM_RE
        .captures_iter(path)
        .map(|cap| {
            let name = cap[1].to_string();
            ParameterMeta {
                description: format!("Path parameter {name}"),
                name,
                location: "path".to_string(),
                required: true,
                schema: Some(json!({"type": "string"})),
            }
        })
        .collect()
}
