use std::fmt;

/// Failure to obtain a decodable document from a spec location.
///
/// Loading is the only fatal stage of an extraction run: every later stage
/// degrades to a best-effort object map instead of failing. The error always
/// names the attempted location so callers can surface it directly.
#[derive(Debug)]
pub enum LoadError {
    /// Reading a local file failed.
    Read {
        /// The attempted filesystem path
        location: String,
        source: std::io::Error,
    },
    /// Fetching a remote document failed (network error or non-success status).
    Fetch {
        /// The attempted URL
        location: String,
        source: reqwest::Error,
    },
    /// The content decoded neither as JSON nor as YAML.
    Decode {
        location: String,
        json: serde_json::Error,
        yaml: serde_yaml::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { location, source } => {
                write!(f, "failed to read spec file '{location}': {source}")
            }
            LoadError::Fetch { location, source } => {
                write!(f, "failed to fetch spec from '{location}': {source}")
            }
            LoadError::Decode {
                location,
                json,
                yaml,
            } => {
                write!(
                    f,
                    "spec at '{location}' is neither valid JSON nor valid YAML \
                     (json: {json}; yaml: {yaml})"
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            LoadError::Fetch { source, .. } => Some(source),
            // Both decoders failed; report the YAML error, the last one tried.
            LoadError::Decode { yaml, .. } => Some(yaml),
        }
    }
}
