//! # Credentials File
//!
//! Loads org configs for local runs from a TOML file:
//!
//! ```toml
//! [orgs.acme]
//! truePercentage = 75
//!
//! [orgs.globex]
//! truePercentage = "10"
//! ```
//!
//! Each `[orgs.<id>]` table becomes that org's config, exactly as the host
//! would hand it to the plugin. A file without an `[orgs]` table is valid and
//! yields no orgs.

use coop_example_core::{CoopError, InMemoryCredentials, OrgConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Maximum credentials file size (1 MiB).
const MAX_CREDENTIALS_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    orgs: BTreeMap<String, OrgConfig>,
}

/// Validate the path names an existing regular file and return it canonicalized.
fn validate_file_path(path: &Path) -> Result<PathBuf, CoopError> {
    let canonical = path.canonicalize().map_err(|e| {
        CoopError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CoopError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Reject files larger than `max_size` before reading them.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CoopError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CoopError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CoopError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Parse credentials from TOML text.
pub fn parse_credentials(text: &str) -> Result<InMemoryCredentials, CoopError> {
    let file: CredentialsFile =
        toml::from_str(text).map_err(|e| CoopError::Serialization(e.to_string()))?;
    Ok(file.orgs.into_iter().collect())
}

/// Load credentials from a TOML file.
pub fn load_credentials(path: &Path) -> Result<InMemoryCredentials, CoopError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_CREDENTIALS_FILE_SIZE)?;

    let text = std::fs::read_to_string(&canonical)
        .map_err(|e| CoopError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    let credentials = parse_credentials(&text)?;

    tracing::info!(
        path = %canonical.display(),
        orgs = credentials.len(),
        "loaded org credentials"
    );
    Ok(credentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn parses_org_tables() {
        let store = parse_credentials(
            r#"
            [orgs.acme]
            truePercentage = 75

            [orgs.globex]
            truePercentage = "10"
            note = "trial"
            "#,
        )
        .unwrap();

        assert_eq!(store.org_ids(), vec!["acme", "globex"]);
        assert_eq!(store.get("acme").unwrap()["truePercentage"], json!(75));
        assert_eq!(store.get("globex").unwrap()["truePercentage"], json!("10"));
        assert_eq!(store.get("globex").unwrap()["note"], json!("trial"));
    }

    #[test]
    fn missing_orgs_table_is_empty() {
        assert!(parse_credentials("").unwrap().is_empty());
        assert!(parse_credentials("title = \"x\"").unwrap().is_empty());
    }

    #[test]
    fn malformed_toml_is_serialization_error() {
        let err = parse_credentials("[orgs.acme\ntruePercentage = ").err().unwrap();
        assert!(matches!(err, CoopError::Serialization(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[orgs.acme]\ntruePercentage = 20").unwrap();

        let store = load_credentials(file.path()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_credentials(Path::new("/definitely/not/here.toml"))
            .err()
            .unwrap();
        assert!(matches!(err, CoopError::Io(_)));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_credentials(dir.path()).err().unwrap();
        assert!(matches!(err, CoopError::Io(_)));
    }
}
