// Runtime configuration. Values come from the environment (a `.env` file is
// loaded first if there is one); the sheet to read is prompted for at runtime.

use anyhow::{bail, Context, Result};

/// Folder the finished sources doc is moved into.
pub const SOURCES_FOLDER_ENV: &str = "SOURCES_FOLDER_ID";
pub const SERVICE_ACCOUNT_KEY_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";
pub const SERVICE_ACCOUNT_JSON_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

/// Where the Google clients get their bearer token from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSource {
    /// Path to a service account JSON key file.
    ServiceAccountKeyFile(String),
    /// The service account JSON itself (handy for deployments).
    ServiceAccountJson(String),
    /// A token obtained elsewhere, used as-is.
    AccessToken(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sources_folder_id: String,
    pub auth: AuthSource,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the real
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Blank values count as unset.
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let sources_folder_id = get(SOURCES_FOLDER_ENV).with_context(|| {
            format!(
                "Missing {} environment variable! Add it to your .env file.",
                SOURCES_FOLDER_ENV
            )
        })?;

        // A service account wins over a static token when both are set.
        let auth = if let Some(path) = get(SERVICE_ACCOUNT_KEY_ENV) {
            AuthSource::ServiceAccountKeyFile(path)
        } else if let Some(json) = get(SERVICE_ACCOUNT_JSON_ENV) {
            AuthSource::ServiceAccountJson(json)
        } else if let Some(token) = get(ACCESS_TOKEN_ENV) {
            AuthSource::AccessToken(token)
        } else {
            bail!(
                "Set {}, {} or {}.",
                SERVICE_ACCOUNT_KEY_ENV,
                SERVICE_ACCOUNT_JSON_ENV,
                ACCESS_TOKEN_ENV
            );
        };

        Ok(Self {
            sources_folder_id,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn reads_folder_id_and_token() {
        let config = AppConfig::from_lookup(lookup(&[
            (SOURCES_FOLDER_ENV, " folder-123 "),
            (ACCESS_TOKEN_ENV, "ya29.token"),
        ]))
        .unwrap();
        assert_eq!(config.sources_folder_id, "folder-123");
        assert_eq!(config.auth, AuthSource::AccessToken("ya29.token".into()));
    }

    #[test]
    fn missing_folder_id_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[(ACCESS_TOKEN_ENV, "t")])).unwrap_err();
        assert!(err.to_string().contains(SOURCES_FOLDER_ENV));
    }

    #[test]
    fn blank_folder_id_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[
            (SOURCES_FOLDER_ENV, "   "),
            (ACCESS_TOKEN_ENV, "t"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn service_account_wins_over_token() {
        let config = AppConfig::from_lookup(lookup(&[
            (SOURCES_FOLDER_ENV, "f"),
            (SERVICE_ACCOUNT_JSON_ENV, "{}"),
            (ACCESS_TOKEN_ENV, "t"),
        ]))
        .unwrap();
        assert_eq!(config.auth, AuthSource::ServiceAccountJson("{}".into()));

        let config = AppConfig::from_lookup(lookup(&[
            (SOURCES_FOLDER_ENV, "f"),
            (SERVICE_ACCOUNT_KEY_ENV, "/keys/sa.json"),
            (SERVICE_ACCOUNT_JSON_ENV, "{}"),
        ]))
        .unwrap();
        assert_eq!(
            config.auth,
            AuthSource::ServiceAccountKeyFile("/keys/sa.json".into())
        );
    }

    #[test]
    fn missing_credentials_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[
            (SOURCES_FOLDER_ENV, "f"),
            (ACCESS_TOKEN_ENV, "  "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ACCESS_TOKEN_ENV));
    }
}
