//! Configuration module
//!
//! Env-driven configuration for the upload coordinator: admission policy,
//! server base URL, and the local cache location.

use std::env;
use std::path::PathBuf;

const MAX_FILE_SIZE_MB: u64 = 50;
const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "application/pdf";
const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_CACHE_PATH: &str = ".docdrop/state.json";

/// Store key under which the "my uploads" sequence is persisted.
pub const UPLOAD_CACHE_KEY: &str = "docdrop.my_uploads";

/// Admission policy for candidate files.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    pub allowed_content_types: Vec<String>,
    pub max_file_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_content_types: vec![DEFAULT_ALLOWED_CONTENT_TYPES.to_string()],
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
        }
    }
}

impl UploadPolicy {
    pub fn from_env() -> Self {
        let allowed_content_types = env::var("DOCDROP_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("DOCDROP_MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        Self {
            allowed_content_types,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        }
    }

    pub fn allows_content_type(&self, content_type: &str) -> bool {
        let normalized = content_type.trim().to_lowercase();
        self.allowed_content_types.iter().any(|t| *t == normalized)
    }
}

/// Application configuration for the coordinator and its binaries.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub cache_path: PathBuf,
    pub policy: UploadPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let api_url = env::var("DOCDROP_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let cache_path = env::var("DOCDROP_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_PATH));

        let config = Self {
            api_url,
            cache_path,
            policy: UploadPolicy::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "DOCDROP_API_URL must be an http(s) URL, got: {}",
                self.api_url
            ));
        }

        if self.policy.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "DOCDROP_ALLOWED_CONTENT_TYPES must name at least one content type"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_pdf_only() {
        let policy = UploadPolicy::default();
        assert!(policy.allows_content_type("application/pdf"));
        assert!(policy.allows_content_type("APPLICATION/PDF"));
        assert!(!policy.allows_content_type("image/png"));
        assert_eq!(policy.max_file_size_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = AppConfig {
            api_url: "ftp://example.com".to_string(),
            cache_path: PathBuf::from("state.json"),
            policy: UploadPolicy::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_allow_set() {
        let config = AppConfig {
            api_url: "http://localhost:8000".to_string(),
            cache_path: PathBuf::from("state.json"),
            policy: UploadPolicy {
                allowed_content_types: Vec::new(),
                max_file_size_bytes: 1024,
            },
        };
        assert!(config.validate().is_err());
    }
}
