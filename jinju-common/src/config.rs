use crate::error::{DirectiveError, Result};
use crate::record::Team;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api.cloudflare.com";
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_SHEET_NAME: &str = "메시지분석";
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub account_id: String,
    pub api_token: String,
    pub inference_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub inference_timeout: Duration,
    pub endpoints: BTreeMap<Team, String>,
    /// Used for saves whose team label matches no known team.
    pub default_endpoint: Option<String>,
    pub sheet_name: String,
    pub storage_timeout: Duration,
    pub password: Option<String>,
}

impl AppConfig {
    pub fn inference_url(&self) -> String {
        format!(
            "{}/client/v4/accounts/{}/ai/run/{}",
            self.inference_base_url.trim_end_matches('/'),
            self.account_id,
            self.model
        )
    }

    pub fn endpoint_for(&self, team: Team) -> Option<&str> {
        self.endpoints.get(&team).map(String::as_str)
    }

    /// True when no password is configured or `input` matches it.
    pub fn check_password(&self, input: Option<&str>) -> bool {
        match &self.password {
            None => true,
            Some(expected) => input == Some(expected.as_str()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawSecrets = toml::from_str(content)
            .map_err(|e| DirectiveError::Configuration(format!("Invalid secrets TOML: {}", e)))?;
        raw.validate()
    }
}

// ============================================================================
// Secrets file shape
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawSecrets {
    password: Option<String>,
    #[serde(default)]
    inference: RawInference,
    #[serde(default)]
    storage: RawStorage,
}

#[derive(Debug, Default, Deserialize)]
struct RawInference {
    account_id: Option<String>,
    api_token: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStorage {
    sheet_name: Option<String>,
    default_url: Option<String>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    endpoints: BTreeMap<String, String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawSecrets {
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_empty(lookup("JINJU_ACCOUNT_ID")) {
            self.inference.account_id = Some(v);
        }
        if let Some(v) = non_empty(lookup("JINJU_API_TOKEN")) {
            self.inference.api_token = Some(v);
        }
    }

    fn validate(self) -> Result<AppConfig> {
        let account_id = non_empty(self.inference.account_id)
            .ok_or_else(|| missing("inference.account_id"))?;
        let api_token = non_empty(self.inference.api_token)
            .ok_or_else(|| missing("inference.api_token"))?;

        let mut raw_endpoints = self.storage.endpoints;
        let mut endpoints = BTreeMap::new();
        for team in Team::ALL {
            let url = non_empty(raw_endpoints.remove(team.config_key()))
                .ok_or_else(|| missing(&format!("storage.endpoints.{}", team.config_key())))?;
            endpoints.insert(team, url);
        }
        for unknown in raw_endpoints.keys() {
            log::warn!("[jinju/config] ignoring endpoint for unknown team '{}'", unknown);
        }

        Ok(AppConfig {
            account_id,
            api_token,
            inference_base_url: non_empty(self.inference.base_url)
                .unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string()),
            model: non_empty(self.inference.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.inference.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            inference_timeout: Duration::from_secs(
                self.inference.timeout_secs.unwrap_or(DEFAULT_INFERENCE_TIMEOUT_SECS),
            ),
            endpoints,
            default_endpoint: non_empty(self.storage.default_url),
            sheet_name: non_empty(self.storage.sheet_name)
                .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            storage_timeout: Duration::from_secs(
                self.storage.timeout_secs.unwrap_or(DEFAULT_STORAGE_TIMEOUT_SECS),
            ),
            password: non_empty(self.password),
        })
    }
}

fn missing(key: &str) -> DirectiveError {
    DirectiveError::Configuration(format!("Secrets 설정을 확인해주세요: missing '{}'", key))
}

// ============================================================================
// Loading
// ============================================================================

/// Secrets path: explicit argument > `JINJU_SECRETS` > `~/.jinju/secrets.toml`.
pub fn resolve_secrets_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = non_empty(std::env::var("JINJU_SECRETS").ok()) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir()
        .ok_or_else(|| DirectiveError::Configuration("No home directory".to_string()))?;
    Ok(home.join(".jinju/secrets.toml"))
}

pub fn load_config_from<F>(path: &Path, env_lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let content = std::fs::read_to_string(path).map_err(|e| {
        DirectiveError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let mut raw: RawSecrets = toml::from_str(&content).map_err(|e| {
        DirectiveError::Configuration(format!("Invalid TOML in {}: {}", path.display(), e))
    })?;
    raw.apply_env(env_lookup);
    raw.validate()
}

/// Loads and validates the secrets file, letting process env override credentials.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_secrets_path(explicit)?;
    log::debug!("[jinju/config] loading secrets from {}", path.display());
    load_config_from(&path, |key| std::env::var(key).ok())
}

/// Shared client; timeouts are set per request.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
