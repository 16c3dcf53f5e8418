use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use prakriti_store::client::StoreConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const ENV_URL: &str = "PRAKRITI_URL";
pub const ENV_ANON_KEY: &str = "PRAKRITI_ANON_KEY";
pub const ENV_ACCESS_TOKEN: &str = "PRAKRITI_ACCESS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Project base URL of the hosted store.
    pub url: String,
    pub anon_key: String,
    #[serde(default)]
    pub access_token: Option<String>,
    /// HS256 secret for verifying access tokens. Added in v1; without it
    /// tokens are decoded but not verified.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl ShellConfig {
    pub fn new(url: String, anon_key: String) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            url,
            anon_key,
            access_token: None,
            jwt_secret: None,
            created_at: jiff::Timestamp::now(),
        }
    }

    /// Overlay values from the environment. `lookup` is `std::env::var`
    /// outside tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_URL) {
            self.url = url;
        }
        if let Some(key) = lookup(ENV_ANON_KEY) {
            self.anon_key = key;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            url: self.url.clone(),
            anon_key: self.anon_key.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub url: String,
    pub anon_key_hint: String,
    pub access_token_hint: Option<String>,
    pub verifies_tokens: bool,
    pub created_at: String,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.prakriti.shell"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<ShellConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<ShellConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ShellConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// The config the commands run with: the file if there is one, with the
/// environment on top. Without a file, the environment must supply both
/// the URL and the anon key.
pub fn resolve_config() -> eyre::Result<ShellConfig> {
    let lookup = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    let mut config = if has_config() {
        load_config()?
    } else {
        ShellConfig::new(String::new(), String::new())
    };
    config.apply_env(lookup);

    if config.url.is_empty() || config.anon_key.is_empty() {
        return Err(eyre::eyre!(
            "store not configured: run `prakriti config set --url <url> --anon-key <key>` \
             or set {ENV_URL} and {ENV_ANON_KEY}"
        ));
    }
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update prakriti."
        ));
    }

    // v0 → v1: add jwt_secret (unset; tokens decode unverified until configured)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("jwt_secret").or_insert(serde_json::Value::Null);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added jwt_secret)");
    }

    Ok(json)
}

pub fn save_config(config: &ShellConfig) -> eyre::Result<()> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &ShellConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(config: &ShellConfig) -> ConfigInfo {
    ConfigInfo {
        url: config.url.clone(),
        anon_key_hint: redact(&config.anon_key),
        access_token_hint: config.access_token.as_deref().map(redact),
        verifies_tokens: config.jwt_secret.is_some(),
        created_at: config.created_at.to_string(),
    }
}

fn redact(secret: &str) -> String {
    if secret.len() <= 8 || !secret.is_ascii() {
        return "****".to_string();
    }
    let prefix = &secret[..4];
    let suffix = &secret[secret.len() - 4..];
    format!("{prefix}...{suffix}")
}
