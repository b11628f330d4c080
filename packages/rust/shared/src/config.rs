//! Application configuration for Lokalize.
//!
//! User config lives at `~/.lokalize/lokalize.toml`.
//! CLI flags override config file values, which override defaults.
//! Credentials are never stored in the file — the config names the
//! environment variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LokalizeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "lokalize.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".lokalize";

// ---------------------------------------------------------------------------
// Config structs (matching lokalize.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Chunking parameters.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Managed knowledge-base service settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Source URLs to scrape.
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory the demo writes its chunk batches into.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default target region for localization advice.
    #[serde(default = "default_target_region")]
    pub target_region: String,

    /// How many chunks to retrieve per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            target_region: default_target_region(),
            top_k: default_top_k(),
        }
    }
}

fn default_output_dir() -> String {
    "~/lokalize-demo".into()
}
fn default_target_region() -> String {
    "Saudi Arabia".into()
}
fn default_top_k() -> usize {
    5
}

/// `[chunking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in bytes.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    800
}
fn default_chunk_overlap() -> usize {
    100
}

/// `[service]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTPS endpoint of the managed knowledge-base gateway.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the knowledge-base identifier.
    #[serde(default = "default_kb_id_env")]
    pub knowledge_base_id_env: String,

    /// Foundation model used for generation.
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Minimum relevance score for retrieval hits.
    #[serde(default = "default_min_score")]
    pub min_score: f32,

    /// Token budget for generated advice.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            knowledge_base_id_env: default_kb_id_env(),
            model_id: default_model_id(),
            min_score: default_min_score(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_endpoint() -> String {
    "https://knowledge-api.lokalize.dev/v1".into()
}
fn default_api_key_env() -> String {
    "LOKALIZE_API_KEY".into()
}
fn default_kb_id_env() -> String {
    "LOKALIZE_KNOWLEDGE_BASE_ID".into()
}
fn default_model_id() -> String {
    "anthropic.claude-3-sonnet-20240229-v1:0".into()
}
fn default_min_score() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1000
}

/// `[sources]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Pages to scrape for cultural context.
    #[serde(default = "default_source_urls")]
    pub urls: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            urls: default_source_urls(),
        }
    }
}

fn default_source_urls() -> Vec<String> {
    [
        "https://www.arabia-interculture.com/en/social-etiquette-and-cultural-norms-in-saudi-arabia/",
        "https://thinknest.biz/future/saudi-fashion-modesty-tradition/",
        "https://www.arabianbusiness.com/lifestyle/fashion/saudi-arabia-fashion-industry-growth",
        "https://www.vogue.com/article/saudi-arabia-fashion-week-riyadh",
        "https://www.harpersbazaar.com/culture/features/a41968619/saudi-arabia-fashion-scene/",
        "https://www.businessoffashion.com/articles/markets/saudi-arabia-fashion-market-opportunity/",
        "https://fashionunited.com/news/fashion/saudi-arabia-s-fashion-industry-is-booming/",
        "https://www.middleeasteye.net/discover/saudi-arabia-fashion-industry-women-designers-growth",
    ]
    .map(String::from)
    .to_vec()
}

// ---------------------------------------------------------------------------
// Service mode (live vs. mock)
// ---------------------------------------------------------------------------

/// How the pipeline talks to the knowledge-base service.
///
/// Resolved once at startup from the environment; everything downstream
/// matches on the mode instead of threading optional credentials around.
#[derive(Debug, Clone)]
pub enum ServiceMode {
    /// Credentials present — call the managed service.
    Live {
        /// API key read from the configured env var.
        api_key: String,
        /// Knowledge-base id, if one is configured. `None` means the
        /// pipeline is expected to create one.
        knowledge_base_id: Option<String>,
    },
    /// Credentials absent — answer from canned data.
    Mock {
        /// Human-readable explanation printed by the demo.
        reason: String,
    },
}

impl ServiceMode {
    /// Whether this mode answers from canned data.
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock { .. })
    }
}

/// Resolve the service mode from config + environment.
///
/// `allow_create` is set by pipelines that can create a knowledge base on
/// the fly (demo, ingest); query-only callers require an existing id and
/// fall back to mock without one.
pub fn resolve_service_mode(config: &AppConfig, allow_create: bool) -> ServiceMode {
    let key_var = &config.service.api_key_env;
    let api_key = match std::env::var(key_var) {
        Ok(val) if !val.is_empty() => val,
        _ => {
            return ServiceMode::Mock {
                reason: format!("{key_var} is not set"),
            };
        }
    };

    let kb_var = &config.service.knowledge_base_id_env;
    let knowledge_base_id = match std::env::var(kb_var) {
        Ok(val) if !val.is_empty() => Some(val),
        _ if allow_create => None,
        _ => {
            return ServiceMode::Mock {
                reason: format!("{kb_var} is not set"),
            };
        }
    };

    ServiceMode::Live {
        api_key,
        knowledge_base_id,
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.lokalize/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LokalizeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.lokalize/lokalize.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LokalizeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| LokalizeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LokalizeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LokalizeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LokalizeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
