/// Server configuration
use crate::error::{Result, ServerError};
use moodtune_core::intent::DEFAULT_ANALYSIS_KEYWORDS;
use moodtune_gemini::GeminiConfig;
use moodtune_spotify::SpotifyConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub spotify: SpotifySettings,

    #[serde(default)]
    pub gemini: GeminiSettings,

    #[serde(default)]
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Built web UI, served for every path the API does not handle
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpotifySettings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_spotify_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_spotify_token_url")]
    pub token_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantSettings {
    /// Case-insensitive phrases that mark a message as a mood analysis question
    #[serde(default = "default_analysis_keywords")]
    pub analysis_keywords: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and environment.
    ///
    /// Sources, later ones winning: `config.toml` in the working directory
    /// (or `path` when given), `MOODTUNE_*` variables using `__` between
    /// section and key, then the plain `SPOTIFY_CLIENT_ID`,
    /// `SPOTIFY_CLIENT_SECRET`, `GEMINI_API_KEY` and `DATABASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ServerError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MOODTUNE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .with_list_parse_key("assistant.analysis_keywords")
                .try_parsing(true),
        );

        for (key, var) in [
            ("spotify.client_id", "SPOTIFY_CLIENT_ID"),
            ("spotify.client_secret", "SPOTIFY_CLIENT_SECRET"),
            ("gemini.api_key", "GEMINI_API_KEY"),
            ("storage.database_url", "DATABASE_URL"),
        ] {
            settings = settings
                .set_override_option(key, std::env::var(var).ok())
                .map_err(|e| ServerError::Config(e.to_string()))?;
        }

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ServerError::Config(
                "Gemini API key is required (set GEMINI_API_KEY)".to_string(),
            ));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config("Database URL is empty".to_string()));
        }

        if self.spotify.client_id.trim().is_empty() || self.spotify.client_secret.trim().is_empty()
        {
            tracing::warn!(
                "Spotify credentials are missing; playlist recommendations will fail \
                 (set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET)"
            );
        }

        Ok(())
    }
}

impl SpotifySettings {
    pub fn client_config(&self) -> SpotifyConfig {
        SpotifyConfig::new(&self.client_id, &self.client_secret)
            .with_api_base_url(&self.api_base_url)
            .with_token_url(&self.token_url)
    }
}

impl GeminiSettings {
    pub fn client_config(&self) -> GeminiConfig {
        GeminiConfig::new(&self.api_key)
            .with_model(&self.model)
            .with_base_url(&self.base_url)
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_cors_origins() -> Vec<String> {
    [
        "https://localhost:3000",
        "http://localhost:3000",
        "http://localhost:3001",
        "https://127.0.0.1:3000",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn default_database_url() -> String {
    "sqlite://./data/moodtune.db".to_string()
}

fn default_spotify_api_base_url() -> String {
    moodtune_spotify::DEFAULT_API_BASE_URL.to_string()
}

fn default_spotify_token_url() -> String {
    moodtune_spotify::DEFAULT_TOKEN_URL.to_string()
}

fn default_gemini_model() -> String {
    moodtune_gemini::DEFAULT_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    moodtune_gemini::DEFAULT_BASE_URL.to_string()
}

fn default_analysis_keywords() -> Vec<String> {
    DEFAULT_ANALYSIS_KEYWORDS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            web_dir: None,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for SpotifySettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: default_spotify_api_base_url(),
            token_url: default_spotify_token_url(),
        }
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            analysis_keywords: default_analysis_keywords(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins.len(), 4);
        assert_eq!(config.storage.database_url, "sqlite://./data/moodtune.db");
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.assistant.analysis_keywords.len(), 11);
    }

    #[test]
    fn validate_requires_gemini_key() {
        let mut config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        config.gemini.api_key = "key".to_string();
        // Missing Spotify credentials only warn
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moodtune.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\nweb_dir = \"/srv/web\"\n\n[assistant]\nanalysis_keywords = [\"vibe\"]"
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.web_dir, Some(PathBuf::from("/srv/web")));
        assert_eq!(config.assistant.analysis_keywords, vec!["vibe".to_string()]);
        assert_eq!(config.spotify.api_base_url, moodtune_spotify::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn load_rejects_missing_file() {
        let result = ServerConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
