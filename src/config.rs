use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;
use url::Url;

use crate::agents::AgentRole;
use crate::constants::{llm, provider};
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    Anthropic,
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelProvider::OpenAi => write!(f, "openai"),
            ModelProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ModelRef {
    pub provider: ModelProvider,
    pub id: String,
}

impl ModelRef {
    pub fn openai(id: &str) -> Self {
        Self {
            provider: ModelProvider::OpenAi,
            id: id.to_string(),
        }
    }

    pub fn anthropic(id: &str) -> Self {
        Self {
            provider: ModelProvider::Anthropic,
            id: id.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub researcher: ModelRef,
    pub analyst: ModelRef,
    pub advisor: ModelRef,
    pub reporter: ModelRef,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            researcher: ModelRef::openai(llm::DEFAULT_OPENAI_MODEL),
            analyst: ModelRef::openai(llm::DEFAULT_OPENAI_MODEL),
            advisor: ModelRef::anthropic(llm::DEFAULT_ANTHROPIC_MODEL),
            reporter: ModelRef::anthropic(llm::DEFAULT_ANTHROPIC_MODEL),
        }
    }
}

impl ModelsConfig {
    pub fn for_role(&self, role: AgentRole) -> &ModelRef {
        match role {
            AgentRole::Researcher => &self.researcher,
            AgentRole::Analyst => &self.analyst,
            AgentRole::Advisor => &self.advisor,
            AgentRole::Reporter => &self.reporter,
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoint {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub openai: ProviderEndpoint,
    pub anthropic: ProviderEndpoint,
}

impl LlmConfig {
    pub fn endpoint(&self, provider: ModelProvider) -> &ProviderEndpoint {
        match provider {
            ModelProvider::OpenAi => &self.openai,
            ModelProvider::Anthropic => &self.anthropic,
        }
    }

    /// Configured base URL. Anthropic falls back to its OpenAI-compatible
    /// endpoint, OpenAI to the client library default.
    pub fn base_url(&self, provider: ModelProvider) -> Option<String> {
        let configured = self.endpoint(provider).base_url.clone();
        match provider {
            ModelProvider::OpenAi => configured,
            ModelProvider::Anthropic => configured.or_else(|| Some(llm::ANTHROPIC_BASE_URL.to_string())),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub cookie_url: String,
    pub user_agent: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: provider::DEFAULT_BASE_URL.to_string(),
            cookie_url: provider::DEFAULT_COOKIE_URL.to_string(),
            user_agent: provider::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl MarketDataConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_url("market_data.base_url", &self.base_url)
    }

    pub fn cookie_url(&self) -> Result<Url, ConfigError> {
        parse_url("market_data.cookie_url", &self.cookie_url)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub name: String,
    /// Tool-calling rounds allowed per agent before it must answer
    pub max_tool_rounds: usize,
    pub show_tool_calls: bool,
    pub add_datetime: bool,
    pub markdown: bool,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            name: llm::DEFAULT_TEAM_NAME.to_string(),
            max_tool_rounds: llm::DEFAULT_MAX_TOOL_ROUNDS,
            show_tool_calls: true,
            add_datetime: true,
            markdown: true,
        }
    }
}

/// Everything that can come from `config.yaml`. Every field has a default so
/// the file is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub team: TeamConfig,
    pub models: ModelsConfig,
    pub llm: LlmConfig,
    pub market_data: MarketDataConfig,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("ℹ️ {} not found, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub anthropic_api_key: String,
}

impl Credentials {
    pub fn for_provider(&self, provider: ModelProvider) -> &str {
        match provider {
            ModelProvider::OpenAi => &self.openai_api_key,
            ModelProvider::Anthropic => &self.anthropic_api_key,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("anthropic_api_key", &"<redacted>")
            .finish()
    }
}

/// Validated application configuration. Built once at startup and passed
/// down explicitly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub settings: Settings,
    pub credentials: Credentials,
}

impl AppConfig {
    /// Read `path` (if present) and the process environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Settings::load(path)?;
        Self::from_settings(settings, |var| std::env::var(var).ok())
    }

    /// Validate `settings` and resolve credentials through `lookup`.
    /// Environment values win over keys written in the config file.
    pub fn from_settings<F>(settings: Settings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        settings.market_data.base_url()?;
        settings.market_data.cookie_url()?;
        for (field, endpoint) in [
            ("llm.openai.base_url", &settings.llm.openai),
            ("llm.anthropic.base_url", &settings.llm.anthropic),
        ] {
            if let Some(url) = &endpoint.base_url {
                parse_url(field, url)?;
            }
        }

        if settings.team.max_tool_rounds == 0 {
            return Err(ConfigError::Invalid {
                field: "team.max_tool_rounds",
                reason: "must be at least 1".to_string(),
            });
        }

        let resolve = |var: &'static str, endpoint: &ProviderEndpoint| {
            lookup(var)
                .and_then(non_empty)
                .or_else(|| endpoint.api_key.clone().and_then(non_empty))
                .ok_or(ConfigError::MissingCredential { var })
        };

        let credentials = Credentials {
            openai_api_key: resolve(llm::OPENAI_API_KEY_VAR, &settings.llm.openai)?,
            anthropic_api_key: resolve(llm::ANTHROPIC_API_KEY_VAR, &settings.llm.anthropic)?,
        };

        Ok(Self {
            settings,
            credentials,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{} cannot carry a path", value),
        });
    }
    Ok(url)
}
