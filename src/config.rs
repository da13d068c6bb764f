//! Configuration types for metadata extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`] or read from the environment with
//! [`ExtractionConfig::from_env`]. Keeping every knob in one struct makes it
//! trivial to share configs across requests and to see at a glance how two
//! deployments differ.

use std::fmt;

use crate::error::ExtractError;

/// Model used when neither the environment nor the caller picks one.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Messages API endpoint used when `ANTHROPIC_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Configuration for the extraction engine.
///
/// Built via [`ExtractionConfig::builder()`], [`ExtractionConfig::from_env()`],
/// or [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use creditsift::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .api_key("sk-ant-...")
///     .max_tokens(2048)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Anthropic API credential. Optional so the service can start before
    /// the credential is provisioned; a missing key fails each extraction
    /// with [`ExtractError::MissingApiKey`] instead of failing startup.
    pub api_key: Option<String>,

    /// Messages API base URL (no trailing path). Default: [`DEFAULT_BASE_URL`].
    ///
    /// Overridable for proxies and for tests that point at a local mock.
    pub base_url: String,

    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Maximum tokens the model may generate. Default: 4096.
    ///
    /// A full metadata document for a dense credits sheet runs well under
    /// 2 000 output tokens; 4 096 leaves room for long track lists without
    /// letting a runaway reply cost much.
    pub max_tokens: u32,

    /// Per-call timeout in seconds. Default: None (no client-side timeout).
    ///
    /// The service usually runs behind a platform deadline that already
    /// bounds the request; set this when running the library standalone.
    pub api_timeout_secs: Option<u64>,

    /// Custom extraction instruction. If None, uses the built-in default
    /// from [`crate::prompts`].
    pub system_prompt: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            api_timeout_secs: None,
            system_prompt: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "system_prompt",
                &self.system_prompt.as_ref().map(|_| "<custom>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read configuration from the environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ANTHROPIC_API_KEY` | unset (extractions fail until provided) |
    /// | `ANTHROPIC_BASE_URL` | [`DEFAULT_BASE_URL`] |
    /// | `CREDITSIFT_MODEL` | [`DEFAULT_MODEL`] |
    /// | `CREDITSIFT_MAX_TOKENS` | 4096 |
    ///
    /// Unparsable numeric values are logged and fall back to the default.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: env_nonempty("ANTHROPIC_API_KEY"),
            ..Self::default()
        };

        if let Some(url) = env_nonempty("ANTHROPIC_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = env_nonempty("CREDITSIFT_MODEL") {
            config.model = model;
        }
        if let Some(raw) = env_nonempty("CREDITSIFT_MAX_TOKENS") {
            match raw.parse::<u32>() {
                Ok(n) if n > 0 => config.max_tokens = n,
                _ => tracing::warn!(
                    "Ignoring unparsable CREDITSIFT_MAX_TOKENS={:?}, keeping {}",
                    raw,
                    config.max_tokens
                ),
            }
        }

        config
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = Some(secs);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(ExtractError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got {:?}",
                c.base_url
            )));
        }
        if c.model.trim().is_empty() {
            return Err(ExtractError::InvalidConfig("model must not be empty".into()));
        }
        Ok(self.config)
    }
}
