//! # Application Configuration
//!
//! Everything one reconciliation run needs to know before it touches the
//! network: service credentials, optional behaviour switches, and the
//! request/retry constants.
//!
//! ## Sources
//!
//! [`AppConfig::from_env`] reads the process environment. Tests use
//! [`AppConfig::from_lookup`] with a closure instead of mutating global state.
//!
//! | Variable               | Required | Meaning                                      |
//! |------------------------|----------|----------------------------------------------|
//! | `LASTFM_API_KEY`       | yes      | Last.fm API key                              |
//! | `LASTFM_USER`          | yes      | Last.fm user whose history is read           |
//! | `SUBSONIC_SERVER`      | yes      | Base URL of the Subsonic server (http/https) |
//! | `SUBSONIC_USER`        | yes      | Subsonic user                                |
//! | `SUBSONIC_PASSWORD`    | yes      | Subsonic password                            |
//! | `IGNORE_FILE`          | no       | Path to the ignore list                      |
//! | `INSECURE_SKIP_VERIFY` | no       | `true` disables TLS certificate checks       |
//! | `VERBOSE`              | no       | `true` prints per-record failures            |
//! | `RUN_TIMEOUT_SECS`     | no       | Whole-run deadline in seconds (default 300)  |
//! | `LOG_FORMAT`           | no       | `compact` (default), `pretty` or `json`      |
//!
//! ## Validation
//!
//! [`AppConfigBuilder::build`] fails fast: every missing required setting is
//! reported in a single [`Error::MissingSettings`], so the user can fix them
//! all in one go.
//!
//! ```ignore
//! use core_runtime::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .lastfm_api_key("key")
//!     .lastfm_user("listener")
//!     .subsonic_server("https://music.example.com")
//!     .subsonic_user("admin")
//!     .subsonic_password("hunter2")
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::logging::{redact_if_sensitive, LogFormat, LoggingConfig};
use crate::transport::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use bridge_traits::time::LogLevel;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_LASTFM_API_KEY: &str = "LASTFM_API_KEY";
pub const ENV_LASTFM_USER: &str = "LASTFM_USER";
pub const ENV_SUBSONIC_SERVER: &str = "SUBSONIC_SERVER";
pub const ENV_SUBSONIC_USER: &str = "SUBSONIC_USER";
pub const ENV_SUBSONIC_PASSWORD: &str = "SUBSONIC_PASSWORD";
pub const ENV_IGNORE_FILE: &str = "IGNORE_FILE";
pub const ENV_INSECURE_SKIP_VERIFY: &str = "INSECURE_SKIP_VERIFY";
pub const ENV_VERBOSE: &str = "VERBOSE";
pub const ENV_RUN_TIMEOUT_SECS: &str = "RUN_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Per-request timeout applied by the HTTP client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline for a whole run
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(300);

/// Number of history records requested from Last.fm
pub const DEFAULT_HISTORY_LIMIT: u32 = 500;

/// Maximum number of recommendations per run
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// Validated configuration for one run
#[derive(Clone)]
pub struct AppConfig {
    pub lastfm_api_key: String,
    pub lastfm_user: String,
    /// Subsonic base URL without trailing slash
    pub subsonic_server: String,
    pub subsonic_user: String,
    pub subsonic_password: String,
    /// Ignore list location; `None` means nothing is ignored
    pub ignore_file: Option<PathBuf>,
    /// Accept any TLS certificate from the library server
    pub insecure_skip_verify: bool,
    /// Print per-record failure detail and log at debug level
    pub verbose: bool,
    /// Layout of diagnostic output on stderr
    pub log_format: LogFormat,
    pub request_timeout: Duration,
    pub run_timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub history_limit: u32,
    pub max_recommendations: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "lastfm_api_key",
                &redact_if_sensitive("api_key", &self.lastfm_api_key),
            )
            .field("lastfm_user", &self.lastfm_user)
            .field("subsonic_server", &self.subsonic_server)
            .field("subsonic_user", &self.subsonic_user)
            .field(
                "subsonic_password",
                &redact_if_sensitive("password", &self.subsonic_password),
            )
            .field("ignore_file", &self.ignore_file)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("verbose", &self.verbose)
            .field("log_format", &self.log_format)
            .field("request_timeout", &self.request_timeout)
            .field("run_timeout", &self.run_timeout)
            .field("retry_policy", &self.retry_policy)
            .field("history_limit", &self.history_limit)
            .field("max_recommendations", &self.max_recommendations)
            .finish()
    }
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset. Boolean switches are enabled only by the
    /// exact value `true`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let flag = |key: &str| lookup(key).as_deref() == Some("true");

        let mut builder = AppConfigBuilder::default()
            .insecure_skip_verify(flag(ENV_INSECURE_SKIP_VERIFY))
            .verbose(flag(ENV_VERBOSE));

        if let Some(value) = get(ENV_LASTFM_API_KEY) {
            builder = builder.lastfm_api_key(value);
        }
        if let Some(value) = get(ENV_LASTFM_USER) {
            builder = builder.lastfm_user(value);
        }
        if let Some(value) = get(ENV_SUBSONIC_SERVER) {
            builder = builder.subsonic_server(value);
        }
        if let Some(value) = get(ENV_SUBSONIC_USER) {
            builder = builder.subsonic_user(value);
        }
        if let Some(value) = get(ENV_SUBSONIC_PASSWORD) {
            builder = builder.subsonic_password(value);
        }
        if let Some(value) = get(ENV_IGNORE_FILE) {
            builder = builder.ignore_file(value);
        }
        if let Some(value) = get(ENV_RUN_TIMEOUT_SECS) {
            let secs: u64 = value.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_RUN_TIMEOUT_SECS, value
                ))
            })?;
            builder = builder.run_timeout(Duration::from_secs(secs));
        }

        if let Some(value) = get(ENV_LOG_FORMAT) {
            builder = builder.log_format(value.parse()?);
        }

        builder.build()
    }

    /// Logging setup matching this run: debug when verbose, warn otherwise
    pub fn logging_config(&self) -> LoggingConfig {
        let level = if self.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };
        LoggingConfig::default()
            .with_level(level)
            .with_format(self.log_format)
    }
}

/// Builder for [`AppConfig`]
#[derive(Default)]
pub struct AppConfigBuilder {
    lastfm_api_key: Option<String>,
    lastfm_user: Option<String>,
    subsonic_server: Option<String>,
    subsonic_user: Option<String>,
    subsonic_password: Option<String>,
    ignore_file: Option<PathBuf>,
    insecure_skip_verify: bool,
    verbose: bool,
    log_format: LogFormat,
    request_timeout: Option<Duration>,
    run_timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    history_limit: Option<u32>,
    max_recommendations: Option<usize>,
}

impl AppConfigBuilder {
    pub fn lastfm_api_key(mut self, value: impl Into<String>) -> Self {
        self.lastfm_api_key = Some(value.into());
        self
    }

    pub fn lastfm_user(mut self, value: impl Into<String>) -> Self {
        self.lastfm_user = Some(value.into());
        self
    }

    pub fn subsonic_server(mut self, value: impl Into<String>) -> Self {
        self.subsonic_server = Some(value.into());
        self
    }

    pub fn subsonic_user(mut self, value: impl Into<String>) -> Self {
        self.subsonic_user = Some(value.into());
        self
    }

    pub fn subsonic_password(mut self, value: impl Into<String>) -> Self {
        self.subsonic_password = Some(value.into());
        self
    }

    pub fn ignore_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_file = Some(path.into());
        self
    }

    pub fn insecure_skip_verify(mut self, enabled: bool) -> Self {
        self.insecure_skip_verify = enabled;
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    pub fn history_limit(mut self, limit: u32) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn max_recommendations(mut self, cap: usize) -> Self {
        self.max_recommendations = Some(cap);
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSettings`] naming every absent required setting
    /// - [`Error::Config`] for a malformed server URL or a zero limit
    pub fn build(self) -> Result<AppConfig> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, name: &str| -> String {
            match value {
                Some(v) if !v.trim().is_empty() => v,
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let lastfm_api_key = require(self.lastfm_api_key, ENV_LASTFM_API_KEY);
        let lastfm_user = require(self.lastfm_user, ENV_LASTFM_USER);
        let subsonic_server = require(self.subsonic_server, ENV_SUBSONIC_SERVER);
        let subsonic_user = require(self.subsonic_user, ENV_SUBSONIC_USER);
        let subsonic_password = require(self.subsonic_password, ENV_SUBSONIC_PASSWORD);

        if !missing.is_empty() {
            return Err(Error::MissingSettings(missing));
        }

        let subsonic_server = subsonic_server.trim().trim_end_matches('/').to_string();
        if !(subsonic_server.starts_with("http://") || subsonic_server.starts_with("https://")) {
            return Err(Error::Config(format!(
                "{} must start with http:// or https://, got '{}'",
                ENV_SUBSONIC_SERVER, subsonic_server
            )));
        }

        let retry_policy = self.retry_policy.unwrap_or(RetryPolicy {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        });
        if retry_policy.max_attempts == 0 {
            return Err(Error::Config(
                "retry policy must allow at least one attempt".to_string(),
            ));
        }

        let history_limit = self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if history_limit == 0 {
            return Err(Error::Config("history limit must be at least 1".to_string()));
        }

        let max_recommendations = self
            .max_recommendations
            .unwrap_or(DEFAULT_MAX_RECOMMENDATIONS);
        if max_recommendations == 0 {
            return Err(Error::Config(
                "recommendation cap must be at least 1".to_string(),
            ));
        }

        Ok(AppConfig {
            lastfm_api_key,
            lastfm_user,
            subsonic_server,
            subsonic_user,
            subsonic_password,
            ignore_file: self.ignore_file,
            insecure_skip_verify: self.insecure_skip_verify,
            verbose: self.verbose,
            log_format: self.log_format,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            run_timeout: self.run_timeout.unwrap_or(DEFAULT_RUN_TIMEOUT),
            retry_policy,
            history_limit,
            max_recommendations,
        })
    }
}
