//! # Code Service Interface
//!
//! A trait-based abstraction over the two remote services the workbench
//! talks to: code generation and sandboxed execution.
//!
//! ## Design
//! - `CodeService` trait defines the core interface
//! - `HttpCodeService` talks to the REGEN HTTP/JSON backend
//! - Replies are handed back as raw `serde_json::Value`; interpreting them is
//!   the normalizer's job (see [`crate::normalize`])
//! - Transport failures come back as `ServiceError` and are classified by
//!   [`crate::normalize::classify`]

pub mod http;

pub use http::HttpCodeService;

use crate::error::{Error, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Wire Types
// ============================================================================

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub language: Language,
    /// Existing editor contents the model may refine; `null` when empty
    pub code: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, language: Language) -> Self {
        Self {
            prompt: prompt.into(),
            language,
            code: None,
        }
    }

    /// Attach existing code; blank buffers are sent as `null`
    pub fn with_existing_code(mut self, code: &str) -> Self {
        self.code = if code.trim().is_empty() {
            None
        } else {
            Some(code.to_string())
        };
        self
    }
}

/// Body of `POST /api/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: Language,
    /// Text fed to the program's stdin, one line per read
    pub input: String,
}

impl ExecuteRequest {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
            input: String::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

// ============================================================================
// Service Trait
// ============================================================================

/// Transport-level failure of a service call
#[derive(Debug)]
pub enum ServiceError {
    /// The call did not complete within its wait ceiling
    Timeout { endpoint: String, secs: u64 },
    /// The request never reached the server
    Unreachable(String),
    /// The server answered with a non-2xx status
    Api { status: u16, reason: String, body: String },
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout { endpoint, secs } => {
                write!(f, "Timed out after {}s waiting for {}", secs, endpoint)
            }
            Self::Unreachable(e) => write!(f, "Service unreachable: {}", e),
            Self::Api { status, reason, .. } => write!(f, "API error ({}): {}", status, reason),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The remote generation + execution backend
#[allow(async_fn_in_trait)]
pub trait CodeService: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Ask the model for code; the reply shape is not fixed
    async fn generate(&self, request: &GenerateRequest) -> std::result::Result<serde_json::Value, ServiceError>;

    /// Run code in the sandbox
    async fn execute(&self, request: &ExecuteRequest) -> std::result::Result<serde_json::Value, ServiceError>;

    /// Languages the backend advertises
    async fn languages(&self) -> std::result::Result<serde_json::Value, ServiceError>;

    /// Whether the backend root answers with a 2xx
    async fn health(&self) -> std::result::Result<bool, ServiceError>;
}

// ============================================================================
// Service Configuration
// ============================================================================

pub const ENV_API_URL: &str = "REGEN_API_URL";
pub const ENV_GENERATE_TIMEOUT: &str = "REGEN_GENERATE_TIMEOUT_SECS";
pub const ENV_EXECUTE_TIMEOUT: &str = "REGEN_EXECUTE_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_EXECUTE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_AUX_TIMEOUT_SECS: u64 = 10;

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Generation may hit a cold-starting model, so it gets the longest wait
    pub generate_timeout_secs: u64,
    pub execute_timeout_secs: u64,
    /// Language listing and health probes
    pub aux_timeout_secs: u64,
    pub headers: HashMap<String, String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            generate_timeout_secs: DEFAULT_GENERATE_TIMEOUT_SECS,
            execute_timeout_secs: DEFAULT_EXECUTE_TIMEOUT_SECS,
            aux_timeout_secs: DEFAULT_AUX_TIMEOUT_SECS,
            headers: HashMap::new(),
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by `REGEN_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_base_url(url);
        }
        if let Some(secs) = lookup(ENV_GENERATE_TIMEOUT) {
            config.generate_timeout_secs = parse_secs(ENV_GENERATE_TIMEOUT, &secs)?;
        }
        if let Some(secs) = lookup(ENV_EXECUTE_TIMEOUT) {
            config.execute_timeout_secs = parse_secs(ENV_EXECUTE_TIMEOUT, &secs)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_generate_timeout(mut self, secs: u64) -> Self {
        self.generate_timeout_secs = secs;
        self
    }

    pub fn with_execute_timeout(mut self, secs: u64) -> Self {
        self.execute_timeout_secs = secs;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Reject configurations that can never produce a working request
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::config_invalid(
                "base_url",
                format!("'{}' is not an http(s) URL", self.base_url),
            ));
        }
        for (key, secs) in [
            ("generate_timeout_secs", self.generate_timeout_secs),
            ("execute_timeout_secs", self.execute_timeout_secs),
            ("aux_timeout_secs", self.aux_timeout_secs),
        ] {
            if secs == 0 {
                return Err(Error::config_invalid(key, "timeout must be at least one second"));
            }
        }
        Ok(())
    }

    /// Absolute URL for an endpoint path such as `/api/generate`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_secs(key: &'static str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|e| {
        Error::config_invalid(key, format!("'{}' is not a number of seconds", raw)).set_source(e)
    })
}

// ============================================================================
// Tests
// ============================================================================
