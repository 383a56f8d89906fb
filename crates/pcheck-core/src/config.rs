//! Deployment configuration
//!
//! The collection domain, API prefix and initial log flag are substituted at
//! build time by whoever packages the beacon. This module only parses and
//! validates those substituted strings; it never reads them at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{BeaconError, BeaconResult};
use crate::log::Diagnostics;

/// Id of the `<script>` tag that embeds the beacon.
pub const SCRIPT_ELEMENT_ID: &str = "performance-check-script";

/// Attribute on the embedding tag holding the tracking code.
pub const TRACKING_CODE_ATTRIBUTE: &str = "data-tracking-code";

/// Versioned path appended to the API prefix.
pub const COLLECTION_PATH: &str = "/performance/webpage/data/";

const DEFAULT_DOMAIN: &str = "localhost";
const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Where to send records and whether diagnostics start enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconConfig {
    /// Collection host, optionally with a port (`stats.example.com:8080`)
    pub domain: String,
    /// API prefix such as `/api/v1`; may be empty
    pub api_prefix: String,
    /// Initial state of the log switch
    pub enable_log: bool,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            enable_log: false,
        }
    }
}

impl BeaconConfig {
    /// Build a config from the raw template substitutions.
    ///
    /// `enable_log` accepts `true`/`false` in any case, or `1`/`0`.
    pub fn from_template_values(
        domain: &str,
        api_prefix: &str,
        enable_log: &str,
    ) -> BeaconResult<Self> {
        let config = Self {
            domain: domain.trim().to_string(),
            api_prefix: api_prefix.trim().trim_end_matches('/').to_string(),
            enable_log: parse_flag(enable_log)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BeaconResult<()> {
        if self.domain.is_empty() {
            return Err(BeaconError::Config("collection domain is empty".to_string()));
        }
        if self.domain.contains("://") || self.domain.starts_with("//") {
            return Err(BeaconError::Config(format!(
                "collection domain must not carry a scheme: {}",
                self.domain
            )));
        }
        if self.domain.contains('/') {
            return Err(BeaconError::Config(format!(
                "collection domain must not contain a path: {}",
                self.domain
            )));
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(BeaconError::Config(format!(
                "API prefix must start with '/': {}",
                self.api_prefix
            )));
        }
        Ok(())
    }

    /// Protocol-relative collection URL; the page's own scheme applies.
    pub fn collection_url(&self) -> String {
        format!("//{}{}{}", self.domain, self.api_prefix, COLLECTION_PATH)
    }
}

/// Fall back to [`BeaconConfig::default`] when the baked-in values are
/// invalid, reporting the problem through the gated error log.
pub fn config_or_defaults(
    built: BeaconResult<BeaconConfig>,
    diagnostics: &Diagnostics,
) -> BeaconConfig {
    built.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid build-time configuration");
        diagnostics.error(&format!("pcheck: {}; using defaults", e));
        BeaconConfig::default()
    })
}

fn parse_flag(raw: &str) -> BeaconResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(BeaconError::Config(format!(
            "log flag must be true or false, got '{}'",
            other
        ))),
    }
}
