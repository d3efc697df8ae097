//! Process-wide client settings, resolved once at startup.

use std::time::Duration;

use crate::core::config::Config;
use crate::core::constants::{
    API_BASE_ENV, CHAT_ENDPOINT, DEFAULT_API_BASE, DEFAULT_SYSTEM_PROMPT,
};
use crate::utils::url::{construct_api_url, normalize_base_url};

/// Where a resolved setting came from, reported by `medibot config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default,
}

impl SettingSource {
    pub fn label(self) -> &'static str {
        match self {
            SettingSource::CommandLine => "command line",
            SettingSource::Environment => "environment",
            SettingSource::ConfigFile => "config file",
            SettingSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Backend origin without trailing slashes.
    pub api_base: String,
    pub api_base_source: SettingSource,
    pub system_prompt: String,
    /// `None` means requests may stay outstanding forever.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    /// Merge command line, environment, config file and defaults, in that order.
    pub fn resolve(config: &Config, cli_api_base: Option<&str>) -> Self {
        let env_api_base = std::env::var(API_BASE_ENV).ok();
        Self::resolve_with_env(config, cli_api_base, env_api_base.as_deref())
    }

    pub(crate) fn resolve_with_env(
        config: &Config,
        cli_api_base: Option<&str>,
        env_api_base: Option<&str>,
    ) -> Self {
        let (api_base, api_base_source) = if let Some(base) = non_blank(cli_api_base) {
            (base.to_string(), SettingSource::CommandLine)
        } else if let Some(base) = non_blank(env_api_base) {
            (base.to_string(), SettingSource::Environment)
        } else if let Some(base) = non_blank(config.api_base.as_deref()) {
            (base.to_string(), SettingSource::ConfigFile)
        } else {
            (DEFAULT_API_BASE.to_string(), SettingSource::Default)
        };

        let system_prompt = config
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
            .to_string();

        Self {
            api_base: normalize_base_url(&api_base),
            api_base_source,
            system_prompt,
            request_timeout: config
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn chat_url(&self) -> String {
        construct_api_url(&self.api_base, CHAT_ENDPOINT)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
