use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, e.g. "https://medibot.example.org"
    pub api_base: Option<String>,
    /// Replaces the built-in system prompt
    pub system_prompt: Option<String>,
    /// Abandon a request after this many seconds; unset waits forever
    pub request_timeout_secs: Option<u64>,
}

/// Keys accepted by `medibot set` / `medibot unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiBase,
    SystemPrompt,
    RequestTimeout,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::ApiBase,
        ConfigKey::SystemPrompt,
        ConfigKey::RequestTimeout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ApiBase => "api-base",
            ConfigKey::SystemPrompt => "system-prompt",
            ConfigKey::RequestTimeout => "request-timeout",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| format!("Unknown config key: {value}"))
    }
}

impl Config {
    /// Apply `medibot set <key> <value>`.
    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {}", key.as_str()));
        }
        match key {
            ConfigKey::ApiBase => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!(
                        "api-base must start with http:// or https:// (got {value})"
                    ));
                }
                self.api_base = Some(value.to_string());
            }
            ConfigKey::SystemPrompt => self.system_prompt = Some(value.to_string()),
            ConfigKey::RequestTimeout => {
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("request-timeout must be a whole number of seconds (got {value})"))?;
                self.request_timeout_secs = Some(secs);
            }
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::ApiBase => self.api_base = None,
            ConfigKey::SystemPrompt => self.system_prompt = None,
            ConfigKey::RequestTimeout => self.request_timeout_secs = None,
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
