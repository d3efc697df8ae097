use std::path::Path;

use crate::core::config::data::{path_display, Config};
use crate::core::settings::ClientSettings;

impl Config {
    pub fn print_all(&self, config_path: &Path, resolved: &ClientSettings) {
        println!("Configuration file: {}", path_display(config_path));
        match &self.api_base {
            Some(base) => println!("  api-base: {base}"),
            None => println!("  api-base: (unset)"),
        }
        match &self.system_prompt {
            Some(_) => println!("  system-prompt: (custom)"),
            None => println!("  system-prompt: (built-in)"),
        }
        match self.request_timeout_secs {
            Some(secs) => println!("  request-timeout: {secs}s"),
            None => println!("  request-timeout: (none)"),
        }
        println!();
        println!("Effective settings:");
        println!(
            "  endpoint: {} (from {})",
            resolved.chat_url(),
            resolved.api_base_source.label()
        );
        match resolved.request_timeout {
            Some(timeout) => println!("  timeout: {}s", timeout.as_secs()),
            None => println!("  timeout: none"),
        }
    }
}
