//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::core::config::{Config, ConfigKey};
use crate::core::settings::ClientSettings;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "medibot")]
#[command(about = "A terminal chat client for the MediBot medical support assistant")]
#[command(
    long_about = "MediBot is a line-oriented terminal client for a MediBot chat backend. \
Each line you type is sent together with the conversation so far; one request is \
in flight at a time.\n\n\
Backend selection (first match wins):\n\
  --api-base <URL>    Command-line override\n\
  MEDIBOT_API_BASE    Environment override\n\
  api_base            Config file entry (see 'medibot config')\n\
  http://localhost:8000\n\n\
Commands inside a chat:\n\
  /quit               Leave the session (Ctrl+D works too)\n\n\
MediBot is not a substitute for professional medical advice."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend origin to talk to, e.g. https://medibot.example.org
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Show debug diagnostics on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive conversation (default)
    Chat,
    /// Ask a single question and print the reply
    Say {
        /// The question; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value
    Set {
        /// One of: api-base, system-prompt, request-timeout
        key: String,
        /// Value to set (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Remove a configuration value
    Unset {
        /// One of: api-base, system-prompt, request-timeout
        key: String,
    },
    /// Show the configuration file and the effective settings
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let settings = load_settings(args.api_base.as_deref())?;
            run_chat(settings).await
        }
        Commands::Say { prompt } => {
            let settings = load_settings(args.api_base.as_deref())?;
            run_say(prompt, settings).await
        }
        Commands::Set { key, value } => {
            let key = parse_key(&key);
            let mut config = Config::load()?;
            if let Err(message) = config.set_value(key, &value.join(" ")) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Set {}", key.as_str());
            Ok(())
        }
        Commands::Unset { key } => {
            let key = parse_key(&key);
            let mut config = Config::load()?;
            config.unset_value(key);
            config.save()?;
            println!("✅ Unset {}", key.as_str());
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            let resolved = ClientSettings::resolve(&config, args.api_base.as_deref());
            config.print_all(&Config::get_config_path()?, &resolved);
            Ok(())
        }
    }
}

fn load_settings(cli_api_base: Option<&str>) -> Result<ClientSettings, Box<dyn Error>> {
    let config = Config::load()?;
    Ok(ClientSettings::resolve(&config, cli_api_base))
}

fn parse_key(key: &str) -> ConfigKey {
    key.parse().unwrap_or_else(|message: String| {
        let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
        eprintln!("❌ {message}");
        eprintln!("Known keys: {}", known.join(", "));
        std::process::exit(1);
    })
}
