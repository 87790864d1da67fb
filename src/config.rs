use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::args::Args;
use crate::views::ViewLocale;

// Include default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../default_config.toml");
const DEFAULT_CONFIG_FILE: &str = "shortstat.toml";

const STOPWORDS: [&str; 28] = [
    "the", "a", "an", "and", "or", "in", "on", "for", "to", "with", "of", "is", "it", "this",
    "that", "as", "at", "by", "from", "you", "your", "i", "we", "my", "me", "our", "be", "are",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub top: usize,
    pub editor: Option<String>,
    pub home_sentinels: Vec<String>,
    pub stopwords: Vec<String>,
    pub locale: ViewLocale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("pages"),
            output_dir: PathBuf::from("result"),
            top: 10,
            editor: Some("code".to_string()),
            home_sentinels: vec!["首頁".to_string()],
            stopwords: STOPWORDS.iter().map(|w| w.to_string()).collect(),
            locale: ViewLocale::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).context("Failed to parse configuration")?;
        if settings.top == 0 {
            anyhow::bail!("top must be greater than 0");
        }
        Ok(settings)
    }

    /// Command-line flags win over file values.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(input) = &args.input {
            self.input = input.clone();
        }
        if let Some(output_dir) = &args.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(top) = args.top {
            self.top = top;
        }
        if let Some(editor) = &args.editor {
            self.editor = Some(editor.clone());
        }
        if args.no_open {
            self.editor = None;
        }
        self
    }
}

pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = config_path {
        info!(action = "load", component = "config_file", file_path = ?path, "Loading configuration from specified file");
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        return Settings::from_toml(&content).with_context(|| format!("Invalid configuration in {:?}", path));
    }

    let default_file = Path::new(DEFAULT_CONFIG_FILE);
    if default_file.exists() {
        info!(action = "load", component = "default_config_file", file_path = ?default_file, "Loading configuration from default file");
        let parsed = fs::read_to_string(default_file)
            .map_err(anyhow::Error::from)
            .and_then(|content| Settings::from_toml(&content));
        match parsed {
            Ok(settings) => return Ok(settings),
            Err(e) => {
                warn!(action = "parse", component = "default_config_file", error = %format!("{:#}", e), "Ignoring invalid configuration file")
            }
        }
    }

    info!(
        action = "load",
        component = "embedded_config",
        "Using built-in configuration"
    );
    Ok(Settings::default())
}

pub fn init_default_config() -> Result<()> {
    let default_file = Path::new(DEFAULT_CONFIG_FILE);

    if default_file.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            DEFAULT_CONFIG_FILE
        );
    }

    fs::write(default_file, DEFAULT_CONFIG)?;
    println!("Created {} with default settings", DEFAULT_CONFIG_FILE);

    Ok(())
}
