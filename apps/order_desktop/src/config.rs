use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use shared::sample::SAMPLE_ORDER_ID;

pub const DEFAULT_CONFIG_FILE: &str = "order_desktop.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "order_desktop", about = "Look up and submit orders")]
pub struct Args {
    /// Base URL of the order API, e.g. http://127.0.0.1:8081
    #[arg(long)]
    pub api_url: Option<String>,
    /// Settings file; defaults to ./order_desktop.toml when present
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub sample_order_ids: Vec<String>,
    pub system_clipboard: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8081".into(),
            sample_order_ids: vec![SAMPLE_ORDER_ID.into()],
            system_clipboard: true,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base_url: Option<String>,
    sample_order_ids: Option<Vec<String>>,
    system_clipboard: Option<bool>,
    log_filter: Option<String>,
}

pub fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    load_settings_with(args, |name| std::env::var(name).ok())
}

/// Defaults, then the settings file, then environment, then command line.
pub fn load_settings_with(
    args: &Args,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if let Some(file_cfg) = read_file_settings(&path, required)? {
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.sample_order_ids {
            settings.sample_order_ids = v;
        }
        if let Some(v) = file_cfg.system_clipboard {
            settings.system_clipboard = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("ORDER_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__SAMPLE_ORDER_IDS") {
        settings.sample_order_ids = split_ids(&v);
    }

    if let Some(v) = env("APP__SYSTEM_CLIPBOARD") {
        match parse_flag(&v) {
            Some(flag) => settings.system_clipboard = flag,
            None => tracing::warn!(value = %v, "ignoring unparseable APP__SYSTEM_CLIPBOARD"),
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = &args.api_url {
        settings.api_base_url = v.clone();
    }

    settings.api_base_url = settings.api_base_url.trim().to_string();
    settings.sample_order_ids.retain(|id| !id.trim().is_empty());

    Ok(settings)
}

fn read_file_settings(path: &Path, required: bool) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
