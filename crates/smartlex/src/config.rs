use std::path::PathBuf;

use anyhow::{anyhow, Result};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_DATA_DIR: &str = "data";

pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let api_key = load_api_key()?;
        let model = std::env::var("SMARTLEX_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let data_dir = std::env::var("SMARTLEX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        Ok(Self {
            api_key,
            model,
            data_dir,
        })
    }
}

pub fn load_api_key() -> Result<String> {
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        return Ok(key);
    }
    load_env_file_if_present(".env");
    std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow!("GEMINI_API_KEY not found. Please set it as an environment variable"))
}

/// Best-effort .env loading so keys don't require shell exports.
pub fn load_dotenv() {
    load_env_file_if_present(".env");
    load_env_file_if_present("../.env");
}

fn load_env_file_if_present(path: &str) {
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if !key.is_empty() && std::env::var(key).is_err() {
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}
