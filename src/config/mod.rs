use anyhow::{anyhow, Result};
use std::path::PathBuf;
use url::Url;

const DEFAULT_FEED_API_URL: &str = "https://final-api-sn9c.onrender.com/api";
const DEFAULT_PREFS_PATH: &str = "faceboinks-prefs.redb";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub feed_api_url: Url,
    pub prefs_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let raw_url = env_or("FEED_API_URL", DEFAULT_FEED_API_URL);
        let feed_api_url =
            Url::parse(&raw_url).map_err(|err| anyhow!("invalid FEED_API_URL: {}", err))?;
        if !matches!(feed_api_url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "invalid FEED_API_URL: unsupported scheme {}",
                feed_api_url.scheme()
            ));
        }

        Ok(Self {
            feed_api_url,
            prefs_path: PathBuf::from(env_or("PREFS_PATH", DEFAULT_PREFS_PATH)),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
