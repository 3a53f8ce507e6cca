use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub debug: bool,
    pub media_root: PathBuf,
    pub media_url: String,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8000".to_string(),
            database_url: None,
            database_max_connections: 10,
            debug: false,
            media_root: PathBuf::from("media"),
            media_url: "/media/".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
            cors_allowed_origins: Vec::new(),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Self::default();

        let log_format = match get_env_opt("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {}",
                    other
                )))
            }
        };

        Ok(Self {
            server_address: get_env_opt("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            database_url: get_env_opt("DATABASE_URL"),
            database_max_connections: get_env_parse("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(defaults.database_max_connections),
            debug: get_env_bool("DEBUG")?.unwrap_or(defaults.debug),
            media_root: get_env_opt("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.media_root),
            media_url: normalize_media_url(
                get_env_opt("MEDIA_URL").unwrap_or(defaults.media_url),
            ),
            max_upload_bytes: get_env_parse("MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            cors_allowed_origins: get_env_opt("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            log_format,
        })
    }

    /// Path prefix for serving media from this process, if `media_url` is not absolute.
    pub fn media_mount_path(&self) -> Option<&str> {
        if !self.media_url.starts_with('/') {
            return None;
        }
        let trimmed = self.media_url.trim_end_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

fn normalize_media_url(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{}/", url)
    }
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_opt(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
        })
        .transpose()
}

fn get_env_bool(name: &str) -> Result<Option<bool>> {
    get_env_opt(name)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(Error::Config(format!(
                "Invalid value for {}: {}",
                name, other
            ))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_mount_path_strips_trailing_slash() {
        let config = Config::default();
        assert_eq!(config.media_mount_path(), Some("/media"));
    }

    #[test]
    fn absolute_media_url_is_not_mounted() {
        let config = Config {
            media_url: "https://cdn.example.com/media/".into(),
            ..Config::default()
        };
        assert_eq!(config.media_mount_path(), None);
    }

    #[test]
    fn media_url_gets_trailing_slash() {
        assert_eq!(normalize_media_url("/files".into()), "/files/");
        assert_eq!(normalize_media_url("/files/".into()), "/files/");
    }
}
