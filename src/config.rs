use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::logging::{log_info, log_warning};

pub const SERVER_CONFIG_PATH: &str = "conf/server.conf";
pub const CLIENT_CONFIG_PATH: &str = "conf/client.conf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of recent games listed by the server.
    pub game_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            game_count: 10,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            timeout: 30,
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_str_config(&content))
    }

    fn from_str_config(content: &str) -> Self {
        let config_map = parse_config(content);
        let defaults = Self::default();

        let host = config_map.get("host").cloned().unwrap_or(defaults.host);

        let port = config_map
            .get("port")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let timeout = config_map
            .get("timeout")
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(defaults.timeout);

        ClientConfig { host, port, timeout }
    }

    pub fn load_or_default(config_path: &str) -> Self {
        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded client configuration from {config_path}"));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load client config from {config_path}: {e}. Using defaults."
                ));
                Self::default()
            }
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_str_config(&content))
    }

    fn from_str_config(content: &str) -> Self {
        let config_map = parse_config(content);
        let defaults = Self::default();

        let host = config_map.get("host").cloned().unwrap_or(defaults.host);

        let port = config_map
            .get("port")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let game_count = config_map
            .get("game_count")
            .and_then(|c| c.parse::<usize>().ok())
            .unwrap_or(defaults.game_count);

        ServerConfig { host, port, game_count }
    }

    pub fn load_or_default(config_path: &str) -> Self {
        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded configuration from {config_path}"));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load config from {config_path}: {e}. Using defaults."
                ));
                Self::default()
            }
        }
    }
}

fn parse_config(content: &str) -> HashMap<String, String> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            config.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let content = r#"
            # This is a comment
            host = 192.168.1.100
            port = 8080
            # Another comment
            game_count = 50
        "#;

        let config = parse_config(content);
        assert_eq!(config.get("host"), Some(&"192.168.1.100".to_string()));
        assert_eq!(config.get("port"), Some(&"8080".to_string()));
        assert_eq!(config.get("game_count"), Some(&"50".to_string()));
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.game_count, 10);
    }

    #[test]
    fn test_server_config_from_content() {
        let config = ServerConfig::from_str_config("port = 9000\ngame_count = 3\n");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.game_count, 3);
    }

    #[test]
    fn test_server_config_bad_values_use_defaults() {
        let config = ServerConfig::from_str_config("port = http\ngame_count = -1\n");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_server_config_missing_file() {
        assert!(ServerConfig::from_file("conf/does-not-exist.conf").is_err());
        assert_eq!(
            ServerConfig::load_or_default("conf/does-not-exist.conf"),
            ServerConfig::default()
        );
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_client_config_server_url() {
        let config = ClientConfig {
            host: "192.168.1.100".to_string(),
            port: 8080,
            timeout: 30,
        };
        assert_eq!(config.server_url(), "http://192.168.1.100:8080");
    }
}
