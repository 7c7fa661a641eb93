use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Idle time after which a form session is dropped.
    #[serde(rename = "session_ttl_secs")]
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Name shown in the page title and footer.
    #[serde(rename = "app_title")]
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Credited under the title and in the footer.
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_ttl_secs() -> u64 {
    3600
}

fn default_app_title() -> String {
    "Translator Agent".to_string()
}

fn default_author() -> String {
    "Muhammad Samad".to_string()
}

impl SystemConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid host/port {}:{}: {}", self.host, self.port, e))?;
        Ok(addr)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_ttl_secs: default_session_ttl_secs(),
            app_title: default_app_title(),
            author: default_author(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_from_defaults() {
        let cfg = SystemConfig::default();
        assert_eq!(cfg.socket_addr().unwrap().port(), 8501);
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let cfg = SystemConfig {
            host: "not a host".to_string(),
            ..SystemConfig::default()
        };
        assert!(cfg.socket_addr().is_err());
    }
}
