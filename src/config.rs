use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            max_file_size: default_max_file_size(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let mut config = Config::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("Invalid SERVER_HOST: {}", host))?;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid SERVER_PORT: {}", port))?;
        }
        if let Ok(size) = std::env::var("MAX_FILE_SIZE") {
            config.max_file_size = size
                .parse()
                .with_context(|| format!("Invalid MAX_FILE_SIZE: {}", size))?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
