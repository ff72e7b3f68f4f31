use std::env;
use std::net::SocketAddr;

use anyhow::{ensure, Context, Result};
use hotel_allocator::DEFAULT_OCCUPANCY;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_origin: String,
    pub random_occupancy: f64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origin: "http://localhost:3000".to_string(),
            random_occupancy: DEFAULT_OCCUPANCY,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = match env::var("HOTEL_LISTEN_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("HOTEL_LISTEN_ADDR is not a socket address: {addr}"))?,
            Err(_) => defaults.listen_addr,
        };

        let cors_origin = env::var("HOTEL_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let random_occupancy = match env::var("HOTEL_RANDOM_OCCUPANCY") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("HOTEL_RANDOM_OCCUPANCY is not a number: {value}"))?,
            Err(_) => defaults.random_occupancy,
        };
        ensure!(
            (0.0..=1.0).contains(&random_occupancy),
            "HOTEL_RANDOM_OCCUPANCY must be between 0 and 1, got {random_occupancy}"
        );

        let log_level = env::var("HOTEL_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            listen_addr,
            cors_origin,
            random_occupancy,
            log_level,
        })
    }
}
