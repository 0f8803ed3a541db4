// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Test type recorded when a submission does not name one.
pub const DEFAULT_TEST_TYPE: &str = "detonator_simulator";

/// Placeholder access code for users created implicitly by their first
/// submission. Real codes are issued outside this service.
pub const DEFAULT_ACCESS_CODE: &str = "DEMO_CODE";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            server_port,
            rust_log,
        }
    }
}
