use serde::{Deserialize, Serialize};

pub const STATUS_OK: &str = "ok";
pub const STORE_CONNECTED: &str = "connected";
pub const UNKNOWN_HOSTNAME: &str = "unknown";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub hostname: String,
    /// `connected`, or the probe's error message as reported by the driver.
    pub mongodb: String,
}
