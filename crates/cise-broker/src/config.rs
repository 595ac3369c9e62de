//! Broker configuration.

/// Broker configuration.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Maximum topic detail calls in flight for one chapter request
    pub max_detail_parallel: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            max_detail_parallel: 4,
        }
    }
}

impl BrokerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_detail_parallel: std::env::var("BROKER_MAX_DETAIL_PARALLEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
        }
        .normalized()
    }

    /// Clamp values into their usable ranges.
    pub fn normalized(mut self) -> Self {
        self.max_detail_parallel = self.max_detail_parallel.max(1);
        self
    }
}
