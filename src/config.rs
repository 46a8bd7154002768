// Endpoints, timings and storage keys.

/// Delay between a drill-down click and the layer switch; input is ignored meanwhile.
pub const TRANSITION_DELAY_MS: u32 = 500;

/// Number of transaction feed entries kept on screen.
pub const TRANSACTION_RETENTION: usize = 30;

/// localStorage key remembering which wallet connected last.
pub const STORAGE_LAST_WALLET: &str = "gridy_last_wallet";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub transactions: String,
    pub stats: String,
    pub tiles: String,
}

impl Endpoints {
    /// Socket URLs baked in at build time, falling back to a local feed server.
    pub fn from_build_env() -> Self {
        Self {
            transactions: option_env!("GRIDY_WS_TRANSACTION_URL")
                .unwrap_or("ws://localhost:8080/transactions")
                .to_string(),
            stats: option_env!("GRIDY_WS_STATS_URL")
                .unwrap_or("ws://localhost:8080/stats")
                .to_string(),
            tiles: option_env!("GRIDY_WS_TILE_URL")
                .unwrap_or("ws://localhost:8080/tiles")
                .to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_build_env()
    }
}
