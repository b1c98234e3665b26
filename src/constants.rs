//! Application constants and configuration defaults.
//!
//! This module centralizes hardcoded values so they are easy to adjust.

/// Tutorial resource constants
pub mod tutorial {
    /// Maximum title length in characters.
    ///
    /// Matches `VARCHAR(255)` in the tutorials table and the `length(max = 255)`
    /// rule on `TutorialRequest`.
    pub const MAX_TITLE_LENGTH: usize = 255;
}

/// HTTP surface constants
pub mod api {
    /// Mount point of the tutorial collection
    pub const TUTORIALS_PATH: &str = "/api/tutorials";

    /// Correlation header echoed on every response
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// Database pool defaults
pub mod database {
    /// Default maximum pool size
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

    /// Minimum idle connections kept open
    pub const MIN_CONNECTIONS: u32 = 1;

    /// Seconds to wait for a free connection
    pub const ACQUIRE_TIMEOUT_SECS: u64 = 3;

    /// Seconds before an idle connection is closed
    pub const IDLE_TIMEOUT_SECS: u64 = 180;

    /// Per-statement timeout applied on connect
    pub const STATEMENT_TIMEOUT: &str = "15s";
}

/// Server defaults
pub mod server {
    pub const DEFAULT_PORT: u16 = 8080;

    /// Request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}
