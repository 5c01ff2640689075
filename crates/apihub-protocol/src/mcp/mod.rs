//! MCP (Model Context Protocol) type definitions.

pub mod initialize;
pub mod ping;
pub mod tools;

pub use initialize::*;
pub use ping::*;
pub use tools::*;

/// MCP protocol method names.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const NOTIFICATIONS_INITIALIZED: &str = "notifications/initialized";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
    pub const PING: &str = "ping";

    /// Prefix shared by all client notifications.
    pub const NOTIFICATION_PREFIX: &str = "notifications/";
}
