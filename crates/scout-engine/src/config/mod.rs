pub mod loader;
pub mod schema;

pub use loader::{BASE_URL_ENV, ConfigError, ConfigLoader};
pub use schema::{McpConfig, ScoutConfig, ToolNames};
