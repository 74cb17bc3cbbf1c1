pub mod playwright;
pub mod stdio;
pub mod transport;

pub use playwright::PlaywrightBackend;
pub use stdio::StdioTransport;
pub use transport::ToolTransport;
