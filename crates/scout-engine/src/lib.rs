pub mod backend;
pub mod config;
pub mod flow;
pub mod mcp;
pub mod selector;
pub mod skeleton;
pub mod snapshot;

pub use scout_common::protocol;
pub use scout_common::scenario;
