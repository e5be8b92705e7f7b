// ABOUTME: MCP server for jazz-structured prompt enhancement
// ABOUTME: Wires the core synthesizer into rmcp tools over stdio and streamable HTTP

pub mod config;
pub mod error;
pub mod handlers;
#[cfg(feature = "server-http")]
pub mod http_server;
pub mod server;

pub use config::*;
pub use error::*;
#[cfg(feature = "server-http")]
pub use http_server::*;
pub use server::*;
