//! MCP server
//!
//! Tool routing and server info over the Model Context Protocol.

pub mod server;

pub use server::LabelerService;
