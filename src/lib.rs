//! Nutrition Labeler Library
//!
//! Label derivation, persistence, rendering and the MCP tool surface.

pub mod build_info;
pub mod db;
pub mod label;
pub mod mcp;
pub mod models;
pub mod render;
pub mod tools;
