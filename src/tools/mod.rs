//! Labeler Tools module
//!
//! MCP tool implementations for the nutrition labeler.

pub mod editor;
pub mod export;
pub mod labels;
pub mod preview;
pub mod status;
