//! MCP tool implementations
//!
//! Business logic for the tools exposed by the MCP server, organized by
//! presentation surface.

pub mod advice;
pub mod nutrition;
pub mod profile;
