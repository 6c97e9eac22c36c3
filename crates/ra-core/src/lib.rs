//! ra-core: Core types and traits for the researcher agent
//!
//! This crate provides the foundational types shared across the workspace:
//! the error taxonomy, and the tool trait + registry through which the
//! hosting runtime dispatches tool calls.

pub mod error;
pub mod tool;

pub use error::Error;
pub use tool::{PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters, ToolRegistry};

pub type Result<T> = std::result::Result<T, Error>;
