//! Core abstractions for client-intel
//!
//! This crate defines the `Tool` trait every tool handler implements, the
//! `ToolCatalog` a server dispatches through, and the error taxonomy shared
//! across the tool-invocation boundary.

pub mod error;
pub mod tool;

pub use error::{ErrorDescriptor, ErrorKind, Result, ToolError};
pub use tool::{Tool, ToolCatalog, parse_params};
