//! Shared utilities for client-intel
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and `.env`/environment loading.

pub mod env;
pub mod logging;

pub use env::{load_dotenv, non_empty_var};
pub use logging::{LogFormat, init_tracing};
