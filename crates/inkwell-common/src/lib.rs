//! Inkwell Common - Shared types and utilities
//!
//! This crate provides the validated post title, the error definitions and
//! the configuration types used across all Inkwell components.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
