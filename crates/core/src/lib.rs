//! Solara Core - Shared types library.
//!
//! This crate provides common types used across all Solara components:
//! - `storefront` - Headless storefront API service
//! - `cli` - Command-line tools for migrations and inventory management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
