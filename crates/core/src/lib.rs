//! Dispatch Core - Shared types library.
//!
//! This crate provides common types used across all Dispatch components:
//! - `server` - Route planning and dispatch API
//! - `cli` - Command-line tools for seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
