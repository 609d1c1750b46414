//! Dispatch server library.
//!
//! This crate provides the dispatch functionality as a library,
//! allowing it to be tested and reused from the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod maps;
pub mod models;
pub mod nav;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
