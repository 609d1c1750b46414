//! Business services over the record store.

pub mod auth;
