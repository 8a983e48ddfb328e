//! Sports API
//!
//! Read-only sports events service over a seeded SQLite table. The
//! [`storage`] module is the core; [`routes`] exposes it over HTTP.

pub mod cli;
pub mod config;
pub mod routes;
pub mod storage;
pub mod types;
