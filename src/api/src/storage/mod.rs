//! SQLite storage for sports events
//!
//! Read path: [`queries`] supplies the base SQL, [`filter`] appends bound
//! `WHERE` clauses, [`mapper`] turns rows into events. [`repository`] ties
//! these together behind the one-shot seeding in [`seed`].

pub mod error;
pub mod filter;
pub mod mapper;
pub mod queries;
pub mod repository;
pub mod schema;
pub mod seed;

pub use error::{InitError, RepoError, ScanError};
pub use repository::{PoolConfig, SportsRepo, SqliteSportsRepo};
pub use seed::{sample_events, FixtureSeeder, Seeder};
