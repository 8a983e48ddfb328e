//! Error types for the events repository

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::types::Type;
use thiserror::Error;

use crate::types::TimestampError;

/// Result rows did not have the shape the mapper expects
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("column {index} could not be read")]
    Column {
        index: usize,
        #[source]
        source: rusqlite::Error,
    },
    #[error("column {index} is not valid UTF-8 text")]
    NotUtf8 { index: usize },
    #[error("advertised start time stored as {found}, expected text or integer")]
    DateTimeType { found: Type },
}

#[derive(Debug, Error)]
enum InitCause {
    #[error("no database connection available")]
    Pool(#[source] r2d2::Error),
    #[error("sqlite statement failed")]
    Sqlite(#[source] rusqlite::Error),
}

/// Failure captured by the first `init` and replayed to later callers
#[derive(Debug, Clone, Error)]
#[error("seeding the sports table failed")]
pub struct InitError {
    #[source]
    source: Arc<InitCause>,
}

impl From<rusqlite::Error> for InitError {
    fn from(err: rusqlite::Error) -> Self {
        Self {
            source: Arc::new(InitCause::Sqlite(err)),
        }
    }
}

impl From<r2d2::Error> for InitError {
    fn from(err: r2d2::Error) -> Self {
        Self {
            source: Arc::new(InitCause::Pool(err)),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("failed to create database directory {path}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to get a sports database connection")]
    Connection(#[source] r2d2::Error),

    #[error("query execution failed")]
    Query(#[source] rusqlite::Error),

    #[error("malformed event row")]
    Scan(#[from] ScanError),

    #[error("event {id} has an unrepresentable advertised start time")]
    TimestampConversion {
        id: i64,
        #[source]
        source: TimestampError,
    },

    #[error(transparent)]
    Init(#[from] InitError),
}

pub type Result<T> = std::result::Result<T, RepoError>;
