//! Static catalog of SQL templates for the sports table.
//!
//! Templates are unfiltered; `WHERE` clauses are appended by
//! [`super::filter`] and values are always bound, never inlined.

/// Logical name of the unfiltered event listing.
pub const SPORTS_LIST: &str = "list";

/// Queries known to the events repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventsQuery {
    List,
}

impl EventsQuery {
    pub const ALL: [EventsQuery; 1] = [EventsQuery::List];

    /// Catalog name of this query
    pub fn name(self) -> &'static str {
        match self {
            EventsQuery::List => SPORTS_LIST,
        }
    }

    /// SQL template for this query
    pub fn sql(self) -> &'static str {
        match self {
            EventsQuery::List => "SELECT id, name, advertised_start_time FROM sports",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.name() == name)
    }
}

/// Look up a SQL template by its catalog name
pub fn get(name: &str) -> Option<&'static str> {
    EventsQuery::from_name(name).map(EventsQuery::sql)
}
