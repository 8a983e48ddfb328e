//! Compiles a list filter into a parameterised query.
//!
//! Clauses are collected in order alongside their bound values and joined
//! with `AND` behind a single `WHERE`. Placeholders are positional `?`
//! slots; filter values never reach the SQL text.

use rusqlite::types::Value;

use crate::types::ListEventsRequestFilter;

/// Final SQL text plus the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Ordered clause fragments with a parallel list of bound values.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    base: &'a str,
    clauses: Vec<String>,
    args: Vec<Value>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(base: &'a str) -> Self {
        Self {
            base,
            clauses: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Append `column IN (?, ...)`. An empty value set adds nothing.
    pub fn where_in<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let start = self.args.len();
        self.args.extend(values.into_iter().map(Into::into));
        let count = self.args.len() - start;

        if count > 0 {
            let placeholders = vec!["?"; count].join(", ");
            self.clauses.push(format!("{} IN ({})", column, placeholders));
        }
        self
    }

    pub fn build(self) -> CompiledQuery {
        let sql = if self.clauses.is_empty() {
            self.base.to_string()
        } else {
            format!("{} WHERE {}", self.base, self.clauses.join(" AND "))
        };

        CompiledQuery {
            sql,
            args: self.args,
        }
    }
}

/// Apply `filter` to `base`.
///
/// A missing filter, or one with no populated fields, leaves `base`
/// untouched and binds nothing.
pub fn compile(base: &str, filter: Option<&ListEventsRequestFilter>) -> CompiledQuery {
    let builder = QueryBuilder::new(base);

    let Some(filter) = filter else {
        return builder.build();
    };

    builder.where_in("id", filter.ids.iter().copied()).build()
}
