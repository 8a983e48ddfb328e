//! Seed data for the sports table.
//!
//! Seeding is pluggable: the repository runs whatever [`Seeder`] it was
//! built with, once. [`FixtureSeeder`] inserts a fixed list of events and
//! is what the server uses with [`sample_events`].

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection, Result};
use tracing::warn;

use crate::types::{Event, Timestamp};

const SPORTS: [&str; 8] = [
    "Football",
    "Basketball",
    "Tennis",
    "Cricket",
    "Rugby League",
    "Ice Hockey",
    "Baseball",
    "Volleyball",
];

const ROUNDS: [&str; 5] = ["Round 1", "Round 2", "Quarter Final", "Semi Final", "Final"];

/// One-time population of the sports table.
///
/// Runs inside the transaction that created the schema.
pub trait Seeder: Send + Sync {
    fn seed(&self, conn: &Connection) -> Result<()>;
}

impl<F> Seeder for F
where
    F: Fn(&Connection) -> Result<()> + Send + Sync,
{
    fn seed(&self, conn: &Connection) -> Result<()> {
        self(conn)
    }
}

/// Inserts a fixed set of events, skipping ids that already exist
#[derive(Debug, Clone, Default)]
pub struct FixtureSeeder {
    events: Vec<Event>,
}

impl FixtureSeeder {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl Seeder for FixtureSeeder {
    fn seed(&self, conn: &Connection) -> Result<()> {
        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO sports (id, name, advertised_start_time) VALUES (?1, ?2, ?3)",
        )?;

        for event in &self.events {
            stmt.execute(params![
                event.id,
                event.name,
                format_start_time(event.advertised_start_time),
            ])?;
        }

        Ok(())
    }
}

/// Stored text form: RFC 3339 in UTC with full nanosecond precision
pub fn format_start_time(ts: Timestamp) -> String {
    ts.to_datetime().to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

const SPACING_MINUTES: i64 = 90;

/// `count` example events with ids from 1, starting a day before `now`
/// and spaced 90 minutes apart.
///
/// The list stops early at the first start time a [`Timestamp`] cannot
/// hold, so it may be shorter than `count`.
pub fn sample_events(count: usize, now: DateTime<Utc>) -> Vec<Event> {
    let first = now.checked_sub_signed(Duration::days(1));
    let mut events = Vec::new();

    for i in 0..count {
        let Ok(n) = i64::try_from(i) else { break };
        let start = n
            .checked_mul(SPACING_MINUTES)
            .and_then(Duration::try_minutes)
            .zip(first)
            .and_then(|(offset, first)| first.checked_add_signed(offset));

        let Some(advertised_start_time) = start.and_then(|s| Timestamp::try_from(s).ok()) else {
            warn!(
                "Sample events truncated to {} of {}: start time out of range",
                i, count
            );
            break;
        };

        let sport = SPORTS[i % SPORTS.len()];
        let round = ROUNDS[(i / SPORTS.len()) % ROUNDS.len()];
        events.push(Event {
            id: n + 1,
            name: format!("{} {}", sport, round),
            advertised_start_time,
        });
    }

    events
}
