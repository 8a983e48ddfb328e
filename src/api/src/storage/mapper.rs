//! Maps `sports` rows into [`Event`] records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Row, Rows};

use super::error::{RepoError, Result, ScanError};
use crate::types::{Event, Timestamp, TimestampError};

/// Columns read by [`map_row`]: id, name, advertised_start_time
pub const EVENT_COLUMNS: usize = 3;

/// Offset-carrying layouts, SQLite's `datetime()` style with a zone suffix
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Zone-less layouts, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Bare dates, read as midnight UTC
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Integers beyond this magnitude are Unix milliseconds, not seconds
const MILLIS_THRESHOLD: u64 = 1_000_000_000_000;

const MAX_FRACTION_DIGITS: usize = 9;

fn fraction_digits(text: &str) -> usize {
    text.split_once('.')
        .map(|(_, rest)| rest.bytes().take_while(u8::is_ascii_digit).count())
        .unwrap_or(0)
}

/// Parse a stored datetime string.
///
/// Fractions finer than nanoseconds are rejected rather than truncated.
pub fn parse_datetime(text: &str) -> std::result::Result<DateTime<Utc>, TimestampError> {
    let text = text.trim();

    if fraction_digits(text) > MAX_FRACTION_DIGITS {
        return Err(TimestampError::TooPrecise(text.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(TimestampError::Unparseable(text.to_string()))
}

/// Convert a stored INTEGER: Unix seconds, or milliseconds past 1e12.
pub fn integer_timestamp(value: i64) -> std::result::Result<Timestamp, TimestampError> {
    if value.unsigned_abs() > MILLIS_THRESHOLD {
        Timestamp::new(
            value.div_euclid(1000),
            value.rem_euclid(1000) * 1_000_000,
        )
    } else {
        Timestamp::new(value, 0)
    }
}

fn column<T: rusqlite::types::FromSql>(row: &Row<'_>, index: usize) -> Result<T> {
    row.get(index)
        .map_err(|source| ScanError::Column { index, source }.into())
}

/// Convert one result row into an [`Event`].
pub fn map_row(row: &Row<'_>) -> Result<Event> {
    let found = row.as_ref().column_count();
    if found != EVENT_COLUMNS {
        return Err(ScanError::ColumnCount {
            expected: EVENT_COLUMNS,
            found,
        }
        .into());
    }

    let id: i64 = column(row, 0)?;
    let name: String = column(row, 1)?;

    let raw = row
        .get_ref(2)
        .map_err(|source| ScanError::Column { index: 2, source })?;

    let converted = match raw {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|_| ScanError::NotUtf8 { index: 2 })?;
            parse_datetime(text).and_then(Timestamp::try_from)
        }
        ValueRef::Integer(value) => integer_timestamp(value),
        other => {
            return Err(ScanError::DateTimeType {
                found: other.data_type(),
            }
            .into())
        }
    };

    let advertised_start_time =
        converted.map_err(|source| RepoError::TimestampConversion { id, source })?;

    Ok(Event {
        id,
        name,
        advertised_start_time,
    })
}

/// Drain `rows` into events. The first bad row aborts the whole scan.
pub fn scan_events(mut rows: Rows<'_>) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    while let Some(row) = rows.next().map_err(RepoError::Query)? {
        events.push(map_row(row)?);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rusqlite::Connection;

    fn scan(conn: &Connection, sql: &str) -> Result<Vec<Event>> {
        let mut stmt = conn.prepare(sql).unwrap();
        let rows = stmt.query([]).unwrap();
        scan_events(rows)
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2024-05-01T12:00:00.5+09:00").unwrap();
        assert_eq!(
            dt,
            Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap() + chrono::Duration::milliseconds(500)
        );
    }

    #[test]
    fn test_parse_sqlite_layouts() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
        assert_eq!(parse_datetime("2024-05-01 03:00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-05-01 03:00:00+00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-05-01 12:00:00+09:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-05-01T03:00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-05-01 03:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-05-01T03:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_only_is_midnight_utc() {
        assert_eq!(
            parse_datetime("2024-05-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_nanosecond_fractions() {
        let dt = parse_datetime("2024-05-01 03:00:00.123456789Z").unwrap();
        assert_eq!(dt.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn test_parse_rejects_sub_nanosecond_fractions() {
        for text in [
            "2024-05-01 03:00:00.1234567891Z",
            "2024-05-01T03:00:00.1234567891+00:00",
            "2024-05-01 03:00:00.1234567891",
        ] {
            assert_eq!(
                parse_datetime(text),
                Err(TimestampError::TooPrecise(text.to_string()))
            );
        }
    }

    #[test]
    fn test_integer_seconds_and_millis() {
        assert_eq!(
            integer_timestamp(1_714_532_400).unwrap(),
            Timestamp::new(1_714_532_400, 0).unwrap()
        );
        // Exactly 1e12 is still seconds, and out of range
        assert_eq!(
            integer_timestamp(1_000_000_000_000),
            Err(TimestampError::OutOfRange(1_000_000_000_000))
        );
        assert_eq!(
            integer_timestamp(1_714_532_400_250).unwrap(),
            Timestamp::new(1_714_532_400, 250_000_000).unwrap()
        );
        // Pre-epoch millis floor toward negative infinity
        assert_eq!(
            integer_timestamp(-1_714_532_400_250).unwrap(),
            Timestamp::new(-1_714_532_401, 750_000_000).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_datetime("next tuesday"),
            Err(TimestampError::Unparseable("next tuesday".to_string()))
        );
    }

    #[test]
    fn test_zero_rows_is_empty_vec() {
        let conn = Connection::open_in_memory().unwrap();
        let events = scan(
            &conn,
            "SELECT 1, 'x', '2024-01-01 00:00:00' WHERE 0",
        )
        .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_maps_text_and_integer_datetimes() {
        let conn = Connection::open_in_memory().unwrap();
        let events = scan(
            &conn,
            "SELECT 1, 'Race A', '2024-01-01T00:00:00.000000123Z'
             UNION ALL SELECT 2, 'Race B', 1700000000",
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, 1);
        assert_eq!(events[0].name, "Race A");
        assert_eq!(events[0].advertised_start_time.nanos(), 123);
        assert_eq!(events[1].advertised_start_time.seconds(), 1_700_000_000);
    }

    #[test]
    fn test_maps_driver_compatible_datetimes() {
        let conn = Connection::open_in_memory().unwrap();
        let events = scan(
            &conn,
            "SELECT 1, 'Race A', '2024-05-01'
             UNION ALL SELECT 2, 'Race B', '2024-05-01T03:00'
             UNION ALL SELECT 3, 'Race C', 1714532400000",
        )
        .unwrap();

        let seconds: Vec<i64> = events
            .iter()
            .map(|e| e.advertised_start_time.seconds())
            .collect();
        assert_eq!(seconds, vec![1_714_521_600, 1_714_532_400, 1_714_532_400]);
    }

    #[test]
    fn test_real_datetime_is_scan_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = scan(&conn, "SELECT 1, 'Race A', 1714532400.5").unwrap_err();
        assert!(matches!(
            err,
            RepoError::Scan(ScanError::DateTimeType { .. })
        ));
    }

    #[test]
    fn test_wrong_column_count() {
        let conn = Connection::open_in_memory().unwrap();
        let err = scan(&conn, "SELECT 1, 'Race A'").unwrap_err();
        assert!(matches!(
            err,
            RepoError::Scan(ScanError::ColumnCount {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_wrong_column_type() {
        let conn = Connection::open_in_memory().unwrap();
        let err = scan(&conn, "SELECT 'one', 'Race A', 0").unwrap_err();
        assert!(matches!(
            err,
            RepoError::Scan(ScanError::Column { index: 0, .. })
        ));
    }

    #[test]
    fn test_null_datetime_is_scan_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = scan(&conn, "SELECT 1, 'Race A', NULL").unwrap_err();
        assert!(matches!(
            err,
            RepoError::Scan(ScanError::DateTimeType { .. })
        ));
    }

    #[test]
    fn test_bad_datetime_aborts_scan() {
        let conn = Connection::open_in_memory().unwrap();
        let err = scan(
            &conn,
            "SELECT 1, 'Race A', '2024-01-01 00:00:00'
             UNION ALL SELECT 2, 'Race B', 'soon'",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RepoError::TimestampConversion {
                id: 2,
                source: TimestampError::Unparseable(_)
            }
        ));
    }

    #[test]
    fn test_out_of_range_datetime() {
        let conn = Connection::open_in_memory().unwrap();
        let err = scan(&conn, "SELECT 9, 'Far future', 253402300800").unwrap_err();
        assert!(matches!(
            err,
            RepoError::TimestampConversion {
                id: 9,
                source: TimestampError::OutOfRange(253_402_300_800)
            }
        ));
    }
}
