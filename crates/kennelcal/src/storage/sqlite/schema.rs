//! SQL statements used by the SQLite repository.
//!
//! Pure data, no I/O. Datetimes are stored as RFC 3339 text so lexical
//! comparison matches chronological comparison in the window query.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Event series (recurrence templates)
CREATE TABLE IF NOT EXISTS event_series (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    recurrence TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    all_day INTEGER NOT NULL,
    rate REAL NOT NULL,
    dogs TEXT NOT NULL,
    holiday_surcharge INTEGER NOT NULL,
    allow_discount INTEGER NOT NULL,
    taxable INTEGER NOT NULL
);

-- Event occurrences
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    series_id TEXT,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    starts_at TEXT NOT NULL,
    ends_at TEXT NOT NULL,
    all_day INTEGER NOT NULL,
    rate REAL NOT NULL,
    dogs TEXT NOT NULL,
    holiday_surcharge INTEGER NOT NULL,
    allow_discount INTEGER NOT NULL,
    taxable INTEGER NOT NULL,
    FOREIGN KEY (series_id) REFERENCES event_series(id) ON DELETE CASCADE
);

-- Indexes for the feed window query and series lookups
CREATE INDEX IF NOT EXISTS idx_events_user_starts ON events(user_id, starts_at);
CREATE INDEX IF NOT EXISTS idx_events_series_id ON events(series_id);
"#;

// Event queries
pub const INSERT_EVENT: &str = r#"
INSERT INTO events (id, series_id, user_id, title, description, starts_at, ends_at, all_day, rate, dogs, holiday_surcharge, allow_discount, taxable)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
"#;

pub const SELECT_EVENT_BY_ID: &str = r#"
SELECT id, series_id, user_id, title, description, starts_at, ends_at, all_day, rate, dogs, holiday_surcharge, allow_discount, taxable
FROM events
WHERE id = ?1
"#;

/// Half-open overlap: an event is in the window when it starts before
/// the window ends and ends after the window starts.
pub const SELECT_EVENTS_IN_WINDOW: &str = r#"
SELECT id, series_id, user_id, title, description, starts_at, ends_at, all_day, rate, dogs, holiday_surcharge, allow_discount, taxable
FROM events
WHERE user_id = ?1 AND starts_at < ?3 AND ends_at > ?2
ORDER BY starts_at ASC
"#;

pub const SELECT_EVENTS_BY_SERIES: &str = r#"
SELECT id, series_id, user_id, title, description, starts_at, ends_at, all_day, rate, dogs, holiday_surcharge, allow_discount, taxable
FROM events
WHERE series_id = ?1
ORDER BY starts_at ASC
"#;

pub const UPDATE_EVENT: &str = r#"
UPDATE events
SET series_id = ?2, title = ?3, description = ?4, starts_at = ?5, ends_at = ?6, all_day = ?7, rate = ?8, dogs = ?9, holiday_surcharge = ?10, allow_discount = ?11, taxable = ?12
WHERE id = ?1
"#;

pub const DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE id = ?1
"#;

// Series queries
pub const INSERT_SERIES: &str = r#"
INSERT INTO event_series (id, user_id, recurrence, title, description, all_day, rate, dogs, holiday_surcharge, allow_discount, taxable)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
"#;

pub const SELECT_SERIES_BY_ID: &str = r#"
SELECT id, user_id, recurrence, title, description, all_day, rate, dogs, holiday_surcharge, allow_discount, taxable
FROM event_series
WHERE id = ?1
"#;

pub const DELETE_SERIES: &str = r#"
DELETE FROM event_series
WHERE id = ?1
"#;

pub const DELETE_EVENTS_BY_SERIES: &str = r#"
DELETE FROM events
WHERE series_id = ?1
"#;
