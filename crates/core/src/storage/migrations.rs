//! Database migration system
//!
//! Tracks schema versions and applies migrations in order, each in its own
//! transaction.

use rusqlite::Connection;
use tracing::{debug, info, instrument};

use crate::error::Result;

/// A database migration
pub struct Migration {
    /// Version number (must be sequential starting from 1)
    pub version: u32,
    /// Description of what this migration does
    pub description: &'static str,
    /// SQL to run for this migration
    pub sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema",
        sql: r#"
            -- Schools table
            CREATE TABLE IF NOT EXISTS schools (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );

            -- One schedule per school
            CREATE TABLE IF NOT EXISTS schedules (
                school_id TEXT PRIMARY KEY,
                opens_at TEXT NOT NULL,
                class_hours_per_day INTEGER NOT NULL,
                class_hour_length_minutes INTEGER NOT NULL,
                lunch_time TEXT NOT NULL,
                lunch_length_minutes INTEGER NOT NULL,
                break_time TEXT NOT NULL,
                break_length_minutes INTEGER NOT NULL,
                FOREIGN KEY (school_id) REFERENCES schools(id) ON DELETE CASCADE
            );

            -- Academic programs table
            CREATE TABLE IF NOT EXISTS academic_programs (
                id TEXT PRIMARY KEY,
                school_id TEXT NOT NULL,
                name TEXT NOT NULL,
                program_type TEXT,
                begins_at TEXT,
                ends_at TEXT,
                FOREIGN KEY (school_id) REFERENCES schools(id) ON DELETE CASCADE
            );

            -- Users table
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                role INTEGER NOT NULL,
                subject TEXT
            );

            -- Programs a user belongs to
            CREATE TABLE IF NOT EXISTS user_programs (
                user_id TEXT NOT NULL,
                program_id TEXT NOT NULL,
                PRIMARY KEY (user_id, program_id),
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                FOREIGN KEY (program_id) REFERENCES academic_programs(id) ON DELETE CASCADE
            );

            -- Class hours table
            CREATE TABLE IF NOT EXISTS class_hours (
                id TEXT PRIMARY KEY,
                academic_program_id TEXT NOT NULL,
                begins_at TEXT NOT NULL,
                ends_at TEXT NOT NULL,
                status TEXT NOT NULL,
                user_id TEXT,
                room_no INTEGER,
                subject TEXT,
                FOREIGN KEY (academic_program_id) REFERENCES academic_programs(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE SET NULL
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add indexes for timetable and room lookups",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_programs_school ON academic_programs(school_id);
            CREATE INDEX IF NOT EXISTS idx_user_programs_program ON user_programs(program_id);

            -- Timetable listing in order
            CREATE INDEX IF NOT EXISTS idx_class_hours_program_begins
                ON class_hours(academic_program_id, begins_at);

            -- Room conflict detection
            CREATE INDEX IF NOT EXISTS idx_class_hours_room_begins
                ON class_hours(room_no, begins_at);
        "#,
    },
];

fn init_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Highest applied version, 0 for a fresh database
pub(super) fn current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

/// Apply one migration and record it, atomically
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.description,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Run all pending migrations
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    init_migrations_table(conn)?;

    let from = current_version(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > from).collect();
    if pending.is_empty() {
        debug!(version = from, "Schema up to date");
        return Ok(());
    }

    for migration in pending {
        info!(
            version = migration.version,
            description = migration.description,
            "Applying migration"
        );
        apply(conn, migration)?;
    }

    info!(from, to = current_version(conn)?, "Database schema updated");
    Ok(())
}
