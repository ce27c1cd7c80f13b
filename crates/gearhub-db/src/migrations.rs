use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY,
            username        TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            role            TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS gears (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            nickname        TEXT NOT NULL,
            gear_id         TEXT NOT NULL,
            image_url       TEXT NOT NULL,
            description     TEXT NOT NULL,
            category        TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS suggestions (
            id                  TEXT PRIMARY KEY,
            name                TEXT NOT NULL,
            nickname            TEXT NOT NULL,
            gear_id             TEXT NOT NULL,
            image_url           TEXT NOT NULL,
            description         TEXT NOT NULL,
            category            TEXT NOT NULL,
            status              TEXT NOT NULL DEFAULT 'Pending',
            approved_gear_id    TEXT REFERENCES gears(id),
            created_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_suggestions_status
            ON suggestions(status);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
