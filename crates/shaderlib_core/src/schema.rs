//! Shader library schema.
//!
//! Three tables make up a library:
//!
//! | Table | Key | References |
//! |-------|-----|------------|
//! | `shaders` | `(name, version)` | |
//! | `modules` | `uuid` | |
//! | `stages`  | `(stage_type, shader_name, shader_version)` | `shaders`, `modules` |
//!
//! `stages` is additionally unique on `(module_uuid, entry_point)`. Column
//! order is part of the on-disk format and must not change.

use rusqlite::Connection;

use crate::errors::Result;

/// Library format version, stored in `PRAGMA user_version`.
pub const FORMAT_VERSION: i64 = 1;

/// Drops every library table, children first.
const DROP_TABLES: &str = "
    DROP TABLE IF EXISTS stages;
    DROP TABLE IF EXISTS modules;
    DROP TABLE IF EXISTS shaders;
";

const CREATE_TABLES: &str = "
    CREATE TABLE shaders (
        name TEXT NOT NULL,
        version INTEGER NOT NULL,
        author TEXT NOT NULL DEFAULT 'unknown',
        description TEXT NOT NULL DEFAULT 'unspecified',
        license TEXT NOT NULL DEFAULT 'unspecified',

        PRIMARY KEY (name, version)
    );

    CREATE TABLE modules (
        uuid BLOB NOT NULL,
        code BLOB NOT NULL,

        PRIMARY KEY (uuid)
    );

    CREATE TABLE stages (
        stage_type INTEGER NOT NULL,
        shader_name TEXT NOT NULL,
        shader_version INTEGER NOT NULL,
        module_uuid BLOB NOT NULL,
        entry_point TEXT NOT NULL DEFAULT 'main',

        FOREIGN KEY (shader_name, shader_version) REFERENCES shaders (name, version),
        FOREIGN KEY (module_uuid) REFERENCES modules (uuid),
        PRIMARY KEY (stage_type, shader_name, shader_version),

        UNIQUE (module_uuid, entry_point)
    );
";

/// Applies per-connection settings every library connection needs.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

/// Drops and recreates all library tables.
///
/// Idempotent: calling it on an empty file, an existing library or a file
/// left over from an older format all produce the same empty schema. Pass a
/// `Transaction` to make the reset part of a larger atomic write.
pub fn reset(conn: &Connection) -> Result<()> {
    conn.execute_batch(DROP_TABLES)?;
    conn.execute_batch(CREATE_TABLES)?;
    conn.execute_batch(&format!("PRAGMA user_version = {FORMAT_VERSION};"))?;
    log::debug!("Shader library schema reset (format version {FORMAT_VERSION})");
    Ok(())
}

/// Whether all three library tables exist in `schema` (`main`, or an attached alias).
pub fn has_schema(conn: &Connection, schema: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        &format!(
            "SELECT count(*) FROM {schema}.sqlite_master \
             WHERE type = 'table' AND name IN ('shaders', 'modules', 'stages')"
        ),
        [],
        |row| row.get(0),
    )?;
    Ok(count == 3)
}

/// Reads the format version stamped into `schema`.
///
/// Libraries written before the version stamp existed report `0`.
pub fn format_version(conn: &Connection, schema: &str) -> Result<i64> {
    let version = conn.query_row(&format!("PRAGMA {schema}.user_version"), [], |row| {
        row.get(0)
    })?;
    Ok(version)
}
