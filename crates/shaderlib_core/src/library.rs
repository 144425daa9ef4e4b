//! Shader library database.
//!
//! [`ShaderLibrary`] owns the single SQLite connection of an invocation.
//! Writes go through transactions: a release (shader, modules, stages) is
//! inserted as one unit, and each merged source is copied as one unit.

use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, params};
use uuid::Uuid;

use crate::errors::{LibraryError, Result};
use crate::schema;
use crate::stage::ShaderStage;
use crate::version::ShaderVersion;

/// Alias under which merge sources are attached.
const MERGE_ALIAS: &str = "to_merge";

const MERGE_ROWS: [&str; 3] = [
    "INSERT INTO main.shaders (name, version, author, description, license)
     SELECT name, version, author, description, license FROM to_merge.shaders",
    "INSERT INTO main.modules (uuid, code)
     SELECT uuid, code FROM to_merge.modules",
    "INSERT INTO main.stages (stage_type, shader_name, shader_version, module_uuid, entry_point)
     SELECT stage_type, shader_name, shader_version, module_uuid, entry_point FROM to_merge.stages",
];

/// A row of the `shaders` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderRecord {
    pub name: String,
    pub version: ShaderVersion,
    pub author: String,
    pub description: String,
    pub license: String,
}

/// A row of the `modules` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub id: Uuid,
    pub code: Vec<u8>,
}

/// One compiled stage of a release, together with the module it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub module: ModuleRecord,
}

/// Everything a single build inserts: one shader and its stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderRelease {
    pub shader: ShaderRecord,
    pub stages: Vec<StageRecord>,
}

/// A row of the `stages` table as read back from a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBinding {
    pub stage: ShaderStage,
    pub module_id: Uuid,
    pub entry_point: String,
}

/// Row counts of the three library tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub shaders: usize,
    pub modules: usize,
    pub stages: usize,
}

impl std::ops::Add for RowCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            shaders: self.shaders + rhs.shaders,
            modules: self.modules + rhs.modules,
            stages: self.stages + rhs.stages,
        }
    }
}

impl std::ops::AddAssign for RowCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ShaderRelease {
    /// Inserts the shader row, one module row per stage and one stage row per stage.
    ///
    /// Does not open a transaction itself; pass a [`Transaction`] to make the
    /// whole release atomic.
    pub fn insert(&self, conn: &Connection) -> Result<()> {
        let shader = &self.shader;
        let version = shader.version.pack();
        conn.execute(
            "INSERT INTO shaders (name, version, author, description, license) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![shader.name, version, shader.author, shader.description, shader.license],
        )?;

        {
            let mut stmt = conn.prepare_cached("INSERT INTO modules (uuid, code) VALUES (?1, ?2)")?;
            for stage in &self.stages {
                stmt.execute(params![stage.module.id.as_bytes().as_slice(), stage.module.code])?;
            }
        }

        {
            let mut stmt = conn.prepare_cached(
                "INSERT INTO stages (stage_type, shader_name, shader_version, module_uuid, entry_point) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for stage in &self.stages {
                stmt.execute(params![
                    stage.stage.bits(),
                    shader.name,
                    version,
                    stage.module.id.as_bytes().as_slice(),
                    stage.entry_point,
                ])?;
            }
        }

        log::info!(
            "Inserted shader {} {} with {} stage(s)",
            shader.name,
            shader.version,
            self.stages.len()
        );
        Ok(())
    }
}

/// An open shader library.
pub struct ShaderLibrary {
    conn: Connection,
}

impl ShaderLibrary {
    /// Opens (or creates) the library file at `path`.
    ///
    /// The schema is not touched; call [`ShaderLibrary::reset`] for a new file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        schema::configure(&conn)?;
        Ok(Self { conn })
    }

    /// Opens a library in memory, with a fresh schema.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::configure(&conn)?;
        let mut library = Self { conn };
        library.reset()?;
        Ok(library)
    }

    /// Drops and recreates all tables atomically.
    pub fn reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        schema::reset(&tx)?;
        tx.commit()?;
        Ok(())
    }

    pub fn has_schema(&self) -> Result<bool> {
        schema::has_schema(&self.conn, "main")
    }

    pub fn format_version(&self) -> Result<i64> {
        schema::format_version(&self.conn, "main")
    }

    /// Starts a transaction on the underlying connection.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Inserts a release in its own transaction.
    pub fn insert_release(&mut self, release: &ShaderRelease) -> Result<()> {
        let tx = self.conn.transaction()?;
        release.insert(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Copies every row of the library at `path` into this one.
    ///
    /// The copy is one transaction: on a key or reference conflict nothing
    /// from `path` is kept and [`LibraryError::MergeConflict`] is returned.
    /// The source is detached again whether or not the copy succeeded.
    pub fn merge_from(&mut self, path: impl AsRef<Path>) -> Result<RowCounts> {
        let path = path.as_ref();
        let attach_path = path
            .to_str()
            .ok_or_else(|| LibraryError::NonUtf8Path(path.to_path_buf()))?;
        self.conn.execute(
            &format!("ATTACH DATABASE ?1 AS {MERGE_ALIAS}"),
            params![attach_path],
        )?;

        let copied = self.copy_attached(path);
        let detached = self.conn.execute(&format!("DETACH DATABASE {MERGE_ALIAS}"), []);

        let copied = copied?;
        detached?;
        log::info!(
            "Merged {}: {} shader(s), {} module(s), {} stage(s)",
            path.display(),
            copied.shaders,
            copied.modules,
            copied.stages
        );
        Ok(copied)
    }

    fn copy_attached(&mut self, path: &Path) -> Result<RowCounts> {
        let version = schema::format_version(&self.conn, MERGE_ALIAS)?;
        if version != 0 && version != schema::FORMAT_VERSION {
            log::warn!(
                "{} has library format version {version}, expected {}",
                path.display(),
                schema::FORMAT_VERSION
            );
        }

        let conflict = |source: rusqlite::Error| match source.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => LibraryError::MergeConflict {
                path: path.to_path_buf(),
                source,
            },
            _ => LibraryError::Sqlite(source),
        };

        let tx = self.conn.transaction()?;
        let [shaders, modules, stages] = MERGE_ROWS;
        let counts = RowCounts {
            shaders: tx.execute(shaders, []).map_err(conflict)?,
            modules: tx.execute(modules, []).map_err(conflict)?,
            stages: tx.execute(stages, []).map_err(conflict)?,
        };
        tx.commit().map_err(conflict)?;
        Ok(counts)
    }

    /// Counts the rows of each table.
    pub fn counts(&self) -> Result<RowCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT count(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n as usize)
        };
        Ok(RowCounts {
            shaders: count("shaders")?,
            modules: count("modules")?,
            stages: count("stages")?,
        })
    }

    /// Lists every shader release, ordered by name then version.
    pub fn shaders(&self) -> Result<Vec<ShaderRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, version, author, description, license FROM shaders ORDER BY name, version",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ShaderRecord {
                name: row.get(0)?,
                version: ShaderVersion::unpack(row.get(1)?),
                author: row.get(2)?,
                description: row.get(3)?,
                license: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Lists the stages of one shader release, ordered by stage bit.
    pub fn stages(&self, name: &str, version: ShaderVersion) -> Result<Vec<StageBinding>> {
        let mut stmt = self.conn.prepare(
            "SELECT stage_type, module_uuid, entry_point FROM stages
             WHERE shader_name = ?1 AND shader_version = ?2 ORDER BY stage_type",
        )?;
        let rows = stmt.query_map(params![name, version.pack()], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut stages = Vec::new();
        for row in rows {
            let (bits, id, entry_point) = row?;
            stages.push(StageBinding {
                stage: ShaderStage::from_bits_retain(bits),
                module_id: module_id_from_blob(&id)?,
                entry_point,
            });
        }
        Ok(stages)
    }

    /// Fetches the code of a module, if present.
    pub fn module_code(&self, id: Uuid) -> Result<Option<Vec<u8>>> {
        let code = self
            .conn
            .query_row(
                "SELECT code FROM modules WHERE uuid = ?1",
                params![id.as_bytes().as_slice()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(code)
    }

    /// Direct access to the connection for ad hoc queries.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn module_id_from_blob(blob: &[u8]) -> Result<Uuid> {
    Uuid::from_slice(blob).map_err(|_| LibraryError::InvalidModuleId(blob.len()))
}
