//! Library builder.
//!
//! Compiles every source of one shader release and records the release in a
//! library file. All compilation happens before the database is opened, and
//! the database write (including a schema reset in init mode) is a single
//! transaction, so a failed build never leaves a partial release behind.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::compiler::{ShaderCompiler, module_file_name};
use crate::errors::{LibraryError, Result};
use crate::ids::ModuleIdGenerator;
use crate::library::{ModuleRecord, ShaderLibrary, ShaderRecord, ShaderRelease, StageRecord};
use crate::metadata::ShaderMetadata;
use crate::schema;
use crate::stage::ShaderStage;
use crate::version::ShaderVersion;

/// Library file written when none is configured.
pub const DEFAULT_OUTPUT: &str = "shaders.lib";

/// How the builder treats an existing library file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Recreate the schema, discarding whatever the file held.
    Init,
    /// Append to the existing schema.
    #[default]
    Update,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub mode: BuildMode,
    /// Library file to write.
    pub output: PathBuf,
    /// Directory compiled modules are written to.
    pub module_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mode: BuildMode::Update,
            output: PathBuf::from(DEFAULT_OUTPUT),
            module_dir: PathBuf::from("."),
        }
    }
}

/// A compiled stage, as recorded by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltModule {
    pub source: PathBuf,
    pub module_path: PathBuf,
    pub stage: ShaderStage,
    pub id: Uuid,
}

/// Summary of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub shader: String,
    pub version: ShaderVersion,
    /// Whether the schema was (re)created by this build.
    pub schema_reset: bool,
    pub modules: Vec<BuiltModule>,
}

/// Compiles `sources` and inserts the release described by `metadata`.
///
/// Every source must have an entry in `metadata.stages` (matched by file
/// name), and every entry must be matched by exactly one source.
pub fn build_library(
    metadata: &ShaderMetadata,
    sources: &[PathBuf],
    compiler: &dyn ShaderCompiler,
    ids: &mut dyn ModuleIdGenerator,
    options: &BuildOptions,
) -> Result<BuildReport> {
    metadata.validate()?;
    check_sources(metadata, sources)?;

    std::fs::create_dir_all(&options.module_dir)?;

    let mut stages = Vec::with_capacity(sources.len());
    let mut modules = Vec::with_capacity(sources.len());
    for source in sources {
        let entry = metadata.stage_for(source)?;
        let stage = entry.stage()?;
        let module_path = options.module_dir.join(module_file_name(source));

        compiler.compile(source, &module_path)?;
        let code = std::fs::read(&module_path)?;
        let id = ids.next_id();
        log::info!(
            "Compiled {} ({}) -> {} [{} bytes]",
            source.display(),
            entry.stage_type,
            module_path.display(),
            code.len()
        );

        stages.push(StageRecord {
            stage,
            entry_point: entry.entry.clone(),
            module: ModuleRecord { id, code },
        });
        modules.push(BuiltModule {
            source: source.clone(),
            module_path,
            stage,
            id,
        });
    }

    let release = ShaderRelease {
        shader: ShaderRecord {
            name: metadata.name.clone(),
            version: metadata.version,
            author: metadata.author.clone(),
            description: metadata.description.clone(),
            license: metadata.license.clone(),
        },
        stages,
    };

    let schema_reset = write_release(&release, options)?;

    Ok(BuildReport {
        shader: metadata.name.clone(),
        version: metadata.version,
        schema_reset,
        modules,
    })
}

/// Pairs sources with metadata entries, rejecting gaps and double matches.
fn check_sources(metadata: &ShaderMetadata, sources: &[PathBuf]) -> Result<()> {
    let mut matched = BTreeSet::new();
    for source in sources {
        metadata.stage_for(source)?;
        if !matched.insert(file_name(source)) {
            return Err(LibraryError::DuplicateSource(source.clone()));
        }
    }

    if let Some(missing) = metadata
        .stages
        .keys()
        .find(|name| !matched.contains(name.as_str()))
    {
        return Err(LibraryError::MissingSource(missing.clone()));
    }
    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

/// Writes the release, resetting the schema first when needed.
///
/// Returns whether the schema was reset.
fn write_release(release: &ShaderRelease, options: &BuildOptions) -> Result<bool> {
    let existed = options.output.is_file();
    let mut library = ShaderLibrary::open(&options.output)?;

    let reset = match options.mode {
        BuildMode::Init => true,
        BuildMode::Update if !existed => true,
        BuildMode::Update => !library.has_schema()?,
    };
    if reset {
        log::info!("Creating shader library schema in {}", options.output.display());
    }

    let tx = library.transaction()?;
    if reset {
        schema::reset(&tx)?;
    }
    release.insert(&tx)?;
    tx.commit()?;
    Ok(reset)
}
