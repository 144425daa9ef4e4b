//! Library Builder Tests
//!
//! Tests for:
//! - build_library: row counts, module references, module files on disk
//! - BuildMode: init resets an existing library, update appends to it
//! - Failure paths: compiler failure, unlisted/missing sources, duplicate releases

mod common;

use common::{FakeCompiler, MissingCompiler, SPIRV_MAGIC, build_fixture, metadata, scratch_dir, write_sources};
use shaderlib::{
    BuildMode, BuildOptions, LibraryError, RowCounts, ShaderLibrary, ShaderStage, ShaderVersion, build_library,
};
use uuid::Uuid;

fn options(dir: &std::path::Path, mode: BuildMode) -> BuildOptions {
    BuildOptions {
        mode,
        output: dir.join("shaders.lib"),
        module_dir: dir.join("modules"),
    }
}

// ============================================================================
// Successful Builds
// ============================================================================

#[test]
fn single_stage_build_writes_one_row_per_table() {
    let dir = scratch_dir("single-stage");
    let output = dir.join("shaders.lib");
    let report = build_fixture(&dir, &output, BuildMode::Update, "blit", "1.0.0", &[("blit.comp", "compute")]);

    assert!(report.schema_reset, "a new file gets a schema");
    let library = ShaderLibrary::open(&output).unwrap();
    assert_eq!(
        library.counts().unwrap(),
        RowCounts {
            shaders: 1,
            modules: 1,
            stages: 1
        }
    );

    let version: ShaderVersion = "1.0.0".parse().unwrap();
    let stages = library.stages("blit", version).unwrap();
    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0].stage, ShaderStage::COMPUTE);
    assert_eq!(stages[0].entry_point, "main");
    assert_eq!(stages[0].module_id, report.modules[0].id);

    let code = library.module_code(stages[0].module_id).unwrap().unwrap();
    assert_eq!(&code[..4], &SPIRV_MAGIC);
    assert_eq!(code, std::fs::read(&report.modules[0].module_path).unwrap());
}

#[test]
fn metadata_fields_are_stored() {
    let dir = scratch_dir("metadata-fields");
    let output = dir.join("shaders.lib");
    build_fixture(&dir, &output, BuildMode::Update, "frame", "2.3.4", &[("frame.vert", "vertex")]);

    let shaders = ShaderLibrary::open(&output).unwrap().shaders().unwrap();
    assert_eq!(shaders.len(), 1);
    assert_eq!(shaders[0].name, "frame");
    assert_eq!(shaders[0].version.to_string(), "2.3.4");
    assert_eq!(shaders[0].author, "tests");
    assert_eq!(shaders[0].description, "unspecified");
    assert_eq!(shaders[0].license, "unspecified");
}

#[test]
fn stored_version_is_packed() {
    let dir = scratch_dir("packed-version");
    let output = dir.join("shaders.lib");
    build_fixture(&dir, &output, BuildMode::Update, "frame", "1.2.3", &[("frame.vert", "vertex")]);

    let library = ShaderLibrary::open(&output).unwrap();
    let packed: u32 = library
        .connection()
        .query_row("SELECT version FROM shaders", [], |row| row.get(0))
        .unwrap();
    assert_eq!(packed, (1 << 22) | (2 << 12) | 3);
}

#[test]
fn module_files_are_named_after_sources() {
    let dir = scratch_dir("module-files");
    let output = dir.join("shaders.lib");
    let report = build_fixture(
        &dir,
        &output,
        BuildMode::Update,
        "frame",
        "1.0.0",
        &[("frame.vert", "vertex"), ("frame.frag", "fragment")],
    );

    let names: Vec<String> = report
        .modules
        .iter()
        .map(|m| m.module_path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert_ne!(names[0], names[1]);
    assert!(names.iter().all(|n| n.ends_with(".spv")));
    assert!(report.modules.iter().all(|m| m.module_path.is_file()));
}

#[test]
fn identical_binaries_get_distinct_modules() {
    let dir = scratch_dir("identical-binaries");
    let meta = metadata("twin", "1.0.0", &[("twin.vert", "vertex"), ("twin.frag", "fragment")]);
    let sources = write_sources(&dir, &["twin.vert", "twin.frag"]);
    // Same contents for both stages.
    std::fs::write(&sources[0], "same").unwrap();
    std::fs::write(&sources[1], "same").unwrap();

    let report = build_library(
        &meta,
        &sources,
        &FakeCompiler,
        &mut shaderlib::RandomModuleIds,
        &options(&dir, BuildMode::Update),
    )
    .unwrap();
    assert_ne!(report.modules[0].id, report.modules[1].id);

    let library = ShaderLibrary::open(dir.join("shaders.lib")).unwrap();
    assert_eq!(library.counts().unwrap().modules, 2);
}

#[test]
fn custom_id_generator_is_used() {
    let dir = scratch_dir("custom-ids");
    let meta = metadata("ids", "1.0.0", &[("ids.vert", "vertex"), ("ids.frag", "fragment")]);
    let sources = write_sources(&dir, &["ids.vert", "ids.frag"]);

    let mut next = 0u128;
    let mut ids = || {
        next += 1;
        Uuid::from_u128(next)
    };
    let report = build_library(&meta, &sources, &FakeCompiler, &mut ids, &options(&dir, BuildMode::Update)).unwrap();
    assert_eq!(report.modules[0].id, Uuid::from_u128(1));
    assert_eq!(report.modules[1].id, Uuid::from_u128(2));
}

// ============================================================================
// Build Modes
// ============================================================================

#[test]
fn update_appends_to_existing_library() {
    let dir = scratch_dir("update-appends");
    let output = dir.join("shaders.lib");
    build_fixture(&dir, &output, BuildMode::Update, "a", "1.0.0", &[("a.vert", "vertex")]);
    let second = build_fixture(&dir, &output, BuildMode::Update, "b", "1.0.0", &[("b.frag", "fragment")]);

    assert!(!second.schema_reset);
    let library = ShaderLibrary::open(&output).unwrap();
    assert_eq!(library.counts().unwrap().shaders, 2);
}

#[test]
fn init_discards_existing_library() {
    let dir = scratch_dir("init-resets");
    let output = dir.join("shaders.lib");
    build_fixture(&dir, &output, BuildMode::Update, "a", "1.0.0", &[("a.vert", "vertex")]);
    let second = build_fixture(&dir, &output, BuildMode::Init, "b", "1.0.0", &[("b.frag", "fragment")]);

    assert!(second.schema_reset);
    let shaders = ShaderLibrary::open(&output).unwrap().shaders().unwrap();
    assert_eq!(shaders.len(), 1);
    assert_eq!(shaders[0].name, "b");
}

#[test]
fn update_on_empty_file_creates_schema() {
    let dir = scratch_dir("update-empty-file");
    let output = dir.join("shaders.lib");
    std::fs::write(&output, b"").unwrap();

    let report = build_fixture(&dir, &output, BuildMode::Update, "a", "1.0.0", &[("a.vert", "vertex")]);
    assert!(report.schema_reset);
    assert_eq!(ShaderLibrary::open(&output).unwrap().counts().unwrap().shaders, 1);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn compiler_failure_writes_nothing() {
    let dir = scratch_dir("compiler-failure");
    let meta = metadata("a", "1.0.0", &[("a.vert", "vertex")]);
    let sources = write_sources(&dir, &["a.vert"]);
    let opts = options(&dir, BuildMode::Init);

    let err = build_library(&meta, &sources, &MissingCompiler, &mut shaderlib::RandomModuleIds, &opts).unwrap_err();
    assert!(matches!(err, LibraryError::CompilerLaunch { .. }));
    assert!(!opts.output.exists(), "the library must not be created");
}

#[test]
fn compiler_failure_keeps_existing_library_intact() {
    let dir = scratch_dir("compiler-failure-existing");
    let output = dir.join("shaders.lib");
    build_fixture(&dir, &output, BuildMode::Update, "a", "1.0.0", &[("a.vert", "vertex")]);

    let meta = metadata("b", "1.0.0", &[("b.vert", "vertex")]);
    let sources = write_sources(&dir, &["b.vert"]);
    // Init mode would reset the schema if the build got that far.
    let result = build_library(
        &meta,
        &sources,
        &MissingCompiler,
        &mut shaderlib::RandomModuleIds,
        &options(&dir, BuildMode::Init),
    );
    assert!(result.is_err());
    assert_eq!(ShaderLibrary::open(&output).unwrap().counts().unwrap().shaders, 1);
}

#[test]
fn unlisted_source_is_rejected() {
    let dir = scratch_dir("unlisted-source");
    let meta = metadata("a", "1.0.0", &[("a.vert", "vertex")]);
    let sources = write_sources(&dir, &["a.vert", "a.frag"]);

    let err = build_library(
        &meta,
        &sources,
        &FakeCompiler,
        &mut shaderlib::RandomModuleIds,
        &options(&dir, BuildMode::Update),
    )
    .unwrap_err();
    assert!(matches!(err, LibraryError::UnlistedSource(path) if path.ends_with("a.frag")));
}

#[test]
fn stage_without_source_is_rejected() {
    let dir = scratch_dir("missing-source");
    let meta = metadata("a", "1.0.0", &[("a.vert", "vertex"), ("a.frag", "fragment")]);
    let sources = write_sources(&dir, &["a.vert"]);

    let err = build_library(
        &meta,
        &sources,
        &FakeCompiler,
        &mut shaderlib::RandomModuleIds,
        &options(&dir, BuildMode::Update),
    )
    .unwrap_err();
    assert!(matches!(err, LibraryError::MissingSource(name) if name == "a.frag"));
    assert!(!dir.join("shaders.lib").exists());
}

#[test]
fn rebuilding_same_version_fails_without_partial_rows() {
    let dir = scratch_dir("duplicate-release");
    let output = dir.join("shaders.lib");
    build_fixture(&dir, &output, BuildMode::Update, "a", "1.0.0", &[("a.vert", "vertex")]);

    let meta = metadata("a", "1.0.0", &[("a.vert", "vertex")]);
    let sources = write_sources(&dir, &["a.vert"]);
    let err = build_library(
        &meta,
        &sources,
        &FakeCompiler,
        &mut shaderlib::RandomModuleIds,
        &options(&dir, BuildMode::Update),
    )
    .unwrap_err();
    assert!(matches!(err, LibraryError::Sqlite(_)));

    assert_eq!(
        ShaderLibrary::open(&output).unwrap().counts().unwrap(),
        RowCounts {
            shaders: 1,
            modules: 1,
            stages: 1
        }
    );
}

#[test]
fn same_file_name_twice_is_a_duplicate_source() {
    let dir = scratch_dir("duplicate-source");
    let meta = metadata("x", "1.0.0", &[("x.frag", "fragment")]);
    std::fs::create_dir_all(dir.join("a")).unwrap();
    std::fs::create_dir_all(dir.join("b")).unwrap();
    let mut sources = write_sources(&dir.join("a"), &["x.frag"]);
    sources.extend(write_sources(&dir.join("b"), &["x.frag"]));

    let err = build_library(
        &meta,
        &sources,
        &FakeCompiler,
        &mut shaderlib::RandomModuleIds,
        &options(&dir, BuildMode::Update),
    )
    .unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateSource(path) if path.starts_with(dir.join("b"))));
    assert!(!dir.join("shaders.lib").exists());
}
