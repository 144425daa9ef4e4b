//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use shaderlib::shaderlib_core::errors::Result;
use shaderlib::{BuildMode, BuildOptions, LibraryError, ShaderCompiler, ShaderMetadata, build_library};
use uuid::Uuid;

/// SPIR-V magic number, little-endian.
pub const SPIRV_MAGIC: [u8; 4] = [0x03, 0x02, 0x23, 0x07];

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shaderlib-{name}-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// "Compiles" by prefixing the source text with the SPIR-V magic number.
pub struct FakeCompiler;

impl ShaderCompiler for FakeCompiler {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        let mut code = SPIRV_MAGIC.to_vec();
        code.extend(std::fs::read(source)?);
        std::fs::write(output, code)?;
        Ok(())
    }
}

/// Fails like a compiler that is not installed.
pub struct MissingCompiler;

impl ShaderCompiler for MissingCompiler {
    fn compile(&self, _source: &Path, _output: &Path) -> Result<()> {
        Err(LibraryError::CompilerLaunch {
            program: PathBuf::from("glslangValidator"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
        })
    }
}

/// Writes a metadata document for `name` with one entry per `(file, stage type)`.
pub fn metadata(name: &str, version: &str, stages: &[(&str, &str)]) -> ShaderMetadata {
    let stages: serde_json::Map<String, serde_json::Value> = stages
        .iter()
        .map(|(file, ty)| {
            (
                (*file).to_string(),
                serde_json::json!({ "type": ty, "entry": "main" }),
            )
        })
        .collect();
    serde_json::json!({
        "name": name,
        "version": version,
        "author": "tests",
        "stages": stages,
    })
    .to_string()
    .parse()
    .unwrap()
}

/// Writes one source file per stage into `dir` and returns their paths.
pub fn write_sources(dir: &Path, files: &[&str]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|file| {
            let path = dir.join(file);
            std::fs::write(&path, format!("// {file}\nvoid main() {{}}\n")).unwrap();
            path
        })
        .collect()
}

/// Builds a library at `output` holding one shader with the given stages.
pub fn build_fixture(
    dir: &Path,
    output: &Path,
    mode: BuildMode,
    name: &str,
    version: &str,
    stages: &[(&str, &str)],
) -> shaderlib::BuildReport {
    let meta = metadata(name, version, stages);
    let files: Vec<&str> = stages.iter().map(|(file, _)| *file).collect();
    let sources = write_sources(dir, &files);
    let options = BuildOptions {
        mode,
        output: output.to_path_buf(),
        module_dir: dir.join("modules"),
    };
    build_library(&meta, &sources, &FakeCompiler, &mut shaderlib::RandomModuleIds, &options).unwrap()
}
