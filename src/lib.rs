//! Shaderlib
//!
//! Offline tooling that packages compiled SPIR-V shaders for a renderer:
//!
//! - [`shaderlib_core`]: the shader library format, and the builder and
//!   merger that write it
//! - [`shaderlib_codegen`]: converters that embed binaries into C++ source
//!
//! The command line front-ends live in the `shaderlib_tools` crate.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub use shaderlib_codegen;
pub use shaderlib_core;

pub use shaderlib_codegen::CodegenError;
pub use shaderlib_core::{
    BuildMode, BuildOptions, BuildReport, ExternalCompiler, LibraryError, MergeReport, ModuleIdGenerator,
    RandomModuleIds, RowCounts, ShaderCompiler, ShaderLibrary, ShaderMetadata, ShaderRelease, ShaderStage,
    ShaderVersion, build_library, merge_libraries,
};
