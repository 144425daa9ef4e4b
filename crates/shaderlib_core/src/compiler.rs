//! External shader compiler invocation.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use crate::errors::{LibraryError, Result};

/// Compiler used when none is configured, resolved through `PATH`.
pub const DEFAULT_COMPILER: &str = "glslangValidator";

/// Comma-joined compiler arguments used when none are configured.
pub const DEFAULT_COMPILER_OPTIONS: &str = "--target-env,vulkan1.2,-t,--quiet";

/// Turns one shader source into one SPIR-V module file.
pub trait ShaderCompiler {
    fn compile(&self, source: &Path, output: &Path) -> Result<()>;
}

/// Runs a compiler binary as `<program> <args>... -o <output> <source>`.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Default for ExternalCompiler {
    fn default() -> Self {
        Self::with_options(DEFAULT_COMPILER, DEFAULT_COMPILER_OPTIONS)
    }
}

impl ExternalCompiler {
    pub fn new(program: impl Into<PathBuf>, args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a compiler from a comma-joined option list; empty pieces are dropped.
    pub fn with_options(program: impl Into<PathBuf>, options: &str) -> Self {
        Self::new(program, split_options(options))
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl ShaderCompiler for ExternalCompiler {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg("-o").arg(output).arg(source);
        log::debug!("Running {command:?}");

        let status = command.status().map_err(|source| LibraryError::CompilerLaunch {
            program: self.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(LibraryError::CompilerFailed {
                program: self.program.clone(),
                source_file: source.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}

/// Splits a comma-joined argument list.
#[must_use]
pub fn split_options(options: &str) -> Vec<String> {
    options
        .split(',')
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

/// File name a compiled module is written under.
///
/// Directory components of `source` are folded into the name with `_`, so
/// sources from different directories do not collide in one module
/// directory. Root, `.` and `..` components are dropped.
///
/// `shaders/foo.frag` becomes `shaders_foo.frag.spv`.
#[must_use]
pub fn module_file_name(source: &Path) -> String {
    let parts: Vec<String> = source
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("{}.spv", parts.join("_"))
}
