//! Built-in shader translation units.
//!
//! Turns a set of SPIR-V binaries into one C++ source file. Each binary
//! becomes a byte array plus a `get_builtin_shader_binary` specialization
//! keyed by `(shader name, stage bit)`, so an engine can link its built-in
//! shaders in without reading a library at runtime.
//!
//! Stages are inferred from the file name: `blit.frag.spv` is the fragment
//! stage of shader `blit`, and so is `blit.frag.glsl.spv`.

use std::path::Path;

use serde::Serialize;
use shaderlib_core::ShaderStage;

use crate::errors::{CodegenError, Result};
use crate::templates;

/// Shading-language tags that may follow the stage suffix.
const LANGUAGE_TAGS: [&str; 2] = ["glsl", "hlsl"];

/// Registration value for binaries whose stage suffix is not recognized.
const UNKNOWN_STAGE_BIT: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinSourceOptions {
    /// Header declaring `builtin_shader_name` and `get_builtin_shader_binary`.
    pub include: String,
    /// Namespace the specializations are emitted into.
    pub cpp_namespace: String,
}

impl Default for BuiltinSourceOptions {
    fn default() -> Self {
        Self {
            include: "builtin_shaders.hpp".to_string(),
            cpp_namespace: "detail".to_string(),
        }
    }
}

/// One binary, with the names derived for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltinBinary {
    pub shader_name: String,
    /// Stage suffix taken from the file name (`frag`, `vert`, ...).
    pub stage_suffix: String,
    /// Name of the emitted array, without the `sg_` prefix.
    pub array_name: String,
    /// `VK_SHADER_STAGE_*_BIT`, or `0` for unknown suffixes.
    pub stage_bit: &'static str,
    pub code: Vec<u8>,
}

impl BuiltinBinary {
    /// Derives names from `path` and pairs them with `code`.
    ///
    /// `shader_name` overrides the shader name otherwise inferred from the file.
    pub fn new(path: &Path, code: Vec<u8>, shader_name: Option<&str>) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CodegenError::InvalidInput(format!("no file name in {}", path.display())))?;

        let parts: Vec<&str> = stem.split('.').collect();
        let stage_index = stage_index(&parts);
        let stage_suffix = parts[stage_index];

        let shader_name = match shader_name.filter(|name| !name.is_empty()) {
            Some(name) => sanitize(name),
            None => infer_shader_name(&parts, stage_index),
        };
        let stage_bit = ShaderStage::from_abbreviation(stage_suffix)
            .and_then(ShaderStage::vulkan_bit_name)
            .unwrap_or(UNKNOWN_STAGE_BIT);

        Ok(Self {
            array_name: format!("{shader_name}_{}", sanitize(stage_suffix)),
            shader_name,
            stage_suffix: stage_suffix.to_string(),
            stage_bit,
            code,
        })
    }

    /// Reads the binary at `path`.
    pub fn from_path(path: impl AsRef<Path>, shader_name: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let code = std::fs::read(path)?;
        Self::new(path, code, shader_name)
    }

    /// Identifier of the emitted array.
    #[must_use]
    pub fn static_name(&self) -> String {
        format!("sg_{}", self.array_name)
    }
}

/// Index of the stage suffix among the dot-separated parts of a file stem.
fn stage_index(parts: &[&str]) -> usize {
    let last = parts.len() - 1;
    if last > 0 && LANGUAGE_TAGS.contains(&parts[last]) {
        last - 1
    } else {
        last
    }
}

/// Shader name from the stem parts that are neither stage nor language tag.
fn infer_shader_name(parts: &[&str], stage_index: usize) -> String {
    let rest = &parts[..stage_index];
    if rest.is_empty() {
        sanitize(&parts.join("_"))
    } else {
        sanitize(&rest.join("_"))
    }
}

/// Replaces every character that cannot appear in a C++ identifier with `_`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Shorthand for the stage suffix of a file name (`foo.frag.spv` -> `frag`).
#[must_use]
pub fn stage_suffix(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let parts: Vec<&str> = stem.split('.').collect();
    Some(parts[stage_index(&parts)].to_string())
}

#[derive(Serialize)]
struct BuiltinSourceContext<'a> {
    include: &'a str,
    cpp_namespace: &'a str,
    binaries: &'a [BuiltinBinary],
}

/// Renders one translation unit holding every binary.
pub fn render_builtin_source(binaries: &[BuiltinBinary], options: &BuiltinSourceOptions) -> Result<String> {
    let ctx = BuiltinSourceContext {
        include: &options.include,
        cpp_namespace: &options.cpp_namespace,
        binaries,
    };
    templates::render("builtin_source.cpp.jinja", &ctx)
}

/// Reads every binary in `paths` and renders them into one translation unit.
pub fn convert_builtin_source<P: AsRef<Path>>(
    paths: &[P],
    shader_name: Option<&str>,
    options: &BuiltinSourceOptions,
) -> Result<String> {
    let binaries = paths
        .iter()
        .map(|path| BuiltinBinary::from_path(path, shader_name))
        .collect::<Result<Vec<_>>>()?;
    for binary in &binaries {
        log::info!(
            "Embedding {} ({} bytes) as {} [{}]",
            binary.shader_name,
            binary.code.len(),
            binary.static_name(),
            binary.stage_bit
        );
    }
    render_builtin_source(&binaries, options)
}
