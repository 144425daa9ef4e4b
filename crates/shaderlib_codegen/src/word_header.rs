//! Single-binary word headers.
//!
//! Emits a header holding one SPIR-V binary as a `constexpr` array of
//! little-endian 32-bit words, named after the input file.

use std::path::Path;

use serde::Serialize;

use crate::errors::{CodegenError, Result};
use crate::templates;

/// SPIR-V is a stream of 32-bit words.
pub const WORD_SIZE: usize = 4;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "shaders";

/// Array identifier for a binary: the file name with spaces, dots and
/// dashes turned into `_`, lowercased.
pub fn identifier_from_path(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CodegenError::InvalidInput(format!("no file name in {}", path.display())))?;
    Ok(file_name
        .chars()
        .map(|c| match c {
            ' ' | '.' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect())
}

/// Reinterprets `bytes` as little-endian words.
///
/// Lengths that are not a multiple of [`WORD_SIZE`] are rejected rather than
/// truncated or padded.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % WORD_SIZE != 0 {
        return Err(CodegenError::MisalignedBinary { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(WORD_SIZE)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Include guard for `name` in `cpp_namespace`:
/// `oberon::shaders` + `blit_spv` -> `OBERON_SHADERS_BLIT_SPV_HPP`.
#[must_use]
pub fn include_guard(cpp_namespace: &str, name: &str) -> String {
    let mut guard: Vec<String> = cpp_namespace
        .split("::")
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();
    guard.push(name.to_ascii_uppercase());
    guard.push("HPP".to_string());
    guard.join("_")
}

#[derive(Serialize)]
struct WordHeaderContext<'a> {
    guard: String,
    cpp_namespace: &'a str,
    name: &'a str,
    words: &'a [u32],
}

pub fn render_word_header(name: &str, words: &[u32], cpp_namespace: &str) -> Result<String> {
    let ctx = WordHeaderContext {
        guard: include_guard(cpp_namespace, name),
        cpp_namespace,
        name,
        words,
    };
    templates::render("word_header.hpp.jinja", &ctx)
}

/// Reads the binary at `input` and renders its header.
pub fn convert_word_header(input: impl AsRef<Path>, cpp_namespace: &str) -> Result<String> {
    let input = input.as_ref();
    let name = identifier_from_path(input)?;
    let bytes = std::fs::read(input)?;
    let words = words_from_bytes(&bytes)?;
    log::info!("Embedding {} as {name} ({} words)", input.display(), words.len());
    render_word_header(&name, &words, cpp_namespace)
}
