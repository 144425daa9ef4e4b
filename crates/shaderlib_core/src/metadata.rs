//! Shader metadata documents.
//!
//! A metadata file describes one shader release and maps each source file
//! name to the pipeline stage it compiles into:
//!
//! ```json
//! {
//!   "name": "test_frame",
//!   "version": "1.0.0",
//!   "author": "someone",
//!   "stages": {
//!     "test_frame.vert": { "type": "vertex", "entry": "main" },
//!     "test_frame.frag": { "type": "fragment", "entry": "main" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{LibraryError, Result};
use crate::stage::ShaderStage;
use crate::version::ShaderVersion;

pub const DEFAULT_AUTHOR: &str = "unknown";
pub const DEFAULT_DESCRIPTION: &str = "unspecified";
pub const DEFAULT_LICENSE: &str = "unspecified";
pub const DEFAULT_ENTRY_POINT: &str = "main";

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_unspecified() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_entry_point() -> String {
    DEFAULT_ENTRY_POINT.to_string()
}

/// Parsed contents of a shader metadata file.
#[derive(Debug, Clone, Deserialize)]
pub struct ShaderMetadata {
    pub name: String,
    pub version: ShaderVersion,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_unspecified")]
    pub description: String,
    #[serde(default = "default_unspecified")]
    pub license: String,
    /// Source file name -> stage description.
    pub stages: BTreeMap<String, StageMetadata>,
}

/// One entry of the metadata `stages` table.
#[derive(Debug, Clone, Deserialize)]
pub struct StageMetadata {
    #[serde(rename = "type")]
    pub stage_type: String,
    #[serde(default = "default_entry_point")]
    pub entry: String,
}

impl StageMetadata {
    /// Resolves the declared stage type to its bit.
    pub fn stage(&self) -> Result<ShaderStage> {
        ShaderStage::from_stage_name(&self.stage_type)
    }
}

impl ShaderMetadata {
    /// Reads and parses a metadata file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        text.parse()
    }

    /// Looks up the stage entry for a source file by its file name.
    pub fn stage_for(&self, source: &Path) -> Result<&StageMetadata> {
        source
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.stages.get(name))
            .ok_or_else(|| LibraryError::UnlistedSource(source.to_path_buf()))
    }

    /// Checks that every stage type is known and used at most once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = ShaderStage::empty();
        for stage in self.stages.values() {
            let bit = stage.stage()?;
            if seen.contains(bit) {
                return Err(LibraryError::DuplicateStage {
                    shader: self.name.clone(),
                    stage: bit.name().unwrap_or("unknown"),
                });
            }
            seen |= bit;
        }
        Ok(())
    }
}

impl FromStr for ShaderMetadata {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(s)?;
        metadata.validate()?;
        Ok(metadata)
    }
}
