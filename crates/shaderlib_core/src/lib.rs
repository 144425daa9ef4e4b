//! Shader library core.
//!
//! A shader library is a SQLite file holding compiled SPIR-V modules and the
//! metadata a renderer needs to look them up at load time:
//!
//! - [`schema`]: the three-table on-disk format
//! - [`library`]: inserting, merging and querying library rows
//! - [`builder`] / [`merger`]: the two offline operations that produce libraries
//!
//! ```rust,ignore
//! use shaderlib_core::{ExternalCompiler, RandomModuleIds, ShaderMetadata};
//! use shaderlib_core::builder::{build_library, BuildOptions};
//!
//! let metadata = ShaderMetadata::from_path("frame.json")?;
//! let sources = vec!["frame.vert".into(), "frame.frag".into()];
//! build_library(&metadata, &sources, &ExternalCompiler::default(), &mut RandomModuleIds, &BuildOptions::default())?;
//! ```

pub mod builder;
pub mod compiler;
pub mod errors;
pub mod ids;
pub mod library;
pub mod merger;
pub mod metadata;
pub mod schema;
pub mod stage;
pub mod version;

pub use builder::{BuildMode, BuildOptions, BuildReport, build_library};
pub use compiler::{ExternalCompiler, ShaderCompiler};
pub use errors::{LibraryError, Result};
pub use ids::{ModuleIdGenerator, RandomModuleIds};
pub use library::{RowCounts, ShaderLibrary, ShaderRelease};
pub use merger::{MergeReport, merge_libraries};
pub use metadata::ShaderMetadata;
pub use stage::ShaderStage;
pub use version::ShaderVersion;
