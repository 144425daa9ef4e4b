//! Library merger.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::library::{RowCounts, ShaderLibrary};

/// Outcome of merging several libraries into one.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Sources that were merged, with the rows each contributed.
    pub merged: Vec<(PathBuf, RowCounts)>,
    /// Sources that did not exist and were skipped.
    pub skipped: Vec<PathBuf>,
    /// Rows in the output once all sources are merged.
    pub totals: RowCounts,
}

/// Recreates the library at `output` and merges every existing source into it.
///
/// Sources are merged in the order given. A path that is not a file is
/// skipped; a conflicting source aborts the merge with that source rolled
/// back, keeping the sources merged before it.
pub fn merge_libraries(output: impl AsRef<Path>, sources: &[PathBuf]) -> Result<MergeReport> {
    let output = output.as_ref();
    let mut library = ShaderLibrary::open(output)?;
    library.reset()?;

    let mut report = MergeReport::default();
    for source in sources {
        if !source.is_file() {
            log::warn!("Skipping missing shader library {}", source.display());
            report.skipped.push(source.clone());
            continue;
        }
        let copied = library.merge_from(source)?;
        report.merged.push((source.clone(), copied));
    }

    report.totals = library.counts()?;
    log::info!(
        "Wrote {}: {} shader(s), {} module(s), {} stage(s)",
        output.display(),
        report.totals.shaders,
        report.totals.modules,
        report.totals.stages
    );
    Ok(report)
}
