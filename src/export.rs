// 📤 Exporter - revenue report → CSV file

use crate::agency::Agency;
use crate::error::ExportError;
use crate::loader::has_extension;
use crate::revenue::{talent_revenue, TalentRevenue};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Header row of the export file
pub const EXPORT_HEADER: [&str; 2] = ["actor", "recaudacion"];

/// Validate an export destination
///
/// The path must be non-empty after trimming, contain no whitespace, end in
/// `.{extension}` (any case), and its parent directory (if any) must exist.
pub fn validate_export_path(destination: &str, extension: &str) -> Result<PathBuf, ExportError> {
    let destination = destination.trim();

    if destination.is_empty() {
        return Err(ExportError::InvalidPath("path is empty".to_string()));
    }

    if destination.chars().any(char::is_whitespace) {
        return Err(ExportError::InvalidPath(format!(
            "path contains whitespace: {:?}",
            destination
        )));
    }

    let path = PathBuf::from(destination);

    if !has_extension(&path, extension) {
        return Err(ExportError::InvalidPath(format!(
            "path must end in .{}: {}",
            extension, destination
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ExportError::InvalidPath(format!(
                "directory does not exist: {}",
                parent.display()
            )));
        }
    }

    Ok(path)
}

/// Write report rows under the fixed header
pub fn write_report(path: &Path, rows: &[TalentRevenue]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(EXPORT_HEADER)?;

    for row in rows {
        writer.write_record([row.name.as_str(), row.total.to_string().as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Validate the destination, aggregate revenue and write the report
///
/// Returns the number of data rows written.
pub fn export_revenue(agency: &Agency, destination: &str) -> Result<usize, ExportError> {
    let path = validate_export_path(destination, agency.extension()).map_err(|err| {
        warn!(destination = %destination, error = %err, "export rejected");
        err
    })?;

    let rows = if agency.movies().is_empty() {
        Vec::new()
    } else {
        talent_revenue(agency).map_err(|err| {
            warn!(error = %err, "export aborted");
            ExportError::from(err)
        })?
    };

    if let Err(err) = write_report(&path, &rows) {
        warn!(path = %path.display(), error = %err, "export failed");
        return Err(err);
    }

    info!(path = %path.display(), rows = rows.len(), "revenue exported");
    Ok(rows.len())
}

// ============================================================================
// TESTS
// ============================================================================
