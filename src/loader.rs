// 📂 Batch Loader - files/directories → agency
//
// Movies and sales share one control structure:
//   resolve inputs → read each file → skip header + blank lines → process line
// and differ only in the LineProcessor that turns a line into an agency change.

use crate::agency::Agency;
use crate::parser::{parse_movie_line, parse_sale_line, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Lines before the first data row
const HEADER_LINES: usize = 1;

// ============================================================================
// LINE PROCESSING
// ============================================================================

/// What happened to one data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Record added to the agency
    Accepted,

    /// Well-formed but rejected (duplicate movie, unknown movie)
    Ignored(String),

    /// Could not be parsed; dropped silently
    Malformed,
}

/// LineProcessor - turns one raw line into an agency mutation
pub trait LineProcessor {
    fn kind(&self) -> RecordKind;

    fn process(&self, line: &str, agency: &mut Agency) -> LineOutcome;
}

/// Movie lines: duplicates by name are ignored
pub struct MovieLines;

impl LineProcessor for MovieLines {
    fn kind(&self) -> RecordKind {
        RecordKind::Movies
    }

    fn process(&self, line: &str, agency: &mut Agency) -> LineOutcome {
        let Some(record) = parse_movie_line(line) else {
            return LineOutcome::Malformed;
        };

        match agency.insert_movie(record) {
            Ok(()) => LineOutcome::Accepted,
            Err(err) => LineOutcome::Ignored(err.into_name()),
        }
    }
}

/// Sale lines: sales for movies not loaded yet are ignored
pub struct SaleLines;

impl LineProcessor for SaleLines {
    fn kind(&self) -> RecordKind {
        RecordKind::Sales
    }

    fn process(&self, line: &str, agency: &mut Agency) -> LineOutcome {
        let Some(record) = parse_sale_line(line) else {
            return LineOutcome::Malformed;
        };

        match agency.record_sale(record) {
            Ok(()) => LineOutcome::Accepted,
            Err(err) => LineOutcome::Ignored(err.into_name()),
        }
    }
}

// ============================================================================
// LOAD SUMMARY
// ============================================================================

/// Result of one batch load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub kind: RecordKind,

    /// Records added to the agency
    pub accepted: usize,

    /// Names of rejected records, in file-then-line order
    pub ignored: Vec<String>,

    /// Files that were read successfully
    pub files_read: usize,

    pub loaded_at: DateTime<Utc>,
}

impl LoadSummary {
    fn new(kind: RecordKind) -> Self {
        LoadSummary {
            kind,
            accepted: 0,
            ignored: Vec::new(),
            files_read: 0,
            loaded_at: Utc::now(),
        }
    }
}

// ============================================================================
// INPUT RESOLUTION
// ============================================================================

/// Check whether a file name ends in `.{extension}`, ignoring case
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension.to_lowercase());
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(&suffix))
        .unwrap_or(false)
}

/// Expand files and directories into the list of files to read
///
/// - Existing non-directory path → taken as-is (any extension)
/// - Directory → every file below it ending in `.{extension}`, walked in
///   file-name order
/// - Missing path → nothing
pub fn resolve_inputs<P: AsRef<Path>>(inputs: &[P], extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        let path = input.as_ref();

        if path.exists() && !path.is_dir() {
            files.push(path.to_path_buf());
            continue;
        }

        if !path.is_dir() {
            debug!(path = %path.display(), "input does not exist, skipping");
            continue;
        }

        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    None
                }
            })
        {
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                files.push(entry.into_path());
            }
        }
    }

    files
}

/// Read a file into lines
///
/// Lines are split on `\n` with a trailing `\r` removed. A line that is not
/// valid UTF-8 comes back blank, so it is skipped without losing the rest of
/// the file.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let mut raw_lines: Vec<&[u8]> = bytes.split(|byte| *byte == b'\n').collect();
    if raw_lines.last().is_some_and(|last| last.is_empty()) {
        raw_lines.pop();
    }

    let lines = raw_lines
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            match std::str::from_utf8(raw) {
                Ok(line) => line.to_string(),
                Err(_) => {
                    debug!(path = %path.display(), line_number = idx + 1, "dropping line with invalid UTF-8");
                    String::new()
                }
            }
        })
        .collect();

    Ok(lines)
}

// ============================================================================
// BATCH LOAD
// ============================================================================

/// Feed the data lines of one file to a processor
///
/// The first line is always a header. Blank lines are skipped.
pub fn process_lines<L: LineProcessor + ?Sized>(
    lines: &[String],
    agency: &mut Agency,
    processor: &L,
    summary: &mut LoadSummary,
) {
    for (idx, line) in lines.iter().enumerate().skip(HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }

        match processor.process(line, agency) {
            LineOutcome::Accepted => summary.accepted += 1,
            LineOutcome::Ignored(name) => summary.ignored.push(name),
            LineOutcome::Malformed => {
                debug!(line_number = idx + 1, kind = processor.kind().name(), "dropping malformed line");
            }
        }
    }
}

/// Feed each file to a processor, in order
///
/// An unreadable file is logged and skipped; the rest of the batch still
/// loads. Only files that were read count towards `files_read`.
pub fn load_files<L: LineProcessor + ?Sized>(
    files: &[PathBuf],
    agency: &mut Agency,
    processor: &L,
    summary: &mut LoadSummary,
) {
    for file in files {
        let lines = match read_lines(file) {
            Ok(lines) => lines,
            Err(err) => {
                warn!(path = %file.display(), error = %err, "failed to read input file");
                continue;
            }
        };

        summary.files_read += 1;
        debug!(path = %file.display(), lines = lines.len(), "processing file");
        process_lines(&lines, agency, processor, summary);
    }
}

/// Load every resolved file with the given processor
pub fn load_batch<P, L>(inputs: &[P], extension: &str, agency: &mut Agency, processor: &L) -> LoadSummary
where
    P: AsRef<Path>,
    L: LineProcessor + ?Sized,
{
    let mut summary = LoadSummary::new(processor.kind());
    let files = resolve_inputs(inputs, extension);
    load_files(&files, agency, processor, &mut summary);

    info!(
        kind = processor.kind().name(),
        files = summary.files_read,
        accepted = summary.accepted,
        ignored = summary.ignored.len(),
        "batch load finished"
    );

    summary
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_has_extension_case_insensitive() {
        assert!(has_extension(Path::new("a/peliculas.csv"), "csv"));
        assert!(has_extension(Path::new("a/PELICULAS.CSV"), "csv"));
        assert!(!has_extension(Path::new("a/peliculas.txt"), "csv"));
        assert!(!has_extension(Path::new("a/csv"), "csv"));
    }

    #[test]
    fn test_resolve_inputs_walks_directories_recursively() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.csv", "h\n");
        write(tmp.path(), "a.CSV", "h\n");
        write(tmp.path(), "notas.txt", "h\n");
        write(tmp.path(), "sub/deep/c.csv", "h\n");

        let files = resolve_inputs(&[tmp.path()], "csv");
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["a.CSV", "b.csv", "sub/deep/c.csv"]);
    }

    #[test]
    fn test_resolve_inputs_explicit_file_and_missing_path() {
        let tmp = TempDir::new().unwrap();
        let txt = write(tmp.path(), "datos.txt", "h\n");
        let missing = tmp.path().join("no_existe.csv");

        let files = resolve_inputs(&[txt.clone(), missing], "csv");
        assert_eq!(files, vec![txt]);
    }

    #[test]
    fn test_read_lines_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(read_lines(&tmp.path().join("nada.csv")).is_err());
    }

    #[test]
    fn test_read_lines_strips_carriage_returns() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "crlf.csv", "h\r\nUno,10,Ana\r\n\r\nDos,20,Luis");

        let lines = read_lines(&file).unwrap();
        assert_eq!(lines, vec!["h", "Uno,10,Ana", "", "Dos,20,Luis"]);
    }

    #[test]
    fn test_invalid_utf8_line_does_not_drop_the_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("peliculas");
        write(&dir, "a.csv", "h\nUno,10,Ana\n");
        // Latin-1 "í" (0xED) on the first data line of b.csv
        let mut latin1 = b"h\nDos,20,Federico D".to_vec();
        latin1.extend_from_slice(&[0xED]);
        latin1.extend_from_slice(b"az\nTres,30,Luis\n");
        fs::write(dir.join("b.csv"), latin1).unwrap();
        write(&dir, "c.csv", "h\nCuatro,40,Ana\n");

        let mut agency = Agency::new();
        let summary = agency.load_movies(&[dir]);

        assert_eq!(summary.files_read, 3);
        assert_eq!(summary.accepted, 3);
        let names: Vec<&str> = agency.movies().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Uno", "Tres", "Cuatro"]);
    }

    #[test]
    fn test_unreadable_file_skipped_rest_of_batch_loads() {
        let tmp = TempDir::new().unwrap();
        let first = write(tmp.path(), "a.csv", "h\nUno,10,Ana\n");
        // A directory cannot be read as a file
        let unreadable = tmp.path().join("b.csv");
        fs::create_dir(&unreadable).unwrap();
        let last = write(tmp.path(), "c.csv", "h\nDos,20,Luis\n");

        let mut agency = Agency::new();
        let mut summary = LoadSummary::new(RecordKind::Movies);
        load_files(&[first, unreadable, last], &mut agency, &MovieLines, &mut summary);

        assert_eq!(summary.files_read, 2);
        assert_eq!(summary.accepted, 2);
        assert!(agency.movie("Uno").is_some());
        assert!(agency.movie("Dos").is_some());
    }

    #[test]
    fn test_load_movies_skips_header_blank_and_malformed() {
        let tmp = TempDir::new().unwrap();
        let file = write(
            tmp.path(),
            "peliculas.csv",
            "nombre,precio,talentos\n\
             Sueños de Libertad,1200,Ana Torres;Carlos Ruiz\n\
             \n   \n\
             Rota,sin precio,Ana Torres\n\
             Sin talentos,100, ; \n\
             Destino Final,1500,Carlos Ruiz;Federico Díaz\n",
        );

        let mut agency = Agency::new();
        let summary = agency.load_movies(&[file]);

        assert_eq!(summary.kind, RecordKind::Movies);
        assert_eq!(summary.accepted, 2);
        assert!(summary.ignored.is_empty());
        assert_eq!(summary.files_read, 1);
        assert_eq!(agency.movies().len(), 2);
    }

    #[test]
    fn test_header_is_skipped_even_if_it_looks_like_data() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "p.csv", "Primera,100,Ana\nSegunda,200,Luis\n");

        let mut agency = Agency::new();
        let summary = agency.load_movies(&[file]);

        assert_eq!(summary.accepted, 1);
        assert!(agency.movie("Primera").is_none());
    }

    #[test]
    fn test_duplicates_reported_per_occurrence_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = write(tmp.path(), "dir/a.csv", "h\nUno,10,Ana\nDos,20,Luis\nUno,99,Otro\n");
        let second = write(tmp.path(), "dir/b.csv", "h\nDos,30,Luis\nUno,10,Ana\n");

        let mut agency = Agency::new();
        let summary = agency.load_movies(&[first.parent().unwrap()]);

        assert_eq!(summary.files_read, 2);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.ignored, vec!["Uno", "Dos", "Uno"]);
        assert_eq!(agency.movie("Uno").unwrap().price, 10);
        assert!(second.exists());
    }

    #[test]
    fn test_sales_reference_movies_from_previous_batches() {
        let tmp = TempDir::new().unwrap();
        let movies_a = write(tmp.path(), "m1.csv", "h\nUno,10,Ana\n");
        let movies_b = write(tmp.path(), "m2.csv", "h\nDos,20,Luis\n");
        let sales = write(tmp.path(), "ventas.csv", "h\nUno,5\nDos,2\nTres,7\nUno,x\nUno,1\n");

        let mut agency = Agency::new();
        agency.load_movies(&[movies_a]);
        agency.load_movies(&[movies_b]);
        let summary = agency.load_sales(&[sales]);

        assert_eq!(summary.kind, RecordKind::Sales);
        assert_eq!(summary.accepted, 3);
        assert_eq!(summary.ignored, vec!["Tres"]);
        assert_eq!(agency.tickets_sold("Uno"), 6);
        assert_eq!(agency.tickets_sold("Dos"), 2);
        assert_eq!(agency.history().len(), 3);
    }

    #[test]
    fn test_missing_inputs_load_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut agency = Agency::new();
        let summary = agency.load_movies(&[tmp.path().join("fantasma")]);

        assert_eq!(summary.accepted, 0);
        assert_eq!(summary.files_read, 0);
        assert!(summary.ignored.is_empty());
    }
}
