use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::error::LoadError;

/// Raw cell rows of one section, exactly as stored.
pub type SectionRows = Vec<Vec<String>>;

// ---------------------------------------------------------------------------
// TableSource – anything that can hand out named sections of cells
// ---------------------------------------------------------------------------

/// A spreadsheet-like backing store made of named sections.
pub trait TableSource {
    /// Human readable location, used in log lines.
    fn describe(&self) -> String;

    /// Names of all sections, as stored.
    fn section_names(&self) -> Result<Vec<String>, LoadError>;

    /// All rows of the named section (exact stored name).
    fn read_section(&self, name: &str) -> Result<SectionRows, LoadError>;
}

/// Open a source by path. Dispatch by kind / extension.
///
/// Supported layouts:
/// * `.json`     – workbook `{ "English": [[...], ...], "Spanish": [...] }`
/// * directory   – one headerless `<section>.csv` per section
pub fn open_source(path: &Path) -> Result<Box<dyn TableSource>, LoadError> {
    if path.is_dir() {
        return Ok(Box::new(CsvDirectorySource::new(path)));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => Ok(Box::new(WorkbookFile::new(path))),
        other => Err(LoadError::unavailable(format!(
            "unsupported source '{}' (extension .{other})",
            path.display()
        ))),
    }
}

// ---------------------------------------------------------------------------
// In-memory workbook
// ---------------------------------------------------------------------------

/// A fully loaded workbook: section name → rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    sections: BTreeMap<String, SectionRows>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a section.
    pub fn with_section(mut self, name: &str, rows: SectionRows) -> Self {
        self.sections.insert(name.to_string(), rows);
        self
    }

    /// Parse the JSON workbook layout. Non-string cells are rendered as text.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let root: JsonValue = serde_json::from_str(text)
            .map_err(|e| LoadError::unavailable(format!("parsing workbook JSON: {e}")))?;
        let obj = root
            .as_object()
            .ok_or_else(|| LoadError::unavailable("expected a top-level JSON object"))?;

        let mut sections: BTreeMap<String, SectionRows> = BTreeMap::new();
        for (name, rows) in obj {
            let rows = rows.as_array().ok_or_else(|| {
                LoadError::unavailable(format!("section '{name}' is not an array of rows"))
            })?;
            let parsed: SectionRows = rows
                .iter()
                .map(|row| match row {
                    JsonValue::Array(cells) => cells.iter().map(json_cell_to_text).collect(),
                    // A scalar row is a single cell.
                    other => vec![json_cell_to_text(other)],
                })
                .collect();
            sections.insert(name.clone(), parsed);
        }
        Ok(Workbook { sections })
    }
}

fn json_cell_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

impl TableSource for Workbook {
    fn describe(&self) -> String {
        format!("in-memory workbook ({} sections)", self.sections.len())
    }

    fn section_names(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.sections.keys().cloned().collect())
    }

    fn read_section(&self, name: &str) -> Result<SectionRows, LoadError> {
        self.sections.get(name).cloned().ok_or_else(|| {
            LoadError::unavailable(format!("section '{name}' disappeared while reading"))
        })
    }
}

// ---------------------------------------------------------------------------
// JSON workbook on disk
// ---------------------------------------------------------------------------

/// A workbook file re-read on every fetch, so edits show up after the cache expires.
#[derive(Debug, Clone)]
pub struct WorkbookFile {
    path: PathBuf,
}

impl WorkbookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Workbook, LoadError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            LoadError::unavailable(format!("reading {}: {e}", self.path.display()))
        })?;
        Workbook::from_json_str(&text)
    }
}

impl TableSource for WorkbookFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn section_names(&self) -> Result<Vec<String>, LoadError> {
        self.read()?.section_names()
    }

    fn read_section(&self, name: &str) -> Result<SectionRows, LoadError> {
        self.read()?.read_section(name)
    }
}

// ---------------------------------------------------------------------------
// Directory of CSV files
// ---------------------------------------------------------------------------

/// Every `<section>.csv` in `dir` is one section. Files have no header row of
/// their own; the locale's header skip applies to them like any other section.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableSource for CsvDirectorySource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn section_names(&self) -> Result<Vec<String>, LoadError> {
        let mut names: Vec<String> = self.csv_files()?.into_iter().map(|(stem, _)| stem).collect();
        names.sort();
        Ok(names)
    }

    fn read_section(&self, name: &str) -> Result<SectionRows, LoadError> {
        let path = self
            .csv_files()?
            .into_iter()
            .find(|(stem, _)| stem == name)
            .map(|(_, path)| path)
            .ok_or_else(|| {
                LoadError::unavailable(format!(
                    "no CSV file for section '{name}' in {}",
                    self.dir.display()
                ))
            })?;
        let file = std::fs::File::open(&path)
            .map_err(|e| LoadError::unavailable(format!("opening {}: {e}", path.display())))?;
        parse_csv_section(file)
    }
}

impl CsvDirectorySource {
    /// `(stem, path)` of every file whose extension is `csv` in any case.
    fn csv_files(&self) -> Result<Vec<(String, PathBuf)>, LoadError> {
        let listing_error =
            |e: std::io::Error| LoadError::unavailable(format!("listing {}: {e}", self.dir.display()));
        let entries = std::fs::read_dir(&self.dir).map_err(listing_error)?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(listing_error)?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
        Ok(files)
    }
}

/// Read headerless, possibly ragged CSV into rows of cells.
pub fn parse_csv_section<R: Read>(reader: R) -> Result<SectionRows, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .enumerate()
        .map(|(row_no, result)| {
            result
                .map(|record| record.iter().map(str::to_string).collect())
                .map_err(|e| LoadError::unavailable(format!("CSV row {row_no}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load, load_or_empty};
    use crate::locale::Locale;

    #[test]
    fn json_workbook_renders_scalars_as_text() {
        let wb = Workbook::from_json_str(
            r#"{"English": [["", "Shirt", "Collar", "Sew", "M1", 10, null]]}"#,
        )
        .unwrap();
        assert_eq!(wb.section_names().unwrap(), ["English"]);
        let rows = wb.read_section("English").unwrap();
        assert_eq!(rows[0], ["", "Shirt", "Collar", "Sew", "M1", "10", ""]);
    }

    #[test]
    fn malformed_json_is_source_unavailable() {
        let err = Workbook::from_json_str("[1, 2").unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
        let err = Workbook::from_json_str("[]").unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }

    #[test]
    fn csv_sections_may_be_ragged() {
        let data = "a,b\n,Shirt,Collar,Sew,M1,10,Cat A\n";
        let rows = parse_csv_section(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1][6], "Cat A");
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let src = WorkbookFile::new("/nonexistent/mak/catalogue.json");
        assert!(matches!(
            src.section_names(),
            Err(LoadError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(open_source(Path::new("/nonexistent/catalogue.xlsx")).is_err());
    }

    fn write(path: &Path, text: &str) {
        std::fs::write(path, text).unwrap();
    }

    const ENGLISH_CSV: &str = "MAK,,,,,,\n\
#,TYPE OF GARMENT,POSITION,OPERATION,MACHINE,TIME (Secs),CATEGORY\n\
1,Shirt,Collar,Sew,M1,10,Cat A\n";

    #[test]
    fn json_workbook_file_loads_through_open_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.json");
        write(
            &path,
            r##"{"English": [["MAK"], ["#", "H1", "H2", "H3", "H4", "H5", "H6"],
                ["1", "Shirt", "Collar", "Sew", "M1", 10, "Cat A"]]}"##,
        );

        let source = open_source(&path).unwrap();
        let records = load(source.as_ref(), Locale::English.config()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records.get(0).unwrap().time, "10");
    }

    #[test]
    fn csv_directory_opens_upper_case_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("English.CSV"), ENGLISH_CSV);

        let source = open_source(dir.path()).unwrap();
        assert_eq!(source.section_names().unwrap(), ["English"]);
        let loaded = load_or_empty(source.as_ref(), Locale::English.config());
        assert!(loaded.diagnostic.is_none(), "{:?}", loaded.diagnostic);
        assert_eq!(loaded.records.get(0).unwrap().garment, "Shirt");
    }

    #[test]
    fn csv_directory_mixes_extension_cases() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("English.csv"), ENGLISH_CSV);
        write(&dir.path().join("Spanish.Csv"), "x\n");

        let source = CsvDirectorySource::new(dir.path());
        assert_eq!(source.section_names().unwrap(), ["English", "Spanish"]);
        assert_eq!(source.read_section("Spanish").unwrap(), [["x"]]);
    }

    #[test]
    fn csv_directory_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("English.csv"), ENGLISH_CSV);
        write(&dir.path().join("Notes.txt"), "not a section");
        std::fs::create_dir(dir.path().join("Archive.csv")).unwrap();

        let source = CsvDirectorySource::new(dir.path());
        assert_eq!(source.section_names().unwrap(), ["English"]);
        assert!(matches!(
            source.read_section("Notes"),
            Err(LoadError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn missing_directory_is_source_unavailable() {
        let source = CsvDirectorySource::new("/nonexistent/mak/sections");
        assert!(matches!(
            source.section_names(),
            Err(LoadError::SourceUnavailable { .. })
        ));
    }
}
