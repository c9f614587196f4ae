use super::error::LoadError;
use super::model::{Record, RecordSet};
use super::source::TableSource;
use crate::locale::LocaleConfig;

/// Cells per data row: one unused leading cell plus the six record columns.
const ROW_WIDTH: usize = 7;

// ---------------------------------------------------------------------------
// Diagnostics surfaced to the user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A user-visible message produced at the loader boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl From<&LoadError> for Diagnostic {
    fn from(err: &LoadError) -> Self {
        let severity = match err {
            LoadError::EmptySource { .. } => Severity::Warning,
            LoadError::SourceUnavailable { .. } | LoadError::SchemaNotFound { .. } => {
                Severity::Error
            }
        };
        Diagnostic {
            severity,
            message: err.to_string(),
        }
    }
}

/// What the loader hands to the rest of the app: never an error, at worst an
/// empty snapshot with a diagnostic attached.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub records: RecordSet,
    pub diagnostic: Option<Diagnostic>,
}

impl Loaded {
    pub fn is_error(&self) -> bool {
        self.diagnostic
            .as_ref()
            .is_some_and(|d| d.severity == Severity::Error)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Resolve `target` against the source's section names, ignoring case and
/// surrounding whitespace. Returns the stored name.
pub fn find_section(source: &dyn TableSource, target: &str) -> Result<String, LoadError> {
    let available = source.section_names()?;
    let wanted = target.trim().to_lowercase();

    available
        .iter()
        .find(|name| name.trim().to_lowercase() == wanted)
        .cloned()
        .ok_or_else(|| LoadError::SchemaNotFound {
            section: target.to_string(),
            available,
        })
}

/// Load the locale's section into a [`RecordSet`].
pub fn load(source: &dyn TableSource, config: &LocaleConfig) -> Result<RecordSet, LoadError> {
    let section = find_section(source, config.section_name)?;
    let rows = source.read_section(&section)?;

    if rows.len() <= config.header_skip {
        return Err(LoadError::EmptySource { section });
    }
    let data = &rows[config.header_skip..];
    let records = parse_rows(data);
    log::debug!(
        "Section '{section}': kept {} of {} data rows",
        records.len(),
        data.len()
    );
    Ok(records)
}

/// Loader boundary: every failure becomes an empty snapshot plus a diagnostic.
pub fn load_or_empty(source: &dyn TableSource, config: &LocaleConfig) -> Loaded {
    match load(source, config) {
        Ok(records) => {
            log::info!(
                "Loaded {} records from section '{}' of {}",
                records.len(),
                config.section_name,
                source.describe()
            );
            Loaded {
                records,
                diagnostic: None,
            }
        }
        Err(e) => {
            match &e {
                LoadError::EmptySource { .. } => log::warn!("{e}"),
                _ => log::error!("Failed to load {}: {e}", source.describe()),
            }
            Loaded {
                records: RecordSet::empty(),
                diagnostic: Some(Diagnostic::from(&e)),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Map data rows onto records. Short rows are skipped, blank rows dropped.
fn parse_rows(rows: &[Vec<String>]) -> RecordSet {
    let records = rows.iter().filter_map(|row| parse_row(row)).collect();
    RecordSet::new(records)
}

fn parse_row(row: &[String]) -> Option<Record> {
    if row.len() < ROW_WIDTH {
        return None;
    }
    let cell = |i: usize| row[i].trim().to_string();
    Some(Record {
        garment: cell(1),
        position: cell(2),
        operation: cell(3),
        machine: cell(4),
        time: cell(5),
        category: cell(6),
    })
}
