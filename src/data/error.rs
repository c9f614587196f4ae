use thiserror::Error;

/// Failures while fetching a locale's section from the source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("data source is unavailable: {reason}")]
    SourceUnavailable { reason: String },
    #[error("could not find sheet named '{section}'. Available sheets: {available:?}")]
    SchemaNotFound {
        section: String,
        available: Vec<String>,
    },
    #[error("sheet '{section}' seems empty")]
    EmptySource { section: String },
}

impl LoadError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        LoadError::SourceUnavailable {
            reason: reason.into(),
        }
    }
}
