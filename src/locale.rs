use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::Dimension;

// ---------------------------------------------------------------------------
// Locale – which section of the source is shown, and in which language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Spanish];

    /// Source layout and column labels for this locale.
    pub fn config(self) -> &'static LocaleConfig {
        match self {
            Locale::English => &ENGLISH,
            Locale::Spanish => &SPANISH,
        }
    }

    /// Fixed interface strings for this locale.
    pub fn texts(self) -> &'static UiTexts {
        match self {
            Locale::English => &ENGLISH_TEXTS,
            Locale::Spanish => &SPANISH_TEXTS,
        }
    }

    /// Name of `self` as shown while the interface is in `ui` language.
    pub fn display_name_in(self, ui: Locale) -> &'static str {
        match (ui, self) {
            (Locale::Spanish, Locale::English) => "Inglés",
            (Locale::Spanish, Locale::Spanish) => "Español",
            (Locale::English, Locale::English) => "English",
            (Locale::English, Locale::Spanish) => "Spanish",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name_in(Locale::English))
    }
}

// ---------------------------------------------------------------------------
// Per-locale source layout
// ---------------------------------------------------------------------------

/// Where a locale's records live in the source and how its columns are labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Section (worksheet) name, matched case-insensitively.
    pub section_name: &'static str,
    /// Number of leading header rows to skip before data starts.
    pub header_skip: usize,
    pub labels: ColumnLabels,
}

/// Display labels for the six record columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabels {
    pub garment: &'static str,
    pub position: &'static str,
    pub operation: &'static str,
    pub machine: &'static str,
    pub time: &'static str,
    pub category: &'static str,
}

impl ColumnLabels {
    pub fn for_dimension(&self, dim: Dimension) -> &'static str {
        match dim {
            Dimension::Category => self.category,
            Dimension::Garment => self.garment,
            Dimension::Position => self.position,
            Dimension::Operation => self.operation,
        }
    }

    /// Headers in results-table order.
    pub fn table_headers(&self) -> [&'static str; 6] {
        [
            self.garment,
            self.position,
            self.operation,
            self.machine,
            self.time,
            self.category,
        ]
    }
}

static ENGLISH: LocaleConfig = LocaleConfig {
    section_name: "English",
    header_skip: 2,
    labels: ColumnLabels {
        garment: "TYPE OF GARMENT",
        position: "POSITION",
        operation: "OPERATION",
        machine: "MACHINE",
        time: "TIME (Secs)",
        category: "CATEGORY",
    },
};

// The Spanish sheet carries a taller header block.
static SPANISH: LocaleConfig = LocaleConfig {
    section_name: "Spanish",
    header_skip: 9,
    labels: ColumnLabels {
        garment: "TIPO DE PRENDA",
        position: "POSICION",
        operation: "OPERACION",
        machine: "MAQUINA",
        time: "TIEMPO",
        category: "CATEGORIA",
    },
};

// ---------------------------------------------------------------------------
// Interface strings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTexts {
    pub title: &'static str,
    pub language_label: &'static str,
    pub clear_button: &'static str,
    pub results: &'static str,
    pub no_results: &'static str,
    pub no_data: &'static str,
}

impl UiTexts {
    /// Caption under the results table, e.g. `Results: 12`.
    pub fn results_caption(&self, count: usize) -> String {
        format!("{}: {count}", self.results)
    }
}

static ENGLISH_TEXTS: UiTexts = UiTexts {
    title: "CATALOGUE OF TIMES",
    language_label: "LANGUAGE",
    clear_button: "🔄 Clear",
    results: "Results",
    no_results: "No Results Found",
    no_data: "No data found.",
};

static SPANISH_TEXTS: UiTexts = UiTexts {
    title: "CATALOGO DE TIEMPOS",
    language_label: "IDIOMA",
    clear_button: "🔄 Limpiar",
    results: "Resultados",
    no_results: "No se encontraron resultados",
    no_data: "No se encontraron datos.",
};
