use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record – one row of the catalogue
// ---------------------------------------------------------------------------

/// A single garment operation (one row of the source section).
///
/// Every field is already trimmed. `time` is kept as display text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub garment: String,
    pub position: String,
    pub operation: String,
    pub machine: String,
    pub time: String,
    pub category: String,
}

impl Record {
    /// Value of the column backing a filter dimension.
    pub fn value(&self, dim: Dimension) -> &str {
        match dim {
            Dimension::Category => &self.category,
            Dimension::Garment => &self.garment,
            Dimension::Position => &self.position,
            Dimension::Operation => &self.operation,
        }
    }

    /// Cells in table order: garment, position, operation, machine, time, category.
    pub fn table_cells(&self) -> [&str; 6] {
        [
            &self.garment,
            &self.position,
            &self.operation,
            &self.machine,
            &self.time,
            &self.category,
        ]
    }

    /// A row with neither garment nor operation is a blank/malformed row.
    pub fn is_blank(&self) -> bool {
        self.garment.is_empty() && self.operation.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RecordSet – immutable snapshot of a loaded section
// ---------------------------------------------------------------------------

/// Ordered, immutable set of records. Cloning shares the snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Arc<[Record]>,
}

impl RecordSet {
    /// Build a snapshot, dropping blank rows.
    pub fn new(records: Vec<Record>) -> Self {
        let records: Vec<Record> = records.into_iter().filter(|r| !r.is_blank()).collect();
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// True when both handles point at the very same loaded snapshot.
    pub fn same_snapshot(&self, other: &RecordSet) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Dimension – the four filterable columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Category,
    Garment,
    Position,
    Operation,
}

impl Dimension {
    /// All dimensions in selector order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Garment,
        Dimension::Position,
        Dimension::Operation,
    ];

    pub fn index(self) -> usize {
        match self {
            Dimension::Category => 0,
            Dimension::Garment => 1,
            Dimension::Position => 2,
            Dimension::Operation => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Choice / Selection
// ---------------------------------------------------------------------------

/// Label of the "no constraint" sentinel.
pub const ALL_LABEL: &str = "All";

/// What the user picked for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub enum Choice {
    #[default]
    All,
    Value(String),
}

impl Choice {
    pub fn value(s: impl Into<String>) -> Self {
        Choice::Value(s.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// `All` accepts anything, a value only exact (case-sensitive) matches.
    pub fn accepts(&self, cell: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Value(v) => v == cell,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "{ALL_LABEL}"),
            // A cell reading "All" must not look like the sentinel.
            Choice::Value(v) if v == ALL_LABEL => write!(f, "\"{v}\""),
            Choice::Value(v) => write!(f, "{v}"),
        }
    }
}

/// The current choice for each of the four dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    choices: [Choice; 4],
}

impl Selection {
    pub fn get(&self, dim: Dimension) -> &Choice {
        &self.choices[dim.index()]
    }

    pub fn set(&mut self, dim: Dimension, choice: Choice) {
        self.choices[dim.index()] = choice;
    }

    /// Builder-style variant of [`Selection::set`].
    pub fn with(mut self, dim: Dimension, choice: Choice) -> Self {
        self.set(dim, choice);
        self
    }

    /// Put every dimension back to `All` in one assignment.
    pub fn reset(&mut self) {
        *self = Selection::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        self.choices.iter().all(Choice::is_all)
    }

    /// Whether `record` satisfies all four constraints.
    pub fn matches(&self, record: &Record) -> bool {
        Dimension::ALL
            .iter()
            .all(|&d| self.get(d).accepts(record.value(d)))
    }

    /// Whether `record` satisfies every constraint except the one on `skip`.
    pub fn matches_except(&self, record: &Record, skip: Dimension) -> bool {
        Dimension::ALL
            .iter()
            .filter(|&&d| d != skip)
            .all(|&d| self.get(d).accepts(record.value(d)))
    }
}
