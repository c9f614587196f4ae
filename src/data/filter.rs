use std::collections::BTreeSet;

use super::model::{Choice, Dimension, Record, RecordSet, Selection};

// ---------------------------------------------------------------------------
// FacetOptions: the renderable choices per dimension
// ---------------------------------------------------------------------------

/// Option list for each dimension, indexed by [`Dimension::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptions {
    lists: [Vec<Choice>; 4],
}

impl FacetOptions {
    pub fn for_dimension(&self, dim: Dimension) -> &[Choice] {
        &self.lists[dim.index()]
    }
}

/// Result of one evaluation of the filter engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueView {
    pub options: FacetOptions,
    /// Indices of records passing all four constraints, in source order.
    pub rows: Vec<usize>,
}

impl CatalogueView {
    /// Filtered records, resolved against the snapshot the view was built from.
    pub fn records<'a>(&'a self, records: &'a RecordSet) -> impl Iterator<Item = &'a Record> + 'a {
        self.rows.iter().filter_map(move |&i| records.get(i))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Options for `dim`: `All`, then the sorted distinct non-empty values among
/// rows matching the other three constraints, then the current selection if
/// it was not among them.
pub fn facet_options(records: &RecordSet, selection: &Selection, dim: Dimension) -> Vec<Choice> {
    let values: BTreeSet<&str> = records
        .iter()
        .filter(|r| selection.matches_except(r, dim))
        .map(|r| r.value(dim))
        .filter(|v| !v.is_empty())
        .collect();

    let mut opts = Vec::with_capacity(values.len() + 2);
    opts.push(Choice::All);
    opts.extend(values.iter().map(|v| Choice::value(*v)));

    // Keep the current choice renderable even if the other filters exclude it.
    if let Choice::Value(current) = selection.get(dim) {
        if !values.contains(current.as_str()) {
            opts.push(Choice::Value(current.clone()));
        }
    }
    opts
}

/// Return indices of records that pass all four constraints.
pub fn filtered_indices(records: &RecordSet, selection: &Selection) -> Vec<usize> {
    if selection.is_unconstrained() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Evaluate options for every dimension and the final filtered rows.
pub fn compute_view(records: &RecordSet, selection: &Selection) -> CatalogueView {
    let options = FacetOptions {
        lists: Dimension::ALL.map(|d| facet_options(records, selection, d)),
    };
    CatalogueView {
        options,
        rows: filtered_indices(records, selection),
    }
}
