use std::time::Duration;

use mak_catalogue::data::cache::{ManualClock, RecordCache};
use mak_catalogue::data::filter::compute_view;
use mak_catalogue::data::loader::{Severity, load, load_or_empty};
use mak_catalogue::data::model::{Choice, Dimension, Record, RecordSet, Selection};
use mak_catalogue::data::source::Workbook;
use mak_catalogue::locale::Locale;
use mak_catalogue::state::AppState;

fn record(garment: &str, position: &str, operation: &str, machine: &str, time: &str, category: &str) -> Record {
    Record {
        garment: garment.to_string(),
        position: position.to_string(),
        operation: operation.to_string(),
        machine: machine.to_string(),
        time: time.to_string(),
        category: category.to_string(),
    }
}

fn two_records() -> RecordSet {
    RecordSet::new(vec![
        record("Shirt", "Collar", "Sew", "M1", "10", "Cat A"),
        record("Pants", "Waist", "Sew", "M2", "8", "Cat B"),
    ])
}

fn catalogue() -> RecordSet {
    RecordSet::new(vec![
        record("Shirt", "Collar", "Sew", "M1", "10", "Cat A"),
        record("Shirt", "Cuff", "Overlock", "M3", "6", "Cat A"),
        record("Pants", "Waist", "Sew", "M2", "8", "Cat B"),
        record("Pants", "Pocket", "Topstitch", "M4", "14", "Cat B"),
        record("Jacket", "Pocket", "Sew", "M1", "21", "Cat C"),
        record("Jacket", "Lapel", "Press", "M5", "30", "Cat C"),
        record("Shirt", "Collar", "Sew", "M1", "10", "Cat A"),
    ])
}

fn labels(choices: &[Choice]) -> Vec<String> {
    choices.iter().map(Choice::to_string).collect()
}

/// Every selection built from `All` plus one known value per dimension.
fn selections(records: &RecordSet) -> Vec<Selection> {
    let mut candidates: Vec<Vec<Choice>> = Vec::new();
    for dim in Dimension::ALL {
        let mut values: Vec<Choice> = vec![Choice::All, Choice::value("Missing")];
        if let Some(r) = records.get(0) {
            values.push(Choice::value(r.value(dim)));
        }
        if let Some(r) = records.get(records.len().saturating_sub(2)) {
            values.push(Choice::value(r.value(dim)));
        }
        candidates.push(values);
    }

    let mut out = vec![Selection::default()];
    for (d, dim) in Dimension::ALL.iter().enumerate() {
        out = out
            .into_iter()
            .flat_map(|sel| {
                candidates[d]
                    .iter()
                    .map(move |c| sel.clone().with(*dim, c.clone()))
            })
            .collect();
    }
    out
}

#[test]
fn category_narrows_garment_options() {
    let records = two_records();

    let all = compute_view(&records, &Selection::default());
    assert_eq!(labels(all.options.for_dimension(Dimension::Garment)), ["All", "Pants", "Shirt"]);

    let sel = Selection::default().with(Dimension::Category, Choice::value("Cat A"));
    let view = compute_view(&records, &sel);
    assert_eq!(labels(view.options.for_dimension(Dimension::Garment)), ["All", "Shirt"]);
    assert_eq!(view.rows, vec![0]);
    // A dimension's own choice does not narrow its own list.
    assert_eq!(
        labels(view.options.for_dimension(Dimension::Category)),
        ["All", "Cat A", "Cat B"]
    );
}

#[test]
fn inconsistent_garment_is_preserved_but_matches_nothing() {
    let records = two_records();
    let sel = Selection::default()
        .with(Dimension::Garment, Choice::value("Shirt"))
        .with(Dimension::Category, Choice::value("Cat B"));

    let view = compute_view(&records, &sel);
    assert_eq!(labels(view.options.for_dimension(Dimension::Garment)), ["All", "Pants", "Shirt"]);
    assert!(view.rows.is_empty());

    // Position options are filtered by both garment and category: nothing left.
    assert_eq!(labels(view.options.for_dimension(Dimension::Position)), ["All"]);
}

#[test]
fn appended_selection_goes_last() {
    let records = catalogue();
    let sel = Selection::default()
        .with(Dimension::Garment, Choice::value("Jacket"))
        .with(Dimension::Category, Choice::value("Cat A"));
    let view = compute_view(&records, &sel);
    assert_eq!(labels(view.options.for_dimension(Dimension::Garment)), ["All", "Shirt", "Jacket"]);
}

#[test]
fn compute_view_is_idempotent() {
    let records = catalogue();
    for sel in selections(&records) {
        assert_eq!(compute_view(&records, &sel), compute_view(&records, &sel));
    }
}

#[test]
fn selected_value_is_always_an_option() {
    let records = catalogue();
    for sel in selections(&records) {
        let view = compute_view(&records, &sel);
        for dim in Dimension::ALL {
            let opts = view.options.for_dimension(dim);
            assert_eq!(opts.first(), Some(&Choice::All));
            assert!(opts.contains(sel.get(dim)), "{dim:?} lost {:?}", sel.get(dim));
        }
    }
}

#[test]
fn unconstrained_selection_returns_everything_in_order() {
    let records = catalogue();
    let view = compute_view(&records, &Selection::default());
    let filtered: Vec<&Record> = view.records(&records).collect();
    let all: Vec<&Record> = records.iter().collect();
    assert_eq!(filtered, all);
}

#[test]
fn constraining_a_dimension_never_grows_the_result() {
    let records = catalogue();
    for sel in selections(&records) {
        let before = compute_view(&records, &sel).len();
        for dim in Dimension::ALL {
            if !sel.get(dim).is_all() {
                continue;
            }
            for r in &records {
                let narrowed = sel.clone().with(dim, Choice::value(r.value(dim)));
                assert!(compute_view(&records, &narrowed).len() <= before);
            }
        }
    }
}

#[test]
fn filtered_rows_satisfy_every_constraint() {
    let records = catalogue();
    for sel in selections(&records) {
        let view = compute_view(&records, &sel);
        for r in view.records(&records) {
            assert!(sel.matches(r));
        }
        let expected = records.iter().filter(|r| sel.matches(r)).count();
        assert_eq!(view.len(), expected);
    }
}

#[test]
fn empty_record_set_offers_only_all() {
    let view = compute_view(&RecordSet::empty(), &Selection::default());
    for dim in Dimension::ALL {
        assert_eq!(labels(view.options.for_dimension(dim)), ["All"]);
    }
    assert!(view.is_empty());
}

// ---------------------------------------------------------------------------
// Loader and session
// ---------------------------------------------------------------------------

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn english_workbook() -> Workbook {
    Workbook::new().with_section(
        "English",
        vec![
            row(&["MAK"]),
            row(&["#", "TYPE OF GARMENT", "POSITION", "OPERATION", "MACHINE", "TIME (Secs)", "CATEGORY"]),
            row(&["1", "Shirt", "Collar", "Sew", "M1", "10", "Cat A"]),
            row(&["2", "", "", "", "M7", "44", "Cat A"]),
            row(&["3", "Pants", "Waist", "Sew", "M2", "8", "Cat B"]),
        ],
    )
}

#[test]
fn row_without_garment_or_operation_is_not_loaded() {
    let records = load(&english_workbook(), Locale::English.config()).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.machine != "M7"));
}

#[test]
fn missing_section_is_an_error_diagnostic() {
    let loaded = load_or_empty(&english_workbook(), Locale::Spanish.config());
    assert!(loaded.records.is_empty());
    let diag = loaded.diagnostic.unwrap();
    assert_eq!(diag.severity, Severity::Error);
    assert!(diag.message.contains("English"));
}

#[test]
fn reset_restores_the_full_record_set() {
    let cache = RecordCache::with_clock(Duration::from_secs(60), Box::new(ManualClock::new()));
    let mut state = AppState::new(Box::new(english_workbook()), cache, Locale::English);

    state.select(Dimension::Garment, Choice::value("Shirt"));
    state.select(Dimension::Operation, Choice::value("Sew"));
    state.select(Dimension::Position, Choice::value("Waist"));
    state.select(Dimension::Category, Choice::value("Cat B"));
    assert!(state.view().is_empty());

    state.reset();
    for dim in Dimension::ALL {
        assert!(state.selection().get(dim).is_all());
    }
    assert_eq!(state.view().len(), state.records().len());
}

#[test]
fn snapshot_is_reused_until_ttl_expires() {
    let clock = ManualClock::new();
    let cache = RecordCache::with_clock(Duration::from_secs(60), Box::new(clock.clone()));
    let mut state = AppState::new(Box::new(english_workbook()), cache, Locale::English);
    let first = state.records().clone();

    clock.advance(Duration::from_secs(30));
    state.refresh();
    assert!(state.records().same_snapshot(&first));

    clock.advance(Duration::from_secs(30));
    state.refresh();
    assert!(!state.records().same_snapshot(&first));
    assert_eq!(state.records().as_slice(), first.as_slice());
}
