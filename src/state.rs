use crate::config::AppConfig;
use crate::data::cache::RecordCache;
use crate::data::filter::{CatalogueView, compute_view};
use crate::data::loader::{Diagnostic, Loaded, load_or_empty};
use crate::data::model::{Choice, Dimension, Record, RecordSet, Selection};
use crate::data::source::{TableSource, open_source};
use crate::locale::{ColumnLabels, Locale, UiTexts};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
pub struct AppState {
    /// Backing store; `None` when it could not be opened.
    source: Option<Box<dyn TableSource>>,

    /// Why `source` is missing, reported instead of loading.
    source_error: Option<Diagnostic>,

    cache: RecordCache,

    /// Active language / section.
    locale: Locale,

    /// Current choice per filter dimension.
    selection: Selection,

    /// Snapshot the view was computed from.
    records: RecordSet,

    /// Facet options and filtered rows (cached).
    view: CatalogueView,

    /// Warning or error from the last load, shown in the UI.
    pub status: Option<Diagnostic>,
}

impl AppState {
    pub fn new(source: Box<dyn TableSource>, cache: RecordCache, locale: Locale) -> Self {
        Self::build(Some(source), None, cache, locale)
    }

    /// Open the configured source. An unusable source still yields a session,
    /// just one with no data and an error status.
    pub fn from_config(config: &AppConfig) -> Self {
        let cache = RecordCache::new(config.cache_ttl());
        match open_source(&config.source) {
            Ok(source) => Self::new(source, cache, config.default_locale),
            Err(e) => {
                log::error!("Failed to open source: {e}");
                Self::build(None, Some(Diagnostic::from(&e)), cache, config.default_locale)
            }
        }
    }

    fn build(
        source: Option<Box<dyn TableSource>>,
        source_error: Option<Diagnostic>,
        cache: RecordCache,
        locale: Locale,
    ) -> Self {
        let records = RecordSet::empty();
        let selection = Selection::default();
        let view = compute_view(&records, &selection);
        let mut state = Self {
            source,
            source_error,
            cache,
            locale,
            selection,
            records,
            view,
            status: None,
        };
        state.refresh();
        state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn view(&self) -> &CatalogueView {
        &self.view
    }

    pub fn texts(&self) -> &'static UiTexts {
        self.locale.texts()
    }

    pub fn labels(&self) -> &'static ColumnLabels {
        &self.locale.config().labels
    }

    /// Records passing the current selection, in source order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.view.records(&self.records)
    }

    /// Pick up a new snapshot if the cached one expired. Cheap when it has not.
    pub fn refresh(&mut self) {
        let locale = self.locale;
        let loaded = match &self.source {
            Some(source) => self
                .cache
                .get_or_load(locale, || load_or_empty(source.as_ref(), locale.config())),
            None => Loaded {
                records: RecordSet::empty(),
                diagnostic: self.source_error.clone(),
            },
        };

        self.status = loaded.diagnostic;
        if !loaded.records.same_snapshot(&self.records) {
            self.records = loaded.records;
            self.recompute();
        }
    }

    /// Set one dimension and recompute the view.
    pub fn select(&mut self, dim: Dimension, choice: Choice) {
        if self.selection.get(dim) == &choice {
            return;
        }
        self.selection.set(dim, choice);
        self.recompute();
    }

    /// Clear all four filters at once.
    pub fn reset(&mut self) {
        self.selection.reset();
        self.recompute();
    }

    /// Switch language: different section, different labels, fresh filters.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale == self.locale {
            return;
        }
        log::info!("Switching locale to {locale}");
        self.locale = locale;
        self.selection.reset();
        self.refresh();
        self.recompute();
    }

    /// Replace the backing store, dropping all cached snapshots.
    pub fn set_source(&mut self, source: Box<dyn TableSource>) {
        log::info!("Switching source to {}", source.describe());
        self.source = Some(source);
        self.source_error = None;
        self.cache.clear();
        self.selection.reset();
        self.refresh();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.view = compute_view(&self.records, &self.selection);
        log::debug!(
            "{} of {} records visible for {:?}",
            self.view.len(),
            self.records.len(),
            self.selection
        );
    }
}
