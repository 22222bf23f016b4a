use std::path::PathBuf;
use std::sync::Arc;

use crate::chart::{ChartColors, ScatterChart, SummaryChart, scatter_chart, summary_chart};
use crate::data::filter::{PayloadRange, SiteFilter};
use crate::data::model::RecordStore;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// The user's current control values.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site_filter: SiteFilter,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    /// All sites, full observed payload range.
    pub fn for_store(store: &RecordStore) -> Self {
        Self {
            site_filter: SiteFilter::All,
            payload_range: PayloadRange::new(store.min_payload_mass(), store.max_payload_mass()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Per-session dashboard state, independent of rendering. The record store
/// is shared read-only; the selection and derived charts belong to this
/// session alone.
pub struct DashboardState {
    store: Arc<RecordStore>,
    colors: ChartColors,
    selection: SelectionState,
    summary: SummaryChart,
    scatter: ScatterChart,

    /// File the current store was loaded from.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Text typed into the site selector's search box.
    pub site_query: String,
}

impl DashboardState {
    pub fn new(store: Arc<RecordStore>, source: Option<PathBuf>) -> Self {
        let colors = ChartColors::for_store(&store);
        let selection = SelectionState::for_store(&store);
        let summary = summary_chart(&store, &selection.site_filter, &colors);
        let scatter = scatter_chart(
            &store,
            &selection.site_filter,
            selection.payload_range,
            &colors,
        );
        Self {
            store,
            colors,
            selection,
            summary,
            scatter,
            source,
            status_message: None,
            site_query: String::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn summary(&self) -> &SummaryChart {
        &self.summary
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    /// Site selector changed: both charts depend on it.
    pub fn select_site(&mut self, site_filter: SiteFilter) {
        log::debug!("site selected: {site_filter}");
        self.selection.site_filter = site_filter;
        self.summary = summary_chart(&self.store, &self.selection.site_filter, &self.colors);
        self.refresh_scatter();
    }

    /// Range selector changed. The summary ignores payload mass, so only the
    /// scatter chart is rebuilt.
    pub fn adjust_range(&mut self, low: f64, high: f64) {
        let range = PayloadRange::new(low, high)
            .clamped(self.store.min_payload_mass(), self.store.max_payload_mass());
        log::debug!("payload range: {} – {}", range.low, range.high);
        self.selection.payload_range = range;
        self.refresh_scatter();
    }

    /// Swap in a newly loaded dataset and reset the selection.
    pub fn replace_store(&mut self, store: Arc<RecordStore>, source: Option<PathBuf>) {
        *self = Self::new(store, source);
    }

    fn refresh_scatter(&mut self) {
        self.scatter = scatter_chart(
            &self.store,
            &self.selection.site_filter,
            self.selection.payload_range,
            &self.colors,
        );
    }
}
