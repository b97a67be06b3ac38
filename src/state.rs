use std::path::Path;

use crate::chart::histogram::{Histogram, HistogramMode};
use crate::chart::scatter::{ScatterSeries, scatter_series};
use crate::color::SpeciesPalette;
use crate::config::{DashboardConfig, GROUPED_BINS_RANGE, STACKED_BINS_RANGE};
use crate::data::model::{NumericAttribute, PenguinDataset, Species};
use crate::data::store::{FilterStore, FilteredView};
use crate::data::table::{GridFilters, SortState};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Widgets never touch the store directly: every control change goes through
/// one of the handlers below.
pub struct AppState {
    /// Dataset, species selection and the cached filtered view.
    pub store: FilterStore,

    /// Where the current dataset came from (file name or "bundled sample").
    pub source: String,

    /// Attribute shown by both histograms.
    pub attribute: NumericAttribute,

    /// Bin count of the grouped histogram (numeric input).
    pub grouped_bins: usize,

    /// Bin count of the stacked histogram (slider).
    pub stacked_bins: usize,

    /// Header-click sort of the data table.
    pub table_sort: SortState,

    /// Header-click sort of the data grid.
    pub grid_sort: SortState,

    /// Per-column text filters of the data grid.
    pub grid_filters: GridFilters,

    /// Species colours shared by every chart.
    pub palette: SpeciesPalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: PenguinDataset, source: impl Into<String>, config: &DashboardConfig) -> Self {
        Self {
            store: FilterStore::new(dataset),
            source: source.into(),
            attribute: config.attribute().unwrap_or_default(),
            grouped_bins: config.grouped_bins(),
            stacked_bins: config.stacked_bins(),
            table_sort: SortState::default(),
            grid_sort: SortState::default(),
            grid_filters: GridFilters::default(),
            palette: SpeciesPalette::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, keeping the current species selection.
    pub fn set_dataset(&mut self, dataset: PenguinDataset, source: impl Into<String>) {
        let selection = self.store.selection().clone();
        self.store = FilterStore::with_selection(dataset, selection);
        self.source = source.into();
        self.grid_filters.clear();
        self.status_message = None;
    }

    /// File → Open: replace the dataset, or report why it could not be read.
    pub fn open_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} penguins from {} ({} islands)",
                    dataset.len(),
                    path.display(),
                    dataset.islands.len()
                );
                let source = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_dataset(dataset, source);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    // -- species selection --

    /// Toggle a single species checkbox.
    pub fn toggle_species(&mut self, species: Species) {
        self.store.toggle_species(species);
    }

    pub fn select_all(&mut self) {
        self.store.select_all();
    }

    pub fn select_none(&mut self) {
        self.store.select_none();
    }

    // -- histogram controls --

    pub fn set_attribute(&mut self, attribute: NumericAttribute) {
        self.attribute = attribute;
    }

    pub fn set_grouped_bins(&mut self, bins: usize) {
        self.grouped_bins = bins.clamp(*GROUPED_BINS_RANGE.start(), *GROUPED_BINS_RANGE.end());
    }

    pub fn set_stacked_bins(&mut self, bins: usize) {
        self.stacked_bins = bins.clamp(*STACKED_BINS_RANGE.start(), *STACKED_BINS_RANGE.end());
    }

    // -- derived data for the consumers --

    pub fn histogram(&self, mode: HistogramMode) -> Histogram {
        let bins = match mode {
            HistogramMode::Grouped => self.grouped_bins,
            HistogramMode::Stacked => self.stacked_bins,
        };
        Histogram::build(&self.store.filtered_view(), self.attribute, bins)
    }

    pub fn scatter(&self) -> Vec<ScatterSeries> {
        scatter_series(&self.store.filtered_view())
    }

    /// Row order of the data table: positions into `view`.
    pub fn table_rows(&self, view: &FilteredView) -> Vec<usize> {
        let mut rows: Vec<usize> = (0..view.len()).collect();
        self.table_sort.apply(view, &mut rows);
        rows
    }

    /// Rows of the data grid after its column filters and sort.
    pub fn grid_rows(&self, view: &FilteredView) -> Vec<usize> {
        let mut rows = self.grid_filters.rows(view);
        self.grid_sort.apply(view, &mut rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use crate::data::table::Column;

    fn state() -> AppState {
        let dataset = load_bundled().expect("bundled dataset");
        AppState::new(dataset, "bundled sample", &DashboardConfig::default())
    }

    #[test]
    fn consumers_share_one_recompute_per_change() {
        let mut state = state();
        let before = state.store.recompute_count();

        state.toggle_species(Species::Chinstrap);
        let view = state.store.filtered_view();
        let _table = state.table_rows(&view);
        let _grid = state.grid_rows(&view);
        let _grouped = state.histogram(HistogramMode::Grouped);
        let _stacked = state.histogram(HistogramMode::Stacked);
        let _scatter = state.scatter();

        assert_eq!(state.store.recompute_count(), before + 1);
    }

    #[test]
    fn deselected_species_disappear_from_every_chart() {
        let mut state = state();
        state.toggle_species(Species::Gentoo);

        let grouped = state.histogram(HistogramMode::Grouped);
        assert!(grouped.species_present().all(|s| s != Species::Gentoo));
        assert!(state.scatter().iter().all(|s| s.species != Species::Gentoo));

        state.select_none();
        assert!(state.histogram(HistogramMode::Stacked).is_empty());
        assert!(state.scatter().is_empty());
    }

    #[test]
    fn bin_controls_use_their_own_counts() {
        let mut state = state();
        state.set_grouped_bins(0);
        state.set_stacked_bins(100);
        assert_eq!(state.histogram(HistogramMode::Grouped).bin_count(), 1);
        assert_eq!(state.histogram(HistogramMode::Stacked).bin_count(), 30);

        state.set_grouped_bins(usize::MAX);
        assert_eq!(state.grouped_bins, 500);
        assert_eq!(state.histogram(HistogramMode::Grouped).bin_count(), 500);

        state.set_attribute(NumericAttribute::BodyMass);
        assert_eq!(state.histogram(HistogramMode::Grouped).attribute, NumericAttribute::BodyMass);
    }

    #[test]
    fn grid_filters_do_not_touch_the_table() {
        let mut state = state();
        *state.grid_filters.query_mut(Column::Island) = "dream".into();
        let view = state.store.filtered_view();

        let grid = state.grid_rows(&view);
        assert!(!grid.is_empty());
        assert!(grid.len() < view.len());
        assert_eq!(state.table_rows(&view).len(), view.len());
    }

    #[test]
    fn new_dataset_keeps_selection() {
        let mut state = state();
        state.toggle_species(Species::Adelie);
        let dataset = load_bundled().expect("bundled dataset");
        state.set_dataset(dataset, "again");

        assert!(!state.store.is_selected(Species::Adelie));
        assert!(state.store.filtered_view().iter().all(|p| p.species != Species::Adelie));
        assert_eq!(state.source, "again");
    }

    #[test]
    fn failed_open_keeps_current_data() {
        let mut state = state();
        let rows = state.store.dataset().len();
        state.open_path(Path::new("/nonexistent/penguins.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.store.dataset().len(), rows);
    }
}
