use std::cell::{Cell, OnceCell};
use std::sync::Arc;

use super::filter::{SpeciesSelection, filtered_indices, full_selection};
use super::model::{Penguin, PenguinDataset, Species};

// ---------------------------------------------------------------------------
// FilteredView – the memoized result handed to every consumer
// ---------------------------------------------------------------------------

/// Rows of the base dataset that match one species selection.
#[derive(Debug)]
pub struct FilteredView {
    dataset: Arc<PenguinDataset>,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices into the base dataset, in dataset order.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The `i`-th visible row.
    pub fn get(&self, i: usize) -> Option<&Penguin> {
        self.indices.get(i).map(|&idx| &self.dataset.penguins[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Penguin> + '_ {
        self.indices.iter().map(|&idx| &self.dataset.penguins[idx])
    }
}

// ---------------------------------------------------------------------------
// FilterStore – base dataset + selection + cached view
// ---------------------------------------------------------------------------

/// Owns the immutable dataset and the species selection, and lazily caches the
/// filtered view. Any selection change drops the cache; the next read rebuilds
/// it once and every later reader shares the same [`FilteredView`].
#[derive(Debug)]
pub struct FilterStore {
    dataset: Arc<PenguinDataset>,
    selection: SpeciesSelection,
    view: OnceCell<Arc<FilteredView>>,
    recomputes: Cell<usize>,
}

impl FilterStore {
    /// New store with every species selected.
    pub fn new(dataset: PenguinDataset) -> Self {
        Self::with_selection(dataset, full_selection())
    }

    pub fn with_selection(dataset: PenguinDataset, selection: SpeciesSelection) -> Self {
        FilterStore {
            dataset: Arc::new(dataset),
            selection,
            view: OnceCell::new(),
            recomputes: Cell::new(0),
        }
    }

    pub fn dataset(&self) -> &PenguinDataset {
        &self.dataset
    }

    pub fn selection(&self) -> &SpeciesSelection {
        &self.selection
    }

    /// Replace the selection and mark the cached view stale.
    pub fn set_selection(&mut self, selection: SpeciesSelection) {
        log::debug!("species selection -> {selection:?}");
        self.selection = selection;
        self.view.take();
    }

    /// Current filtered rows, recomputed only if the selection changed since
    /// the last read.
    pub fn filtered_view(&self) -> Arc<FilteredView> {
        self.view
            .get_or_init(|| {
                self.recomputes.set(self.recomputes.get() + 1);
                let indices = filtered_indices(&self.dataset, &self.selection);
                log::debug!(
                    "recomputed filtered view: {} of {} rows",
                    indices.len(),
                    self.dataset.len()
                );
                Arc::new(FilteredView {
                    dataset: Arc::clone(&self.dataset),
                    indices,
                })
            })
            .clone()
    }

    /// How many times the view has been rebuilt.
    #[cfg(test)]
    pub fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }

    pub fn is_selected(&self, species: Species) -> bool {
        self.selection.contains(species.as_str())
    }

    /// Flip a single species checkbox.
    pub fn toggle_species(&mut self, species: Species) {
        let mut next = self.selection.clone();
        if !next.remove(species.as_str()) {
            next.insert(species.as_str().to_string());
        }
        self.set_selection(next);
    }

    pub fn select_all(&mut self) {
        self.set_selection(full_selection());
    }

    pub fn select_none(&mut self) {
        self.set_selection(SpeciesSelection::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three_rows() -> PenguinDataset {
        PenguinDataset::from_penguins(vec![
            Penguin::new(Species::Adelie, "Torgersen"),
            Penguin::new(Species::Gentoo, "Biscoe"),
            Penguin::new(Species::Chinstrap, "Dream"),
        ])
    }

    fn selection(names: &[&str]) -> SpeciesSelection {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selecting_two_species_returns_first_two_rows() {
        let mut store = FilterStore::new(three_rows());
        store.set_selection(selection(&["Adelie", "Gentoo"]));

        let view = store.filtered_view();
        let species: Vec<Species> = view.iter().map(|p| p.species).collect();
        assert_eq!(species, [Species::Adelie, Species::Gentoo]);
        assert_eq!(view.indices(), [0, 1]);
    }

    #[test]
    fn full_selection_is_whole_dataset() {
        let store = FilterStore::new(three_rows());
        let view = store.filtered_view();
        assert_eq!(view.len(), 3);
        assert!(view.iter().eq(store.dataset().penguins.iter()));
    }

    #[test]
    fn empty_selection_is_empty_view() {
        let mut store = FilterStore::new(three_rows());
        store.select_none();
        assert!(store.filtered_view().is_empty());
    }

    #[test]
    fn unknown_species_contributes_nothing() {
        let mut store = FilterStore::new(three_rows());
        store.set_selection(selection(&["Emperor", "Chinstrap"]));
        let view = store.filtered_view();
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).map(|p| p.species), Some(Species::Chinstrap));
    }

    #[test]
    fn repeated_reads_share_one_computation() {
        let mut store = FilterStore::new(three_rows());
        let a = store.filtered_view();
        let b = store.filtered_view();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.recompute_count(), 1);

        store.toggle_species(Species::Gentoo);
        assert_eq!(store.recompute_count(), 1, "invalidation alone must not recompute");

        let c = store.filtered_view();
        let d = store.filtered_view();
        assert!(Arc::ptr_eq(&c, &d));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(store.recompute_count(), 2);
        assert_eq!(c.indices(), [0, 2]);
        // An earlier view stays valid for whoever still holds it.
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn toggle_and_select_all_round_trip() {
        let mut store = FilterStore::new(three_rows());
        store.toggle_species(Species::Adelie);
        assert!(!store.is_selected(Species::Adelie));
        store.toggle_species(Species::Adelie);
        assert!(store.is_selected(Species::Adelie));
        store.select_none();
        store.select_all();
        assert_eq!(store.filtered_view().len(), 3);
    }

    fn arb_species() -> impl Strategy<Value = Species> {
        prop::sample::select(Species::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn view_matches_selection_in_order(
            rows in prop::collection::vec(arb_species(), 0..64),
            names in prop::collection::btree_set(
                prop::sample::select(vec!["Adelie", "Gentoo", "Chinstrap", "Emperor"]),
                0..4,
            ),
        ) {
            let dataset = PenguinDataset::from_penguins(
                rows.iter().map(|&s| Penguin::new(s, "Dream")).collect(),
            );
            let sel: SpeciesSelection = names.iter().map(|s| s.to_string()).collect();
            let mut store = FilterStore::new(dataset);
            store.set_selection(sel.clone());
            let view = store.filtered_view();

            let expected: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, s)| sel.contains(s.as_str()))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(view.indices(), expected.as_slice());
            prop_assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
        }
    }
}
