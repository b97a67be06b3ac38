use std::collections::BTreeSet;

use super::model::{PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Filter predicate: which species are checked
// ---------------------------------------------------------------------------

/// Species names currently checked in the sidebar.
/// Plain strings so that any value can be stored; names that are not a known
/// species simply never match.
pub type SpeciesSelection = BTreeSet<String>;

/// Every known species checked (i.e., show everything).
pub fn full_selection() -> SpeciesSelection {
    Species::ALL.iter().map(|s| s.as_str().to_string()).collect()
}

/// Return indices of penguins whose species is in `selection`, in dataset order.
///
/// An empty selection yields an empty result.
pub fn filtered_indices(dataset: &PenguinDataset, selection: &SpeciesSelection) -> Vec<usize> {
    dataset
        .penguins
        .iter()
        .enumerate()
        .filter(|(_, p)| selection.contains(p.species.as_str()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Penguin;

    fn dataset() -> PenguinDataset {
        PenguinDataset::from_penguins(vec![
            Penguin::new(Species::Adelie, "Torgersen"),
            Penguin::new(Species::Gentoo, "Biscoe"),
            Penguin::new(Species::Chinstrap, "Dream"),
            Penguin::new(Species::Adelie, "Dream"),
        ])
    }

    fn selection(names: &[&str]) -> SpeciesSelection {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_checked_species_in_order() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, &selection(&["Adelie", "Gentoo"])), [0, 1, 3]);
        assert_eq!(filtered_indices(&ds, &selection(&["Chinstrap"])), [2]);
    }

    #[test]
    fn full_selection_keeps_everything() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, &full_selection()), [0, 1, 2, 3]);
    }

    #[test]
    fn empty_and_unknown_selections_match_nothing() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &SpeciesSelection::new()).is_empty());
        assert!(filtered_indices(&ds, &selection(&["Emperor", "adelie"])).is_empty());
    }
}
