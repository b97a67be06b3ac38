use crate::data::model::{NumericAttribute, Species};
use crate::data::store::FilteredView;

// ---------------------------------------------------------------------------
// Equal-width histogram of one attribute, split by species
// ---------------------------------------------------------------------------

/// How the per-species bars of one bin are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramMode {
    /// Bars of each species side by side within a bin.
    Grouped,
    /// Bars of each species stacked on top of the previous species.
    Stacked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub attribute: NumericAttribute,
    /// `bins + 1` ascending edges; empty when no row had a value.
    pub edges: Vec<f64>,
    /// Per species (indexed by [`Species::index`]), one count per bin.
    pub counts: [Vec<usize>; 3],
    /// Rows skipped because the attribute was missing.
    pub dropped: usize,
}

impl Histogram {
    /// Bin `attribute` over the rows of `view`. `bins` is clamped to at least 1.
    ///
    /// Bins span `[min, max]` of the present values; the last bin is closed on
    /// the right so the maximum is counted. A single distinct value gets a
    /// unit-wide range centred on it.
    pub fn build(view: &FilteredView, attribute: NumericAttribute, bins: usize) -> Self {
        let bins = bins.max(1);
        let mut values: Vec<(Species, f64)> = Vec::with_capacity(view.len());
        let mut dropped = 0;
        for p in view.iter() {
            match attribute.value_of(p) {
                Some(v) if v.is_finite() => values.push((p.species, v)),
                _ => dropped += 1,
            }
        }

        if values.is_empty() {
            return Histogram {
                attribute,
                edges: Vec::new(),
                counts: Default::default(),
                dropped,
            };
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
                (lo.min(v), hi.max(v))
            });
        if hi - lo <= f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts: [Vec<usize>; 3] = std::array::from_fn(|_| vec![0; bins]);
        for (species, v) in values {
            let bin = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[species.index()][bin] += 1;
        }

        Histogram {
            attribute,
            edges,
            counts,
            dropped,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        (self.edges[bin] + self.edges[bin + 1]) / 2.0
    }

    /// Counts of `species`, one per bin.
    pub fn species_counts(&self, species: Species) -> &[usize] {
        &self.counts[species.index()]
    }

    /// Species with at least one counted value, in [`Species::ALL`] order.
    pub fn species_present(&self) -> impl Iterator<Item = Species> + '_ {
        Species::ALL
            .into_iter()
            .filter(|s| self.species_counts(*s).iter().any(|&c| c > 0))
    }

    /// Number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}
