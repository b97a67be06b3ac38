use crate::data::model::{Sex, Species};
use crate::data::store::FilteredView;

/// Marker radius range, in points, that body mass is mapped onto.
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 8.0;

/// Bill length vs bill depth for one complete penguin.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub bill_length_mm: f64,
    pub bill_depth_mm: f64,
    pub body_mass_g: f64,
    pub island: String,
    pub sex: Sex,
    pub radius: f32,
}

impl ScatterPoint {
    pub fn hover_text(&self) -> String {
        format!(
            "island: {}\nsex: {}\nbody_mass_g: {}",
            self.island, self.sex, self.body_mass_g
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub species: Species,
    pub points: Vec<ScatterPoint>,
}

/// Group the complete rows of `view` by species (in [`Species::ALL`] order,
/// empty species omitted). Rows missing bill length, bill depth, body mass,
/// island or sex are left out.
pub fn scatter_series(view: &FilteredView) -> Vec<ScatterSeries> {
    let complete: Vec<(Species, ScatterPoint)> = view
        .iter()
        .filter_map(|p| {
            let island = p.island.trim();
            if island.is_empty() {
                return None;
            }
            Some((
                p.species,
                ScatterPoint {
                    bill_length_mm: p.bill_length_mm?,
                    bill_depth_mm: p.bill_depth_mm?,
                    body_mass_g: p.body_mass_g?,
                    island: island.to_string(),
                    sex: p.sex?,
                    radius: 0.0,
                },
            ))
        })
        .collect();

    let (lo, hi) = complete
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, pt)| {
            (lo.min(pt.body_mass_g), hi.max(pt.body_mass_g))
        });

    let mut series: Vec<ScatterSeries> = Species::ALL
        .into_iter()
        .map(|species| ScatterSeries {
            species,
            points: Vec::new(),
        })
        .collect();
    for (species, mut pt) in complete {
        pt.radius = marker_radius(pt.body_mass_g, lo, hi);
        series[species.index()].points.push(pt);
    }
    series.retain(|s| !s.points.is_empty());
    series
}

fn marker_radius(mass: f64, lo: f64, hi: f64) -> f32 {
    if hi - lo <= f64::EPSILON {
        return (MIN_RADIUS + MAX_RADIUS) / 2.0;
    }
    let t = ((mass - lo) / (hi - lo)) as f32;
    MIN_RADIUS + t * (MAX_RADIUS - MIN_RADIUS)
}

/// The point closest to `(x, y)` across all series, used for hover labels.
pub fn nearest(series: &[ScatterSeries], x: f64, y: f64) -> Option<(Species, &ScatterPoint)> {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(move |pt| (s.species, pt)))
        .min_by(|(_, a), (_, b)| {
            let da = (a.bill_length_mm - x).powi(2) + (a.bill_depth_mm - y).powi(2);
            let db = (b.bill_length_mm - x).powi(2) + (b.bill_depth_mm - y).powi(2);
            da.total_cmp(&db)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Penguin, PenguinDataset};
    use crate::data::store::FilterStore;
    use approx::assert_relative_eq;

    fn complete(species: Species, bill: f64, mass: f64) -> Penguin {
        Penguin {
            bill_length_mm: Some(bill),
            bill_depth_mm: Some(18.0),
            flipper_length_mm: Some(190.0),
            body_mass_g: Some(mass),
            sex: Some(Sex::Female),
            ..Penguin::new(species, "Biscoe")
        }
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let mut no_sex = complete(Species::Adelie, 40.0, 3500.0);
        no_sex.sex = None;
        let mut no_mass = complete(Species::Gentoo, 45.0, 5000.0);
        no_mass.body_mass_g = None;
        // A missing flipper length does not matter for this chart.
        let mut no_flipper = complete(Species::Chinstrap, 48.0, 3700.0);
        no_flipper.flipper_length_mm = None;

        let store = FilterStore::new(PenguinDataset::from_penguins(vec![
            no_sex,
            no_mass,
            no_flipper,
            complete(Species::Adelie, 38.0, 3300.0),
        ]));
        let series = scatter_series(&store.filtered_view());

        let species: Vec<Species> = series.iter().map(|s| s.species).collect();
        assert_eq!(species, [Species::Adelie, Species::Chinstrap]);
        assert_eq!(series[0].points.len(), 1);
        assert_relative_eq!(series[0].points[0].bill_length_mm, 38.0);
    }

    #[test]
    fn radius_scales_with_body_mass() {
        let store = FilterStore::new(PenguinDataset::from_penguins(vec![
            complete(Species::Adelie, 38.0, 3000.0),
            complete(Species::Adelie, 39.0, 4500.0),
            complete(Species::Gentoo, 47.0, 6000.0),
        ]));
        let series = scatter_series(&store.filtered_view());
        assert_relative_eq!(series[0].points[0].radius, MIN_RADIUS);
        assert_relative_eq!(series[0].points[1].radius, (MIN_RADIUS + MAX_RADIUS) / 2.0);
        assert_relative_eq!(series[1].points[0].radius, MAX_RADIUS);
    }

    #[test]
    fn nearest_point_for_hover() {
        let store = FilterStore::new(PenguinDataset::from_penguins(vec![
            complete(Species::Adelie, 38.0, 3000.0),
            complete(Species::Gentoo, 47.0, 6000.0),
        ]));
        let series = scatter_series(&store.filtered_view());
        let (species, pt) = nearest(&series, 46.0, 17.0).expect("a point");
        assert_eq!(species, Species::Gentoo);
        assert!(pt.hover_text().contains("island: Biscoe"));
        assert!(nearest(&[], 0.0, 0.0).is_none());
    }
}
