use std::cmp::Ordering;

use super::model::Penguin;
use super::store::FilteredView;

// ---------------------------------------------------------------------------
// Columns shown by the table and the grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Species,
    Island,
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
    Sex,
    Year,
}

/// A cell value, borrowed from the row where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Species,
        Column::Island,
        Column::BillLength,
        Column::BillDepth,
        Column::FlipperLength,
        Column::BodyMass,
        Column::Sex,
        Column::Year,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Species => "species",
            Column::Island => "island",
            Column::BillLength => "bill_length_mm",
            Column::BillDepth => "bill_depth_mm",
            Column::FlipperLength => "flipper_length_mm",
            Column::BodyMass => "body_mass_g",
            Column::Sex => "sex",
            Column::Year => "year",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::Species | Column::Island | Column::Sex)
    }

    pub fn cell<'a>(&self, p: &'a Penguin) -> Cell<'a> {
        let num = |v: Option<f64>| v.map_or(Cell::Missing, Cell::Number);
        match self {
            Column::Species => Cell::Text(p.species.as_str()),
            Column::Island => Cell::Text(&p.island),
            Column::BillLength => num(p.bill_length_mm),
            Column::BillDepth => num(p.bill_depth_mm),
            Column::FlipperLength => num(p.flipper_length_mm),
            Column::BodyMass => num(p.body_mass_g),
            Column::Sex => p.sex.map_or(Cell::Missing, |s| Cell::Text(s.as_str())),
            Column::Year => num(p.year.map(|y| y as f64)),
        }
    }

    /// Display text of a cell; missing values show as `NA`.
    pub fn format(&self, p: &Penguin) -> String {
        match self.cell(p) {
            Cell::Text(s) => s.to_string(),
            Cell::Number(v) => format!("{v}"),
            Cell::Missing => "NA".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting (header clicks)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort state of a table: `None` keeps view order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<(Column, SortDirection)>,
}

impl SortState {
    /// Header click: ascending → descending → unsorted.
    pub fn cycle(&mut self, column: Column) {
        self.key = match self.key {
            Some((c, SortDirection::Ascending)) if c == column => {
                Some((column, SortDirection::Descending))
            }
            Some((c, SortDirection::Descending)) if c == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn direction_of(&self, column: Column) -> Option<SortDirection> {
        self.key.filter(|(c, _)| *c == column).map(|(_, d)| d)
    }

    /// Reorder positions into `view` (stable; missing values always last).
    pub fn apply(&self, view: &FilteredView, rows: &mut [usize]) {
        let Some((column, direction)) = self.key else {
            return;
        };
        rows.sort_by(|&a, &b| {
            let (Some(pa), Some(pb)) = (view.get(a), view.get(b)) else {
                return Ordering::Equal;
            };
            compare_cells(&column.cell(pa), &column.cell(pb), direction)
        });
    }
}

fn compare_cells(a: &Cell<'_>, b: &Cell<'_>, direction: SortDirection) -> Ordering {
    let ord = match (a, b) {
        (Cell::Missing, Cell::Missing) => return Ordering::Equal,
        (Cell::Missing, _) => return Ordering::Greater,
        (_, Cell::Missing) => return Ordering::Less,
        (Cell::Number(x), Cell::Number(y)) => x.total_cmp(y),
        (Cell::Text(x), Cell::Text(y)) => x.cmp(y),
        (Cell::Number(_), Cell::Text(_)) => Ordering::Less,
        (Cell::Text(_), Cell::Number(_)) => Ordering::Greater,
    };
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

// ---------------------------------------------------------------------------
// Per-column grid filters
// ---------------------------------------------------------------------------

/// Text typed into the filter box above each grid column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFilters {
    pub queries: [String; 8],
}

impl GridFilters {
    pub fn query_mut(&mut self, column: Column) -> &mut String {
        let i = Column::ALL.iter().position(|c| *c == column).unwrap_or(0);
        &mut self.queries[i]
    }

    pub fn is_active(&self) -> bool {
        self.queries.iter().any(|q| !q.trim().is_empty())
    }

    pub fn clear(&mut self) {
        self.queries.iter_mut().for_each(String::clear);
    }

    /// Whether a row passes every non-empty column filter.
    pub fn matches(&self, p: &Penguin) -> bool {
        Column::ALL
            .iter()
            .zip(&self.queries)
            .all(|(column, query)| cell_matches(*column, p, query.trim()))
    }

    /// Positions into `view` of the rows passing the filters.
    pub fn rows(&self, view: &FilteredView) -> Vec<usize> {
        view.iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(i, _)| i)
            .collect()
    }
}

fn cell_matches(column: Column, p: &Penguin, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    match column.cell(p) {
        Cell::Missing => false,
        Cell::Number(v) => match parse_range(query) {
            Some((lo, hi)) => lo.map_or(true, |lo| v >= lo) && hi.map_or(true, |hi| v <= hi),
            None => format!("{v}").contains(query),
        },
        Cell::Text(s) => s.to_lowercase().contains(&query.to_lowercase()),
    }
}

/// `"lo..hi"`, `"lo.."` or `"..hi"`; both bounds inclusive.
fn parse_range(query: &str) -> Option<(Option<f64>, Option<f64>)> {
    let (lo, hi) = query.split_once("..")?;
    let bound = |s: &str| -> Option<Option<f64>> {
        let s = s.trim();
        if s.is_empty() {
            Some(None)
        } else {
            s.parse::<f64>().ok().map(Some)
        }
    };
    Some((bound(lo)?, bound(hi)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{PenguinDataset, Sex, Species};
    use crate::data::store::FilterStore;

    fn penguin(species: Species, island: &str, bill: Option<f64>, sex: Option<Sex>) -> Penguin {
        Penguin {
            bill_length_mm: bill,
            sex,
            year: Some(2007),
            ..Penguin::new(species, island)
        }
    }

    fn store() -> FilterStore {
        FilterStore::new(PenguinDataset::from_penguins(vec![
            penguin(Species::Adelie, "Torgersen", Some(39.1), Some(Sex::Male)),
            penguin(Species::Adelie, "Torgersen", None, None),
            penguin(Species::Gentoo, "Biscoe", Some(46.1), Some(Sex::Female)),
            penguin(Species::Chinstrap, "Dream", Some(46.5), Some(Sex::Female)),
        ]))
    }

    #[test]
    fn missing_cells_format_as_na() {
        let s = store();
        let view = s.filtered_view();
        let row = view.get(1).unwrap();
        assert_eq!(Column::BillLength.format(row), "NA");
        assert_eq!(Column::Sex.format(row), "NA");
        assert_eq!(Column::Year.format(row), "2007");
        assert_eq!(Column::BillLength.format(view.get(0).unwrap()), "39.1");
    }

    #[test]
    fn header_click_cycles_sort() {
        let mut sort = SortState::default();
        sort.cycle(Column::Island);
        assert_eq!(sort.direction_of(Column::Island), Some(SortDirection::Ascending));
        sort.cycle(Column::Island);
        assert_eq!(sort.direction_of(Column::Island), Some(SortDirection::Descending));
        sort.cycle(Column::Island);
        assert_eq!(sort.key, None);
        sort.cycle(Column::Island);
        sort.cycle(Column::Sex);
        assert_eq!(sort.key, Some((Column::Sex, SortDirection::Ascending)));
    }

    #[test]
    fn sort_puts_missing_last_both_ways() {
        let s = store();
        let view = s.filtered_view();
        let mut sort = SortState::default();
        sort.cycle(Column::BillLength);

        let mut rows: Vec<usize> = (0..view.len()).collect();
        sort.apply(&view, &mut rows);
        assert_eq!(rows, [0, 2, 3, 1]);

        sort.cycle(Column::BillLength);
        sort.apply(&view, &mut rows);
        assert_eq!(rows, [3, 2, 0, 1]);
    }

    #[test]
    fn grid_range_filter_is_inclusive() {
        let s = store();
        let view = s.filtered_view();
        let mut filters = GridFilters::default();
        *filters.query_mut(Column::BillLength) = "39.1..46.1".into();
        assert_eq!(filters.rows(&view), [0, 2]);

        *filters.query_mut(Column::BillLength) = "46..".into();
        assert_eq!(filters.rows(&view), [2, 3]);
    }

    #[test]
    fn grid_text_filters_combine() {
        let s = store();
        let view = s.filtered_view();
        let mut filters = GridFilters::default();
        *filters.query_mut(Column::Sex) = "FEM".into();
        assert_eq!(filters.rows(&view), [2, 3]);

        *filters.query_mut(Column::Island) = "dre".into();
        assert_eq!(filters.rows(&view), [3]);
        assert!(filters.is_active());

        filters.clear();
        assert!(!filters.is_active());
        assert_eq!(filters.rows(&view).len(), 4);
    }
}
