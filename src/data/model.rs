use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors raised while turning raw cells into typed records
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("missing value in required column '{0}'")]
    MissingValue(&'static str),
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown sex '{0}'")]
    UnknownSex(String),
    #[error("column '{column}': '{value}' is not a number")]
    InvalidNumber { column: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Species – the categorical field partitioning the dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    /// Checkbox order used throughout the UI.
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }

    /// Position in [`Species::ALL`], handy for palette lookups.
    pub fn index(&self) -> usize {
        match self {
            Species::Adelie => 0,
            Species::Gentoo => 1,
            Species::Chinstrap => 2,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Some exports carry the full common name ("Adelie Penguin (Pygoscelis adeliae)").
        let head = s.split_whitespace().next().unwrap_or("");
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(head))
            .ok_or_else(|| DatasetError::UnknownSpecies(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Sex::Female),
            "male" | "m" => Ok(Sex::Male),
            _ => Err(DatasetError::UnknownSex(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// NumericAttribute – the measurements a histogram can be drawn over
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericAttribute {
    #[default]
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl NumericAttribute {
    pub const ALL: [NumericAttribute; 4] = [
        NumericAttribute::BillLength,
        NumericAttribute::BillDepth,
        NumericAttribute::FlipperLength,
        NumericAttribute::BodyMass,
    ];

    /// Column name as it appears in the source files.
    pub fn column_name(&self) -> &'static str {
        match self {
            NumericAttribute::BillLength => "bill_length_mm",
            NumericAttribute::BillDepth => "bill_depth_mm",
            NumericAttribute::FlipperLength => "flipper_length_mm",
            NumericAttribute::BodyMass => "body_mass_g",
        }
    }

    pub fn value_of(&self, penguin: &Penguin) -> Option<f64> {
        match self {
            NumericAttribute::BillLength => penguin.bill_length_mm,
            NumericAttribute::BillDepth => penguin.bill_depth_mm,
            NumericAttribute::FlipperLength => penguin.flipper_length_mm,
            NumericAttribute::BodyMass => penguin.body_mass_g,
        }
    }

    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.column_name() == name)
    }
}

impl fmt::Display for NumericAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the dataset
// ---------------------------------------------------------------------------

/// A single observation. Measurements are optional because the published
/// dataset has a few incomplete rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Penguin {
    pub species: Species,
    pub island: String,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<Sex>,
    pub year: Option<i64>,
}

impl Penguin {
    /// A record with only the categorical fields set.
    #[cfg(test)]
    pub fn new(species: Species, island: impl Into<String>) -> Self {
        Penguin {
            species,
            island: island.into(),
            bill_length_mm: None,
            bill_depth_mm: None,
            flipper_length_mm: None,
            body_mass_g: None,
            sex: None,
            year: None,
        }
    }
}

// ---------------------------------------------------------------------------
// PenguinDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct PenguinDataset {
    /// All rows, in file order.
    pub penguins: Vec<Penguin>,
    /// Sorted set of islands present.
    pub islands: BTreeSet<String>,
}

impl PenguinDataset {
    pub fn from_penguins(penguins: Vec<Penguin>) -> Self {
        let islands = penguins.iter().map(|p| p.island.clone()).collect();
        PenguinDataset { penguins, islands }
    }

    pub fn len(&self) -> usize {
        self.penguins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.penguins.is_empty()
    }

    /// Row count per species, in [`Species::ALL`] order.
    pub fn species_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for p in &self.penguins {
            counts[p.species.index()] += 1;
        }
        counts
    }
}
