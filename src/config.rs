use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::data::model::NumericAttribute;

pub const DEFAULT_GROUPED_BINS: usize = 20;
pub const DEFAULT_STACKED_BINS: usize = 15;
/// Range of the grouped-histogram bin input.
pub const GROUPED_BINS_RANGE: std::ops::RangeInclusive<usize> = 1..=500;
/// Range of the stacked-histogram bin slider.
pub const STACKED_BINS_RANGE: std::ops::RangeInclusive<usize> = 5..=30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown attribute '{0}' (expected one of bill_length_mm, bill_depth_mm, flipper_length_mm, body_mass_g)")]
    UnknownAttribute(String),
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "penguin-dash", version, about = "Interactive Palmer Penguins explorer")]
pub struct Cli {
    /// Dataset to open (.csv, .json, .parquet). Uses the bundled sample if omitted.
    pub data: Option<PathBuf>,

    /// JSON settings file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Histogram attribute (e.g. body_mass_g).
    #[arg(long)]
    pub attribute: Option<String>,

    /// Bin count of the grouped histogram (1-500).
    #[arg(long)]
    pub grouped_bins: Option<usize>,

    /// Bin count of the stacked histogram (5-30).
    #[arg(long)]
    pub stacked_bins: Option<usize>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Start-up settings: defaults, then the `--config` file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: Option<PathBuf>,
    pub attribute: String,
    pub grouped_bins: usize,
    pub stacked_bins: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: None,
            attribute: NumericAttribute::default().column_name().to_string(),
            grouped_bins: DEFAULT_GROUPED_BINS,
            stacked_bins: DEFAULT_STACKED_BINS,
            window_size: [1400.0, 900.0],
        }
    }
}

impl DashboardConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.attribute()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    fn apply_cli(&mut self, cli: Cli) {
        if cli.data.is_some() {
            self.data = cli.data;
        }
        if let Some(attribute) = cli.attribute {
            self.attribute = attribute;
        }
        if let Some(bins) = cli.grouped_bins {
            self.grouped_bins = bins;
        }
        if let Some(bins) = cli.stacked_bins {
            self.stacked_bins = bins;
        }
    }

    pub fn attribute(&self) -> Result<NumericAttribute, ConfigError> {
        NumericAttribute::from_column_name(&self.attribute)
            .ok_or_else(|| ConfigError::UnknownAttribute(self.attribute.clone()))
    }

    pub fn grouped_bins(&self) -> usize {
        self.grouped_bins
            .clamp(*GROUPED_BINS_RANGE.start(), *GROUPED_BINS_RANGE.end())
    }

    pub fn stacked_bins(&self) -> usize {
        self.stacked_bins
            .clamp(*STACKED_BINS_RANGE.start(), *STACKED_BINS_RANGE.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_sidebar() {
        let config = DashboardConfig::default();
        assert_eq!(config.attribute(), Ok(NumericAttribute::BillLength));
        assert_eq!(config.grouped_bins(), 20);
        assert_eq!(config.stacked_bins(), 15);
        assert_eq!(config.data, None);
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, r#"{{"attribute": "bill_depth_mm", "grouped_bins": 30, "stacked_bins": 10}}"#)
            .expect("write");

        let cli = Cli::parse_from([
            "penguin-dash",
            "--config",
            file.path().to_str().expect("utf-8 path"),
            "--grouped-bins",
            "12",
            "penguins.csv",
        ]);
        let config = DashboardConfig::from_cli(cli).expect("config");
        assert_eq!(config.attribute(), Ok(NumericAttribute::BillDepth));
        assert_eq!(config.grouped_bins(), 12);
        assert_eq!(config.stacked_bins(), 10);
        assert_eq!(config.data, Some(PathBuf::from("penguins.csv")));
    }

    #[test]
    fn bin_counts_are_clamped() {
        let config = DashboardConfig {
            grouped_bins: 0,
            stacked_bins: 99,
            ..Default::default()
        };
        assert_eq!(config.grouped_bins(), 1);
        assert_eq!(config.stacked_bins(), 30);

        let cli = Cli::parse_from(["penguin-dash", "--grouped-bins", "18446744073709551615"]);
        let config = DashboardConfig::from_cli(cli).expect("config");
        assert_eq!(config.grouped_bins(), 500);
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let cli = Cli::parse_from(["penguin-dash", "--attribute", "wingspan"]);
        let err = DashboardConfig::from_cli(cli).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnknownAttribute("wingspan".into()))
        );
    }
}
