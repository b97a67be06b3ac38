use std::collections::HashMap;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DatasetError, Penguin, PenguinDataset, Sex, Species};

/// Sample shipped inside the binary so the dashboard works without a file.
const BUNDLED_CSV: &str = include_str!("../../assets/penguins.csv");

/// Every column the loader understands, in dataset order.
const COLUMNS: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

const REQUIRED: [&str; 2] = ["species", "island"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a penguin dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one column per field (strings may be dictionary-encoded)
/// * `.json`    – `[{ "species": "Adelie", "bill_length_mm": 39.1, ... }, ...]`
/// * `.csv`     – header row with the field names; `NA` or empty means missing
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// The sample dataset compiled into the binary.
pub fn load_bundled() -> Result<PenguinDataset> {
    read_csv(csv::Reader::from_reader(BUNDLED_CSV.as_bytes())).context("parsing bundled dataset")
}

// ---------------------------------------------------------------------------
// Raw cells → typed records (shared by all formats)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Text(String),
    Number(f64),
    Null,
}

/// Markers the published CSV exports use for "no value".
fn is_missing(s: &str) -> bool {
    matches!(s.trim(), "" | "NA" | "na" | "NaN" | "nan" | ".")
}

fn text(raw: RawValue) -> Option<String> {
    match raw {
        RawValue::Text(s) if is_missing(&s) => None,
        RawValue::Text(s) => Some(s.trim().to_string()),
        RawValue::Number(n) => Some(n.to_string()),
        RawValue::Null => None,
    }
}

fn number(column: &'static str, raw: RawValue) -> Result<Option<f64>, DatasetError> {
    match raw {
        RawValue::Number(n) if n.is_nan() => Ok(None),
        RawValue::Number(n) => Ok(Some(n)),
        RawValue::Text(s) if is_missing(&s) => Ok(None),
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DatasetError::InvalidNumber { column, value: s }),
        RawValue::Null => Ok(None),
    }
}

/// Build one record; `field` returns the raw cell for a column name
/// (`RawValue::Null` when the column is absent).
fn penguin_from_raw(mut field: impl FnMut(&'static str) -> RawValue) -> Result<Penguin, DatasetError> {
    let species = text(field("species"))
        .ok_or(DatasetError::MissingValue("species"))?
        .parse::<Species>()?;
    let island = text(field("island")).ok_or(DatasetError::MissingValue("island"))?;
    let sex = text(field("sex")).map(|s| s.parse::<Sex>()).transpose()?;

    Ok(Penguin {
        species,
        island,
        bill_length_mm: number("bill_length_mm", field("bill_length_mm"))?,
        bill_depth_mm: number("bill_depth_mm", field("bill_depth_mm"))?,
        flipper_length_mm: number("flipper_length_mm", field("flipper_length_mm"))?,
        body_mass_g: number("body_mass_g", field("body_mass_g"))?,
        sex,
        year: number("year", field("year"))?.map(|y| y.round() as i64),
    })
}

fn check_required(present: impl Fn(&str) -> bool) -> Result<(), DatasetError> {
    match REQUIRED.into_iter().find(|&col| !present(col)) {
        Some(col) => Err(DatasetError::MissingColumn(col)),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one penguin per row.
/// Unknown columns (e.g. the leading `rowid` of R exports) are ignored.
fn load_csv(path: &Path) -> Result<PenguinDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<PenguinDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let index: HashMap<&str, usize> = COLUMNS
        .iter()
        .filter_map(|&col| headers.iter().position(|h| h.trim() == col).map(|i| (col, i)))
        .collect();
    check_required(|col| index.contains_key(col))?;

    let mut penguins = Vec::new();
    // Rows are numbered from 1, the header excluded.
    for (row_no, result) in (1..).zip(reader.records()) {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let penguin = penguin_from_raw(|col| {
            index
                .get(col)
                .and_then(|&i| record.get(i))
                .map_or(RawValue::Null, |s| RawValue::Text(s.to_string()))
        })
        .with_context(|| format!("CSV row {row_no}"))?;
        penguins.push(penguin);
    }

    Ok(PenguinDataset::from_penguins(penguins))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PenguinDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<PenguinDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut penguins = Vec::with_capacity(records.len());

    for (i, rec) in (1..).zip(records) {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        check_required(|col| obj.contains_key(col)).with_context(|| format!("Row {i}"))?;

        let penguin = penguin_from_raw(|col| obj.get(col).map_or(RawValue::Null, json_to_raw))
            .with_context(|| format!("Row {i}"))?;
        penguins.push(penguin);
    }

    Ok(PenguinDataset::from_penguins(penguins))
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map_or(RawValue::Null, RawValue::Number),
        JsonValue::Null => RawValue::Null,
        other => RawValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per penguin field.
///
/// Works with files written by **Pandas** (`df.to_parquet()`, where string
/// columns are often categorical / dictionary-encoded), **Polars** and R's
/// `arrow::write_parquet`.
fn load_parquet(path: &Path) -> Result<PenguinDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut penguins = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        check_required(|col| schema.index_of(col).is_ok())?;

        // Resolve each known column once per batch, decoding dictionaries.
        let mut columns: HashMap<&str, ArrayRef> = HashMap::new();
        for col in COLUMNS {
            let Ok(idx) = schema.index_of(col) else {
                continue;
            };
            let array = batch.column(idx);
            let array = match array.data_type() {
                DataType::Dictionary(_, _) => arrow::compute::cast(array, &DataType::Utf8)
                    .with_context(|| format!("decoding dictionary column '{col}'"))?,
                _ => array.clone(),
            };
            columns.insert(col, array);
        }

        for row in 0..batch.num_rows() {
            row_no += 1;
            let mut cells = HashMap::with_capacity(columns.len());
            for (&col, array) in &columns {
                let value = extract_raw(array, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{col}'"))?;
                cells.insert(col, value);
            }
            let penguin = penguin_from_raw(|col| cells.remove(col).unwrap_or(RawValue::Null))
                .with_context(|| format!("Row {row_no}"))?;
            penguins.push(penguin);
        }
    }

    Ok(PenguinDataset::from_penguins(penguins))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw(col: &ArrayRef, row: usize) -> Result<RawValue> {
    if col.is_null(row) {
        return Ok(RawValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => RawValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => RawValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            RawValue::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            RawValue::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            RawValue::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            RawValue::Number(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            RawValue::Text(arr.value(row).to_string())
        }
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(value)
}
