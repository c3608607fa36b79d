use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};

use super::model::{ElectricityMix, LossFields, LossTable, MixRow};
use crate::config::ResourceLocator;
use crate::error::{BackgroundError, Result};

/// Header of the mix table's country column.
pub const COUNTRY_COLUMN: &str = "Country code";
/// Header of the mix table's year column.
pub const YEAR_COLUMN: &str = "Year";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Locate `name` through `locator` and load it as an electricity mix table.
pub fn load_mix(locator: &ResourceLocator, name: &str) -> Result<ElectricityMix> {
    let path = locator.locate(name)?;
    read_mix(&path)
}

/// Locate `name` through `locator` and load it as a cumulative loss table.
pub fn load_losses(locator: &ResourceLocator, name: &str) -> Result<LossTable> {
    let path = locator.locate(name)?;
    read_losses(&path)
}

// ---------------------------------------------------------------------------
// Electricity mix
// ---------------------------------------------------------------------------

/// Table layout (`;`-delimited):
///
/// ```text
/// Country code;Year;Hydro;Nuclear;...
/// DE;2020;0.03;0.11;...
/// ```
///
/// The first two columns form the row key; every further header names a
/// technology. Empty or non-numeric share cells are read as `NaN`.
pub fn read_mix(path: &Path) -> Result<ElectricityMix> {
    ensure_file(path)?;
    debug!("reading electricity mix from {}", path.display());

    let mut reader = table_reader()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| BackgroundError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| BackgroundError::csv(path, e))?
        .clone();
    let technologies = mix_technologies(path, &headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| BackgroundError::csv(path, e))?;
        rows.push(parse_mix_row(path, row_no, &record, &technologies)?);
    }

    let mix = ElectricityMix::from_rows(&technologies, &rows);
    let (countries, years, techs, _) = mix.shape();
    info!(
        "loaded electricity mix from {}: {countries} countries x {years} years x {techs} technologies",
        path.display()
    );
    Ok(mix)
}

fn mix_technologies(path: &Path, headers: &StringRecord) -> Result<Vec<String>> {
    let country = headers.get(0).unwrap_or("");
    let year = headers.get(1).unwrap_or("");
    if country != COUNTRY_COLUMN || year != YEAR_COLUMN {
        return Err(BackgroundError::schema(
            path,
            format!(
                "expected header to start with `{COUNTRY_COLUMN};{YEAR_COLUMN}`, found `{country};{year}`"
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut technologies = Vec::with_capacity(headers.len().saturating_sub(2));
    for name in headers.iter().skip(2) {
        if !seen.insert(name) {
            return Err(BackgroundError::schema(
                path,
                format!("technology `{name}` appears twice in the header"),
            ));
        }
        technologies.push(name.to_string());
    }
    Ok(technologies)
}

fn parse_mix_row(
    path: &Path,
    row_no: usize,
    record: &StringRecord,
    technologies: &[String],
) -> Result<MixRow> {
    let country = record.get(0).unwrap_or("");
    let year_text = record.get(1).unwrap_or("");
    let year = year_text.parse::<i32>().map_err(|_| {
        BackgroundError::schema(
            path,
            format!("row {row_no}: year `{year_text}` is not an integer"),
        )
    })?;

    let cells = record.len().saturating_sub(2);
    if cells > technologies.len() {
        warn!(
            "{} row {row_no}: {} cells beyond the header ignored",
            path.display(),
            cells - technologies.len()
        );
    }

    let shares = technologies
        .iter()
        .enumerate()
        .map(|(j, tech)| parse_share(record.get(j + 2).unwrap_or(""), country, year, tech))
        .collect();

    Ok(MixRow::new(country, year, shares))
}

fn parse_share(cell: &str, country: &str, year: i32, technology: &str) -> f64 {
    if cell.is_empty() {
        return f64::NAN;
    }
    match cell.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            warn!("{country} {year} {technology}: `{cell}` is not a number, read as NaN");
            f64::NAN
        }
    }
}

// ---------------------------------------------------------------------------
// Cumulative losses
// ---------------------------------------------------------------------------

/// Table layout (`;`-delimited):
///
/// ```text
/// Transition;LossA;LossB
/// HV-MV;0.02;0.01
/// ```
///
/// The first header cell is ignored. Each row's first cell is its key and
/// the remaining cells are zipped with the header fields, so short rows
/// lose their trailing fields. A repeated key replaces the earlier row.
pub fn read_losses(path: &Path) -> Result<LossTable> {
    ensure_file(path)?;
    debug!("reading cumulative losses from {}", path.display());

    let mut reader = table_reader()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| BackgroundError::csv(path, e))?;
    let mut records = reader.records();

    let header = match records.next() {
        Some(result) => result.map_err(|e| BackgroundError::csv(path, e))?,
        None => return Err(BackgroundError::schema(path, "loss table has no header row")),
    };
    let fields: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut table = LossTable::new();
    for (row_no, result) in records.enumerate() {
        let record = result.map_err(|e| BackgroundError::csv(path, e))?;
        let mut cells = record.iter();
        let Some(key) = cells.next() else {
            continue;
        };

        if record.len() < header.len() {
            warn!(
                "{} row {row_no}: `{key}` has {} of {} fields",
                path.display(),
                record.len() - 1,
                fields.len()
            );
        }

        let values: LossFields = fields
            .iter()
            .cloned()
            .zip(cells.map(str::to_string))
            .collect();
        if table.insert(key, values).is_some() {
            warn!("{}: duplicate loss key `{key}`, keeping the later row", path.display());
        }
    }

    info!("loaded {} loss entries from {}", table.len(), path.display());
    Ok(table)
}

// -- helpers --

fn table_reader() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.delimiter(b';').flexible(true).trim(Trim::All);
    builder
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Err(BackgroundError::ResourceNotFound {
        name,
        path: path.to_path_buf(),
    })
}
