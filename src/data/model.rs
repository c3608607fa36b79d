use std::collections::BTreeSet;
use std::num::ParseFloatError;
use std::ops::Index;

use indexmap::{IndexMap, IndexSet};
use log::warn;
use ndarray::{s, Array4, ArrayView1, ArrayView2, ArrayView4};

// ---------------------------------------------------------------------------
// MixRow – one row of the mix table
// ---------------------------------------------------------------------------

/// One (country, year) observation of the mix table.
#[derive(Debug, Clone, PartialEq)]
pub struct MixRow {
    pub country: String,
    pub year: i32,
    /// Shares in technology header order.
    pub shares: Vec<f64>,
}

impl MixRow {
    pub fn new(country: impl Into<String>, year: i32, shares: Vec<f64>) -> Self {
        Self {
            country: country.into(),
            year,
            shares,
        }
    }
}

// ---------------------------------------------------------------------------
// ElectricityMix – labeled (country, year, technology, value) array
// ---------------------------------------------------------------------------

/// Generation shares per country, year and technology.
///
/// Dense and zero-filled: a (country, year) pair missing from the source
/// table reads as `0.0` for every technology. Use [`ElectricityMix::is_observed`]
/// to tell such gaps apart from genuine zero shares.
///
/// The trailing `value` axis has a single entry, index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricityMix {
    countries: IndexSet<String>,
    years: IndexSet<i32>,
    technologies: IndexSet<String>,
    observed: BTreeSet<(usize, usize)>,
    values: Array4<f64>,
}

impl ElectricityMix {
    /// Reshape table rows into the labeled array.
    ///
    /// Country and year labels keep first-seen order; technology labels keep
    /// header order. Every cell is written by label lookup, so rows may come
    /// in any order. A repeated (country, year) row overwrites the earlier one.
    pub fn from_rows(technologies: &[String], rows: &[MixRow]) -> Self {
        let mut countries = IndexSet::new();
        let mut years = IndexSet::new();
        let keys: Vec<(usize, usize)> = rows
            .iter()
            .map(|r| {
                let (c, _) = countries.insert_full(r.country.clone());
                let (y, _) = years.insert_full(r.year);
                (c, y)
            })
            .collect();

        // Header position -> technology axis index; a repeated name maps to its first slot.
        let mut tech_axis = IndexSet::new();
        let slots: Vec<usize> = technologies
            .iter()
            .map(|name| tech_axis.insert_full(name.clone()).0)
            .collect();

        let mut values = Array4::zeros((countries.len(), years.len(), tech_axis.len(), 1));
        let mut observed = BTreeSet::new();

        for (row, &(c, y)) in rows.iter().zip(&keys) {
            if !observed.insert((c, y)) {
                warn!(
                    "duplicate mix row for {} {}, keeping the later one",
                    row.country, row.year
                );
            }
            for (pos, &t) in slots.iter().enumerate() {
                values[[c, y, t, 0]] = row.shares.get(pos).copied().unwrap_or(f64::NAN);
            }
        }

        Self {
            countries,
            years,
            technologies: tech_axis,
            observed,
            values,
        }
    }

    /// `(countries, years, technologies, 1)`.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView4<'_, f64> {
        self.values.view()
    }

    pub fn countries(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.countries.iter().map(String::as_str)
    }

    pub fn years(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    pub fn technologies(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.technologies.iter().map(String::as_str)
    }

    pub fn country_index(&self, country: &str) -> Option<usize> {
        self.countries.get_index_of(country)
    }

    pub fn year_index(&self, year: i32) -> Option<usize> {
        self.years.get_index_of(&year)
    }

    pub fn technology_index(&self, technology: &str) -> Option<usize> {
        self.technologies.get_index_of(technology)
    }

    /// Share of `technology` in `country`'s mix for `year`.
    ///
    /// `None` only when one of the labels is not on its axis.
    pub fn get(&self, country: &str, year: i32, technology: &str) -> Option<f64> {
        let c = self.country_index(country)?;
        let y = self.year_index(year)?;
        let t = self.technology_index(technology)?;
        Some(self.values[[c, y, t, 0]])
    }

    /// All technology shares for one country and year, in technology axis order.
    pub fn mix(&self, country: &str, year: i32) -> Option<ArrayView1<'_, f64>> {
        let c = self.country_index(country)?;
        let y = self.year_index(year)?;
        Some(self.values.slice(s![c, y, .., 0]))
    }

    /// The (year, technology) plane of one country.
    pub fn country(&self, country: &str) -> Option<ArrayView2<'_, f64>> {
        let c = self.country_index(country)?;
        Some(self.values.slice(s![c, .., .., 0]))
    }

    /// Whether the source table had a row for this country and year.
    pub fn is_observed(&self, country: &str, year: i32) -> bool {
        match (self.country_index(country), self.year_index(year)) {
            (Some(c), Some(y)) => self.observed.contains(&(c, y)),
            _ => false,
        }
    }

    /// Number of (country, year) rows that made it into the array.
    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }
}

// ---------------------------------------------------------------------------
// LossTable – transition key → field → text value
// ---------------------------------------------------------------------------

/// Fields of one loss row, keyed by header name.
pub type LossFields = IndexMap<String, String>;

/// Cumulative grid losses keyed by voltage transition.
///
/// Values stay as the text found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LossTable {
    entries: IndexMap<String, LossFields>,
}

impl LossTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `fields` under `key`, replacing any earlier entry.
    pub fn insert(&mut self, key: impl Into<String>, fields: LossFields) -> Option<LossFields> {
        self.entries.insert(key.into(), fields)
    }

    pub fn get(&self, key: &str) -> Option<&LossFields> {
        self.entries.get(key)
    }

    pub fn field(&self, key: &str, field: &str) -> Option<&str> {
        self.entries.get(key)?.get(field).map(String::as_str)
    }

    /// A field parsed as a number. `None` when the key or field is absent.
    pub fn field_f64(&self, key: &str, field: &str) -> Option<Result<f64, ParseFloatError>> {
        self.field(key, field).map(str::parse)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &LossFields)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for LossTable {
    type Output = LossFields;

    fn index(&self, key: &str) -> &LossFields {
        match self.entries.get(key) {
            Some(fields) => fields,
            None => panic!("no loss entry for `{key}`"),
        }
    }
}
