use ndarray::{s, Array1};

use super::model::ElectricityMix;

impl ElectricityMix {
    /// Technology shares of `country` at a possibly fractional `year`,
    /// linearly interpolated between the two nearest years on the axis.
    ///
    /// Years are taken in ascending order regardless of axis order. Gaps that
    /// were zero-filled at load time interpolate as zeros. Returns `None` for
    /// an unknown country or a year outside the axis range.
    pub fn interp_year(&self, country: &str, year: f64) -> Option<Array1<f64>> {
        let c = self.country_index(country)?;
        let values = self.values();

        let mut years: Vec<(i32, usize)> = self.years().zip(0..).collect();
        years.sort_unstable_by_key(|&(y, _)| y);

        let &(first, _) = years.first()?;
        let &(last, _) = years.last()?;
        if !(f64::from(first)..=f64::from(last)).contains(&year) {
            return None;
        }

        // First axis year at or above the target.
        let upper = years.partition_point(|&(y, _)| f64::from(y) < year);
        let (hi_year, hi) = years[upper];
        if f64::from(hi_year) == year || upper == 0 {
            return Some(values.slice(s![c, hi, .., 0]).to_owned());
        }

        let (lo_year, lo) = years[upper - 1];
        let weight = (year - f64::from(lo_year)) / f64::from(hi_year - lo_year);
        let below = values.slice(s![c, lo, .., 0]);
        let above = values.slice(s![c, hi, .., 0]);
        Some(&below * (1.0 - weight) + &above * weight)
    }
}
