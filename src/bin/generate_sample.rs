use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;

use lca_background::config::{ELECTRICITY_MIX_FILE, LOSSES_FILE};
use lca_background::data::loader::{COUNTRY_COLUMN, YEAR_COLUMN};

const TECHNOLOGIES: [&str; 8] = [
    "Hydro", "Nuclear", "Gas", "Solar", "Wind", "Biomass", "Coal", "Oil",
];

/// Base shares per country, in `TECHNOLOGIES` order, and their drift towards
/// renewables per decade.
const COUNTRIES: [(&str, [f64; 8], f64); 4] = [
    ("AT", [0.60, 0.00, 0.15, 0.02, 0.10, 0.07, 0.05, 0.01], 0.04),
    ("CH", [0.57, 0.35, 0.02, 0.03, 0.01, 0.01, 0.00, 0.01], 0.03),
    ("DE", [0.03, 0.12, 0.13, 0.07, 0.16, 0.08, 0.39, 0.02], 0.08),
    ("FR", [0.10, 0.72, 0.07, 0.02, 0.05, 0.02, 0.01, 0.01], 0.05),
];

const YEARS: [i32; 5] = [2015, 2020, 2030, 2040, 2050];

/// Multiplicative noise source for sample shares (splitmix64).
struct Jitter(u64);

impl Jitter {
    /// Factor in `[0.95, 1.05)`.
    fn factor(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        0.95 + 0.1 * ((z >> 11) as f64 / (1u64 << 53) as f64)
    }
}

/// Shift `drift` per decade from fossil (gas, coal, oil) to solar and wind,
/// add a little noise and renormalise to 1.
fn shares_for(base: &[f64; 8], drift: f64, year: i32, jitter: &mut Jitter) -> Vec<f64> {
    let decades = f64::from(year - YEARS[0]) / 10.0;
    let mut shares = base.to_vec();

    let fossil = [2usize, 6, 7];
    let fossil_total: f64 = fossil.iter().map(|&i| shares[i]).sum();
    let moved = (drift * decades).min(fossil_total);
    if fossil_total > 0.0 {
        for &i in &fossil {
            shares[i] -= moved * shares[i] / fossil_total;
        }
    }
    shares[3] += moved / 2.0;
    shares[4] += moved / 2.0;

    for share in &mut shares {
        *share = (*share * jitter.factor()).max(0.0);
    }
    let total: f64 = shares.iter().sum();
    shares.iter().map(|s| s / total).collect()
}

fn write_mix(path: &Path, jitter: &mut Jitter) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![COUNTRY_COLUMN, YEAR_COLUMN];
    header.extend(TECHNOLOGIES);
    writer.write_record(&header).context("writing mix header")?;

    let mut rows = 0;
    for (country, base, drift) in &COUNTRIES {
        for &year in &YEARS {
            let shares = shares_for(base, *drift, year, jitter);
            let mut record = vec![country.to_string(), year.to_string()];
            record.extend(shares.iter().map(|s| format!("{s:.4}")));
            writer
                .write_record(&record)
                .with_context(|| format!("writing mix row {country} {year}"))?;
            rows += 1;
        }
    }
    writer.flush().context("flushing mix table")?;
    Ok(rows)
}

fn write_losses(path: &Path) -> Result<usize> {
    let rows = [
        ["Transition", "Transformation loss", "Transmission loss", "Cumulative loss"],
        ["high voltage", "0.0035", "0.0100", "1.0136"],
        ["high to medium voltage", "0.0050", "0.0120", "1.0308"],
        ["medium to low voltage", "0.0080", "0.0250", "1.0648"],
    ];

    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in &rows {
        writer.write_record(row).context("writing loss row")?;
    }
    writer.flush().context("flushing loss table")?;
    Ok(rows.len() - 1)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut jitter = Jitter(42);

    let mix_path = out_dir.join(ELECTRICITY_MIX_FILE);
    let mix_rows = write_mix(&mix_path, &mut jitter)?;
    info!("wrote {mix_rows} mix rows to {}", mix_path.display());

    let losses_path = out_dir.join(LOSSES_FILE);
    let loss_rows = write_losses(&losses_path)?;
    info!("wrote {loss_rows} loss rows to {}", losses_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_in_band_and_repeats() {
        let mut a = Jitter(7);
        let mut b = Jitter(7);
        for _ in 0..1000 {
            let f = a.factor();
            assert!((0.95..1.05).contains(&f), "{f}");
            assert_eq!(f, b.factor());
        }
    }

    #[test]
    fn sample_shares_sum_to_one() {
        let mut jitter = Jitter(42);
        for (_, base, drift) in &COUNTRIES {
            for &year in &YEARS {
                let shares = shares_for(base, *drift, year, &mut jitter);
                let total: f64 = shares.iter().sum();
                assert!((total - 1.0).abs() < 1e-12);
                assert!(shares.iter().all(|&s| s >= 0.0));
            }
        }
    }
}
