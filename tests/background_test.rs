//! Integration tests for building the background system from reference tables.

use std::path::Path;

use lca_background::config::{ELECTRICITY_MIX_FILE, LOSSES_FILE};
use lca_background::{BackgroundConfig, BackgroundError, BackgroundSystemModel, ResourceLocator};
use tempfile::TempDir;

const MIX: &str = "Country code;Year;tech1;tech2\n\
                   DE;2020;0.3;0.7\n\
                   DE;2021;0.4;0.6\n\
                   FR;2020;0.5;0.5\n";

const LOSSES: &str = "Transition;LossA;LossB\nHV-MV;0.02;0.01\n";

fn data_dir(mix: Option<&str>, losses: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    if let Some(text) = mix {
        std::fs::write(dir.path().join(ELECTRICITY_MIX_FILE), text).unwrap();
    }
    if let Some(text) = losses {
        std::fs::write(dir.path().join(LOSSES_FILE), text).unwrap();
    }
    dir
}

fn expect_not_found(result: Result<BackgroundSystemModel, BackgroundError>, file: &str) {
    match result {
        Err(BackgroundError::ResourceNotFound { name, .. }) => assert_eq!(name, file),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("model built without {file}"),
    }
}

#[test]
fn bundled_tables_load() {
    let model = BackgroundSystemModel::new().unwrap();

    let mix = model.electricity_mix();
    assert_eq!(mix.countries().collect::<Vec<_>>(), ["AT", "CH", "DE", "FR"]);
    assert_eq!(mix.years().collect::<Vec<_>>(), [2015, 2020, 2030, 2040, 2050]);
    assert_eq!(mix.shape(), (4, 5, 8, 1));
    assert_eq!(mix.get("FR", 2020, "Nuclear"), Some(0.7235));

    for country in ["AT", "CH", "DE", "FR"] {
        for year in [2015, 2050] {
            let total: f64 = mix.mix(country, year).unwrap().sum();
            assert!((total - 1.0).abs() < 1e-3, "{country} {year}: {total}");
        }
    }

    let losses = model.losses();
    assert_eq!(losses.len(), 3);
    assert_eq!(losses.field("medium to low voltage", "Cumulative loss"), Some("1.0648"));
}

#[test]
fn small_tables_match_source_cells() {
    let dir = data_dir(Some(MIX), Some(LOSSES));
    let model = BackgroundSystemModel::from_config(&BackgroundConfig::with_data_dir(dir.path()))
        .unwrap();

    let mix = model.electricity_mix();
    assert_eq!(mix.get("DE", 2020, "tech1"), Some(0.3));
    assert_eq!(mix.get("DE", 2020, "tech2"), Some(0.7));
    assert_eq!(mix.get("DE", 2021, "tech1"), Some(0.4));
    assert_eq!(mix.get("DE", 2021, "tech2"), Some(0.6));
    assert_eq!(mix.get("FR", 2020, "tech1"), Some(0.5));
    assert_eq!(mix.get("FR", 2021, "tech1"), Some(0.0));
    assert_eq!(mix.get("FR", 2021, "tech2"), Some(0.0));

    let row = &model.losses()["HV-MV"];
    assert_eq!(row.get("LossA").map(String::as_str), Some("0.02"));
    assert_eq!(row.get("LossB").map(String::as_str), Some("0.01"));
}

#[test]
fn rows_out_of_order_land_on_their_labels() {
    let shuffled = "Country code;Year;tech1;tech2\n\
                    FR;2021;0.2;0.8\n\
                    DE;2020;0.3;0.7\n\
                    FR;2020;0.5;0.5\n";
    let dir = data_dir(Some(shuffled), Some(LOSSES));
    let model = BackgroundSystemModel::from_locator(&ResourceLocator::new(dir.path())).unwrap();

    let mix = model.electricity_mix();
    assert_eq!(mix.countries().collect::<Vec<_>>(), ["FR", "DE"]);
    assert_eq!(mix.years().collect::<Vec<_>>(), [2021, 2020]);
    assert_eq!(mix.get("FR", 2020, "tech2"), Some(0.5));
    assert_eq!(mix.get("FR", 2021, "tech1"), Some(0.2));
    assert_eq!(mix.get("DE", 2021, "tech1"), Some(0.0));
    assert!(!mix.is_observed("DE", 2021));
}

#[test]
fn missing_mix_fails_construction() {
    let dir = data_dir(None, Some(LOSSES));
    expect_not_found(
        BackgroundSystemModel::from_locator(&ResourceLocator::new(dir.path())),
        ELECTRICITY_MIX_FILE,
    );
}

#[test]
fn missing_losses_fails_construction() {
    let dir = data_dir(Some(MIX), None);
    expect_not_found(
        BackgroundSystemModel::from_locator(&ResourceLocator::new(dir.path())),
        LOSSES_FILE,
    );
}

#[test]
fn config_file_renames_tables() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mix_2024.csv"), MIX).unwrap();
    std::fs::write(dir.path().join("losses_2024.csv"), LOSSES).unwrap();

    let config_path = dir.path().join("background.json");
    let json = format!(
        r#"{{ "data_dir": {:?}, "electricity_mix_file": "mix_2024.csv", "losses_file": "losses_2024.csv" }}"#,
        path_str(dir.path())
    );
    std::fs::write(&config_path, json).unwrap();

    let config = BackgroundConfig::from_json_file(&config_path).unwrap();
    let model = BackgroundSystemModel::from_config(&config).unwrap();
    assert_eq!(model.electricity_mix().observed_len(), 3);
    assert_eq!(model.losses().keys().collect::<Vec<_>>(), ["HV-MV"]);
}

#[test]
fn interpolation_over_loaded_mix() {
    let model = BackgroundSystemModel::new().unwrap();
    let mix = model.electricity_mix();

    let at_2020 = mix.mix("DE", 2020).unwrap().to_owned();
    let at_2030 = mix.mix("DE", 2030).unwrap().to_owned();
    let mid = mix.interp_year("DE", 2025.0).unwrap();
    for ((a, b), m) in at_2020.iter().zip(at_2030.iter()).zip(mid.iter()) {
        assert!(((a + b) / 2.0 - m).abs() < 1e-12);
    }
    assert!(mix.interp_year("DE", 2060.0).is_none());
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
