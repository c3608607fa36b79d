use log::debug;

use crate::config::{BackgroundConfig, ResourceLocator, ELECTRICITY_MIX_FILE, LOSSES_FILE};
use crate::data::loader::{load_losses, load_mix};
use crate::data::model::{ElectricityMix, LossTable};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Background system model
// ---------------------------------------------------------------------------

/// Background data held by a vehicle model for its whole lifetime.
///
/// Both tables are read when the model is built; construction fails as a
/// whole if either one cannot be loaded.
#[derive(Debug, Clone)]
pub struct BackgroundSystemModel {
    electricity_mix: ElectricityMix,
    losses: LossTable,
}

impl BackgroundSystemModel {
    /// Load the bundled reference tables.
    pub fn new() -> Result<Self> {
        Self::from_config(&BackgroundConfig::default())
    }

    pub fn from_config(config: &BackgroundConfig) -> Result<Self> {
        let locator = config.locator();
        Self::load(&locator, &config.electricity_mix_file, &config.losses_file)
    }

    /// Load the default file names through `locator`.
    pub fn from_locator(locator: &ResourceLocator) -> Result<Self> {
        Self::load(locator, ELECTRICITY_MIX_FILE, LOSSES_FILE)
    }

    fn load(locator: &ResourceLocator, mix_file: &str, losses_file: &str) -> Result<Self> {
        debug!("building background system from {}", locator.root().display());
        let electricity_mix = load_mix(locator, mix_file)?;
        let losses = load_losses(locator, losses_file)?;
        Ok(Self {
            electricity_mix,
            losses,
        })
    }

    pub fn electricity_mix(&self) -> &ElectricityMix {
        &self.electricity_mix
    }

    pub fn losses(&self) -> &LossTable {
        &self.losses
    }
}
