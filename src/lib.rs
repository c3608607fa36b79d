//! Background reference data for vehicle life-cycle assessment: electricity
//! generation mixes per country, year and technology, and cumulative grid
//! losses between voltage levels.

pub mod background;
pub mod config;
pub mod data;
pub mod error;

pub use background::BackgroundSystemModel;
pub use config::{BackgroundConfig, ResourceLocator};
pub use data::model::{ElectricityMix, LossFields, LossTable, MixRow};
pub use error::{BackgroundError, Result};
