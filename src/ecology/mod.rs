//! Ecological systems.
//!
//! This module contains:
//! - Weather (day/night and rain clocks)
//! - Predation (diet checks, food search)
//! - Infection (disease transmission between neighbors)

pub mod infection;
pub mod predation;
pub mod weather;

pub use infection::{InfectionConfig, Infector};
pub use predation::{find_food, is_edible, Meal};
pub use weather::{DayPhase, Weather, WeatherConfig};
