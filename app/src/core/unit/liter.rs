use std::fmt::Display;

use derive_more::derive::AsRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Serialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl Liters {
    const DRINKING_WATER_PER_DAY: f64 = 75.0;

    pub fn days_of_drinking_water(&self) -> f64 {
        self.0 / Self::DRINKING_WATER_PER_DAY
    }
}

impl Display for Liters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}L", self.0)
    }
}
