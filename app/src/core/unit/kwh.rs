use std::fmt::Display;

use derive_more::derive::AsRef;
use serde::Serialize;

use super::KiloGramsCo2;

/// Grid emission factor used for all hotels
pub const KG_CO2_PER_KWH: f64 = 0.233;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Serialize)]
#[serde(transparent)]
pub struct KiloWattHours(pub f64);

impl KiloWattHours {
    pub fn co2(&self) -> KiloGramsCo2 {
        KiloGramsCo2(self.0 * KG_CO2_PER_KWH)
    }
}

impl Display for KiloWattHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kWh", self.0)
    }
}
