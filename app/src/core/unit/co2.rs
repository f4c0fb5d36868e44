use std::fmt::Display;

use derive_more::derive::AsRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Serialize)]
#[serde(transparent)]
pub struct KiloGramsCo2(pub f64);

impl KiloGramsCo2 {
    //rough equivalent for a petrol car
    const MILES_PER_KG: f64 = 4.0;

    pub fn miles_not_driven(&self) -> f64 {
        self.0 * Self::MILES_PER_KG
    }
}

impl Display for KiloGramsCo2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}kg CO₂", self.0)
    }
}
