mod champion;
mod error;
mod impact;
mod loader;

use std::collections::BTreeSet;

use derive_more::derive::{Display, From};
use serde::{Deserialize, Serialize};

use crate::core::time::Month;

pub use champion::GreenChampion;
pub use error::{CalculationError, DataLoadError, Dataset};
pub use impact::{GuestImpact, calculate_guest_impact};
pub use loader::DataSources;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hotel(String);

impl Hotel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Hotel {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WasteRecord {
    pub month: Month,
    pub hotel: Hotel,
    pub recycling_rate: f64,
    pub food_waste: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyRecord {
    pub month: Month,
    pub hotel: Hotel,
    pub sleepers: u64,
    //fraction 0..1
    pub occupancy_rate: f64,
}

/// Wide table with one usage column per hotel, as exported for water and electricity.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReadings {
    hotels: Vec<Hotel>,
    rows: Vec<MeterRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeterRow {
    pub month: Month,
    //aligned with the hotel columns, None for blank cells
    pub values: Vec<Option<f64>>,
}

impl MeterReadings {
    pub fn new(hotels: Vec<Hotel>, rows: Vec<MeterRow>) -> Self {
        Self { hotels, rows }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    /// Sum of all readings of the hotel in the given month. Blank cells are skipped,
    /// `None` if the hotel has no column at all.
    pub fn total(&self, hotel: &Hotel, month: Month) -> Option<f64> {
        let column = self.hotels.iter().position(|h| h == hotel)?;

        let total: f64 = self
            .rows
            .iter()
            .filter(|row| row.month == month)
            .filter_map(|row| row.values.get(column).copied().flatten())
            .sum();

        Some(total)
    }
}

/// All datasets of one load, read-only for the rest of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct SustainabilityData {
    pub waste: Vec<WasteRecord>,
    pub electricity: MeterReadings,
    pub water: MeterReadings,
    pub occupancy: Vec<OccupancyRecord>,
}

impl SustainabilityData {
    /// Distinct hotels of the waste data in sorted order
    pub fn hotels(&self) -> Vec<Hotel> {
        self.waste
            .iter()
            .map(|r| r.hotel.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn latest_month(&self) -> Option<Month> {
        self.waste.iter().map(|r| r.month).max()
    }

    pub fn sleepers(&self, hotel: &Hotel, month: Month) -> u64 {
        self.occupancy
            .iter()
            .filter(|r| r.hotel == *hotel && r.month == month)
            .map(|r| r.sleepers)
            .sum()
    }

    pub fn waste_of<'a>(&'a self, hotel: &'a Hotel, month: Month) -> impl Iterator<Item = &'a WasteRecord> + 'a {
        self.waste
            .iter()
            .filter(move |r| r.hotel == *hotel && r.month == month)
    }
}
