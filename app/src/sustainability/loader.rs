use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::core::time::Month;
use crate::core::unit::Percent;

use super::{
    DataLoadError, Dataset, Hotel, MeterReadings, MeterRow, OccupancyRecord, SustainabilityData, WasteRecord,
};

const MONTH: &str = "Month";

/// Locations of the CSV exports. Read on every load, nothing is cached.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSources {
    pub waste: PathBuf,
    pub electricity: PathBuf,
    pub water: PathBuf,
    pub occupancy: PathBuf,
}

impl DataSources {
    #[tracing::instrument(skip_all)]
    pub fn load(&self) -> Result<SustainabilityData, DataLoadError> {
        let waste = parse_waste(open(Dataset::Waste, &self.waste)?)?;
        let electricity = parse_meter_readings(Dataset::Electricity, open(Dataset::Electricity, &self.electricity)?)?;
        let water = parse_meter_readings(Dataset::Water, open(Dataset::Water, &self.water)?)?;
        let occupancy = parse_occupancy(open(Dataset::Occupancy, &self.occupancy)?)?;

        tracing::debug!(
            "Loaded {} waste, {} electricity, {} water and {} occupancy rows, metered hotels: {:?}",
            waste.len(),
            electricity.rows.len(),
            water.rows.len(),
            occupancy.len(),
            water.hotels()
        );

        Ok(SustainabilityData {
            waste,
            electricity,
            water,
            occupancy,
        })
    }
}

fn open(dataset: Dataset, path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Read {
        dataset,
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct WasteRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Hotel")]
    hotel: String,
    #[serde(rename = "Recycling Rates")]
    recycling_rate: f64,
    #[serde(rename = "Food Waste")]
    food_waste: f64,
}

impl TryFrom<WasteRow> for WasteRecord {
    type Error = anyhow::Error;

    fn try_from(row: WasteRow) -> Result<Self, Self::Error> {
        Ok(WasteRecord {
            month: row.month.parse()?,
            hotel: Hotel::new(row.hotel),
            recycling_rate: row.recycling_rate,
            food_waste: row.food_waste,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OccupancyRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Hotel")]
    hotel: String,
    #[serde(rename = "Sleepers")]
    sleepers: u64,
    #[serde(rename = "Occupancy Rate")]
    occupancy_rate: String,
}

impl TryFrom<OccupancyRow> for OccupancyRecord {
    type Error = anyhow::Error;

    fn try_from(row: OccupancyRow) -> Result<Self, Self::Error> {
        let rate: Percent = row.occupancy_rate.parse()?;

        Ok(OccupancyRecord {
            month: row.month.parse()?,
            hotel: Hotel::new(row.hotel),
            sleepers: row.sleepers,
            occupancy_rate: rate.as_fraction(),
        })
    }
}

pub fn parse_waste(reader: impl Read) -> Result<Vec<WasteRecord>, DataLoadError> {
    read_rows::<WasteRow, _>(
        Dataset::Waste,
        reader,
        &[MONTH, "Hotel", "Recycling Rates", "Food Waste"],
    )
}

pub fn parse_occupancy(reader: impl Read) -> Result<Vec<OccupancyRecord>, DataLoadError> {
    read_rows::<OccupancyRow, _>(
        Dataset::Occupancy,
        reader,
        &[MONTH, "Hotel", "Sleepers", "Occupancy Rate"],
    )
}

pub fn parse_meter_readings(dataset: Dataset, reader: impl Read) -> Result<MeterReadings, DataLoadError> {
    let mut csv = csv_reader(reader);

    let headers = csv
        .headers()
        .map_err(|source| DataLoadError::Csv { dataset, source })?
        .clone();

    let month_column = headers
        .iter()
        .position(|h| h == MONTH)
        .ok_or(DataLoadError::MissingColumn { dataset, column: MONTH })?;

    let hotel_columns: Vec<(usize, Hotel)> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != month_column && !h.is_empty())
        .map(|(i, h)| (i, Hotel::new(h)))
        .collect();

    let mut rows = vec![];

    for (i, record) in csv.records().enumerate() {
        let record = record.map_err(|source| DataLoadError::Csv { dataset, source })?;

        let row = parse_meter_row(&record, month_column, &hotel_columns).map_err(|e| DataLoadError::InvalidRow {
            dataset,
            row: i + 1,
            message: format!("{e:#}"),
        })?;

        rows.push(row);
    }

    let hotels = hotel_columns.into_iter().map(|(_, hotel)| hotel).collect();
    Ok(MeterReadings::new(hotels, rows))
}

fn parse_meter_row(
    record: &csv::StringRecord,
    month_column: usize,
    hotel_columns: &[(usize, Hotel)],
) -> anyhow::Result<MeterRow> {
    let month = Month::parse(record.get(month_column).unwrap_or_default())?;

    let mut values = Vec::with_capacity(hotel_columns.len());
    for (column, hotel) in hotel_columns {
        let value = match record.get(*column).map(str::trim) {
            None | Some("") => None,
            Some(cell) => Some(
                cell.parse::<f64>()
                    .with_context(|| format!("Invalid usage '{}' for hotel {}", cell, hotel))?,
            ),
        };
        values.push(value);
    }

    Ok(MeterRow { month, values })
}

fn read_rows<T, R>(dataset: Dataset, reader: impl Read, required: &[&'static str]) -> Result<Vec<R>, DataLoadError>
where
    T: DeserializeOwned,
    R: TryFrom<T, Error = anyhow::Error>,
{
    let mut csv = csv_reader(reader);

    let headers = csv
        .headers()
        .map_err(|source| DataLoadError::Csv { dataset, source })?
        .clone();

    if let Some(column) = required.iter().copied().find(|c| !headers.iter().any(|h| h == *c)) {
        return Err(DataLoadError::MissingColumn { dataset, column });
    }

    csv.deserialize::<T>()
        .enumerate()
        .map(|(i, row)| {
            let row = row.map_err(|source| DataLoadError::Csv { dataset, source })?;

            R::try_from(row).map_err(|e| DataLoadError::InvalidRow {
                dataset,
                row: i + 1,
                message: format!("{e:#}"),
            })
        })
        .collect()
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}

#[cfg(test)]
impl DataSources {
    pub fn testdata() -> Self {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata");

        Self {
            waste: dir.join("waste.csv"),
            electricity: dir.join("elec.csv"),
            water: dir.join("water.csv"),
            occupancy: dir.join("occ_sleepers.csv"),
        }
    }
}
