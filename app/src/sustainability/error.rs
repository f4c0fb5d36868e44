use derive_more::derive::{Display, Error};

use crate::core::time::Month;

use super::Hotel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Dataset {
    #[display("waste")]
    Waste,
    #[display("electricity")]
    Electricity,
    #[display("water")]
    Water,
    #[display("occupancy")]
    Occupancy,
}

#[derive(Debug, Display, Error)]
pub enum DataLoadError {
    #[display("Error reading {dataset} data from {path}: {source}")]
    Read {
        dataset: Dataset,
        path: String,
        source: std::io::Error,
    },

    #[display("Error parsing {dataset} data: {source}")]
    Csv { dataset: Dataset, source: csv::Error },

    #[display("Missing column '{column}' in {dataset} data")]
    MissingColumn { dataset: Dataset, column: &'static str },

    #[display("Invalid {dataset} data in row {row}: {message}")]
    InvalidRow {
        dataset: Dataset,
        row: usize,
        message: String,
    },
}

#[derive(Debug, Display, Error)]
pub enum CalculationError {
    #[display("No waste data available to determine the latest reporting month")]
    NoReportingMonth,

    #[display("No waste data for hotel {hotel}")]
    UnknownHotel { hotel: Hotel },

    #[display("No {dataset} column for hotel {hotel}")]
    MissingHotelColumn { dataset: Dataset, hotel: Hotel },

    #[display("No {dataset} data for hotel {hotel} in {month}")]
    MissingMonth {
        dataset: Dataset,
        hotel: Hotel,
        month: Month,
    },

    #[display("No month {months} months before {month}")]
    MonthOutOfRange { month: Month, months: u32 },
}
