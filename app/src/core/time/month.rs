use std::fmt::Display;
use std::str::FromStr;

use anyhow::Context;
use chrono::Months;

/// Reporting month as exported by the hotel systems, e.g. `01/03/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Month {
    delegate: chrono::NaiveDate,
}

impl Month {
    pub const FORMAT: &'static str = "%d/%m/%Y";

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let delegate = chrono::NaiveDate::parse_from_str(text.trim(), Self::FORMAT)
            .with_context(|| format!("Invalid month '{}', expected day/month/year", text))?;

        Ok(Self { delegate })
    }

    #[cfg(test)]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> anyhow::Result<Self> {
        let delegate = chrono::NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("Invalid date {}-{}-{}", year, month, day))?;

        Ok(Self { delegate })
    }

    //day is clamped to the end of the target month, like 29/02 -> 28/02
    pub fn months_before(&self, months: u32) -> Option<Self> {
        self.delegate
            .checked_sub_months(Months::new(months))
            .map(|delegate| Self { delegate })
    }

    pub fn year_before(&self) -> Option<Self> {
        self.months_before(12)
    }

    pub fn previous(&self) -> Option<Self> {
        self.months_before(1)
    }

    /// Human readable label like `March 2024`
    pub fn label(&self) -> String {
        self.delegate.format("%B %Y").to_string()
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate.format(Self::FORMAT))
    }
}
