use std::{fmt::Display, str::FromStr};

use anyhow::{Context, bail};
use derive_more::derive::AsRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Serialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    pub fn from_fraction(fraction: f64) -> Self {
        Self(fraction * 100.0)
    }

    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }

    pub fn clamp(self) -> Self {
        Self(self.0.clamp(0.0, 100.0))
    }
}

/// Parses percent-suffixed text like `85%` or `85.5 %`.
impl FromStr for Percent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(number) = s.trim().strip_suffix('%') else {
            bail!("Invalid percentage '{}', expected a '%' suffix", s);
        };

        let value = number
            .trim()
            .parse::<f64>()
            .with_context(|| format!("Invalid percentage '{}'", s))?;

        Ok(Self(value))
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}
