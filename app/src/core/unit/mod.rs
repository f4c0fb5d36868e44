mod co2;
mod kwh;
mod liter;
mod percent;

pub use co2::KiloGramsCo2;
pub use kwh::KiloWattHours;
pub use liter::Liters;
pub use percent::Percent;

#[cfg(test)]
macro_rules! v {
    ($x:literal kWh) => {
        KiloWattHours($x as f64)
    };
    ($x:literal %) => {
        Percent($x as f64)
    };
    ($x:literal L) => {
        Liters($x as f64)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_kwh_to_co2() {
        assert_close(v!(10 kWh).co2().0, 2.33);
        assert_eq!(v!(0 kWh).co2(), KiloGramsCo2(0.0));
    }

    #[test]
    fn test_percent_parsing() {
        assert_eq!("85%".parse::<Percent>().unwrap(), v!(85 %));
        assert_eq!(" 85.5 % ".parse::<Percent>().unwrap(), Percent(85.5));
        assert_close("85%".parse::<Percent>().unwrap().as_fraction(), 0.85);
    }

    #[test]
    fn test_percent_parsing_errors() {
        assert!("85".parse::<Percent>().is_err());
        assert!("high%".parse::<Percent>().is_err());
        assert!("%".parse::<Percent>().is_err());
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::from_fraction(0.5).to_string(), "50%");
        assert_eq!(Percent(120.0).clamp(), v!(100 %));
    }

    #[test]
    fn test_equivalents() {
        assert_close(v!(150 L).days_of_drinking_water(), 2.0);
        assert_close(KiloGramsCo2(2.5).miles_not_driven(), 10.0);
        assert_eq!(v!(2 L).to_string(), "2L");
    }
}
