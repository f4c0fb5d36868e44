use serde::Serialize;

use crate::core::time::Month;
use crate::core::unit::{KiloGramsCo2, KiloWattHours, Liters};

use super::{CalculationError, Dataset, Hotel, SustainabilityData};

pub const RECYCLING_TARGET: f64 = 0.50;

/// Per-guest savings of a hotel in the latest reporting month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestImpact {
    pub month: Month,
    pub month_label: String,
    pub water_saved: Liters,
    pub co2_saved: KiloGramsCo2,
    //fraction, not clamped
    pub recycling_rate: f64,
    pub recycling_target: f64,
    //kg, drop of the mean food waste per waste row since the previous month, not per guest
    pub food_saved: f64,
}

impl GuestImpact {
    pub fn recycling_progress(&self) -> f64 {
        if self.recycling_target > 0.0 {
            (self.recycling_rate / self.recycling_target).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Water and energy are compared with the same month of the previous year, food waste with
/// the previous month. The asymmetry is intended to stay until clarified with the hotels.
#[tracing::instrument(skip_all, fields(hotel = %hotel))]
pub fn calculate_guest_impact(data: &SustainabilityData, hotel: &Hotel) -> Result<GuestImpact, CalculationError> {
    let month = data.latest_month().ok_or(CalculationError::NoReportingMonth)?;

    if !data.waste.iter().any(|r| r.hotel == *hotel) {
        return Err(CalculationError::UnknownHotel { hotel: hotel.clone() });
    }

    let year_before = month
        .year_before()
        .ok_or(CalculationError::MonthOutOfRange { month, months: 12 })?;

    let guests = data.sleepers(hotel, month);
    let guests_year_before = data.sleepers(hotel, year_before);

    let water = metered_total(data, Dataset::Water, hotel, month)?;
    let water_year_before = metered_total(data, Dataset::Water, hotel, year_before)?;
    let water_saved = Liters(saving(
        per_guest(water_year_before, guests_year_before),
        per_guest(water, guests),
    ));

    let energy = metered_total(data, Dataset::Electricity, hotel, month)?;
    let energy_year_before = metered_total(data, Dataset::Electricity, hotel, year_before)?;
    let co2_saved = KiloWattHours(saving(
        per_guest(energy_year_before, guests_year_before),
        per_guest(energy, guests),
    ))
    .co2();

    let recycling_rate = mean(data.waste_of(hotel, month).map(|r| r.recycling_rate)).ok_or_else(|| {
        CalculationError::MissingMonth {
            dataset: Dataset::Waste,
            hotel: hotel.clone(),
            month,
        }
    })?;

    let food_waste = mean(data.waste_of(hotel, month).map(|r| r.food_waste)).ok_or_else(|| {
        CalculationError::MissingMonth {
            dataset: Dataset::Waste,
            hotel: hotel.clone(),
            month,
        }
    })?;

    let previous_month = month
        .previous()
        .ok_or(CalculationError::MonthOutOfRange { month, months: 1 })?;

    //without a baseline nothing counts as saved
    let food_saved = mean(data.waste_of(hotel, previous_month).map(|r| r.food_waste))
        .map(|previous| saving(previous, food_waste))
        .unwrap_or(0.0);

    tracing::debug!(
        "Guest impact for {} in {}: water {}, CO2 {}, recycling {}, food {}",
        hotel,
        month.label(),
        water_saved,
        co2_saved,
        recycling_rate,
        food_saved
    );

    Ok(GuestImpact {
        month,
        month_label: month.label(),
        water_saved,
        co2_saved,
        recycling_rate,
        recycling_target: RECYCLING_TARGET,
        food_saved,
    })
}

fn metered_total(
    data: &SustainabilityData,
    dataset: Dataset,
    hotel: &Hotel,
    month: Month,
) -> Result<f64, CalculationError> {
    let readings = match dataset {
        Dataset::Electricity => &data.electricity,
        _ => &data.water,
    };

    readings
        .total(hotel, month)
        .ok_or_else(|| CalculationError::MissingHotelColumn {
            dataset,
            hotel: hotel.clone(),
        })
}

fn per_guest(total: f64, guests: u64) -> f64 {
    if guests > 0 { total / guests as f64 } else { 0.0 }
}

//usage going up is no saving
fn saving(before: f64, after: f64) -> f64 {
    (before - after).max(0.0)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count > 0 { Some(sum / count as f64) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sustainability::{MeterReadings, MeterRow, OccupancyRecord, WasteRecord};

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    fn waste(m: &str, hotel: &str, recycling_rate: f64, food_waste: f64) -> WasteRecord {
        WasteRecord {
            month: month(m),
            hotel: hotel.into(),
            recycling_rate,
            food_waste,
        }
    }

    fn occupancy(m: &str, hotel: &str, sleepers: u64) -> OccupancyRecord {
        OccupancyRecord {
            month: month(m),
            hotel: hotel.into(),
            sleepers,
            occupancy_rate: 0.8,
        }
    }

    fn meter(values: &[(&str, f64)]) -> MeterReadings {
        MeterReadings::new(
            vec!["Camden".into()],
            values
                .iter()
                .map(|(m, v)| MeterRow {
                    month: month(m),
                    values: vec![Some(*v)],
                })
                .collect(),
        )
    }

    fn camden(
        water: [f64; 2],
        energy: [f64; 2],
        guests: [u64; 2],
    ) -> SustainabilityData {
        SustainabilityData {
            waste: vec![
                waste("01/02/2024", "Camden", 0.40, 1.20),
                waste("01/03/2024", "Camden", 0.45, 1.00),
                waste("01/03/2024", "Camden", 0.65, 1.10),
            ],
            water: meter(&[("01/03/2023", water[0]), ("01/03/2024", water[1])]),
            electricity: meter(&[("01/03/2023", energy[0]), ("01/03/2024", energy[1])]),
            occupancy: vec![
                occupancy("01/03/2023", "Camden", guests[0]),
                occupancy("01/03/2024", "Camden", guests[1]),
            ],
        }
    }

    #[test]
    fn water_saved_per_guest_year_over_year() {
        let data = camden([1200.0, 1000.0], [0.0, 0.0], [100, 100]);

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_eq!(impact.water_saved, Liters(2.0));
        assert_eq!(impact.month, month("01/03/2024"));
        assert_eq!(impact.month_label, "March 2024");
    }

    #[test]
    fn co2_prevented_from_energy_drop() {
        let data = camden([0.0, 0.0], [3000.0, 2000.0], [100, 100]);

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_close(impact.co2_saved.0, 2.33);
    }

    #[test]
    fn increased_usage_is_no_saving() {
        let data = camden([1000.0, 1500.0], [2000.0, 4000.0], [100, 100]);

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_eq!(impact.water_saved, Liters(0.0));
        assert_eq!(impact.co2_saved, KiloGramsCo2(0.0));
    }

    #[test]
    fn no_guests_counts_as_zero_per_guest() {
        let no_guests_now = camden([1200.0, 1000.0], [3000.0, 2000.0], [100, 0]);
        let impact = calculate_guest_impact(&no_guests_now, &"Camden".into()).unwrap();
        assert_eq!(impact.water_saved, Liters(12.0));
        assert_close(impact.co2_saved.0, 30.0 * 0.233);

        let no_guests_before = camden([1200.0, 1000.0], [3000.0, 2000.0], [0, 100]);
        let impact = calculate_guest_impact(&no_guests_before, &"Camden".into()).unwrap();
        assert_eq!(impact.water_saved, Liters(0.0));
        assert_eq!(impact.co2_saved, KiloGramsCo2(0.0));

        let no_guests_at_all = camden([1200.0, 1000.0], [3000.0, 2000.0], [0, 0]);
        let impact = calculate_guest_impact(&no_guests_at_all, &"Camden".into()).unwrap();
        assert_eq!(impact.water_saved, Liters(0.0));
        assert!(impact.water_saved.0.is_finite());
    }

    #[test]
    fn recycling_rate_is_unclamped_mean_of_latest_month() {
        let mut data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);
        data.waste.push(waste("01/03/2024", "Camden", 1.90, 1.0));

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_close(impact.recycling_rate, (0.45 + 0.65 + 1.90) / 3.0);
        assert_eq!(impact.recycling_target, 0.5);
        assert_eq!(impact.recycling_progress(), 1.0);
    }

    #[test]
    fn food_waste_is_compared_with_previous_month() {
        let data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_close(impact.food_saved, 1.20 - 1.05);
    }

    #[test]
    fn food_waste_is_not_divided_by_guests() {
        let few_guests = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);
        let many_guests = camden([0.0, 0.0], [0.0, 0.0], [100, 250]);

        let few = calculate_guest_impact(&few_guests, &"Camden".into()).unwrap();
        let many = calculate_guest_impact(&many_guests, &"Camden".into()).unwrap();

        assert_close(many.food_saved, few.food_saved);
        assert_close(many.food_saved, 0.15);
    }

    #[test]
    fn food_waste_increase_is_no_saving() {
        let mut data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);
        data.waste[0].food_waste = 0.5;

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_eq!(impact.food_saved, 0.0);
    }

    #[test]
    fn food_waste_without_previous_month_is_no_saving() {
        let mut data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);
        data.waste.remove(0);

        let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

        assert_eq!(impact.food_saved, 0.0);
    }

    #[test]
    fn latest_month_is_taken_across_all_hotels() {
        let mut data = camden([1200.0, 1000.0], [0.0, 0.0], [100, 100]);
        data.waste.push(waste("01/04/2024", "Westin", 0.5, 1.0));

        let result = calculate_guest_impact(&data, &"Camden".into());

        assert!(matches!(
            result,
            Err(CalculationError::MissingMonth {
                dataset: Dataset::Waste,
                ..
            })
        ));
    }

    #[test]
    fn unknown_hotel_fails() {
        let data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);

        let result = calculate_guest_impact(&data, &"Westin".into());

        assert!(matches!(result, Err(CalculationError::UnknownHotel { .. })));
    }

    #[test]
    fn hotel_without_meter_column_fails() {
        let mut data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);
        data.waste.push(waste("01/03/2024", "EH", 0.5, 1.0));

        let result = calculate_guest_impact(&data, &"EH".into());

        assert!(matches!(
            result,
            Err(CalculationError::MissingHotelColumn {
                dataset: Dataset::Water,
                ..
            })
        ));
    }

    #[test]
    fn empty_waste_data_has_no_reporting_month() {
        let mut data = camden([0.0, 0.0], [0.0, 0.0], [1, 1]);
        data.waste.clear();

        let result = calculate_guest_impact(&data, &"Camden".into());

        assert!(matches!(result, Err(CalculationError::NoReportingMonth)));
    }

    #[test]
    fn savings_are_never_negative() {
        for (water, energy, guests) in [
            ([0.0, 5000.0], [0.0, 9000.0], [1, 1]),
            ([100.0, 0.0], [100.0, 0.0], [0, 3]),
            ([-50.0, 20.0], [-1.0, 1.0], [7, 2]),
        ] {
            let mut data = camden(water, energy, guests);
            data.waste[0].food_waste = -3.0;

            let impact = calculate_guest_impact(&data, &"Camden".into()).unwrap();

            assert!(impact.water_saved.0 >= 0.0);
            assert!(impact.co2_saved.0 >= 0.0);
            assert!(impact.food_saved >= 0.0);
        }
    }
}
