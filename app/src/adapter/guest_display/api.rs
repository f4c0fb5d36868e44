use actix_web::{
    HttpResponse,
    web::{self, Query},
};
use serde::Serialize;

use crate::sustainability::{GreenChampion, GuestImpact, Hotel, calculate_guest_impact};

use super::{GuestDisplayError, GuestDisplayResponse, GuestDisplayState, HotelQuery, csv_response, load_for};

pub(super) async fn hotels(state: web::Data<GuestDisplayState>) -> GuestDisplayResponse {
    #[derive(Serialize)]
    struct Row {
        hotel: Hotel,
        champion: Option<&'static str>,
    }

    let data = state.sources.load().map_err(GuestDisplayError::DataLoad)?;

    let rows: Vec<Row> = data
        .hotels()
        .into_iter()
        .map(|hotel| Row {
            champion: GreenChampion::of(&hotel).map(|c| c.name),
            hotel,
        })
        .collect();

    csv_response(&rows)
}

pub(super) async fn impact(state: web::Data<GuestDisplayState>, query: Query<HotelQuery>) -> GuestDisplayResponse {
    #[derive(Serialize)]
    struct ImpactDTO {
        hotel: Hotel,
        #[serde(flatten)]
        impact: GuestImpact,
        champion: Option<GreenChampion>,
    }

    let (data, hotel) = load_for(&state.sources, &query)?;
    let impact = calculate_guest_impact(&data, &hotel).map_err(GuestDisplayError::Calculation)?;

    Ok(HttpResponse::Ok().json(ImpactDTO {
        champion: GreenChampion::of(&hotel),
        hotel,
        impact,
    }))
}
