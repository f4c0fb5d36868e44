mod api;
mod images;
mod page;

use std::path::PathBuf;

use actix_web::{HttpResponse, ResponseError, http::header, web};
use anyhow::Context;
use derive_more::derive::{Display, Error};
use infrastructure::meter;
use serde::Deserialize;

use crate::sustainability::{CalculationError, DataLoadError, DataSources, Hotel, SustainabilityData};

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    pub images_dir: PathBuf,
    //relative to images_dir
    pub placeholder_image: String,
    #[serde(default = "default_energy_progress")]
    pub energy_progress: f64,
    #[serde(default = "default_energy_reduction_goal")]
    pub energy_reduction_goal: f64,
}

fn default_energy_progress() -> f64 {
    0.80
}

fn default_energy_reduction_goal() -> f64 {
    0.15
}

struct GuestDisplayState {
    sources: DataSources,
    display: DisplaySettings,
}

pub fn new_routes(sources: DataSources, display: DisplaySettings) -> actix_web::Scope {
    let state = GuestDisplayState { sources, display };

    web::scope("")
        .route("/", web::get().to(page::guest_display))
        .route("/api/hotels", web::get().to(api::hotels))
        .route("/api/impact", web::get().to(api::impact))
        .route("/images/{file:.*}", web::get().to(images::image))
        .app_data(web::Data::new(state))
}

type GuestDisplayResponse = Result<HttpResponse, GuestDisplayError>;

#[derive(Debug, Error, Display)]
enum GuestDisplayError {
    #[display("Error loading data: {_0}")]
    DataLoad(DataLoadError),

    #[display("Error calculating metrics: {_0}")]
    Calculation(CalculationError),

    #[display("Not found")]
    NotFound,

    #[display("Internal error")]
    InternalError(#[error(not(source))] anyhow::Error),
}

impl GuestDisplayError {
    fn kind(&self) -> &'static str {
        match self {
            GuestDisplayError::DataLoad(_) => "data_load",
            GuestDisplayError::Calculation(_) => "calculation",
            GuestDisplayError::NotFound => "not_found",
            GuestDisplayError::InternalError(_) => "internal",
        }
    }

    fn record(&self) {
        tracing::warn!("GuestDisplayError: {}", self);
        meter::increment("guest_display_error", &[("kind", self.kind())]);
    }
}

impl ResponseError for GuestDisplayError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            GuestDisplayError::NotFound => StatusCode::NOT_FOUND,
            GuestDisplayError::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.record();

        HttpResponse::build(self.status_code())
            .append_header(header::ContentType(mime::TEXT_PLAIN_UTF_8))
            .body(self.to_string())
    }
}

#[derive(Clone, Debug, Deserialize)]
struct HotelQuery {
    hotel: Option<String>,
}

/// Fresh data and the hotel to show. Unknown or missing hotels fall back to the first hotel.
fn load_for(sources: &DataSources, query: &HotelQuery) -> Result<(SustainabilityData, Hotel), GuestDisplayError> {
    let data = sources.load().map_err(GuestDisplayError::DataLoad)?;

    let hotels = data.hotels();
    let requested = query.hotel.as_deref().map(str::trim).filter(|h| !h.is_empty());

    let selected = match requested {
        Some(name) => hotels.iter().find(|h| h.name() == name).or_else(|| {
            tracing::info!("Unknown hotel {} requested, showing first hotel", name);
            hotels.first()
        }),
        None => hotels.first(),
    }
    .cloned()
    .ok_or(GuestDisplayError::Calculation(CalculationError::NoReportingMonth))?;

    Ok((data, selected))
}

fn csv_response<S: serde::Serialize>(rows: impl IntoIterator<Item = S>) -> GuestDisplayResponse {
    let mut writer = csv::Writer::from_writer(vec![]);

    for row in rows {
        writer
            .serialize(row)
            .context("Error serializing row to CSV")
            .map_err(GuestDisplayError::InternalError)?;
    }

    let csv = writer
        .into_inner()
        .context("Error creating CSV")
        .map_err(GuestDisplayError::InternalError)?;

    Ok(HttpResponse::Ok()
        .append_header(header::ContentType(mime::TEXT_CSV))
        .body(csv))
}

#[cfg(test)]
impl DisplaySettings {
    pub fn testdata() -> Self {
        Self {
            images_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/images"),
            placeholder_image: "placeholder.jpg".to_string(),
            energy_progress: default_energy_progress(),
            energy_reduction_goal: default_energy_reduction_goal(),
        }
    }
}
