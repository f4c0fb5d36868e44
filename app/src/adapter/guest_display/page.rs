use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header},
    web::{self, Query},
};
use anyhow::Context;
use askama::Template;
use infrastructure::meter;

use crate::core::unit::Percent;
use crate::sustainability::{GreenChampion, GuestImpact, Hotel, calculate_guest_impact};

use super::{DisplaySettings, GuestDisplayError, GuestDisplayState, HotelQuery, images, load_for};

const GRAMS_PER_MEAL: f64 = 400.0;

#[derive(Template)]
#[template(path = "guest_display.html")]
struct GuestDisplayTemplate {
    selector: HotelSelector,
    hotel: Hotel,
    impact: GuestImpact,
    impact_cards: Vec<ImpactCard>,
    journey_cards: Vec<JourneyCard>,
    champion: Option<ChampionPanel>,
}

#[derive(Template)]
#[template(path = "guest_display_error.html")]
struct GuestDisplayErrorTemplate {
    selector: Option<HotelSelector>,
    message: String,
}

//every change of the selection reloads the whole page
#[derive(Debug, Default)]
struct HotelSelector {
    entries: Vec<HotelEntry>,
}

#[derive(Debug)]
struct HotelEntry {
    hotel: Hotel,
    selected: bool,
}

struct ImpactCard {
    title: String,
    action: &'static str,
    equivalent: String,
}

struct JourneyCard {
    title: &'static str,
    progress: String,
    value: Percent,
    caption: String,
}

struct ChampionPanel {
    name: &'static str,
    role: &'static str,
    photo_url: String,
}

pub(super) async fn guest_display(state: web::Data<GuestDisplayState>, query: Query<HotelQuery>) -> HttpResponse {
    let mut selector: Option<HotelSelector> = None;

    let result = load_for(&state.sources, &query).and_then(|(data, hotel)| {
        selector = Some(HotelSelector::new(data.hotels(), &hotel));

        let impact = calculate_guest_impact(&data, &hotel).map_err(GuestDisplayError::Calculation)?;
        Ok((hotel, impact))
    });

    let (hotel, impact) = match result {
        Ok(result) => result,
        Err(e) => return error_page(selector, e),
    };

    meter::increment("guest_display_render", &[("hotel", hotel.name())]);
    meter::set("guest_water_saved", impact.water_saved.0, &[("hotel", hotel.name())]);
    meter::set("guest_co2_saved", impact.co2_saved.0, &[("hotel", hotel.name())]);

    let page = GuestDisplayTemplate::new(selector.unwrap_or_default(), hotel, impact, &state.display);

    match render(&page) {
        Ok(html) => html_response(StatusCode::OK, html),
        Err(e) => error_page(None, e),
    }
}

fn error_page(selector: Option<HotelSelector>, error: GuestDisplayError) -> HttpResponse {
    error.record();

    let page = GuestDisplayErrorTemplate {
        selector,
        message: error.to_string(),
    };

    match render(&page) {
        Ok(html) => html_response(error.status_code(), html),
        Err(render_error) => {
            tracing::error!("Error rendering error page: {}", render_error);

            HttpResponse::build(error.status_code())
                .append_header(header::ContentType(mime::TEXT_PLAIN_UTF_8))
                .body(error.to_string())
        }
    }
}

fn render(page: &impl Template) -> Result<String, GuestDisplayError> {
    page.render()
        .context("Error rendering guest display")
        .map_err(GuestDisplayError::InternalError)
}

fn html_response(status: StatusCode, html: String) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(header::ContentType(mime::TEXT_HTML_UTF_8))
        .body(html)
}

impl HotelSelector {
    fn new(hotels: Vec<Hotel>, selected: &Hotel) -> Self {
        let entries = hotels
            .into_iter()
            .map(|hotel| HotelEntry {
                selected: hotel == *selected,
                hotel,
            })
            .collect();

        Self { entries }
    }
}

impl GuestDisplayTemplate {
    fn new(selector: HotelSelector, hotel: Hotel, impact: GuestImpact, display: &DisplaySettings) -> Self {
        let impact_cards = impact_cards(&impact);
        let journey_cards = journey_cards(&impact, display);
        let champion = GreenChampion::of(&hotel).map(|champion| ChampionPanel {
            photo_url: images::photo_url(display, &champion),
            name: champion.name,
            role: champion.role,
        });

        Self {
            selector,
            hotel,
            impact,
            impact_cards,
            journey_cards,
            champion,
        }
    }
}

fn impact_cards(impact: &GuestImpact) -> Vec<ImpactCard> {
    let food_grams = impact.food_saved * 1000.0;

    vec![
        ImpactCard {
            title: format!("{} Water Saved", impact.water_saved),
            action: "By reusing your towels",
            equivalent: format!("= {:.1} days of drinking water", impact.water_saved.days_of_drinking_water()),
        },
        ImpactCard {
            title: format!("{} Prevented", impact.co2_saved),
            action: "Using your key card for power",
            equivalent: format!("= {:.1} miles not driven", impact.co2_saved.miles_not_driven()),
        },
        ImpactCard {
            title: format!("{:.0}g Food Saved", food_grams),
            action: "Through portion control",
            equivalent: format!("= {:.1} meals saved", food_grams / GRAMS_PER_MEAL),
        },
    ]
}

fn journey_cards(impact: &GuestImpact, display: &DisplaySettings) -> Vec<JourneyCard> {
    let energy = Percent::from_fraction(display.energy_progress).clamp();

    vec![
        JourneyCard {
            title: "⚡ Energy Reduction",
            progress: format!("{:.2}", energy.as_fraction()),
            value: energy,
            caption: format!(
                "progress to our {} reduction goal",
                Percent::from_fraction(display.energy_reduction_goal)
            ),
        },
        JourneyCard {
            title: "♻️ Recycling Rate",
            progress: format!("{:.2}", impact.recycling_progress()),
            value: Percent::from_fraction(impact.recycling_rate),
            caption: format!("recycled (Target: {})", Percent::from_fraction(impact.recycling_target)),
        },
    ]
}
