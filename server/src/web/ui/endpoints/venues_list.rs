use crate::data_store::models::Venue;
use crate::data_store::VenueId;
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::error::AppError;
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues")]
pub async fn venues_list(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let now = chrono::Utc::now().naive_utc();
    let (venues, upcoming_counts) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venues()?,
            store.count_upcoming_shows_per_venue(now)?,
        ))
    })
    .await??;

    let areas = group_venues_by_area(venues, &upcoming_counts);

    let tmpl = VenuesListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Venues",
            active_nav_button: Some(MainNavButton::Venues),
        },
        areas: &areas,
    };
    Ok(Html::new(tmpl.render()?))
}

/// All venues of one (city, state) pair
struct CityArea {
    city: String,
    state: String,
    venues: Vec<util::SearchResultEntry>,
}

/// Group the venues by their (city, state) pair, attaching each venue's upcoming-show count.
///
/// The venues are expected in (city, state) order, as returned by the store, so venues of the same
/// area are consecutive.
fn group_venues_by_area(
    venues: Vec<Venue>,
    upcoming_counts: &[(VenueId, i64)],
) -> Vec<CityArea> {
    let mut areas: Vec<CityArea> = Vec::new();
    for venue in venues {
        let entry = util::SearchResultEntry {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: util::upcoming_show_count(upcoming_counts, venue.id),
        };
        match areas.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(entry)
            }
            _ => areas.push(CityArea {
                city: venue.city,
                state: venue.state,
                venues: vec![entry],
            }),
        }
    }
    areas
}

#[derive(Template)]
#[template(path = "venues_list.html")]
struct VenuesListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    areas: &'a Vec<CityArea>,
}
