use crate::data_store::models::{ShowAtVenue, Venue};
use crate::data_store::{ShowTimeFilter, VenueId};
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::askama_filters as filters;
use crate::web::ui::error::AppError;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/venues/{venue_id}")]
pub async fn venue_detail(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    let now = chrono::Utc::now().naive_utc();
    // A missing venue id surfaces as StoreError::NotExisting and thereby as a 404 page
    let (venue, past_shows, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_venue(venue_id)?,
            store.get_shows_at_venue(venue_id, ShowTimeFilter::past(now))?,
            store.get_shows_at_venue(venue_id, ShowTimeFilter::upcoming(now))?,
        ))
    })
    .await??;

    let tmpl = VenueDetailTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &venue.name,
            active_nav_button: Some(MainNavButton::Venues),
        },
        venue: &venue,
        past_shows: &past_shows,
        upcoming_shows: &upcoming_shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "venue_detail.html")]
struct VenueDetailTemplate<'a> {
    base: BaseTemplateContext<'a>,
    venue: &'a Venue,
    past_shows: &'a Vec<ShowAtVenue>,
    upcoming_shows: &'a Vec<ShowAtVenue>,
}
