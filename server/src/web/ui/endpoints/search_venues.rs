use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::error::AppError;
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{post, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

#[derive(Deserialize)]
pub(in crate::web::ui) struct SearchFormData {
    /// A missing key behaves like an empty search term, which matches every record
    #[serde(default)]
    pub search_term: String,
}

#[post("/venues/search")]
pub async fn search_venues(
    state: web::Data<AppState>,
    data: Form<SearchFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term;
    let now = chrono::Utc::now().naive_utc();
    let term = search_term.clone();
    let (venues, upcoming_counts) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.search_venues_by_name(&term)?,
            store.count_upcoming_shows_per_venue(now)?,
        ))
    })
    .await??;

    let results: Vec<util::SearchResultEntry> = venues
        .into_iter()
        .map(|venue| util::SearchResultEntry {
            num_upcoming_shows: util::upcoming_show_count(&upcoming_counts, venue.id),
            id: venue.id,
            name: venue.name,
        })
        .collect();

    let tmpl = SearchVenuesTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Search venues",
            active_nav_button: Some(MainNavButton::Venues),
        },
        search_term: &search_term,
        results: &results,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "search_venues.html")]
struct SearchVenuesTemplate<'a> {
    base: BaseTemplateContext<'a>,
    search_term: &'a str,
    results: &'a Vec<util::SearchResultEntry>,
}
