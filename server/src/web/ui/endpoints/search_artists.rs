use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::endpoints::search_venues::SearchFormData;
use crate::web::ui::error::AppError;
use crate::web::ui::util;
use crate::web::AppState;
use actix_web::web::{Form, Html};
use actix_web::{post, web, HttpRequest, Responder};
use askama::Template;

#[post("/artists/search")]
pub async fn search_artists(
    state: web::Data<AppState>,
    data: Form<SearchFormData>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let search_term = data.into_inner().search_term;
    let now = chrono::Utc::now().naive_utc();
    let term = search_term.clone();
    let (artists, upcoming_counts) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.search_artists_by_name(&term)?,
            store.count_upcoming_shows_per_artist(now)?,
        ))
    })
    .await??;

    let results: Vec<util::SearchResultEntry> = artists
        .into_iter()
        .map(|artist| util::SearchResultEntry {
            num_upcoming_shows: util::upcoming_show_count(&upcoming_counts, artist.id),
            id: artist.id,
            name: artist.name,
        })
        .collect();

    let tmpl = SearchArtistsTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Search artists",
            active_nav_button: Some(MainNavButton::Artists),
        },
        search_term: &search_term,
        results: &results,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "search_artists.html")]
struct SearchArtistsTemplate<'a> {
    base: BaseTemplateContext<'a>,
    search_term: &'a str,
    results: &'a Vec<util::SearchResultEntry>,
}
