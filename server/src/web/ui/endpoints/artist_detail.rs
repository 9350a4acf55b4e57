use crate::data_store::models::{Artist, ShowByArtist};
use crate::data_store::{ArtistId, ShowTimeFilter};
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::askama_filters as filters;
use crate::web::ui::error::AppError;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists/{artist_id}")]
pub async fn artist_detail(
    path: web::Path<ArtistId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artist_id = path.into_inner();
    let now = chrono::Utc::now().naive_utc();
    // A missing artist id surfaces as StoreError::NotExisting and thereby as a 404 page
    let (artist, past_shows, upcoming_shows) = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok((
            store.get_artist(artist_id)?,
            store.get_shows_by_artist(artist_id, ShowTimeFilter::past(now))?,
            store.get_shows_by_artist(artist_id, ShowTimeFilter::upcoming(now))?,
        ))
    })
    .await??;

    let tmpl = ArtistDetailTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: &artist.name,
            active_nav_button: Some(MainNavButton::Artists),
        },
        artist: &artist,
        past_shows: &past_shows,
        upcoming_shows: &upcoming_shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "artist_detail.html")]
struct ArtistDetailTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artist: &'a Artist,
    past_shows: &'a Vec<ShowByArtist>,
    upcoming_shows: &'a Vec<ShowByArtist>,
}
