use crate::data_store::models::Artist;
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::error::AppError;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/artists")]
pub async fn artists_list(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let artists = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_artists()?)
    })
    .await??;

    let tmpl = ArtistsListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Artists",
            active_nav_button: Some(MainNavButton::Artists),
        },
        artists: &artists,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "artists_list.html")]
struct ArtistsListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    artists: &'a Vec<Artist>,
}
