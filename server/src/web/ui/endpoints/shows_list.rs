use crate::data_store::models::ShowListing;
use crate::web::ui::base_template::{BaseTemplateContext, MainNavButton};
use crate::web::ui::askama_filters as filters;
use crate::web::ui::error::AppError;
use crate::web::AppState;
use actix_web::web::Html;
use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

#[get("/shows")]
pub async fn shows_list(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let shows = web::block(move || -> Result<_, AppError> {
        let mut store = state.store.get_facade()?;
        Ok(store.get_show_listings()?)
    })
    .await??;

    let tmpl = ShowsListTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Shows",
            active_nav_button: Some(MainNavButton::Shows),
        },
        shows: &shows,
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "shows_list.html")]
struct ShowsListTemplate<'a> {
    base: BaseTemplateContext<'a>,
    shows: &'a Vec<ShowListing>,
}
