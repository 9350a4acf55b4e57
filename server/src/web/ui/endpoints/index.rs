use crate::web::ui::base_template::BaseTemplateContext;
use crate::web::ui::error::AppError;
use actix_web::web::Html;
use actix_web::{get, HttpRequest, Responder};
use askama::Template;

#[get("/")]
pub async fn index(req: HttpRequest) -> Result<impl Responder, AppError> {
    let tmpl = IndexTemplate {
        base: BaseTemplateContext {
            request: &req,
            page_title: "Home",
            active_nav_button: None,
        },
    };
    Ok(Html::new(tmpl.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    base: BaseTemplateContext<'a>,
}
