use crate::web::ui::error::AppError;
use crate::web::ui::error_page::error_page_middleware;
use crate::web::ui::flash::flash_middleware;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::middleware::from_fn;
use actix_web::{get, web, HttpResponse, Responder};
use rust_embed::Embed;

mod askama_filters;
mod base_template;
mod endpoints;
pub(crate) mod error;
mod error_page;
mod flash;
mod form_values;
mod sub_templates;
#[cfg(test)]
mod tests;
mod util;
mod validation;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        get_ui_service()
            .wrap(from_fn(
                crate::web::http_error_logging::error_logging_middleware,
            ))
            .wrap(from_fn(flash_middleware))
            .wrap(from_fn(error_page_middleware)),
    );
}

fn get_ui_service() -> actix_web::Scope {
    web::scope("")
        .service(static_resources)
        .service(endpoints::index::index)
        .service(endpoints::venues_list::venues_list)
        .service(endpoints::search_venues::search_venues)
        // The fixed "create" segment must be registered before the `{venue_id}` routes
        .service(endpoints::edit_venue::new_venue_form)
        .service(endpoints::edit_venue::create_venue)
        .service(endpoints::venue_detail::venue_detail)
        .service(endpoints::edit_venue::edit_venue_form)
        .service(endpoints::edit_venue::edit_venue)
        .service(endpoints::delete_venue::delete_venue)
        .service(endpoints::artists_list::artists_list)
        .service(endpoints::search_artists::search_artists)
        .service(endpoints::edit_artist::new_artist_form)
        .service(endpoints::edit_artist::create_artist)
        .service(endpoints::artist_detail::artist_detail)
        .service(endpoints::edit_artist::edit_artist_form)
        .service(endpoints::edit_artist::edit_artist)
        .service(endpoints::shows_list::shows_list)
        .service(endpoints::new_show::new_show_form)
        .service(endpoints::new_show::new_show)
        .default_service(web::to(not_found_handler))
}

#[derive(Embed)]
#[folder = "static/"]
struct Resources;

impl Resources {
    fn handle_embedded_file(path: &str) -> HttpResponse {
        match Self::get(path) {
            Some(content) => HttpResponse::Ok()
                .content_type(mime_guess::from_path(path).first_or_octet_stream().as_ref())
                .append_header(CacheControl(vec![CacheDirective::MaxAge(86400 * 365)]))
                .body(content.data.into_owned()),
            None => {
                HttpResponse::NotFound().body(format!("Static resource file '{}' not found", path))
            }
        }
    }
}

#[get("/static/{_:.*}")]
async fn static_resources(path: web::Path<String>) -> impl Responder {
    Resources::handle_embedded_file(path.as_str())
}

async fn not_found_handler() -> Result<&'static str, AppError> {
    Err(AppError::PageNotFound)
}
