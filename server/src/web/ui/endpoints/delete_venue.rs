use crate::data_store::{StoreError, VenueId};
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashType, FlashesInterface};
use crate::web::AppState;
use actix_web::{delete, web, HttpRequest, HttpResponse, Responder};

/// Delete a venue, issued by the delete button on the venue detail page via a `fetch()` DELETE
/// request (see `static/main.js`).
///
/// Shows booked at the venue are deleted along with it (ON DELETE CASCADE). Responds with
/// 204 No Content and leaves a flash message for the next page load; a missing venue id yields
/// a 404.
#[delete("/venues/{venue_id}")]
pub async fn delete_venue(
    path: web::Path<VenueId>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let venue_id = path.into_inner();
    web::block(move || -> Result<_, StoreError> {
        let mut store = state.store.get_facade()?;
        store.delete_venue(venue_id)?;
        Ok(())
    })
    .await??;

    req.add_flash_message(FlashMessage {
        flash_type: FlashType::Success,
        message: "The venue and its shows have been removed.".to_owned(),
    });
    Ok(HttpResponse::NoContent().finish())
}
