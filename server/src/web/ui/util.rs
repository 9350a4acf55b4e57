use crate::data_store::StoreError;
use crate::web::ui::error::AppError;
use crate::web::ui::flash::{FlashMessage, FlashType, FlashesInterface};
use actix_web::web::{Html, Redirect};
use actix_web::{Either, HttpRequest};
use askama::Template;

/// Outcome of handling a form submission, as input for [form_submit_response]
pub enum FormSubmitResult {
    /// The entity has been written to the store
    Saved,
    /// Form validation failed; the per-field error messages are attached to the form data
    ValidationError,
    /// The store rejected the write for a reason the user can act on
    Rejected { reason: String },
}

/// Translate the result of a store write operation into a [FormSubmitResult].
///
/// Rejections that the user can recover from by fixing the form (constraint violations,
/// concurrent transaction conflicts) become [FormSubmitResult::Rejected]; infrastructure errors
/// are passed through as [AppError] to be rendered as an error page.
pub fn classify_store_write(result: Result<(), StoreError>) -> Result<FormSubmitResult, AppError> {
    match result {
        Ok(()) => Ok(FormSubmitResult::Saved),
        Err(StoreError::ConflictEntityExists) => Ok(FormSubmitResult::Rejected {
            reason: "a record with this name exists already".to_owned(),
        }),
        Err(StoreError::InvalidInputData(_)) => Ok(FormSubmitResult::Rejected {
            reason: "the referenced records do not exist".to_owned(),
        }),
        Err(StoreError::TransactionConflict) => Ok(FormSubmitResult::Rejected {
            reason: "a conflicting concurrent change, please retry".to_owned(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Turn a [FormSubmitResult] into the HTTP response for the form submission request:
/// a flash message plus either a redirect to `success_url` (on success) or a re-render of the
/// submitted form with its validation errors (on failure), preserving the user's input.
pub fn form_submit_response(
    result: FormSubmitResult,
    form_template: &impl Template,
    success_message: String,
    failure_message: String,
    success_url: url::Url,
    req: &HttpRequest,
) -> Result<Either<Redirect, Html>, AppError> {
    match result {
        FormSubmitResult::Saved => {
            req.add_flash_message(FlashMessage {
                flash_type: FlashType::Success,
                message: success_message,
            });
            Ok(Either::Left(
                Redirect::to(success_url.to_string()).see_other(),
            ))
        }
        FormSubmitResult::ValidationError => {
            req.add_flash_message(FlashMessage {
                flash_type: FlashType::Error,
                message: "Submitted data is invalid. Please check the marked fields.".to_owned(),
            });
            Ok(Either::Right(Html::new(form_template.render()?)))
        }
        FormSubmitResult::Rejected { reason } => {
            req.add_flash_message(FlashMessage {
                flash_type: FlashType::Error,
                message: format!("{} ({})", failure_message, reason),
            });
            Ok(Either::Right(Html::new(form_template.render()?)))
        }
    }
}

/// Look up the upcoming-show count of one venue/artist in the grouped count result of
/// [count_upcoming_shows_per_venue](crate::data_store::BookingStoreFacade::count_upcoming_shows_per_venue)
/// /
/// [count_upcoming_shows_per_artist](crate::data_store::BookingStoreFacade::count_upcoming_shows_per_artist).
///
/// Records without any upcoming show are not part of the grouped result, so absence means zero.
pub fn upcoming_show_count(counts: &[(i32, i64)], id: i32) -> i64 {
    counts
        .iter()
        .find(|(counted_id, _)| *counted_id == id)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

/// One row of a venue/artist search result or overview listing
pub struct SearchResultEntry {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}
