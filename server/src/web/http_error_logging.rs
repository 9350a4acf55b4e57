use crate::web::ui::error::AppError;
use log::{error, warn};

/// Middleware that writes diagnostic information about failed requests to the log.
///
/// It must run inside the error-page middleware, because that one replaces the error response
/// with a rendered page and thereby discards the original error object.
pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(app_error) = error.as_error::<AppError>() {
            match app_error {
                AppError::PageNotFound => {
                    warn!(
                        "HTTP {} page not found at <{}>",
                        response.response().status(),
                        response.request().uri()
                    );
                }
                // Expected outcomes of normal user interaction, not worth a log entry
                AppError::EntityNotFound | AppError::TransactionConflict => {}
                AppError::DatabaseConnectionError(e) => {
                    error!(
                        "HTTP {} database connection error: {}",
                        response.response().status(),
                        e
                    );
                }
                AppError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
