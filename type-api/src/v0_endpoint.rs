use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use tracing::{debug, error, instrument, warn};

use crate::api::{jsonapi_response, ApiError, TypeRequest, TypeResponse};
use crate::classify::classify;
use crate::prometheus::{report_classification, report_validation_error};

/// Classify `data.key` of a JSON:API event document.
///
/// The body is read as raw bytes so that clients omitting the JSON:API
/// content type are still served. Body rejections (such as the size limit)
/// are rendered as JSON:API errors too.
#[instrument(skip_all, fields(event))]
pub async fn event(body: Result<Bytes, BytesRejection>) -> Result<Response, ApiError> {
    let result = body
        .map_err(ApiError::from)
        .and_then(|body| handle_event(&body));

    match result {
        Ok(response) => Ok(response),
        Err(err) if err.status().is_server_error() => {
            error!("failed to handle request: {}", err);
            Err(err)
        }
        Err(err) => {
            report_validation_error(err.cause());
            warn!(cause = err.cause(), "rejected request: {}", err);
            Err(err)
        }
    }
}

fn handle_event(body: &[u8]) -> Result<Response, ApiError> {
    let request = TypeRequest::from_bytes(body)?;
    tracing::Span::current().record("event", request.event.as_str());

    let data_type = classify(request.key()?);
    report_classification(data_type);
    debug!(data_type = data_type.as_str(), "classified value");

    let document = TypeResponse::new(request.event, data_type.as_str());
    let encoded = serde_json::to_vec(&document).map_err(ApiError::ResponseEncodingError)?;

    Ok(jsonapi_response(StatusCode::OK, encoded))
}
