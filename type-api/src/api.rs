use axum::extract::rejection::BytesRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

pub const EVENT_RESOURCE_TYPE: &str = "event";
pub const CLASSIFICATION_RESOURCE_TYPE: &str = "classification";

/// Entry of the event payload that gets classified.
pub const CLASSIFIED_KEY: &str = "key";

const VALIDATION_ERROR_TITLE: &str = "Validation Error";
const INTERNAL_ERROR_TITLE: &str = "Internal Error";

/// Top-level JSON:API document holding a single primary resource.
#[derive(Debug, Deserialize, Serialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Document<A> {
    pub data: Resource<A>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: A,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EventAttributes {
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClassificationAttributes {
    pub data_type: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorObject {
    pub title: String,
    pub detail: String,
    pub status: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn single(title: &str, detail: String, status: StatusCode) -> Self {
        Self {
            errors: vec![ErrorObject {
                title: title.to_owned(),
                detail,
                status: status.as_u16().to_string(),
            }],
        }
    }
}

/// A decoded classification request.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRequest {
    pub event: String,
    pub data: Map<String, Value>,
}

impl TypeRequest {
    pub fn from_bytes(body: &[u8]) -> Result<Self, ApiError> {
        let document: Document<EventAttributes> = serde_json::from_slice(body)?;
        let resource = document.data;

        if resource.kind != EVENT_RESOURCE_TYPE {
            return Err(ApiError::InvalidResourceType(resource.kind));
        }

        let event = resource
            .id
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingEventName)?;

        Ok(TypeRequest {
            event,
            data: resource.attributes.data,
        })
    }

    pub fn key(&self) -> Result<&Value, ApiError> {
        self.data.get(CLASSIFIED_KEY).ok_or(ApiError::MissingKey)
    }
}

pub type TypeResponse = Document<ClassificationAttributes>;

impl TypeResponse {
    pub fn new(event: String, data_type: &str) -> Self {
        Document {
            data: Resource {
                kind: CLASSIFICATION_RESOURCE_TYPE.to_owned(),
                id: Some(event),
                attributes: ClassificationAttributes {
                    data_type: data_type.to_owned(),
                },
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to parse request: {0}")]
    RequestParsingError(#[from] serde_json::Error),
    #[error("expected a resource of type \"event\", got {0:?}")]
    InvalidResourceType(String),
    #[error("event submitted without an id")]
    MissingEventName,
    #[error("Given request body was invalid.")]
    MissingKey,
    #[error("{detail}")]
    RequestBodyError { status: StatusCode, detail: String },

    #[error("{0}")]
    ResponseEncodingError(serde_json::Error),
}

impl ApiError {
    /// Label used when counting rejected requests.
    pub fn cause(&self) -> &'static str {
        match self {
            ApiError::RequestParsingError(_) => "malformed_body",
            ApiError::InvalidResourceType(_) => "invalid_resource_type",
            ApiError::MissingEventName => "missing_event",
            ApiError::MissingKey => "missing_key",
            ApiError::RequestBodyError { .. } => "unreadable_body",
            ApiError::ResponseEncodingError(_) => "response_encoding",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RequestParsingError(_)
            | ApiError::InvalidResourceType(_)
            | ApiError::MissingEventName
            | ApiError::MissingKey => StatusCode::BAD_REQUEST,

            ApiError::RequestBodyError { status, .. } => *status,

            ApiError::ResponseEncodingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::RequestBodyError {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let title = if status.is_server_error() {
            INTERNAL_ERROR_TITLE
        } else {
            VALIDATION_ERROR_TITLE
        };

        let document = ErrorDocument::single(title, self.to_string(), status);
        match serde_json::to_vec(&document) {
            Ok(body) => jsonapi_response(status, body),
            Err(e) => {
                tracing::error!("failed to encode error document: {}", e);
                status.into_response()
            }
        }
    }
}

pub fn jsonapi_response(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)], body).into_response()
}
