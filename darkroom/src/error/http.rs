use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tokio::sync::mpsc::error::SendError;

/// Errors surfaced to HTTP clients posting scanned payloads.
#[derive(Debug)]
pub enum HTTPResponseError {
    /// Body was empty or whitespace only. Nothing to classify.
    EmptyPayload,
    /// The payload processor is gone, the channel to it is closed.
    ChannelClosed,
}

impl std::fmt::Display for HTTPResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HTTPResponseError::EmptyPayload => write!(f, "Empty payload."),
            HTTPResponseError::ChannelClosed => write!(f, "Payload processor is not running."),
        }
    }
}

impl ResponseError for HTTPResponseError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            HTTPResponseError::EmptyPayload => StatusCode::BAD_REQUEST,
            HTTPResponseError::ChannelClosed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SendError<String>> for HTTPResponseError {
    fn from(_: SendError<String>) -> Self {
        HTTPResponseError::ChannelClosed
    }
}
