//! Classification of transport failures and non-success statuses.
//!
//! | outcome                | error                                    |
//! |------------------------|------------------------------------------|
//! | timeout                | `Connection { failure: Timeout }`        |
//! | 401                    | `Unauthorized`                           |
//! | 404                    | `NotFound`                               |
//! | other 4xx              | `Validation` with field-grouped messages |
//! | 5xx                    | `Connection { failure: Server }`         |
//! | anything else          | `Transport`                              |

use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::ports::ApiError;
use crate::domain::{ConnectionFailure, FieldErrors};

/// Field used for rejection bodies that are not a field map.
pub(super) const DETAIL_FIELD: &str = "detail";

pub(super) fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::connection(ConnectionFailure::Timeout)
    } else if error.is_decode() {
        ApiError::decode(error.to_string())
    } else if error.is_builder() {
        ApiError::invalid_request(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(detail_message(status, body)),
        StatusCode::NOT_FOUND => ApiError::not_found(detail_message(status, body)),
        _ if status.is_server_error() => ApiError::connection(ConnectionFailure::Server {
            status: status.as_u16(),
        }),
        _ if status.is_client_error() => ApiError::validation(parse_field_errors(status, body)),
        _ => ApiError::transport(detail_message(status, body)),
    }
}

/// Field-grouped messages from a 4xx body.
///
/// Bodies that are not a field map are kept under [`DETAIL_FIELD`] so the
/// caller always has something to show.
pub(super) fn parse_field_errors(status: StatusCode, body: &[u8]) -> FieldErrors {
    if let Some(errors) = serde_json::from_slice(body)
        .ok()
        .as_ref()
        .and_then(FieldErrors::from_json)
        .filter(|errors| !errors.is_empty())
    {
        return errors;
    }
    let mut errors = FieldErrors::new();
    errors.push(DETAIL_FIELD, detail_message(status, body));
    errors
}

#[derive(Deserialize)]
struct DetailDto {
    #[serde(alias = "message", alias = "error")]
    detail: String,
}

/// Human-readable reason: the body's `detail`/`message`/`error`, otherwise a
/// compact preview of the body, otherwise the status line.
fn detail_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(DetailDto { detail }) = serde_json::from_slice::<DetailDto>(body) {
        return detail;
    }
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
