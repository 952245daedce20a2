use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;

/// Body returned for every failed request.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

pub fn build_error_response(status_code: StatusCode, message: String) -> HttpResponse {
    let error_response = ErrorResponse {
        code: status_code.as_u16(),
        message,
    };
    HttpResponse::build(status_code).json(error_response)
}

/// Writes an error followed by every cause in its source chain.
pub fn error_chain_fmt(
    e: &dyn std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}")?;

    let mut current = e.source();
    while let Some(cause) = current {
        // `{:#?}` asks for Debug on each cause, plain `{:?}` keeps Display
        if f.alternate() {
            writeln!(f, "Caused by:\n\t{cause:?}")?;
        } else {
            writeln!(f, "Caused by:\n\t{cause}")?;
        }
        current = cause.source();
    }
    Ok(())
}

/// Message-only success body, e.g. `{"message": "Like added"}`.
pub fn message_response(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": message }))
}
