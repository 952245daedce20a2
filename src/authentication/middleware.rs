use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Next;
use actix_web::{HttpMessage, web};

use crate::authentication::{Actor, JwtKeys};
use crate::utils::build_error_response;

pub async fn reject_anonymous_users(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let actor = authenticate(&req)?;
    req.extensions_mut().insert(actor);
    next.call(req).await
}

pub async fn reject_non_admin_users(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let actor = authenticate(&req)?;

    if !actor.is_admin() {
        return Err(reject(StatusCode::FORBIDDEN, "Admin privileges required"));
    }

    req.extensions_mut().insert(actor);
    next.call(req).await
}

fn authenticate(req: &ServiceRequest) -> Result<Actor, actix_web::Error> {
    let keys = req.app_data::<web::Data<JwtKeys>>().ok_or_else(|| {
        tracing::error!("JwtKeys missing from application data");
        reject(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
    })?;

    let token = bearer_token(req)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "User has not logged in"))?;

    keys.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected bearer token");
        reject(StatusCode::UNAUTHORIZED, &e.to_string())
    })
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn reject(status_code: StatusCode, msg: &str) -> actix_web::Error {
    let response = build_error_response(status_code, msg.to_string());
    InternalError::from_response(anyhow::anyhow!(msg.to_string()), response).into()
}
