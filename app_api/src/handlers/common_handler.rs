use actix_web::{FromRequest, Handler, HttpResponse, Resource, Responder, get, web};
use common::errors::AppError;
use serde::Serialize;
use utoipa::ToSchema;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(status);
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResp {
    pub success: bool,
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "Common",
    summary = "Get the status of the service",
    responses(
        (status = 200, description = "Service is up", body = StatusResp)
    )
)]
#[get("/status")]
pub async fn status() -> Result<impl Responder, AppError> {
    Ok(web::Json(StatusResp { success: true }))
}

/// 仅接受 POST 的资源，其他方法返回 405
pub fn post_resource<F, Args>(path: &str, handler: F) -> Resource
where
    F: Handler<Args>,
    Args: FromRequest + 'static,
    F::Output: Responder + 'static,
{
    web::resource(path).route(web::post().to(handler)).default_service(web::to(method_not_allowed))
}

async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
