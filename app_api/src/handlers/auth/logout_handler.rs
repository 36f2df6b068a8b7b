use crate::handlers::common_handler::post_resource;
use crate::result::{SuccessResponse, result_success};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, Responder, web, web::ServiceConfig};
use biz_service::manager::user_manager_auth::{UserManagerAuth, UserManagerAuthOpt};
use common::errors::AppError;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(post_resource("/auth/logout", auth_logout));
}

/// 注销当前 token，未携带 token 也返回成功
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "注销成功", body = SuccessResponse),
    ),
    tag = "auth"
)]
pub async fn auth_logout(auth: web::Data<UserManagerAuth>, req: HttpRequest) -> Result<impl Responder, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = token {
        auth.logout(token).await?;
    }
    Ok(web::Json(result_success("Logged out successfully")))
}
