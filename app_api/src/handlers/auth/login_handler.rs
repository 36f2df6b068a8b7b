use crate::handlers::auth::register_handler_dto::{AuthReq, AuthResp};
use crate::handlers::common_handler::post_resource;
use crate::result::{ErrorBody, Payload, payload};
use actix_web::{Responder, web, web::ServiceConfig};
use biz_service::manager::user_manager_auth::{UserManagerAuth, UserManagerAuthOpt};
use common::errors::AppError;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(post_resource("/auth/login", auth_login));
}

/// 用户登录
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = AuthReq,
    responses(
        (status = 200, description = "登录成功", body = AuthResp),
        (status = 400, description = "用户名或密码错误", body = ErrorBody),
        (status = 500, description = "服务器错误", body = ErrorBody),
    ),
    tag = "auth"
)]
pub async fn auth_login(auth: web::Data<UserManagerAuth>, body: Payload<AuthReq>) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    let login = auth.login(&dto.username, &dto.password).await?;
    Ok(web::Json(AuthResp::new("Login successful", login)))
}
