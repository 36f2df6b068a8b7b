use crate::handlers::auth::register_handler_dto::{AuthReq, AuthResp};
use crate::handlers::common_handler::post_resource;
use crate::result::{ErrorBody, Payload, payload};
use actix_web::{Responder, web, web::ServiceConfig};
use biz_service::manager::user_manager_auth::{UserManagerAuth, UserManagerAuthOpt};
use common::errors::AppError;
use validator::Validate;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(post_resource("/auth/register", auth_register));
}

/// 用户注册
///
/// 注册成功后直接返回登录 token
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = AuthReq,
    responses(
        (status = 200, description = "注册成功", body = AuthResp),
        (status = 400, description = "参数错误或用户名已存在", body = ErrorBody),
    ),
    tag = "auth"
)]
pub async fn auth_register(auth: web::Data<UserManagerAuth>, body: Payload<AuthReq>) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    dto.validate()?;
    let login = auth.register(&dto.username, &dto.password).await?;
    Ok(web::Json(AuthResp::new("User registered successfully", login)))
}
