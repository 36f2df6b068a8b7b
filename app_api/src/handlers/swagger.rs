use crate::handlers::auth::login_handler::*;
use crate::handlers::auth::logout_handler::*;
use crate::handlers::auth::register_handler::*;
use crate::handlers::auth::register_handler_dto::*;
use crate::handlers::common_handler::*;
use crate::handlers::friend_handler::*;
use crate::result::{ErrorBody, SuccessResponse};
use actix_web::{HttpResponse, Responder, get, web};
use biz_service::entitys::friendship_entity::FriendStatus;
use biz_service::manager::friend_ledger::{FriendView, RequestLists, RequestView, StatusView};
use common::errors::AppError;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        status,
        //账号
        auth_register,
        auth_login,
        auth_logout,
        //好友-管理
        friend_request_send,
        friend_request_accept,
        friend_request_reject,
        friend_list,
        friend_request_list,
        friend_status,
        friend_remove,
    ),
    components(schemas(
        AuthReq,
        AuthResp,
        StatusResp,
        SuccessResponse,
        ErrorBody,
        SendRequestDto,
        FriendTargetDto,
        FriendListResp,
        FriendView,
        RequestView,
        RequestLists,
        StatusView,
        FriendStatus,
    )),
    tags(
        (name = "Common", description = "服务状态"),
        (name = "auth", description = "注册、登录与注销"),
        (name = "好友-管理", description = "好友申请与好友关系")
    )
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[get("/openapi.json")]
async fn openapi_json() -> Result<impl Responder, AppError> {
    let body = ApiDoc::openapi().to_json()?;
    Ok(HttpResponse::Ok().content_type("application/json").body(body))
}
