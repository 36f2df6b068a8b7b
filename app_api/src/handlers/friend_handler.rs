use crate::handlers::common_handler::post_resource;
use crate::result::{ErrorBody, Payload, SuccessResponse, payload, result_data, result_success};
use actix_web::{Responder, web};
use biz_service::manager::friend_ledger::{FriendLedger, FriendView, RequestLists, StatusView};
use biz_service::manager::user_manager_auth::AuthUser;
use common::errors::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(post_resource("/friend/request/send", friend_request_send));
    cfg.service(post_resource("/friend/request/accept", friend_request_accept));
    cfg.service(post_resource("/friend/request/reject", friend_request_reject));
    cfg.service(post_resource("/friend/request/list", friend_request_list));
    cfg.service(post_resource("/friend/list", friend_list));
    cfg.service(post_resource("/friend/status", friend_status));
    cfg.service(post_resource("/friend/remove", friend_remove));
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SendRequestDto {
    /// 目标用户 id
    pub to_user_id: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FriendTargetDto {
    /// 对方用户 id
    pub friend_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FriendListResp {
    pub friends: Vec<FriendView>,
}

#[utoipa::path(
    post,
    path = "/friend/request/send",
    tag = "好友-管理",
    summary = "发送好友申请",
    request_body = SendRequestDto,
    responses(
        (status = 200, description = "成功（对方已申请时双方直接成为好友）", body = SuccessResponse),
        (status = 404, description = "目标用户不存在", body = ErrorBody),
        (status = 409, description = "已存在申请", body = ErrorBody),
        (status = 422, description = "不能向自己申请", body = ErrorBody),
    )
)]
pub async fn friend_request_send(
    ledger: web::Data<FriendLedger>,
    user: web::ReqData<AuthUser>,
    body: Payload<SendRequestDto>,
) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    ledger.send_request(&user, &dto.to_user_id).await?;
    Ok(web::Json(result_success("Friend request sent")))
}

#[utoipa::path(
    post,
    path = "/friend/request/accept",
    tag = "好友-管理",
    summary = "接受好友申请",
    request_body = FriendTargetDto,
    responses(
        (status = 200, description = "成功", body = SuccessResponse),
        (status = 412, description = "没有来自该用户的待处理申请", body = ErrorBody),
    )
)]
pub async fn friend_request_accept(
    ledger: web::Data<FriendLedger>,
    user: web::ReqData<AuthUser>,
    body: Payload<FriendTargetDto>,
) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    ledger.accept_request(&user, &dto.friend_id).await?;
    Ok(web::Json(result_success("Friend request accepted")))
}

#[utoipa::path(
    post,
    path = "/friend/request/reject",
    tag = "好友-管理",
    summary = "拒绝好友申请",
    request_body = FriendTargetDto,
    responses(
        (status = 200, description = "成功", body = SuccessResponse),
        (status = 412, description = "没有来自该用户的待处理申请", body = ErrorBody),
    )
)]
pub async fn friend_request_reject(
    ledger: web::Data<FriendLedger>,
    user: web::ReqData<AuthUser>,
    body: Payload<FriendTargetDto>,
) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    ledger.reject_request(&user, &dto.friend_id).await?;
    Ok(web::Json(result_success("Friend request rejected")))
}

#[utoipa::path(
    post,
    path = "/friend/list",
    tag = "好友-管理",
    summary = "好友列表",
    responses((status = 200, description = "好友列表，按用户名排序", body = FriendListResp))
)]
pub async fn friend_list(ledger: web::Data<FriendLedger>, user: web::ReqData<AuthUser>) -> Result<impl Responder, AppError> {
    let friends = ledger.get_friends(&user).await?;
    Ok(web::Json(result_data(FriendListResp { friends })?))
}

#[utoipa::path(
    post,
    path = "/friend/request/list",
    tag = "好友-管理",
    summary = "收到与发出的申请",
    responses((status = 200, description = "申请列表", body = RequestLists))
)]
pub async fn friend_request_list(ledger: web::Data<FriendLedger>, user: web::ReqData<AuthUser>) -> Result<impl Responder, AppError> {
    let lists = ledger.get_requests(&user).await?;
    Ok(web::Json(result_data(lists)?))
}

#[utoipa::path(
    post,
    path = "/friend/status",
    tag = "好友-管理",
    summary = "查看与某用户的申请状态",
    request_body = FriendTargetDto,
    responses(
        (status = 200, description = "申请状态", body = StatusView),
        (status = 410, description = "与该用户没有任何申请", body = ErrorBody),
    )
)]
pub async fn friend_status(
    ledger: web::Data<FriendLedger>,
    user: web::ReqData<AuthUser>,
    body: Payload<FriendTargetDto>,
) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    let view = ledger.view_status(&user, &dto.friend_id).await?;
    Ok(web::Json(result_data(view)?))
}

#[utoipa::path(
    post,
    path = "/friend/remove",
    tag = "好友-管理",
    summary = "删除好友 / 撤回申请",
    request_body = FriendTargetDto,
    responses(
        (status = 200, description = "成功", body = SuccessResponse),
        (status = 410, description = "与该用户没有任何申请", body = ErrorBody),
    )
)]
pub async fn friend_remove(
    ledger: web::Data<FriendLedger>,
    user: web::ReqData<AuthUser>,
    body: Payload<FriendTargetDto>,
) -> Result<impl Responder, AppError> {
    let dto = payload(body);
    ledger.remove_friendship(&user, &dto.friend_id).await?;
    Ok(web::Json(result_success("Friend removed")))
}
