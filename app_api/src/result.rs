use actix_web::dev::Payload as RequestPayload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use common::errors::AppError;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use utoipa::ToSchema;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// 请求体：按 Content-Type 选择 x-www-form-urlencoded，其余按 JSON 解析
pub struct Payload<T>(pub T);

impl<T: DeserializeOwned + 'static> FromRequest for Payload<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut RequestPayload) -> Self::Future {
        if req.content_type() == FORM_CONTENT_TYPE {
            let fut = web::Form::<T>::from_request(req, payload);
            Box::pin(async move { Ok(Payload(fut.await?.into_inner())) })
        } else {
            let fut = web::Json::<T>::from_request(req, payload);
            Box::pin(async move { Ok(Payload(fut.await?.into_inner())) })
        }
    }
}

pub fn payload<T>(body: Payload<T>) -> T {
    body.0
}

/// `{"success": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: String,
}

/// `{"error": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

pub fn result_success(msg: &str) -> Value {
    serde_json::json!({ "success": msg })
}

pub fn result_data<T: Serialize + Debug>(data: T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(data)?)
}

/// Json / Form 解析失败统一返回 `{"error": ...}`
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| AppError::Validation(err.to_string()).into()));
    cfg.app_data(web::FormConfig::default().error_handler(|err, _| AppError::Validation(err.to_string()).into()));
}
