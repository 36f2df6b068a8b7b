use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use deadpool_redis::PoolError;
use deadpool_redis::redis::RedisError;
use log::error;
use mongodb::error::Error as MongoError;
use serde::Serialize;
use std::io;
use thiserror::Error;

/// HTTP 错误响应结构 `{"error": "..."}`
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// 存储层错误
#[derive(Debug, Error)]
pub enum RepoError {
    /// 唯一约束冲突（Mongo 11000 / 内存存储重复 key）
    #[error("unique constraint violated")]
    Duplicate,
    #[error("MongoDB error: {0}")]
    Mongo(#[from] MongoError),
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("Redis pool error: {0}")]
    RedisPool(#[from] PoolError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 好友业务错误 ====
    #[error("you cannot send a friend request to yourself")]
    SelfRequest,
    #[error("user does not exist")]
    UnknownTarget,
    #[error("you already have a request with this user")]
    DuplicateRequest,
    #[error("you have no active request from this user")]
    NoSuchRequest,
    #[error("you have no requests with this user")]
    NoRelationship,

    // ==== 请求 / 认证错误 ====
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("user already exists")]
    UsernameTaken,
    #[error("bad request: {0}")]
    Validation(String),

    // ==== 系统错误 ====
    #[error("MongoDB error: {0}")]
    Mongo(#[from] MongoError),
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("Redis pool error: {0}")]
    RedisPoolError(#[from] PoolError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Internal server error")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Mongo(e) => AppError::Mongo(e),
            RepoError::Redis(e) => AppError::Redis(e),
            RepoError::RedisPool(e) => AppError::RedisPoolError(e),
            RepoError::Json(e) => AppError::Json(e),
            RepoError::Duplicate => AppError::Internal("unexpected unique constraint violation".to_string()),
        }
    }
}
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::SelfRequest => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownTarget => StatusCode::NOT_FOUND,
            AppError::DuplicateRequest => StatusCode::CONFLICT,
            AppError::NoSuchRequest => StatusCode::PRECONDITION_FAILED,
            AppError::NoRelationship => StatusCode::GONE,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredentials | AppError::UsernameTaken | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{:?}", self);
            "Service error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorResponse { error: msg })
    }
}
