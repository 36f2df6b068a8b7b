use crate::store::{SessionStore, UserStore};
use async_trait::async_trait;
use common::UserId;
use common::errors::{AppError, RepoError};
use std::sync::Arc;
use thiserror::Error;

/// 已认证的请求方，由认证中间件解析后显式传入业务调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
}

/// 登录 / 注册结果
#[derive(Debug, Clone)]
pub struct LoginToken {
    pub user_id: UserId,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username already exists")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid account data: {0}")]
    Validation(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::UsernameTaken => AppError::UsernameTaken,
            AccountError::InvalidCredentials => AppError::InvalidCredentials,
            AccountError::Unauthenticated => AppError::Unauthenticated,
            AccountError::Validation(msg) => AppError::Validation(msg),
            AccountError::Repo(e) => e.into(),
        }
    }
}

pub type AccountResult<T> = Result<T, AccountError>;

/// 账号与登录会话管理
pub struct UserManagerAuth {
    pub(crate) users: Arc<dyn UserStore>,
    pub(crate) sessions: Arc<dyn SessionStore>,
    /// 密码摘要混淆 key
    pub(crate) md5_key: String,
}

impl UserManagerAuth {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>, md5_key: impl Into<String>) -> Self {
        Self { users, sessions, md5_key: md5_key.into() }
    }
}

#[async_trait]
pub trait UserManagerAuthOpt: Send + Sync {
    /// 注册新用户，成功后直接登录
    async fn register(&self, username: &str, password: &str) -> AccountResult<LoginToken>;
    /// 用户名密码登录，返回新 token
    async fn login(&self, username: &str, password: &str) -> AccountResult<LoginToken>;
    /// 注销 token，token 不存在也视为成功
    async fn logout(&self, token: &str) -> AccountResult<()>;
    /// 根据 token 解析当前用户
    async fn authenticate(&self, token: &str) -> AccountResult<AuthUser>;
}
