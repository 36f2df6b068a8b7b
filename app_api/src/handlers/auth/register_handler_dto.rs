use biz_service::manager::user_manager_auth::LoginToken;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 注册 / 登录请求
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct AuthReq {
    /// 用户名（1-255 个字符）
    #[schema(example = "alice")]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[schema(example = "secret")]
    #[validate(length(min = 1, message = "password.empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResp {
    pub success: String,
    #[schema(example = "0c5e1c9d2b7e4d3f9a6b1e2c3d4f5a6b")]
    pub token: String,
    pub id: String,
}

impl AuthResp {
    pub fn new(msg: &str, login: LoginToken) -> Self {
        Self { success: msg.to_string(), token: login.token, id: login.user_id }
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    common::util::validate::validate_username(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_req_validation() {
        let ok = AuthReq { username: "alice".into(), password: "pw".into() };
        assert!(ok.validate().is_ok());
        let empty_name = AuthReq { username: "".into(), password: "pw".into() };
        assert!(empty_name.validate().is_err());
        let empty_pwd = AuthReq { username: "alice".into(), password: "".into() };
        assert!(empty_pwd.validate().is_err());
    }
}
