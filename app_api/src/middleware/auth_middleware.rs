use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
};
use biz_service::manager::user_manager_auth::{UserManagerAuth, UserManagerAuthOpt};
use common::errors::AppError;
use futures_util::future::{LocalBoxFuture, Ready, ok};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

/// 无需登录的路径前缀
const PUBLIC_PREFIXES: [&str; 3] = ["/auth/", "/status", "/openapi.json"];

/// 认证中间件
///
/// 解析 `Authorization: Bearer <token>`，成功后把 `AuthUser` 放入请求扩展，
/// handler 通过 `web::ReqData<AuthUser>` 取得当前用户。
pub struct AuthMiddleware {
    auth: Arc<UserManagerAuth>,
}

impl AuthMiddleware {
    pub fn new(auth: Arc<UserManagerAuth>) -> Self {
        Self { auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService { service: Rc::new(service), auth: self.auth.clone() })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    auth: Arc<UserManagerAuth>,
}

fn is_public(path: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token.to_string()) }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let auth = self.auth.clone();
        Box::pin(async move {
            if is_public(req.path()) {
                let res = srv.call(req).await?;
                return Ok(res.map_into_left_body());
            }
            let resolved = match bearer_token(&req) {
                Some(token) => auth.authenticate(&token).await.map_err(AppError::from),
                None => Err(AppError::Unauthenticated),
            };
            match resolved {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => Ok(req.into_response(e.error_response()).map_into_right_body()),
            }
        })
    }
}
